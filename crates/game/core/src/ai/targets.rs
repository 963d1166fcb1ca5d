use crate::config::RulesConfig;
use crate::state::{Roster, Unit, UnitId};
use crate::targeting::find_closest_in;

/// Target chosen for one AI unit during assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetAssignment {
    pub unit: UnitId,
    pub previous: Option<UnitId>,
    pub target: Option<UnitId>,
}

impl TargetAssignment {
    pub fn changed(&self) -> bool {
        self.previous != self.target
    }
}

/// Assigns a player target to every AI unit, in roster order.
///
/// A unit keeps a target that is still alive on the player roster (unless
/// `retarget_every_turn` is set). Otherwise it takes the nearest player from a
/// working pool. Targeted players leave the pool by id, but only while the
/// pool holds more than one unit, so the last player stays available to every
/// remaining AI unit. An empty pool leaves the unit untargeted.
pub fn assign_targets(ai: &Roster, players: &Roster, config: &RulesConfig) -> Vec<TargetAssignment> {
    let mut pool: Vec<&Unit> = players.iter().filter(|p| !p.is_dead()).collect();
    let mut assignments = Vec::with_capacity(ai.len());

    for unit in ai.iter() {
        let kept = unit
            .target
            .filter(|_| !config.retarget_every_turn)
            .filter(|id| players.get(*id).is_some_and(|p| !p.is_dead()));

        let target = kept.or_else(|| {
            find_closest_in(unit.position, pool.iter().copied(), config.max_search_radius)
                .map(|index| pool[index].id)
        });

        if let Some(id) = target {
            if pool.len() > 1 {
                pool.retain(|p| p.id != id);
            }
        }

        assignments.push(TargetAssignment {
            unit: unit.id,
            previous: unit.target,
            target,
        });
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Team, UnitStats};

    fn roster(team: Team, xs: &[(u32, f32)]) -> Roster {
        let mut roster = Roster::new(team);
        for &(id, x) in xs {
            roster
                .insert(Unit::new(
                    UnitId(id),
                    format!("u{id}"),
                    team,
                    Position::planar(x, 0.0),
                    UnitStats::default(),
                ))
                .unwrap();
        }
        roster
    }

    #[test]
    fn single_player_is_shared_by_every_ai_unit() {
        let ai = roster(Team::Ai, &[(1, 10.0), (2, 20.0), (3, 30.0)]);
        let players = roster(Team::Player, &[(9, 0.0)]);

        let assignments = assign_targets(&ai, &players, &RulesConfig::default());
        assert_eq!(assignments.len(), 3);
        assert!(assignments.iter().all(|a| a.target == Some(UnitId(9))));
    }

    #[test]
    fn targeted_players_leave_pool_while_others_remain() {
        let ai = roster(Team::Ai, &[(1, 1.0), (2, 2.0), (3, 3.0)]);
        let players = roster(Team::Player, &[(7, 0.0), (8, 10.0)]);

        let assignments = assign_targets(&ai, &players, &RulesConfig::default());
        let targets: Vec<_> = assignments.iter().map(|a| a.target).collect();
        assert_eq!(
            targets,
            vec![Some(UnitId(7)), Some(UnitId(8)), Some(UnitId(8))]
        );
    }

    #[test]
    fn empty_player_roster_leaves_units_untargeted() {
        let ai = roster(Team::Ai, &[(1, 1.0), (2, 2.0)]);
        let players = Roster::new(Team::Player);

        let assignments = assign_targets(&ai, &players, &RulesConfig::default());
        assert!(assignments.iter().all(|a| a.target.is_none()));
    }

    #[test]
    fn live_target_is_kept_and_dead_target_replaced() {
        let mut ai = roster(Team::Ai, &[(1, 0.0), (2, 0.0)]);
        ai.get_mut(UnitId(1)).unwrap().target = Some(UnitId(8));
        ai.get_mut(UnitId(2)).unwrap().target = Some(UnitId(99));
        let players = roster(Team::Player, &[(7, 1.0), (8, 50.0)]);

        let assignments = assign_targets(&ai, &players, &RulesConfig::default());
        assert_eq!(assignments[0].target, Some(UnitId(8)));
        assert!(!assignments[0].changed());
        assert_eq!(assignments[1].target, Some(UnitId(7)));
        assert!(assignments[1].changed());
    }

    #[test]
    fn retarget_every_turn_ignores_kept_targets() {
        let mut ai = roster(Team::Ai, &[(1, 0.0)]);
        ai.get_mut(UnitId(1)).unwrap().target = Some(UnitId(8));
        let players = roster(Team::Player, &[(7, 1.0), (8, 50.0)]);
        let config = RulesConfig {
            retarget_every_turn: true,
            ..RulesConfig::default()
        };

        let assignments = assign_targets(&ai, &players, &config);
        assert_eq!(assignments[0].target, Some(UnitId(7)));
    }
}
