use crate::config::RulesConfig;
use crate::env::NavigationOracle;
use crate::flee::find_flee_point;
use crate::state::{Position, Roster, Unit, UnitId};
use crate::targeting::find_closest;

/// What an AI unit does with its turn.
#[derive(Clone, Debug, PartialEq)]
pub enum AiDecision {
    /// Target is within attack range.
    Attack { target: UnitId },
    /// Target is within `movement + attack` range: close in to half attack
    /// range. Moving this way spends the turn.
    Approach {
        target: UnitId,
        destination: Position,
        path: Vec<Position>,
    },
    /// Target is farther away: walk the full movement range toward it.
    Advance {
        target: UnitId,
        destination: Position,
        path: Vec<Position>,
    },
    /// Health is below the flee threshold. `destination` is `None` when no
    /// flee point exists and the unit heals where it stands.
    FleeAndHeal {
        threat: Option<UnitId>,
        destination: Option<Position>,
        path: Vec<Position>,
    },
    Hold { reason: HoldReason },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HoldReason {
    NoTarget,
    NoPath,
}

impl AiDecision {
    pub fn target(&self) -> Option<UnitId> {
        match self {
            AiDecision::Attack { target }
            | AiDecision::Approach { target, .. }
            | AiDecision::Advance { target, .. } => Some(*target),
            AiDecision::FleeAndHeal { threat, .. } => *threat,
            AiDecision::Hold { .. } => None,
        }
    }
}

/// Decides the next step for `unit` against the player roster.
///
/// The unit's assigned target is used while it is alive; otherwise the
/// nearest player in the whole roster stands in.
pub fn plan_unit(
    unit: &Unit,
    players: &Roster,
    config: &RulesConfig,
    nav: &(impl NavigationOracle + ?Sized),
) -> AiDecision {
    let target = unit
        .target
        .and_then(|id| players.get(id))
        .filter(|p| !p.is_dead())
        .or_else(|| {
            find_closest(unit.position, players.as_slice(), config.max_search_radius)
                .map(|index| &players.as_slice()[index])
        });

    if unit.health() < config.flee_threshold(unit.max_health()) {
        return plan_flee(unit, target, config, nav);
    }

    let Some(target) = target else {
        return AiDecision::Hold {
            reason: HoldReason::NoTarget,
        };
    };

    let distance = unit.distance_to(target);
    if distance <= unit.attack_range {
        return AiDecision::Attack { target: target.id };
    }

    let approaching = distance <= unit.movement_range + unit.attack_range;
    let travel = if approaching {
        (distance - unit.attack_range * 0.5).min(unit.movement_range)
    } else {
        unit.movement_range
    };
    let destination = unit.position.step_towards(target.position, travel.max(0.0));

    let Some(path) = nav.calculate_path(unit.position, destination) else {
        return AiDecision::Hold {
            reason: HoldReason::NoPath,
        };
    };

    if approaching {
        AiDecision::Approach {
            target: target.id,
            destination,
            path,
        }
    } else {
        AiDecision::Advance {
            target: target.id,
            destination,
            path,
        }
    }
}

fn plan_flee(
    unit: &Unit,
    threat: Option<&Unit>,
    config: &RulesConfig,
    nav: &(impl NavigationOracle + ?Sized),
) -> AiDecision {
    let hold = AiDecision::FleeAndHeal {
        threat: threat.map(|t| t.id),
        destination: None,
        path: Vec::new(),
    };
    let Some(threat) = threat else {
        return hold;
    };

    let Ok(candidate) = find_flee_point(
        unit.position,
        threat.position,
        unit.movement_range,
        config.effective_flee_samples(),
        config.flee_snap_radius,
        nav,
    ) else {
        return hold;
    };

    match nav.calculate_path(unit.position, candidate.point) {
        Some(path) => AiDecision::FleeAndHeal {
            threat: Some(threat.id),
            destination: Some(candidate.point),
            path,
        },
        None => hold,
    }
}
