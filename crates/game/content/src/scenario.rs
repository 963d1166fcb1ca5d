//! Scenario definitions.
//!
//! A scenario is the authored starting point of a level: the playable arena,
//! the obstacles that block sight and movement, where each team spawns, and
//! the units and pickups on the field.

use tactics_core::{
    CharacterData, GameState, LevelData, Pickup, Position, SaveType, Snapshot, SpawnPoints,
    StateError, Team, TurnState, UnitFlags, UnitId, UnitStats, import_state,
};

/// Axis-aligned playable area on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaBounds {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl ArenaBounds {
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_z..=self.max_z).contains(&point.z)
    }

    /// Nearest point inside the bounds.
    pub fn clamp(&self, point: Position) -> Position {
        Position::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y,
            point.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_z >= self.max_z
    }
}

/// Circular blocker on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Position,
    pub radius: f32,
}

impl Obstacle {
    pub const fn new(center: Position, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Position) -> bool {
        self.center.distance(point) < self.radius
    }
}

/// A unit placed by a scenario.
///
/// Units without a position are put on the next free spawn point of their
/// team.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioUnit {
    pub name: String,
    pub team: Team,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    pub stats: UnitStats,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_index: u32,
    pub seed: u64,
    pub arena: ArenaBounds,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<Obstacle>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawns: SpawnPoints,
    pub units: Vec<ScenarioUnit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickups: Vec<Pickup>,
}

impl Scenario {
    /// Fresh-start snapshot of the scenario: turn zero, full health, ids
    /// assigned in declaration order starting at 1.
    pub fn initial_snapshot(&self) -> Snapshot {
        let mut players = Vec::new();
        let mut ai = Vec::new();

        for (index, unit) in self.units.iter().enumerate() {
            let record = CharacterData {
                id: UnitId(index as u32 + 1),
                name: unit.name.clone(),
                team: unit.team,
                position: unit.position,
                health: unit.stats.max_health,
                stats: unit.stats,
                flags: UnitFlags::empty(),
                target: None,
            };
            match unit.team {
                Team::Player => players.push(record),
                Team::Ai => ai.push(record),
            }
        }

        Snapshot {
            save_name: self.name.clone(),
            save_type: SaveType::Auto,
            play_time_secs: 0,
            level: LevelData::from_turn(self.level_index, &TurnState::new()),
            players,
            ai,
            pickups: self.pickups.clone(),
            combat_log: Default::default(),
            seed: self.seed,
            nonce: 0,
        }
    }

    /// Builds the starting [`GameState`], resolving spawn points.
    pub fn build_state(&self) -> Result<GameState, StateError> {
        import_state(&self.initial_snapshot(), &self.spawns)
    }

    /// Like [`Scenario::build_state`] with the seed replaced.
    pub fn build_state_with_seed(&self, seed: u64) -> Result<GameState, StateError> {
        let mut snapshot = self.initial_snapshot();
        snapshot.seed = seed;
        import_state(&snapshot, &self.spawns)
    }

    pub fn team_size(&self, team: Team) -> usize {
        self.units.iter().filter(|unit| unit.team == team).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel() -> Scenario {
        Scenario {
            name: "duel".into(),
            level_index: 2,
            seed: 7,
            arena: ArenaBounds::new(-10.0, -10.0, 10.0, 10.0),
            obstacles: vec![Obstacle::new(Position::ORIGIN, 1.0)],
            spawns: SpawnPoints {
                player: vec![Position::planar(-5.0, 0.0), Position::planar(-5.0, 2.0)],
                ai: vec![Position::planar(5.0, 0.0)],
            },
            units: vec![
                ScenarioUnit {
                    name: "Knight".into(),
                    team: Team::Player,
                    position: None,
                    stats: UnitStats::new(100.0, 20, 6.0, 8.0),
                },
                ScenarioUnit {
                    name: "Scout".into(),
                    team: Team::Player,
                    position: Some(Position::planar(-5.0, 0.0)),
                    stats: UnitStats::new(60.0, 10, 9.0, 12.0),
                },
                ScenarioUnit {
                    name: "Brute".into(),
                    team: Team::Ai,
                    position: None,
                    stats: UnitStats::new(120.0, 15, 2.0, 6.0),
                },
            ],
            pickups: Vec::new(),
        }
    }

    #[test]
    fn ids_follow_declaration_order() {
        let snapshot = duel().initial_snapshot();
        assert_eq!(snapshot.players[0].id, UnitId(1));
        assert_eq!(snapshot.players[1].id, UnitId(2));
        assert_eq!(snapshot.ai[0].id, UnitId(3));
        assert_eq!(snapshot.level.level_index, 2);
    }

    #[test]
    fn unplaced_units_skip_occupied_spawns() {
        let state = duel().build_state().unwrap();

        // The scout already stands on the first player spawn.
        let knight = state.unit(UnitId(1)).unwrap();
        assert_eq!(knight.position, Position::planar(-5.0, 2.0));
        assert_eq!(knight.health(), 100.0);

        let brute = state.unit(UnitId(3)).unwrap();
        assert_eq!(brute.position, Position::planar(5.0, 0.0));
        assert_eq!(state.seed, 7);
    }

    #[test]
    fn missing_spawn_is_reported() {
        let mut scenario = duel();
        scenario.spawns.ai.clear();
        assert!(matches!(
            scenario.build_state(),
            Err(StateError::NoFreeSpawnPoint { team: Team::Ai, .. })
        ));
    }

    #[test]
    fn arena_clamps_to_bounds() {
        let arena = ArenaBounds::new(-10.0, -10.0, 10.0, 10.0);
        assert!(arena.contains(Position::planar(10.0, -10.0)));
        assert!(!arena.contains(Position::planar(10.5, 0.0)));
        assert_eq!(
            arena.clamp(Position::planar(15.0, -12.0)),
            Position::planar(10.0, -10.0)
        );
        assert!(!arena.is_empty());
        assert!(ArenaBounds::new(0.0, 0.0, 0.0, 5.0).is_empty());
    }
}
