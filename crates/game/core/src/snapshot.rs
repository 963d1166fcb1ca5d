//! Save snapshots.
//!
//! A [`Snapshot`] is the persisted form of a level session: per-team
//! character records, turn bookkeeping and pickups. Pending two-phase actions
//! are never saved; a unit that was busy comes back idle.

use crate::combat::CombatLog;
use crate::state::{
    GameState, Pickup, PlayerPhase, Position, StateError, Team, TurnOwner, TurnPhase, TurnState,
    Unit, UnitFlags, UnitId, UnitStats,
};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SaveType {
    #[default]
    Manual,
    Auto,
}

/// Turn bookkeeping in its saved owner/phase form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelData {
    pub level_index: u32,
    pub turn_count: u32,
    pub turn_owner: TurnOwner,
    pub player_phase: PlayerPhase,
    /// Set once the game has ended.
    #[cfg_attr(feature = "serde", serde(default))]
    pub winner: Option<Team>,
}

impl LevelData {
    pub fn from_turn(level_index: u32, turn: &TurnState) -> Self {
        Self {
            level_index,
            turn_count: turn.turn_count,
            turn_owner: turn.phase.owner().unwrap_or(TurnOwner::Player),
            player_phase: turn.phase.player_phase(),
            winner: turn.phase.winner(),
        }
    }

    pub fn turn_state(&self) -> TurnState {
        let phase = match self.winner {
            Some(winner) => TurnPhase::GameOver { winner },
            None => TurnPhase::from_parts(self.turn_owner, self.player_phase),
        };
        TurnState::restored(phase, self.turn_count)
    }
}

/// One saved unit.
///
/// `position: None` places the unit on the next free spawn point of its team
/// at full health when the snapshot is restored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterData {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub position: Option<Position>,
    pub health: f32,
    pub stats: UnitStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: UnitFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<UnitId>,
}

impl CharacterData {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            team: unit.team,
            position: Some(unit.position),
            health: unit.health(),
            stats: unit.stats(),
            flags: unit.flags - UnitFlags::BUSY,
            target: unit.target,
        }
    }
}

/// Spawn points per team, in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoints {
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Vec<Position>,
}

impl SpawnPoints {
    pub fn for_team(&self, team: Team) -> &[Position] {
        match team {
            Team::Player => &self.player,
            Team::Ai => &self.ai,
        }
    }
}

// Two units closer than this share a spawn point.
const SPAWN_OCCUPIED_RADIUS: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub save_name: String,
    pub save_type: SaveType,
    pub play_time_secs: u64,
    pub level: LevelData,
    pub players: Vec<CharacterData>,
    pub ai: Vec<CharacterData>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickups: Vec<Pickup>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat_log: CombatLog,
    pub seed: u64,
    pub nonce: u64,
}

impl Snapshot {
    pub fn with_name(mut self, save_name: impl Into<String>) -> Self {
        self.save_name = save_name.into();
        self
    }

    pub fn with_save_type(mut self, save_type: SaveType) -> Self {
        self.save_type = save_type;
        self
    }

    pub fn with_play_time(mut self, play_time_secs: u64) -> Self {
        self.play_time_secs = play_time_secs;
        self
    }

    /// Fresh-start copy: every unit back to a spawn point with clean flags
    /// and no target, turn zero, pickups ready, empty combat log.
    pub fn cleared(&self) -> Self {
        let clear = |records: &[CharacterData]| -> Vec<CharacterData> {
            records
                .iter()
                .map(|record| CharacterData {
                    position: None,
                    flags: UnitFlags::empty(),
                    target: None,
                    ..record.clone()
                })
                .collect()
        };

        Self {
            save_name: self.save_name.clone(),
            save_type: self.save_type,
            play_time_secs: 0,
            level: LevelData::from_turn(self.level.level_index, &TurnState::new()),
            players: clear(&self.players),
            ai: clear(&self.ai),
            pickups: self
                .pickups
                .iter()
                .map(|pickup| Pickup {
                    ready_at_turn: 0,
                    ..pickup.clone()
                })
                .collect(),
            combat_log: CombatLog::new(),
            seed: self.seed,
            nonce: 0,
        }
    }

    pub fn unit_count(&self) -> usize {
        self.players.len() + self.ai.len()
    }
}

/// Captures the persisted view of `state`.
pub fn export_state(state: &GameState, level_index: u32) -> Snapshot {
    Snapshot {
        save_name: String::new(),
        save_type: SaveType::Manual,
        play_time_secs: 0,
        level: LevelData::from_turn(level_index, &state.turn),
        players: state.players.iter().map(CharacterData::from_unit).collect(),
        ai: state.ai.iter().map(CharacterData::from_unit).collect(),
        pickups: state.pickups.clone(),
        combat_log: state.combat_log.clone(),
        seed: state.seed,
        nonce: state.nonce,
    }
}

/// Rebuilds a state from a snapshot.
///
/// Records with a position keep it (health clamped to the saved stats);
/// positioned records with no health left are dropped. Records without a
/// position take the next free spawn point of their team at full health.
/// Units keep their saved roster order.
///
/// # Errors
///
/// `StateError::NoFreeSpawnPoint` when a team runs out of spawn points, and
/// the roster errors for duplicate ids or records filed under the wrong team.
pub fn import_state(snapshot: &Snapshot, spawns: &SpawnPoints) -> Result<GameState, StateError> {
    let mut state = GameState::new(snapshot.seed);
    state.nonce = snapshot.nonce;
    state.turn = snapshot.level.turn_state();
    state.pickups = snapshot.pickups.clone();
    state.combat_log = snapshot.combat_log.clone();

    let rosters = [(Team::Player, &snapshot.players), (Team::Ai, &snapshot.ai)];

    // Every surviving saved position blocks spawns, whichever team holds it.
    let mut occupied: Vec<Position> = rosters
        .iter()
        .flat_map(|(_, records)| records.iter())
        .filter(|record| !is_dead(record))
        .filter_map(|record| record.position)
        .collect();

    for (team, records) in rosters {
        let mut free = spawns.for_team(team).iter().copied();
        for record in records {
            if record.team != team {
                return Err(StateError::TeamMismatch {
                    unit: record.id,
                    expected: team,
                    actual: record.team,
                });
            }
            if is_dead(record) {
                continue;
            }
            let spawn = match record.position {
                Some(_) => None,
                None => {
                    let point = free
                        .by_ref()
                        .find(|point| !is_occupied(&occupied, *point))
                        .ok_or_else(|| StateError::NoFreeSpawnPoint {
                            team,
                            name: record.name.clone(),
                        })?;
                    occupied.push(point);
                    Some(point)
                }
            };
            state.insert_unit(restore_unit(record, spawn))?;
        }
    }

    Ok(state)
}

/// A placed record with nothing left to restore. Unplaced records respawn
/// at full health.
fn is_dead(record: &CharacterData) -> bool {
    record.position.is_some() && record.health <= 0.0
}

fn restore_unit(record: &CharacterData, spawn: Option<Position>) -> Unit {
    let (position, health) = match (record.position, spawn) {
        (Some(position), _) => (position, record.health),
        (None, Some(spawn)) => (spawn, record.stats.max_health),
        (None, None) => (Position::ORIGIN, record.stats.max_health),
    };
    let mut unit = Unit::new(
        record.id,
        record.name.clone(),
        record.team,
        position,
        record.stats,
    )
    .with_health(health);
    unit.flags = record.flags - UnitFlags::BUSY;
    unit.target = record.target;
    unit
}

fn is_occupied(occupied: &[Position], point: Position) -> bool {
    occupied
        .iter()
        .any(|taken| taken.distance(point) < SPAWN_OCCUPIED_RADIUS)
}
