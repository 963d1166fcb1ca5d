//! Deterministic tactics rules shared by the runtime and offline tools.
//!
//! `tactics-core` defines the canonical rules (units, rosters, turn phases,
//! combat formulas, targeting, flee planning and AI decisions) and exposes
//! pure APIs with no I/O. All state mutation flows through
//! [`engine::GameEngine`]; the host supplies navigation, occlusion and
//! randomness through the oracles in [`env`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod flee;
pub mod snapshot;
pub mod state;
pub mod targeting;

pub use ai::{AiDecision, HoldReason, TargetAssignment, assign_targets, plan_unit};
#[cfg(feature = "serde")]
pub use combat::combat_log_root;
pub use combat::{
    AttackOutcome, CombatEvent, CombatLog, HitRule, range_line_of_sight_odds, resolve_attack,
    self_health_hit_chance,
};
pub use config::RulesConfig;
pub use engine::{ActionResolution, GameEngine, RulesError, TurnError};
pub use env::{
    Env, GameEnv, NavigationOracle, OcclusionOracle, OracleError, PcgRng, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::GameEvent;
pub use flee::{FleeCandidate, FleeError, find_flee_point};
pub use snapshot::{
    CharacterData, LevelData, SaveType, Snapshot, SpawnPoints, export_state, import_state,
};
pub use state::{
    ActionHandle, GameState, PendingAction, PendingKind, Pickup, PickupKind, PlayerPhase, Position,
    Roster, Selection, StateError, Team, TurnOwner, TurnPhase, TurnState, Unit, UnitFlags, UnitId,
    UnitStats,
};
pub use targeting::find_closest;
