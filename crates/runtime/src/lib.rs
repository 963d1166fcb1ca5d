//! Runtime orchestration for the deterministic tactics rules.
//!
//! This crate wires the rules engine, oracle access, repositories and worker
//! tasks into a cohesive runtime API. Consumers embed [`Runtime`] to drive
//! turns, subscribe to events, and issue player commands through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the runtime and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus, battle log and cues
//! - [`orchestrator`] runs AI turns against the presentation layer
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
//! - `workers` keeps the single-writer simulation task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod orchestrator;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{InstantPresentation, PresentationDriver, Result, RuntimeError, RuntimeHandle};
pub use events::{AnimationCue, AnimationSignal, BattleLog, Event, EventBus, Narrator, Topic};
pub use oracle::{ArenaNavigation, ObstacleField, OpenGround, OracleManager};
pub use orchestrator::{AiTurnReport, TurnOrchestrator};
pub use repository::{
    FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveRepository, SaveSummary, SavedGame,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
