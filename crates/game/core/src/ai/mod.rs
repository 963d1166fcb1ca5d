//! AI turn decisions.
//!
//! Pure planning over rosters: which player each AI unit hunts, and what it
//! does with its turn. Applying the decisions (moves, two-phase attacks and
//! heals) is left to the engine, driven by the runtime orchestrator.
mod planner;
mod targets;

pub use planner::{AiDecision, HoldReason, plan_unit};
pub use targets::{TargetAssignment, assign_targets};
