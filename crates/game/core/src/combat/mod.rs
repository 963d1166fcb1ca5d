//! Combat resolution.
//!
//! Pure functions for hit chances and attack resolution. Nothing here touches
//! `GameState`; the engine feeds units in and appends the returned events.
//!
//! - `self_health_hit_chance`: AI rule, falls with the attacker's missing health
//! - `range_line_of_sight_odds`: player rule, line of sight with distance falloff
//! - `resolve_attack`: hit check and damage application

pub mod hit;
mod log;
pub mod odds;
pub mod result;

pub use hit::{HitRule, is_hit, self_health_hit_chance};
#[cfg(feature = "serde")]
pub use log::combat_log_root;
pub use log::CombatLog;
pub use odds::range_line_of_sight_odds;
pub use result::{AttackOutcome, CombatEvent, resolve_attack};
