//! Data-driven content definitions and loaders.
//!
//! This crate houses the static inputs of a skirmish and the loaders that
//! read them from disk:
//! - Rules tuning (data-driven via TOML)
//! - Scenarios: arena bounds, obstacles, spawn points, units and pickups
//!   (data-driven via RON)
//!
//! Content is consumed by the runtime and the client; it only reaches
//! [`tactics_core::GameState`] through [`Scenario::build_state`].

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{ArenaBounds, Obstacle, Scenario, ScenarioUnit};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LoadResult, RulesLoader, ScenarioLoader};
