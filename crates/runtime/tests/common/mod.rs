//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::future::pending;
use std::time::Duration;

use async_trait::async_trait;
use tactics_core::{ActionHandle, GameState, Position, Team, UnitId, UnitStats};
use tactics_runtime::{PresentationDriver, Runtime, RuntimeConfig};

pub const RIFLE: UnitStats = UnitStats::new(100.0, 25, 8.0, 10.0);
pub const BRAWLER: UnitStats = UnitStats::new(100.0, 25, 3.0, 10.0);

/// One player at the origin and one AI unit `gap` metres east.
pub fn duel(gap: f32) -> (GameState, UnitId, UnitId) {
    let mut state = GameState::new(4242);
    let player = state
        .spawn_unit(Team::Player, "Rifle", Position::ORIGIN, RIFLE)
        .unwrap();
    let ai = state
        .spawn_unit(Team::Ai, "Brawler", Position::planar(gap, 0.0), BRAWLER)
        .unwrap();
    (state, player, ai)
}

pub fn quick_config() -> RuntimeConfig {
    RuntimeConfig {
        move_timeout: Duration::from_millis(50),
        action_timeout: Duration::from_millis(50),
        ..RuntimeConfig::default()
    }
}

pub async fn start(state: GameState) -> Runtime {
    Runtime::builder()
        .config(quick_config())
        .initial_state(state)
        .build()
        .await
        .expect("runtime should start")
}

/// Presentation that never reports walks as finished.
pub struct StuckWalker;

#[async_trait]
impl PresentationDriver for StuckWalker {
    async fn movement_finished(&self, _unit: UnitId, _path: &[Position]) {
        pending::<()>().await
    }

    async fn action_ready(&self, _actor: UnitId, _handle: ActionHandle) {}
}

/// Presentation whose attack and heal animations never land.
pub struct FrozenAnimator;

#[async_trait]
impl PresentationDriver for FrozenAnimator {
    async fn movement_finished(&self, _unit: UnitId, _path: &[Position]) {}

    async fn action_ready(&self, _actor: UnitId, _handle: ActionHandle) {
        pending::<()>().await
    }
}
