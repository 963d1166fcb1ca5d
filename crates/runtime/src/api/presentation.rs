//! Asynchronous hooks into whatever plays the battle back.
//!
//! The rules never wait on animations. The [`TurnOrchestrator`] does: after
//! a move it waits for the walker to arrive, and after beginning an attack or
//! heal it waits until the animation reaches the frame where the effect lands.
//! Both waits are capped by the runtime's timeouts.
//!
//! [`TurnOrchestrator`]: crate::TurnOrchestrator
use async_trait::async_trait;

use tactics_core::{ActionHandle, Position, UnitId};

#[async_trait]
pub trait PresentationDriver: Send + Sync {
    /// Resolves once `unit` has finished walking `path`.
    async fn movement_finished(&self, unit: UnitId, path: &[Position]);

    /// Resolves once the action behind `handle` is ready to apply.
    async fn action_ready(&self, actor: UnitId, handle: ActionHandle);
}

/// Headless driver: everything arrives and lands immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPresentation;

#[async_trait]
impl PresentationDriver for InstantPresentation {
    async fn movement_finished(&self, _unit: UnitId, _path: &[Position]) {}

    async fn action_ready(&self, _actor: UnitId, _handle: ActionHandle) {}
}
