//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! every rules command, plus topic subscriptions on the event bus.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, mpsc, oneshot};

use tactics_core::{
    ActionHandle, ActionResolution, AiDecision, GameState, Position, Selection, Snapshot,
    SpawnPoints, TargetAssignment, TurnPhase, UnitId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{BattleLog, Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    battle_log: Arc<RwLock<BattleLog>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        battle_log: Arc<RwLock<BattleLog>>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            battle_log,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    // ------------------------------------------------------------------
    // Player commands
    // ------------------------------------------------------------------

    /// Selects a player unit, or clears the selection if it is already
    /// selected.
    pub async fn select_unit(&self, unit: UnitId) -> Result<Selection> {
        self.request(|reply| Command::SelectUnit { unit, reply })
            .await?
    }

    pub async fn select_target(&self, target: UnitId) -> Result<Selection> {
        self.request(|reply| Command::SelectTarget { target, reply })
            .await?
    }

    /// Moves a unit and returns the path it walks.
    pub async fn move_unit(&self, unit: UnitId, destination: Position) -> Result<Vec<Position>> {
        self.request(|reply| Command::MoveUnit {
            unit,
            destination,
            reply,
        })
        .await?
    }

    /// Hit odds a player attack would have right now.
    pub async fn preview_odds(&self, attacker: UnitId, defender: UnitId) -> Result<f32> {
        self.request(|reply| Command::PreviewOdds {
            attacker,
            defender,
            reply,
        })
        .await?
    }

    // ------------------------------------------------------------------
    // Two-phase actions
    // ------------------------------------------------------------------

    pub async fn begin_attack(&self, attacker: UnitId, defender: UnitId) -> Result<ActionHandle> {
        self.request(|reply| Command::BeginAttack {
            attacker,
            defender,
            reply,
        })
        .await?
    }

    /// Attack by the selected unit on the selected target.
    pub async fn begin_selected_attack(&self) -> Result<ActionHandle> {
        self.request(|reply| Command::BeginSelectedAttack { reply })
            .await?
    }

    pub async fn begin_heal(&self, unit: UnitId) -> Result<ActionHandle> {
        self.request(|reply| Command::BeginHeal { unit, reply })
            .await?
    }

    pub async fn complete_action(&self, handle: ActionHandle) -> Result<ActionResolution> {
        self.request(|reply| Command::CompleteAction { handle, reply })
            .await?
    }

    /// Abandons a pending action; returns the actor.
    pub async fn cancel_action(&self, handle: ActionHandle) -> Result<UnitId> {
        self.request(|reply| Command::CancelAction { handle, reply })
            .await?
    }

    // ------------------------------------------------------------------
    // Turn flow
    // ------------------------------------------------------------------

    pub async fn finish_phase(&self) -> Result<TurnPhase> {
        self.request(|reply| Command::FinishPhase { reply }).await?
    }

    pub async fn finish_player_turn(&self) -> Result<TurnPhase> {
        self.request(|reply| Command::FinishPlayerTurn { reply })
            .await?
    }

    pub async fn assign_ai_targets(&self) -> Result<Vec<TargetAssignment>> {
        self.request(|reply| Command::AssignAiTargets { reply })
            .await?
    }

    pub async fn plan_ai_unit(&self, unit: UnitId) -> Result<AiDecision> {
        self.request(|reply| Command::PlanAiUnit { unit, reply })
            .await?
    }

    pub async fn complete_ai_turn(&self) -> Result<TurnPhase> {
        self.request(|reply| Command::CompleteAiTurn { reply })
            .await?
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    pub async fn export_snapshot(&self, level_index: u32) -> Result<Snapshot> {
        self.request(|reply| Command::ExportSnapshot { level_index, reply })
            .await
    }

    /// Replaces the live state with `snapshot`.
    pub async fn import_snapshot(&self, snapshot: Snapshot, spawns: SpawnPoints) -> Result<()> {
        self.request(|reply| Command::ImportSnapshot {
            snapshot: Box::new(snapshot),
            spawns,
            reply,
        })
        .await?
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Damage, misses, heals, deaths, moves, rejections
    /// - `Topic::Turn` - Phase changes, target assignment, game over
    /// - `Topic::Log` - Human-readable battle log lines
    /// - `Topic::Presentation` - Animation cues
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Most recent battle log lines, oldest first.
    pub async fn battle_log(&self) -> Vec<String> {
        self.battle_log
            .read()
            .await
            .lines()
            .map(str::to_owned)
            .collect()
    }
}
