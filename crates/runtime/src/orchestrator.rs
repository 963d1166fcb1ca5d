//! AI turn orchestration.
//!
//! [`TurnOrchestrator`] drives one AI turn end to end: target assignment,
//! then each AI unit in roster order, strictly one after another. Every
//! decision is applied through the simulation worker; the waits on the
//! presentation side happen here, outside the worker, each capped by a
//! timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use tactics_core::{AiDecision, Position, RulesError, Team, UnitId};

use crate::api::{PresentationDriver, Result, RuntimeError, RuntimeHandle};
use crate::events::{AnimationCue, AnimationSignal, Event};

/// What happened during one AI turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiTurnReport {
    /// Units that completed their step, in order.
    pub acted: Vec<UnitId>,
    /// Units whose step was rejected by the rules and skipped.
    pub skipped: Vec<UnitId>,
    /// Units whose attack or heal timed out and was cancelled.
    pub cancelled: Vec<UnitId>,
    /// Moves whose arrival was never reported in time.
    pub move_timeouts: u32,
    /// Set when the turn ended the game.
    pub winner: Option<Team>,
}

pub struct TurnOrchestrator {
    handle: RuntimeHandle,
    presentation: Arc<dyn PresentationDriver>,
    move_timeout: Duration,
    action_timeout: Duration,
}

impl TurnOrchestrator {
    pub fn new(
        handle: RuntimeHandle,
        presentation: Arc<dyn PresentationDriver>,
        move_timeout: Duration,
        action_timeout: Duration,
    ) -> Self {
        Self {
            handle,
            presentation,
            move_timeout,
            action_timeout,
        }
    }

    /// Runs the current AI turn and hands control back to the player.
    ///
    /// Stops early if the game ends. Rule rejections for a single unit are
    /// logged and that unit is skipped; channel failures abort the turn.
    pub async fn run_ai_turn(&self) -> Result<AiTurnReport> {
        let mut report = AiTurnReport::default();

        let assignments = match self.handle.assign_ai_targets().await {
            Ok(assignments) => assignments,
            Err(RuntimeError::Rules(RulesError::RosterExhausted(team))) => {
                info!(target: "runtime::orchestrator", %team, "Roster exhausted before AI turn");
                report.winner = self.winner().await?;
                return Ok(report);
            }
            Err(error) => return Err(error),
        };

        info!(
            target: "runtime::orchestrator",
            units = assignments.len(),
            "AI turn started"
        );

        for unit in assignments.iter().map(|assignment| assignment.unit) {
            let state = self.handle.query_state().await?;
            if let Some(winner) = state.turn.phase.winner() {
                report.winner = Some(winner);
                break;
            }
            if state.unit(unit).is_none() {
                debug!(target: "runtime::orchestrator", %unit, "Unit died before acting");
                continue;
            }

            match self.run_unit(unit, &mut report).await {
                Ok(()) => report.acted.push(unit),
                Err(error) if error.is_recoverable() => {
                    warn!(
                        target: "runtime::orchestrator",
                        %unit,
                        error = %error,
                        "AI step rejected, skipping unit"
                    );
                    report.skipped.push(unit);
                }
                Err(error) => return Err(error),
            }
        }

        if report.winner.is_none() {
            report.winner = self.winner().await?;
        }
        if report.winner.is_none() {
            self.handle.complete_ai_turn().await?;
        }

        info!(
            target: "runtime::orchestrator",
            acted = report.acted.len(),
            skipped = report.skipped.len(),
            cancelled = report.cancelled.len(),
            winner = ?report.winner,
            "AI turn finished"
        );
        Ok(report)
    }

    async fn run_unit(&self, unit: UnitId, report: &mut AiTurnReport) -> Result<()> {
        let decision = self.handle.plan_ai_unit(unit).await?;
        debug!(target: "runtime::orchestrator", %unit, ?decision, "AI decision");

        match decision {
            AiDecision::Attack { target } => self.act(unit, Some(target), report).await,
            AiDecision::Approach { destination, .. } | AiDecision::Advance { destination, .. } => {
                self.walk(unit, destination, report).await
            }
            AiDecision::FleeAndHeal { destination, .. } => {
                if let Some(destination) = destination
                    && let Err(error) = self.walk(unit, destination, report).await
                {
                    if !error.is_recoverable() {
                        return Err(error);
                    }
                    warn!(
                        target: "runtime::orchestrator",
                        %unit,
                        error = %error,
                        "Flee move rejected, healing in place"
                    );
                }
                self.act(unit, None, report).await
            }
            AiDecision::Hold { reason } => {
                debug!(target: "runtime::orchestrator", %unit, %reason, "AI unit holds");
                Ok(())
            }
        }
    }

    async fn walk(
        &self,
        unit: UnitId,
        destination: Position,
        report: &mut AiTurnReport,
    ) -> Result<()> {
        let path = self.handle.move_unit(unit, destination).await?;

        if timeout(
            self.move_timeout,
            self.presentation.movement_finished(unit, &path),
        )
        .await
        .is_err()
        {
            warn!(
                target: "runtime::orchestrator",
                %unit,
                timeout_ms = self.move_timeout.as_millis() as u64,
                "Movement did not finish in time, continuing"
            );
            report.move_timeouts += 1;
        }

        self.handle
            .event_bus()
            .publish(Event::Presentation(AnimationCue::new(
                unit,
                AnimationSignal::Walking(false),
            )));
        Ok(())
    }

    /// Attack `target`, or heal when there is none.
    async fn act(
        &self,
        unit: UnitId,
        target: Option<UnitId>,
        report: &mut AiTurnReport,
    ) -> Result<()> {
        let action = match target {
            Some(target) => self.handle.begin_attack(unit, target).await?,
            None => self.handle.begin_heal(unit).await?,
        };

        match timeout(
            self.action_timeout,
            self.presentation.action_ready(unit, action),
        )
        .await
        {
            Ok(()) => {
                self.handle.complete_action(action).await?;
            }
            Err(_) => {
                warn!(
                    target: "runtime::orchestrator",
                    %unit,
                    %action,
                    timeout_ms = self.action_timeout.as_millis() as u64,
                    "Action did not become ready in time, cancelling"
                );
                self.handle.cancel_action(action).await?;
                report.cancelled.push(unit);
            }
        }
        Ok(())
    }

    async fn winner(&self) -> Result<Option<Team>> {
        Ok(self.handle.query_state().await?.turn.phase.winner())
    }
}
