//! Scripted player side for headless runs.
//!
//! Player units follow the same policy the AI uses: close in on the nearest
//! enemy, attack when in range, and fall back to heal when badly hurt. Moves
//! happen in the movement phase and attacks or heals in the attack phase.

use tactics_content::Scenario;
use tactics_core::{AiDecision, ActionResolution, RulesConfig, TurnPhase, UnitId, plan_unit};
use tactics_runtime::{ArenaNavigation, RuntimeError, RuntimeHandle};
use tracing::{debug, info, warn};

/// Counts for one player turn.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayerTurnReport {
    pub moved: u32,
    pub attacks: u32,
    pub hits: u32,
    pub heals: u32,
    pub rejected: u32,
}

pub struct Autopilot {
    navigation: ArenaNavigation,
    rules: RulesConfig,
}

impl Autopilot {
    pub fn new(navigation: ArenaNavigation, rules: RulesConfig) -> Self {
        Self { navigation, rules }
    }

    pub fn for_scenario(scenario: &Scenario, rules: RulesConfig) -> Self {
        Self::new(
            ArenaNavigation::new(scenario.arena, scenario.obstacles.clone()),
            rules,
        )
    }

    /// Plays the player's movement and attack phases, then hands the turn to
    /// the AI. Returns early once the game is over.
    pub async fn play_turn(&self, handle: &RuntimeHandle) -> Result<PlayerTurnReport, RuntimeError> {
        let mut report = PlayerTurnReport::default();

        let state = handle.query_state().await?;
        if state.turn.phase == TurnPhase::PlayerMovement {
            for unit in state.players.iter() {
                let destination = match plan_unit(unit, &state.ai, &self.rules, &self.navigation) {
                    AiDecision::Approach { destination, .. }
                    | AiDecision::Advance { destination, .. }
                    | AiDecision::FleeAndHeal {
                        destination: Some(destination),
                        ..
                    } => destination,
                    _ => continue,
                };
                match handle.move_unit(unit.id, destination).await {
                    Ok(_) => report.moved += 1,
                    Err(error) => self.tolerate(unit.id, error, &mut report)?,
                }
            }
            handle.finish_phase().await?;
        }

        let state = handle.query_state().await?;
        if state.turn.phase != TurnPhase::PlayerAttack {
            return Ok(report);
        }

        for id in state.players.ids() {
            let state = handle.query_state().await?;
            if state.turn.phase.is_over() {
                return Ok(report);
            }
            let Some(unit) = state.unit(id) else {
                continue;
            };

            let action = match plan_unit(unit, &state.ai, &self.rules, &self.navigation) {
                AiDecision::Attack { target } => {
                    let odds = handle.preview_odds(id, target).await?;
                    debug!(target: "client::autopilot", unit = %id, %target, odds, "Attacking");
                    handle.begin_attack(id, target).await
                }
                AiDecision::FleeAndHeal { .. } => handle.begin_heal(id).await,
                _ => continue,
            };

            let action = match action {
                Ok(action) => action,
                Err(error) => {
                    self.tolerate(id, error, &mut report)?;
                    continue;
                }
            };
            match handle.complete_action(action).await? {
                ActionResolution::Attack(event) => {
                    report.attacks += 1;
                    if event.is_hit() {
                        report.hits += 1;
                    }
                }
                ActionResolution::Heal { .. } => report.heals += 1,
            }
        }

        if !handle.query_state().await?.turn.phase.is_over() {
            handle.finish_phase().await?;
        }

        info!(
            target: "client::autopilot",
            moved = report.moved,
            attacks = report.attacks,
            hits = report.hits,
            heals = report.heals,
            "Player turn finished"
        );
        Ok(report)
    }

    fn tolerate(
        &self,
        unit: UnitId,
        error: RuntimeError,
        report: &mut PlayerTurnReport,
    ) -> Result<(), RuntimeError> {
        if !error.is_recoverable() {
            return Err(error);
        }
        warn!(target: "client::autopilot", %unit, %error, "Player step rejected");
        report.rejected += 1;
        Ok(())
    }
}
