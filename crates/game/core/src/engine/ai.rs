use crate::ai::{AiDecision, TargetAssignment, assign_targets, plan_unit};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{TurnPhase, UnitId};

use super::{GameEngine, RulesError};

/// AI turn support: target bookkeeping and planning against live state.
impl<'a> GameEngine<'a> {
    /// Runs target assignment for every AI unit and stores the results.
    ///
    /// Emits `TargetAssigned` for each unit whose target changed.
    pub fn assign_ai_targets(&mut self) -> Result<Vec<TargetAssignment>, RulesError> {
        let result = self.try_assign_ai_targets();
        self.reject_on_err(None, result)
    }

    fn try_assign_ai_targets(&mut self) -> Result<Vec<TargetAssignment>, RulesError> {
        self.ensure_phase("assign_ai_targets", |phase| phase == TurnPhase::AiTurn)?;

        let assignments = assign_targets(&self.state.ai, &self.state.players, self.config);
        for assignment in &assignments {
            if let Some(unit) = self.state.ai.get_mut(assignment.unit) {
                unit.target = assignment.target;
            }
            if assignment.changed() {
                self.emit(GameEvent::TargetAssigned {
                    unit: assignment.unit,
                    target: assignment.target,
                });
            }
        }
        self.commit();
        Ok(assignments)
    }

    /// Plans the next step of one AI unit.
    pub fn plan_ai_unit(&self, id: UnitId, env: GameEnv<'_>) -> Result<AiDecision, RulesError> {
        self.ensure_phase("plan_ai_unit", |phase| phase == TurnPhase::AiTurn)?;
        let unit = self.unit_of(id, crate::state::Team::Ai)?;
        Ok(plan_unit(
            unit,
            &self.state.players,
            self.config,
            env.navigation()?,
        ))
    }

    /// AI unit ids in roster order.
    pub fn ai_order(&self) -> Vec<UnitId> {
        self.state.ai.ids()
    }
}
