use crate::event::GameEvent;
use crate::state::{Team, TurnPhase};

use super::{GameEngine, RulesError, TurnError};

/// Turn phase machine.
impl<'a> GameEngine<'a> {
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn turn_count(&self) -> u32 {
        self.state.turn.turn_count
    }

    /// Fails with `TurnError::GameOver` once the game has ended.
    pub(super) fn ensure_live(&self) -> Result<(), TurnError> {
        match self.state.turn.phase {
            TurnPhase::GameOver { winner } => Err(TurnError::GameOver { winner }),
            _ => Ok(()),
        }
    }

    pub(super) fn ensure_phase(
        &self,
        operation: &'static str,
        allowed: impl Fn(TurnPhase) -> bool,
    ) -> Result<(), TurnError> {
        self.ensure_live()?;
        let actual = self.state.turn.phase;
        if allowed(actual) {
            Ok(())
        } else {
            Err(TurnError::WrongPhase { operation, actual })
        }
    }

    fn set_phase(&mut self, to: TurnPhase) {
        let from = self.state.turn.phase;
        self.state.turn.phase = to;
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    /// Advances one step: movement to attack, or attack to the AI turn.
    pub fn finish_phase(&mut self) -> Result<TurnPhase, RulesError> {
        let result = self.try_finish_phase();
        self.reject_on_err(None, result)
    }

    fn try_finish_phase(&mut self) -> Result<TurnPhase, RulesError> {
        self.ensure_live()?;
        self.ensure_no_pending()?;
        match self.state.turn.phase {
            TurnPhase::PlayerMovement => {
                self.state.selection.clear();
                self.set_phase(TurnPhase::PlayerAttack);
                self.commit();
            }
            TurnPhase::PlayerAttack => self.enter_ai_turn(),
            actual => {
                return Err(TurnError::WrongPhase {
                    operation: "finish_phase",
                    actual,
                }
                .into());
            }
        }
        Ok(self.state.turn.phase)
    }

    /// Ends the player's turn from either player phase.
    pub fn finish_player_turn(&mut self) -> Result<TurnPhase, RulesError> {
        let result = self.try_finish_player_turn();
        self.reject_on_err(None, result)
    }

    fn try_finish_player_turn(&mut self) -> Result<TurnPhase, RulesError> {
        self.ensure_phase("finish_player_turn", |phase| {
            matches!(phase, TurnPhase::PlayerMovement | TurnPhase::PlayerAttack)
        })?;
        self.ensure_no_pending()?;
        self.enter_ai_turn();
        Ok(self.state.turn.phase)
    }

    fn enter_ai_turn(&mut self) {
        self.state.players.reset_flags();
        self.state.selection.clear();
        self.set_phase(TurnPhase::AiTurn);
        self.emit(GameEvent::AiTurnStarted {
            turn: self.state.turn.turn_count,
        });
        self.commit();
    }

    /// Wraps the AI turn back to the player: `turn_count` goes up by one and
    /// every unit's move/attack flags are cleared.
    pub fn complete_ai_turn(&mut self) -> Result<TurnPhase, RulesError> {
        let result = self.try_complete_ai_turn();
        self.reject_on_err(None, result)
    }

    fn try_complete_ai_turn(&mut self) -> Result<TurnPhase, RulesError> {
        self.ensure_phase("complete_ai_turn", |phase| phase == TurnPhase::AiTurn)?;
        self.ensure_no_pending()?;

        self.state.turn.turn_count = self.state.turn.turn_count.saturating_add(1);
        for unit in self.state.units_mut() {
            unit.reset_turn_flags();
        }
        self.set_phase(TurnPhase::PlayerMovement);
        self.emit(GameEvent::PlayerTurnStarted {
            turn: self.state.turn.turn_count,
        });
        self.commit();
        Ok(self.state.turn.phase)
    }

    /// Moves to `GameOver` when a roster is empty. Returns the winner, if any.
    ///
    /// An empty player roster loses even if the AI roster is empty too.
    pub fn check_game_over(&mut self) -> Option<Team> {
        if let TurnPhase::GameOver { winner } = self.state.turn.phase {
            return Some(winner);
        }

        let winner = if self.state.players.is_empty() {
            Team::Ai
        } else if self.state.ai.is_empty() {
            Team::Player
        } else {
            return None;
        };

        self.state.selection.clear();
        self.set_phase(TurnPhase::GameOver { winner });
        self.emit(GameEvent::GameOver { winner });
        self.commit();
        Some(winner)
    }

    /// Confirms both rosters still have units before an AI turn runs.
    ///
    /// An exhausted roster ends the game and is reported as
    /// `RulesError::RosterExhausted`.
    pub fn ensure_rosters(&mut self) -> Result<(), RulesError> {
        let exhausted = if self.state.players.is_empty() {
            Some(Team::Player)
        } else if self.state.ai.is_empty() {
            Some(Team::Ai)
        } else {
            None
        };

        match exhausted {
            Some(team) => {
                self.check_game_over();
                Err(RulesError::RosterExhausted(team))
            }
            None => Ok(()),
        }
    }
}
