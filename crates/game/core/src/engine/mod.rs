//! Turn phases and rules commands.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! accepted command bumps the state nonce, which feeds deterministic rolls.
//! Rejected commands change nothing and queue an `ActionRejected` event.
//! Events are buffered on the engine; callers drain them with
//! [`GameEngine::take_events`].

mod actions;
mod ai;
mod errors;
mod pickups;
mod turns;

pub use actions::ActionResolution;
pub use errors::{RulesError, TurnError};

use crate::config::RulesConfig;
use crate::error::GameError;
use crate::event::GameEvent;
use crate::state::{GameState, Team, Unit, UnitId};

/// Rules engine borrowing the state for the duration of one or more commands.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a RulesConfig,
    events: Vec<GameEvent>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a RulesConfig) -> Self {
        Self {
            state,
            config,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn config(&self) -> &RulesConfig {
        self.config
    }

    /// Drains the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Marks an accepted mutation.
    fn commit(&mut self) {
        self.state.nonce = self.state.nonce.wrapping_add(1);
    }

    /// Queues `ActionRejected` for a failed command and passes the result on.
    fn reject_on_err<T>(
        &mut self,
        actor: Option<UnitId>,
        result: Result<T, RulesError>,
    ) -> Result<T, RulesError> {
        if let Err(err) = &result {
            self.emit(GameEvent::ActionRejected {
                actor,
                code: err.error_code().to_owned(),
                reason: err.to_string(),
            });
        }
        result
    }

    fn unit(&self, id: UnitId) -> Result<&Unit, RulesError> {
        self.state.unit(id).ok_or(RulesError::UnknownUnit(id))
    }

    fn unit_of(&self, id: UnitId, team: Team) -> Result<&Unit, RulesError> {
        let unit = self.unit(id)?;
        if unit.team != team {
            return Err(RulesError::WrongTeam {
                unit: id,
                expected: team,
                actual: unit.team,
            });
        }
        Ok(unit)
    }

    /// Removes dead units from both rosters and clears references to them.
    fn remove_dead(&mut self) {
        let mut dead = self.state.players.remove_dead();
        dead.extend(self.state.ai.remove_dead());

        for unit in dead {
            let id = unit.id;
            for other in self.state.units_mut() {
                if other.target == Some(id) {
                    other.target = None;
                }
            }
            if self.state.selection.unit == Some(id) {
                self.state.selection.clear();
            } else if self.state.selection.target == Some(id) {
                self.state.selection.target = None;
            }
            self.emit(GameEvent::UnitDied {
                unit: id,
                team: unit.team,
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::state::{GameState, Position, Team, UnitId, UnitStats};

    /// Two players at x = 0 and x = 2, two AI units at x = 5 and x = 40.
    pub fn skirmish() -> (GameState, [UnitId; 4]) {
        let mut state = GameState::new(1234);
        let stats = UnitStats::new(100.0, 25, 8.0, 10.0);
        let p1 = state
            .spawn_unit(Team::Player, "knight", Position::planar(0.0, 0.0), stats)
            .unwrap();
        let p2 = state
            .spawn_unit(Team::Player, "archer", Position::planar(2.0, 0.0), stats)
            .unwrap();
        let a1 = state
            .spawn_unit(Team::Ai, "grunt", Position::planar(5.0, 0.0), stats)
            .unwrap();
        let a2 = state
            .spawn_unit(Team::Ai, "scout", Position::planar(40.0, 0.0), stats)
            .unwrap();
        (state, [p1, p2, a1, a2])
    }
}
