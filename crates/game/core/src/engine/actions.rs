use crate::combat::{
    CombatEvent, HitRule, range_line_of_sight_odds, resolve_attack, self_health_hit_chance,
};
use crate::env::{GameEnv, compute_seed, roll_context};
use crate::event::GameEvent;
use crate::state::{
    ActionHandle, PendingAction, PendingKind, Position, Selection, Team, TurnPhase, UnitFlags,
    UnitId,
};

use super::{GameEngine, RulesError};

// Slack for destinations computed by the planner in f32.
const RANGE_EPSILON: f32 = 1e-3;

/// Result of completing a two-phase action.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResolution {
    Attack(CombatEvent),
    Heal { unit: UnitId, amount: f32 },
}

/// Player commands, moves and two-phase actions.
impl<'a> GameEngine<'a> {
    pub(super) fn ensure_no_pending(&self) -> Result<(), RulesError> {
        match &self.state.pending {
            Some(pending) => Err(RulesError::ActionInProgress {
                pending: pending.handle,
            }),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects a player unit, or deselects it when it is already selected.
    pub fn select_unit(&mut self, id: UnitId) -> Result<Selection, RulesError> {
        let result = self.try_select_unit(id);
        self.reject_on_err(Some(id), result)
    }

    fn try_select_unit(&mut self, id: UnitId) -> Result<Selection, RulesError> {
        self.ensure_phase("select_unit", is_player_phase)?;
        self.unit_of(id, Team::Player)?;

        if self.state.selection.unit == Some(id) {
            self.state.selection.clear();
        } else {
            self.state.selection = Selection {
                unit: Some(id),
                target: None,
            };
        }
        Ok(self.state.selection)
    }

    /// Aims the selected unit at an AI unit.
    pub fn select_target(&mut self, target: UnitId) -> Result<Selection, RulesError> {
        let result = self.try_select_target(target);
        self.reject_on_err(self.state.selection.unit, result)
    }

    fn try_select_target(&mut self, target: UnitId) -> Result<Selection, RulesError> {
        self.ensure_phase("select_target", |phase| phase == TurnPhase::PlayerAttack)?;
        if self.state.selection.unit.is_none() {
            return Err(RulesError::NoSelection);
        }
        let defender = self.unit_of(target, Team::Ai)?;
        if defender.is_dead() {
            return Err(RulesError::InvalidTarget(target));
        }
        self.state.selection.target = Some(target);
        Ok(self.state.selection)
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Moves a player unit during the movement phase.
    ///
    /// The destination must lie within `movement_range` unless the unit holds
    /// a teleport, which the move then spends. Ending the move on a ready
    /// pickup triggers it. Returns the path taken.
    pub fn move_unit(
        &mut self,
        id: UnitId,
        destination: Position,
        env: GameEnv<'_>,
    ) -> Result<Vec<Position>, RulesError> {
        let result = self.try_move(id, destination, env, Team::Player);
        self.reject_on_err(Some(id), result)
    }

    /// Moves an AI unit during the AI turn.
    pub fn move_ai_unit(
        &mut self,
        id: UnitId,
        destination: Position,
        env: GameEnv<'_>,
    ) -> Result<Vec<Position>, RulesError> {
        let result = self.try_move(id, destination, env, Team::Ai);
        self.reject_on_err(Some(id), result)
    }

    fn try_move(
        &mut self,
        id: UnitId,
        destination: Position,
        env: GameEnv<'_>,
        team: Team,
    ) -> Result<Vec<Position>, RulesError> {
        match team {
            Team::Player => {
                self.ensure_phase("move_unit", |phase| phase == TurnPhase::PlayerMovement)?
            }
            Team::Ai => self.ensure_phase("move_ai_unit", |phase| phase == TurnPhase::AiTurn)?,
        }

        let unit = self.unit_of(id, team)?;
        if unit.is_busy() {
            return Err(RulesError::UnitBusy(id));
        }
        if unit.has_moved() {
            return Err(RulesError::AlreadyMoved(id));
        }

        let from = unit.position;
        let teleport = unit.can_teleport();
        let distance = from.distance(destination);
        if !teleport && distance > unit.movement_range + RANGE_EPSILON {
            return Err(RulesError::out_of_range(id, distance, unit.movement_range));
        }

        let path = env
            .navigation()?
            .calculate_path(from, destination)
            .ok_or(RulesError::PathInvalid(id))?;

        let unit = self
            .state
            .unit_mut(id)
            .ok_or(RulesError::UnknownUnit(id))?;
        unit.position = destination;
        unit.flags.insert(UnitFlags::MOVED);
        unit.flags.remove(UnitFlags::TELEPORT);

        self.emit(GameEvent::UnitMoved {
            unit: id,
            from,
            to: destination,
            path: path.clone(),
        });
        if team == Team::Player {
            self.trigger_pickups(id);
        }
        self.commit();
        Ok(path)
    }

    // ------------------------------------------------------------------
    // Two-phase actions
    // ------------------------------------------------------------------

    /// Odds shown to the player before confirming an attack.
    pub fn preview_odds(
        &self,
        attacker: UnitId,
        defender: UnitId,
        env: GameEnv<'_>,
    ) -> Result<f32, RulesError> {
        let attacker = self.unit_of(attacker, Team::Player)?;
        let defender = self.unit_of(defender, Team::Ai)?;
        Ok(range_line_of_sight_odds(
            attacker,
            defender,
            env.occlusion()?,
        ))
    }

    /// Begins an attack by the selected unit on the selected target.
    pub fn begin_selected_attack(&mut self, env: GameEnv<'_>) -> Result<ActionHandle, RulesError> {
        match self.state.selection {
            Selection {
                unit: Some(attacker),
                target: Some(defender),
            } => self.begin_player_attack(attacker, defender, env),
            _ => {
                let result = Err(RulesError::NoSelection);
                self.reject_on_err(self.state.selection.unit, result)
            }
        }
    }

    /// Begins a player attack under the line-of-sight rule.
    ///
    /// The roll is drawn now; the effect applies on [`complete_action`].
    ///
    /// [`complete_action`]: GameEngine::complete_action
    pub fn begin_player_attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        env: GameEnv<'_>,
    ) -> Result<ActionHandle, RulesError> {
        let result = self.try_begin_attack(attacker, defender, env, Team::Player);
        self.reject_on_err(Some(attacker), result)
    }

    /// Begins an AI attack under the self-health rule.
    pub fn begin_ai_attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        env: GameEnv<'_>,
    ) -> Result<ActionHandle, RulesError> {
        let result = self.try_begin_attack(attacker, defender, env, Team::Ai);
        self.reject_on_err(Some(attacker), result)
    }

    fn try_begin_attack(
        &mut self,
        attacker_id: UnitId,
        defender_id: UnitId,
        env: GameEnv<'_>,
        team: Team,
    ) -> Result<ActionHandle, RulesError> {
        match team {
            Team::Player => {
                self.ensure_phase("begin_player_attack", |phase| {
                    phase == TurnPhase::PlayerAttack
                })?
            }
            Team::Ai => {
                self.ensure_phase("begin_ai_attack", |phase| phase == TurnPhase::AiTurn)?
            }
        }
        self.ensure_no_pending()?;

        let attacker = self.unit_of(attacker_id, team)?;
        self.ensure_can_act(attacker_id)?;

        let defender = self.unit(defender_id)?;
        if defender.team != team.opponent() || defender.is_dead() {
            return Err(RulesError::InvalidTarget(defender_id));
        }

        let distance = attacker.distance_to(defender);
        if distance > attacker.attack_range + RANGE_EPSILON {
            return Err(RulesError::out_of_range(
                attacker_id,
                distance,
                attacker.attack_range,
            ));
        }

        let (rule, chance) = match team {
            Team::Player => (
                HitRule::RangeLineOfSight,
                range_line_of_sight_odds(attacker, defender, env.occlusion()?),
            ),
            Team::Ai => (
                HitRule::SelfHealth,
                self_health_hit_chance(attacker, self.config.roll_range),
            ),
        };

        let seed = compute_seed(
            self.state.seed,
            self.state.nonce,
            attacker_id.0,
            roll_context::HIT,
        );
        let roll = env.rng()?.roll_unit(seed);

        let handle = self.start_action(
            attacker_id,
            PendingKind::Attack {
                defender: defender_id,
                rule,
                chance,
                roll,
            },
        )?;
        self.emit(GameEvent::ActionStarted {
            handle,
            actor: attacker_id,
            target: Some(defender_id),
        });
        Ok(handle)
    }

    /// Begins a heal of `heal_power` on the unit itself.
    pub fn begin_heal(&mut self, unit: UnitId) -> Result<ActionHandle, RulesError> {
        let result = self.try_begin_heal(unit);
        self.reject_on_err(Some(unit), result)
    }

    fn try_begin_heal(&mut self, id: UnitId) -> Result<ActionHandle, RulesError> {
        self.ensure_live()?;
        self.ensure_no_pending()?;

        let team = self.unit(id)?.team;
        let allowed = match team {
            Team::Player => self.state.turn.phase == TurnPhase::PlayerAttack,
            Team::Ai => self.state.turn.phase == TurnPhase::AiTurn,
        };
        if !allowed {
            return Err(super::TurnError::WrongPhase {
                operation: "begin_heal",
                actual: self.state.turn.phase,
            }
            .into());
        }
        self.ensure_can_act(id)?;

        let amount = self.config.heal_power;
        let handle = self.start_action(id, PendingKind::Heal { amount })?;
        self.emit(GameEvent::ActionStarted {
            handle,
            actor: id,
            target: None,
        });
        Ok(handle)
    }

    fn ensure_can_act(&self, id: UnitId) -> Result<(), RulesError> {
        let unit = self.unit(id)?;
        if unit.is_busy() {
            return Err(RulesError::UnitBusy(id));
        }
        if unit.has_attacked() {
            return Err(RulesError::AlreadyAttacked(id));
        }
        Ok(())
    }

    fn start_action(&mut self, actor: UnitId, kind: PendingKind) -> Result<ActionHandle, RulesError> {
        let handle = ActionHandle(self.state.nonce);
        let unit = self
            .state
            .unit_mut(actor)
            .ok_or(RulesError::UnknownUnit(actor))?;
        unit.flags.insert(UnitFlags::BUSY);
        self.state.pending = Some(PendingAction {
            handle,
            actor,
            kind,
        });
        self.commit();
        Ok(handle)
    }

    fn take_pending(&mut self, handle: ActionHandle) -> Result<PendingAction, RulesError> {
        match self.state.pending.take() {
            Some(pending) if pending.handle == handle => Ok(pending),
            other => {
                self.state.pending = other;
                Err(RulesError::UnknownAction(handle))
            }
        }
    }

    /// Applies the pending action's effect.
    ///
    /// Attacks resolve with the roll drawn at begin, append to the combat log,
    /// remove the dead and check for game over.
    pub fn complete_action(
        &mut self,
        handle: ActionHandle,
    ) -> Result<ActionResolution, RulesError> {
        let actor = self.state.pending.as_ref().map(|p| p.actor);
        let result = self.try_complete_action(handle);
        self.reject_on_err(actor, result)
    }

    fn try_complete_action(&mut self, handle: ActionHandle) -> Result<ActionResolution, RulesError> {
        let pending = self.take_pending(handle)?;
        let actor = pending.actor;

        if let Some(unit) = self.state.unit_mut(actor) {
            unit.flags.remove(UnitFlags::BUSY);
        }

        let resolution = match pending.kind {
            PendingKind::Attack {
                defender,
                rule,
                chance,
                roll,
            } => {
                let turn = self.state.turn.turn_count;
                let Some((attacker_unit, defender_unit)) = self.state.unit_pair_mut(actor, defender)
                else {
                    // The attack is spent even though nothing can be applied.
                    if let Some(unit) = self.state.unit_mut(actor) {
                        unit.flags.insert(UnitFlags::ATTACKED);
                    }
                    self.commit();
                    return Err(RulesError::InvalidTarget(defender));
                };

                let event =
                    resolve_attack(attacker_unit, defender_unit, rule, chance, roll, turn);
                let remaining = defender_unit.health();

                if event.is_hit() {
                    self.emit(GameEvent::DamageDealt {
                        attacker: actor,
                        defender,
                        amount: event.damage,
                        remaining,
                    });
                } else {
                    self.emit(GameEvent::AttackMissed {
                        attacker: actor,
                        defender,
                        chance: event.chance,
                        roll: event.roll,
                    });
                }
                self.state.combat_log.push(event.clone());
                ActionResolution::Attack(event)
            }
            PendingKind::Heal { amount } => {
                let unit = self
                    .state
                    .unit_mut(actor)
                    .ok_or(RulesError::UnknownUnit(actor))?;
                let healed = unit.add_health(amount);
                let health = unit.health();
                unit.flags.insert(UnitFlags::ATTACKED);
                self.emit(GameEvent::UnitHealed {
                    unit: actor,
                    amount: healed,
                    health,
                });
                ActionResolution::Heal {
                    unit: actor,
                    amount: healed,
                }
            }
        };

        self.remove_dead();
        self.commit();
        self.check_game_over();
        Ok(resolution)
    }

    /// Abandons the pending action.
    ///
    /// The actor goes straight to its post-action state: no longer busy, the
    /// action spent, and no effect applied.
    pub fn cancel_action(&mut self, handle: ActionHandle) -> Result<UnitId, RulesError> {
        let result = self.try_cancel_action(handle);
        self.reject_on_err(None, result)
    }

    fn try_cancel_action(&mut self, handle: ActionHandle) -> Result<UnitId, RulesError> {
        let pending = self.take_pending(handle)?;
        if let Some(unit) = self.state.unit_mut(pending.actor) {
            unit.flags.remove(UnitFlags::BUSY);
            unit.flags.insert(UnitFlags::ATTACKED);
        }
        self.emit(GameEvent::ActionCancelled {
            handle,
            actor: pending.actor,
        });
        self.commit();
        Ok(pending.actor)
    }
}

fn is_player_phase(phase: TurnPhase) -> bool {
    matches!(phase, TurnPhase::PlayerMovement | TurnPhase::PlayerAttack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;
    use crate::config::RulesConfig;
    use crate::engine::testing::skirmish;
    use crate::engine::TurnError;
    use crate::env::Env;
    use crate::env::testing::{Blocked, FixedRng, OpenField};

    // `roll_unit` of u32::MAX is just under 1; of 0 is exactly 0.
    const HIGH_ROLL: FixedRng = FixedRng(u32::MAX);
    const LOW_ROLL: FixedRng = FixedRng(0);

    #[test]
    fn select_unit_toggles() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        let config = RulesConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        assert_eq!(engine.select_unit(p1).unwrap().unit, Some(p1));
        assert_eq!(engine.select_unit(p1).unwrap().unit, None);
        assert!(matches!(
            engine.select_unit(a1),
            Err(RulesError::WrongTeam { .. })
        ));
    }

    #[test]
    fn select_target_needs_selection_and_attack_phase() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        let config = RulesConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        assert!(matches!(
            engine.select_target(a1),
            Err(RulesError::Turn(TurnError::WrongPhase { .. }))
        ));
        engine.finish_phase().unwrap();
        assert_eq!(engine.select_target(a1), Err(RulesError::NoSelection));
        engine.select_unit(p1).unwrap();
        assert_eq!(engine.select_target(a1).unwrap().target, Some(a1));
    }

    #[test]
    fn move_respects_range_and_marks_moved() {
        let (mut state, [p1, ..]) = skirmish();
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &HIGH_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        assert!(matches!(
            engine.move_unit(p1, Position::planar(0.0, 11.0), env),
            Err(RulesError::OutOfRange { .. })
        ));
        let path = engine
            .move_unit(p1, Position::planar(0.0, 10.0), env)
            .unwrap();
        assert_eq!(path.last(), Some(&Position::planar(0.0, 10.0)));
        assert_eq!(
            engine.move_unit(p1, Position::planar(0.0, 9.0), env),
            Err(RulesError::AlreadyMoved(p1))
        );
        assert!(state.unit(p1).unwrap().has_moved());
    }

    #[test]
    fn teleport_ignores_range_once() {
        let (mut state, [p1, ..]) = skirmish();
        state.unit_mut(p1).unwrap().flags.insert(UnitFlags::TELEPORT);
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &HIGH_ROLL).into_game_env();

        GameEngine::new(&mut state, &config)
            .move_unit(p1, Position::planar(0.0, 80.0), env)
            .unwrap();
        assert!(!state.unit(p1).unwrap().can_teleport());
    }

    #[test]
    fn invalid_path_is_rejected_without_change() {
        let (mut state, [p1, ..]) = skirmish();
        let config = RulesConfig::default();
        let blocked = Blocked;
        let env = Env::with_all(&blocked, &blocked, &HIGH_ROLL).into_game_env();
        let before = state.clone();

        let err = GameEngine::new(&mut state, &config)
            .move_unit(p1, Position::planar(1.0, 1.0), env)
            .unwrap_err();
        assert_eq!(err, RulesError::PathInvalid(p1));
        assert_eq!(state, before);
    }

    #[test]
    fn full_health_ai_attack_hits_on_high_roll() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::AiTurn;
        state.unit_mut(a1).unwrap().position = Position::planar(3.0, 0.0);
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &HIGH_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_ai_attack(a1, p1, env).unwrap();
        assert!(engine.state().unit(a1).unwrap().is_busy());

        let ActionResolution::Attack(event) = engine.complete_action(handle).unwrap() else {
            panic!("expected an attack resolution");
        };
        assert_eq!(event.outcome, AttackOutcome::Hit);
        assert_eq!(event.rule, HitRule::SelfHealth);
        assert!(event.roll > 0.99);
        assert_eq!(event.damage, 25.0);

        let attacker = state.unit(a1).unwrap();
        assert!(!attacker.is_busy());
        assert!(attacker.has_attacked());
        assert_eq!(state.unit(p1).unwrap().health(), 75.0);
        assert_eq!(state.combat_log.len(), 1);
    }

    #[test]
    fn hurt_ai_attacker_misses() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::AiTurn;
        let attacker = state.unit_mut(a1).unwrap();
        attacker.position = Position::planar(3.0, 0.0);
        attacker.set_health(10.0);
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &HIGH_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_ai_attack(a1, p1, env).unwrap();
        let resolution = engine.complete_action(handle).unwrap();
        assert!(matches!(
            resolution,
            ActionResolution::Attack(CombatEvent {
                outcome: AttackOutcome::Miss,
                damage: 0.0,
                ..
            })
        ));
        assert_eq!(state.unit(p1).unwrap().health(), 100.0);
    }

    #[test]
    fn player_attack_uses_line_of_sight_odds() {
        let (mut state, [p1, p2, a1, _]) = skirmish();
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        // p2 at x=2, a1 at x=5, range 8: odds = 1 - 3/8.
        let odds = engine.preview_odds(p2, a1, env).unwrap();
        assert!((odds - 0.625).abs() < 1e-6);

        engine.finish_phase().unwrap();
        engine.select_unit(p2).unwrap();
        engine.select_target(a1).unwrap();
        let handle = engine.begin_selected_attack(env).unwrap();
        let ActionResolution::Attack(event) = engine.complete_action(handle).unwrap() else {
            panic!("expected an attack resolution");
        };
        assert_eq!(event.rule, HitRule::RangeLineOfSight);
        assert!(event.is_hit());

        assert_eq!(
            engine.begin_player_attack(p2, a1, env),
            Err(RulesError::AlreadyAttacked(p2))
        );
        assert!(engine.begin_player_attack(p1, a1, env).is_ok());
    }

    #[test]
    fn blocked_line_of_sight_always_misses() {
        let (mut state, [_, p2, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::PlayerAttack;
        let config = RulesConfig::default();
        let field = OpenField;
        let blocked = Blocked;
        let env = Env::with_all(&field, &blocked, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_player_attack(p2, a1, env).unwrap();
        let ActionResolution::Attack(event) = engine.complete_action(handle).unwrap() else {
            panic!("expected an attack resolution");
        };
        assert_eq!(event.chance, 0.0);
        assert!(!event.is_hit());
    }

    #[test]
    fn out_of_range_attack_is_rejected() {
        let (mut state, [p1, _, _, a2]) = skirmish();
        state.turn.phase = TurnPhase::PlayerAttack;
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        assert!(matches!(
            engine.begin_player_attack(p1, a2, env),
            Err(RulesError::OutOfRange { .. })
        ));
        assert!(engine.state().pending.is_none());
    }

    #[test]
    fn only_one_pending_action() {
        let (mut state, [p1, p2, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::PlayerAttack;
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_player_attack(p1, a1, env).unwrap();
        assert_eq!(
            engine.begin_player_attack(p2, a1, env),
            Err(RulesError::ActionInProgress { pending: handle })
        );
        assert_eq!(
            engine.complete_action(ActionHandle(handle.0 + 100)),
            Err(RulesError::UnknownAction(ActionHandle(handle.0 + 100)))
        );
    }

    #[test]
    fn cancel_spends_action_without_effect() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::PlayerAttack;
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_player_attack(p1, a1, env).unwrap();
        assert_eq!(engine.cancel_action(handle).unwrap(), p1);
        assert_eq!(
            engine.complete_action(handle),
            Err(RulesError::UnknownAction(handle))
        );

        let attacker = state.unit(p1).unwrap();
        assert!(!attacker.is_busy());
        assert!(attacker.has_attacked());
        assert_eq!(state.unit(a1).unwrap().health(), 100.0);
        assert!(state.combat_log.is_empty());
        assert!(state.pending.is_none());
    }

    #[test]
    fn heal_clamps_to_max_health() {
        let (mut state, [_, _, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::AiTurn;
        state.unit_mut(a1).unwrap().set_health(97.0);
        let config = RulesConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_heal(a1).unwrap();
        assert_eq!(
            engine.complete_action(handle).unwrap(),
            ActionResolution::Heal {
                unit: a1,
                amount: 3.0
            }
        );
        assert_eq!(state.unit(a1).unwrap().health(), 100.0);
    }

    #[test]
    fn killing_last_ai_unit_ends_game() {
        let (mut state, [p1, _, a1, a2]) = skirmish();
        state.remove_unit(a2);
        state.turn.phase = TurnPhase::PlayerAttack;
        state.unit_mut(a1).unwrap().set_health(5.0);
        state.unit_mut(a1).unwrap().position = Position::planar(0.0, 0.0);
        let config = RulesConfig::default();
        let field = OpenField;
        let env = Env::with_all(&field, &field, &LOW_ROLL).into_game_env();
        let mut engine = GameEngine::new(&mut state, &config);

        let handle = engine.begin_player_attack(p1, a1, env).unwrap();
        engine.complete_action(handle).unwrap();

        let events = engine.take_events();
        assert!(events.contains(&GameEvent::UnitDied {
            unit: a1,
            team: Team::Ai
        }));
        assert!(events.contains(&GameEvent::GameOver {
            winner: Team::Player
        }));
        assert!(state.ai.is_empty());
        assert_eq!(
            state.turn.phase,
            TurnPhase::GameOver {
                winner: Team::Player
            }
        );
    }

    #[test]
    fn missing_rng_is_reported() {
        let (mut state, [p1, _, a1, _]) = skirmish();
        state.turn.phase = TurnPhase::PlayerAttack;
        let config = RulesConfig::default();
        let field = OpenField;
        let nav: &dyn crate::env::NavigationOracle = &field;
        let occlusion: &dyn crate::env::OcclusionOracle = &field;
        let env: GameEnv<'_> = Env::new(Some(nav), Some(occlusion), None);
        let mut engine = GameEngine::new(&mut state, &config);

        assert_eq!(
            engine.begin_player_attack(p1, a1, env),
            Err(RulesError::Oracle(crate::env::OracleError::RngNotAvailable))
        );
    }
}
