//! Simulation worker that owns the authoritative [`tactics_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! through [`tactics_core::GameEngine`], and publishes the resulting events
//! on the [`EventBus`]. It is the only writer of the state.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use tactics_core::{
    ActionHandle, ActionResolution, AiDecision, GameEngine, GameEnv, GameError, GameEvent,
    GameState, Position, RulesConfig, RulesError, Selection, Snapshot, SpawnPoints,
    TargetAssignment, Team, TurnPhase, UnitId, export_state, import_state,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, Narrator, cues_for};
use crate::oracle::OracleManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    SelectUnit {
        unit: UnitId,
        reply: oneshot::Sender<Result<Selection>>,
    },
    SelectTarget {
        target: UnitId,
        reply: oneshot::Sender<Result<Selection>>,
    },
    /// Moves a unit of either team; the team decides which rules apply.
    MoveUnit {
        unit: UnitId,
        destination: Position,
        reply: oneshot::Sender<Result<Vec<Position>>>,
    },
    PreviewOdds {
        attacker: UnitId,
        defender: UnitId,
        reply: oneshot::Sender<Result<f32>>,
    },
    /// Begins an attack by a unit of either team.
    BeginAttack {
        attacker: UnitId,
        defender: UnitId,
        reply: oneshot::Sender<Result<ActionHandle>>,
    },
    BeginSelectedAttack {
        reply: oneshot::Sender<Result<ActionHandle>>,
    },
    BeginHeal {
        unit: UnitId,
        reply: oneshot::Sender<Result<ActionHandle>>,
    },
    CompleteAction {
        handle: ActionHandle,
        reply: oneshot::Sender<Result<ActionResolution>>,
    },
    CancelAction {
        handle: ActionHandle,
        reply: oneshot::Sender<Result<UnitId>>,
    },
    FinishPhase {
        reply: oneshot::Sender<Result<TurnPhase>>,
    },
    FinishPlayerTurn {
        reply: oneshot::Sender<Result<TurnPhase>>,
    },
    AssignAiTargets {
        reply: oneshot::Sender<Result<Vec<TargetAssignment>>>,
    },
    PlanAiUnit {
        unit: UnitId,
        reply: oneshot::Sender<Result<AiDecision>>,
    },
    CompleteAiTurn {
        reply: oneshot::Sender<Result<TurnPhase>>,
    },
    /// Query the current game state (read-only).
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
    ExportSnapshot {
        level_index: u32,
        reply: oneshot::Sender<Snapshot>,
    },
    /// Replaces the state with a restored snapshot.
    ImportSnapshot {
        snapshot: Box<Snapshot>,
        spawns: SpawnPoints,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    config: RulesConfig,
    oracles: OracleManager,
    narrator: Narrator,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        config: RulesConfig,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let narrator = Narrator::from_state(&state);
        Self {
            state,
            config,
            oracles,
            narrator,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop; ends when every command sender is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "Command channel closed, simulation worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SelectUnit { unit, reply } => {
                let result = self.execute(|engine, _| engine.select_unit(unit));
                let _ = reply.send(result);
            }
            Command::SelectTarget { target, reply } => {
                let result = self.execute(|engine, _| engine.select_target(target));
                let _ = reply.send(result);
            }
            Command::MoveUnit {
                unit,
                destination,
                reply,
            } => {
                let team = self.team_of(unit);
                let result = self.execute(|engine, env| match team {
                    Some(Team::Ai) => engine.move_ai_unit(unit, destination, env),
                    _ => engine.move_unit(unit, destination, env),
                });
                let _ = reply.send(result);
            }
            Command::PreviewOdds {
                attacker,
                defender,
                reply,
            } => {
                let result = self.execute(|engine, env| engine.preview_odds(attacker, defender, env));
                let _ = reply.send(result);
            }
            Command::BeginAttack {
                attacker,
                defender,
                reply,
            } => {
                let team = self.team_of(attacker);
                let result = self.execute(|engine, env| match team {
                    Some(Team::Ai) => engine.begin_ai_attack(attacker, defender, env),
                    _ => engine.begin_player_attack(attacker, defender, env),
                });
                let _ = reply.send(result);
            }
            Command::BeginSelectedAttack { reply } => {
                let result = self.execute(|engine, env| engine.begin_selected_attack(env));
                let _ = reply.send(result);
            }
            Command::BeginHeal { unit, reply } => {
                let result = self.execute(|engine, _| engine.begin_heal(unit));
                let _ = reply.send(result);
            }
            Command::CompleteAction { handle, reply } => {
                let result = self.execute(|engine, _| engine.complete_action(handle));
                let _ = reply.send(result);
            }
            Command::CancelAction { handle, reply } => {
                let result = self.execute(|engine, _| engine.cancel_action(handle));
                let _ = reply.send(result);
            }
            Command::FinishPhase { reply } => {
                let result = self.execute(|engine, _| engine.finish_phase());
                let _ = reply.send(result);
            }
            Command::FinishPlayerTurn { reply } => {
                let result = self.execute(|engine, _| engine.finish_player_turn());
                let _ = reply.send(result);
            }
            Command::AssignAiTargets { reply } => {
                let result = self.execute(|engine, _| {
                    engine.ensure_rosters()?;
                    engine.assign_ai_targets()
                });
                let _ = reply.send(result);
            }
            Command::PlanAiUnit { unit, reply } => {
                let result = self.execute(|engine, env| engine.plan_ai_unit(unit, env));
                let _ = reply.send(result);
            }
            Command::CompleteAiTurn { reply } => {
                let result = self.execute(|engine, _| engine.complete_ai_turn());
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::ExportSnapshot { level_index, reply } => {
                let _ = reply.send(export_state(&self.state, level_index));
            }
            Command::ImportSnapshot {
                snapshot,
                spawns,
                reply,
            } => {
                let result = self.import(&snapshot, &spawns);
                let _ = reply.send(result);
            }
        }
    }

    fn team_of(&self, unit: UnitId) -> Option<Team> {
        self.state.unit(unit).map(|unit| unit.team)
    }

    /// Runs one engine command and publishes whatever it emitted.
    ///
    /// Rejected commands leave the state untouched but still publish their
    /// `ActionRejected` event.
    fn execute<T>(
        &mut self,
        op: impl FnOnce(&mut GameEngine<'_>, GameEnv<'_>) -> std::result::Result<T, RulesError>,
    ) -> Result<T> {
        let env = self.oracles.as_game_env();
        let mut engine = GameEngine::new(&mut self.state, &self.config);
        let result = op(&mut engine, env);
        let events = engine.take_events();

        if let Err(error) = &result {
            debug!(
                target: "runtime::worker",
                code = error.error_code(),
                severity = error.severity().as_str(),
                error = %error,
                "Command rejected"
            );
        }

        self.publish(events);
        result.map_err(RuntimeError::from)
    }

    fn import(&mut self, snapshot: &Snapshot, spawns: &SpawnPoints) -> Result<()> {
        let state = import_state(snapshot, spawns).map_err(RuntimeError::Restore)?;
        info!(
            target: "runtime::worker",
            save = %snapshot.save_name,
            turn = state.turn.turn_count,
            units = snapshot.unit_count(),
            "Snapshot restored"
        );
        self.state = state;
        self.narrator.learn(&self.state);
        self.event_bus.publish(Event::Log(format!(
            "Loaded '{}' at turn {}",
            snapshot.save_name,
            self.state.turn.turn_count + 1
        )));
        Ok(())
    }

    fn publish(&self, events: Vec<GameEvent>) {
        for event in events {
            debug!(target: "runtime::worker", event = event.name(), "Engine event");

            let line = self.narrator.narrate(&event);
            let cues = cues_for(&event);

            self.event_bus.publish(Event::from(event));
            if let Some(line) = line {
                self.event_bus.publish(Event::Log(line));
            }
            for cue in cues {
                self.event_bus.publish(Event::Presentation(cue));
            }
        }
    }
}
