//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use tactics_content::Scenario;
use tactics_core::{GameState, RulesConfig, SaveType, SpawnPoints};

use crate::api::{InstantPresentation, PresentationDriver, Result, RuntimeError, RuntimeHandle};
use crate::events::{BattleLog, Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::orchestrator::{AiTurnReport, TurnOrchestrator};
use crate::repository::{SaveRepository, SavedGame};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub rules: RulesConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Longest wait for a walk to be reported finished before moving on.
    pub move_timeout: Duration,
    /// Longest wait for an attack or heal to become ready before cancelling.
    pub action_timeout: Duration,
}

impl RuntimeConfig {
    pub const DEFAULT_MOVE_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(3);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            move_timeout: Self::DEFAULT_MOVE_TIMEOUT,
            action_timeout: Self::DEFAULT_ACTION_TIMEOUT,
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    orchestrator: TurnOrchestrator,
    repository: Option<Arc<dyn SaveRepository>>,
    spawns: SpawnPoints,
    level_index: u32,

    // Play time carried over from a loaded save plus time since start/load.
    play_time_base: u64,
    started: Instant,

    sim_worker_handle: JoinHandle<()>,
    battle_log_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    /// Runs the current AI turn with the configured presentation driver.
    pub async fn run_ai_turn(&self) -> Result<AiTurnReport> {
        self.orchestrator.run_ai_turn().await
    }

    pub fn play_time_secs(&self) -> u64 {
        self.play_time_base + self.started.elapsed().as_secs()
    }

    /// Writes the live state to `slot`.
    pub async fn save(&self, slot: &str, save_type: SaveType) -> Result<SavedGame> {
        let repository = self
            .repository
            .clone()
            .ok_or(RuntimeError::RepositoryNotSet)?;

        let snapshot = self
            .handle
            .export_snapshot(self.level_index)
            .await?
            .with_name(slot)
            .with_save_type(save_type)
            .with_play_time(self.play_time_secs());

        let slot = slot.to_owned();
        let saved = tokio::task::spawn_blocking(move || repository.save(&slot, &snapshot))
            .await
            .map_err(RuntimeError::WorkerJoin)??;

        tracing::info!(
            target: "runtime",
            slot = %saved.slot,
            save_type = %saved.snapshot.save_type,
            turn = saved.snapshot.level.turn_count,
            "Game saved"
        );
        Ok(saved)
    }

    /// Replaces the live state with the save in `slot`.
    pub async fn load(&mut self, slot: &str) -> Result<SavedGame> {
        let repository = self
            .repository
            .clone()
            .ok_or(RuntimeError::RepositoryNotSet)?;

        let owned_slot = slot.to_owned();
        let saved = tokio::task::spawn_blocking(move || repository.load(&owned_slot))
            .await
            .map_err(RuntimeError::WorkerJoin)??
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.to_owned()))?;

        self.handle
            .import_snapshot(saved.snapshot.clone(), self.spawns.clone())
            .await?;
        self.level_index = saved.snapshot.level.level_index;
        self.play_time_base = saved.snapshot.play_time_secs;
        self.started = Instant::now();
        Ok(saved)
    }

    /// Restarts the level: every unit back on a spawn point at full health.
    pub async fn restart_level(&mut self) -> Result<()> {
        let snapshot = self.handle.export_snapshot(self.level_index).await?;
        self.handle
            .import_snapshot(snapshot.cleared(), self.spawns.clone())
            .await?;
        self.play_time_base = 0;
        self.started = Instant::now();
        Ok(())
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, so every other [`RuntimeHandle`] clone must be
    /// dropped first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.orchestrator);
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.battle_log_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    scenario: Option<Scenario>,
    oracles: Option<OracleManager>,
    spawns: Option<SpawnPoints>,
    level_index: Option<u32>,
    repository: Option<Arc<dyn SaveRepository>>,
    presentation: Option<Arc<dyn PresentationDriver>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            scenario: None,
            oracles: None,
            spawns: None,
            level_index: None,
            repository: None,
            presentation: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.config.rules = rules;
        self
    }

    /// Start from a scenario: its state, spawn points, level index and
    /// arena oracles, unless set explicitly.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Spawn points used when restoring saves.
    pub fn spawns(mut self, spawns: SpawnPoints) -> Self {
        self.spawns = Some(spawns);
        self
    }

    pub fn level_index(mut self, level_index: u32) -> Self {
        self.level_index = Some(level_index);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Presentation driver for AI turns (default: [`InstantPresentation`]).
    pub fn presentation(mut self, presentation: Arc<dyn PresentationDriver>) -> Self {
        self.presentation = Some(presentation);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let initial_state = match (self.state, &self.scenario) {
            (Some(state), _) => state,
            (None, Some(scenario)) => scenario.build_state().map_err(RuntimeError::Restore)?,
            (None, None) => return Err(RuntimeError::MissingState),
        };

        let oracles = self.oracles.unwrap_or_else(|| match &self.scenario {
            Some(scenario) => OracleManager::from_scenario(scenario),
            None => OracleManager::open_ground(),
        });
        let spawns = self
            .spawns
            .or_else(|| self.scenario.as_ref().map(|s| s.spawns.clone()))
            .unwrap_or_default();
        let level_index = self
            .level_index
            .or_else(|| self.scenario.as_ref().map(|s| s.level_index))
            .unwrap_or_default();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let (battle_log, battle_log_handle) =
            BattleLog::follow(&event_bus, self.config.rules.battle_log_capacity);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), battle_log);

        let sim_worker = SimulationWorker::new(
            initial_state,
            self.config.rules.clone(),
            oracles,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        let orchestrator = TurnOrchestrator::new(
            handle.clone(),
            self.presentation
                .unwrap_or_else(|| Arc::new(InstantPresentation)),
            self.config.move_timeout,
            self.config.action_timeout,
        );

        tracing::debug!(
            target: "runtime",
            level_index,
            "Runtime started"
        );

        Ok(Runtime {
            handle,
            orchestrator,
            repository: self.repository,
            spawns,
            level_index,
            play_time_base: 0,
            started: Instant::now(),
            sim_worker_handle,
            battle_log_handle,
        })
    }
}
