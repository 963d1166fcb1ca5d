//! Headless skirmish client.
//!
//! Loads a scenario, plays the player side with a scripted autopilot, runs
//! every AI turn through the runtime and autosaves after each round. The
//! battle log is printed to stdout; diagnostics go to stderr and a
//! per-session log file.
//!
//! ```bash
//! SKIRMISH_SEED=7 SKIRMISH_MAX_TURNS=20 cargo run -p tactics-client
//! ```
mod autopilot;
mod config;
mod logging;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tactics_content::RulesLoader;
use tactics_core::{SaveType, combat_log_root};
use tactics_runtime::{Event, FileSaveRepository, Runtime, SaveRepository, Topic};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use autopilot::Autopilot;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config::log_dir(), config.session_id.as_deref())?;

    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let content = config.content();
    let rules = match &config.rules_path {
        Some(path) => RulesLoader::load(path)?,
        None => content.load_rules()?,
    };
    let mut scenario = content
        .load_scenario(&config.scenario)
        .with_context(|| format!("Failed to load scenario '{}'", config.scenario))?;
    if let Some(seed) = config.seed {
        scenario.seed = seed;
    }

    let save_dir = config.save_dir();
    let repository = Arc::new(FileSaveRepository::new(&save_dir)?);
    let resume = config.resume && repository.exists(ClientConfig::AUTOSAVE_SLOT);

    tracing::info!("Scenario: {} (seed {})", scenario.name, scenario.seed);
    tracing::info!("Save directory: {}", save_dir.display());

    let autopilot = Autopilot::for_scenario(&scenario, rules.clone());
    let mut runtime = Runtime::builder()
        .rules(rules)
        .scenario(scenario)
        .repository(repository)
        .build()
        .await?;

    let printer = attach_printer(&mut runtime, resume, std::io::stdout()).await?;
    let handle = runtime.handle();

    let mut winner = None;
    for _ in 0..config.max_turns {
        autopilot.play_turn(&handle).await?;
        if let Some(team) = handle.query_state().await?.turn.phase.winner() {
            winner = Some(team);
            break;
        }

        let report = runtime.run_ai_turn().await?;
        if report.winner.is_some() {
            winner = report.winner;
            break;
        }
        runtime
            .save(ClientConfig::AUTOSAVE_SLOT, SaveType::Auto)
            .await?;
    }

    let state = handle.query_state().await?;
    let root = combat_log_root(&state.combat_log).context("Failed to digest the combat log")?;
    match winner {
        Some(team) => tracing::info!("Winner: {} after {} turns", team, state.turn.turn_count),
        None => tracing::info!("No winner after {} turns", state.turn.turn_count),
    }
    tracing::info!(
        "Combat log: {} attacks, root {}",
        state.combat_log.len(),
        hex::encode(root)
    );

    drop(handle);
    runtime.shutdown().await?;
    printer.await?;
    Ok(())
}

/// Starts the battle log printer, then restores the autosave when `resume`
/// is set. The printer subscribes first so the restore line is printed too.
async fn attach_printer<W>(runtime: &mut Runtime, resume: bool, out: W) -> Result<JoinHandle<()>>
where
    W: Write + Send + 'static,
{
    let printer = spawn_log_printer(runtime.subscribe(Topic::Log), out);
    if resume {
        let saved = runtime.load(ClientConfig::AUTOSAVE_SLOT).await?;
        tracing::info!(
            "Resumed '{}' at turn {}",
            saved.slot,
            saved.snapshot.level.turn_count
        );
    }
    Ok(printer)
}

/// Writes battle log lines to `out` until the runtime shuts down.
fn spawn_log_printer<W>(mut rx: broadcast::Receiver<Event>, mut out: W) -> JoinHandle<()>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Event::Log(line)) => {
                    if let Err(error) = writeln!(out, "{line}") {
                        tracing::warn!("Battle log printer stopped: {}", error);
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Battle log printer skipped {} lines", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tactics_core::{GameState, Position, Team, UnitStats};
    use tactics_runtime::InMemorySaveRepo;

    use super::*;

    /// Shared in-memory sink standing in for stdout.
    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn resume_line_reaches_the_printer() {
        let mut state = GameState::new(3);
        let stats = UnitStats::new(100.0, 25, 3.0, 10.0);
        state
            .spawn_unit(Team::Player, "Pike", Position::ORIGIN, stats)
            .unwrap();
        state
            .spawn_unit(Team::Ai, "Goblin", Position::planar(20.0, 0.0), stats)
            .unwrap();
        let mut runtime = Runtime::builder()
            .initial_state(state)
            .repository(Arc::new(InMemorySaveRepo::new()))
            .build()
            .await
            .unwrap();
        runtime
            .save(ClientConfig::AUTOSAVE_SLOT, SaveType::Auto)
            .await
            .unwrap();

        let sink = Sink::default();
        let printer = attach_printer(&mut runtime, true, sink.clone())
            .await
            .unwrap();
        runtime.shutdown().await.unwrap();
        printer.await.unwrap();

        let printed = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(
            printed.contains("Loaded 'autosave'"),
            "printer missed the restore line: {printed:?}"
        );
    }
}
