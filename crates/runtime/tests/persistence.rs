//! Save slots, restores and level restarts.

mod common;

use std::sync::Arc;

use tactics_content::ContentFactory;
use tactics_core::{Position, SaveType, Snapshot, TurnPhase, export_state};
use tactics_runtime::{
    FileSaveRepository, InMemorySaveRepo, RepositoryError, Runtime, RuntimeError, SaveRepository,
};
use tempfile::TempDir;

use common::{duel, quick_config};

fn snapshot() -> Snapshot {
    let (state, _, _) = duel(4.0);
    export_state(&state, 3).with_name("duel")
}

#[tokio::test]
async fn save_then_load_restores_the_live_state() {
    let (state, player, _) = duel(4.0);
    let repo = Arc::new(InMemorySaveRepo::new());
    let mut runtime = Runtime::builder()
        .config(quick_config())
        .initial_state(state)
        .repository(repo.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let saved = runtime.save("before_move", SaveType::Manual).await.unwrap();
    assert_eq!(saved.snapshot.save_name, "before_move");
    assert!(repo.exists("before_move"));

    handle
        .move_unit(player, Position::planar(3.0, 0.0))
        .await
        .unwrap();
    let moved = handle.query_state().await.unwrap();
    assert_eq!(moved.unit(player).unwrap().position, Position::planar(3.0, 0.0));

    runtime.load("before_move").await.unwrap();
    let restored = handle.query_state().await.unwrap();
    assert_eq!(restored.unit(player).unwrap().position, Position::ORIGIN);
    assert!(!restored.unit(player).unwrap().has_moved());
    assert_eq!(restored.nonce, saved.snapshot.nonce);
}

#[tokio::test]
async fn loading_a_missing_slot_fails() {
    let (state, _, _) = duel(4.0);
    let mut runtime = Runtime::builder()
        .initial_state(state)
        .repository(Arc::new(InMemorySaveRepo::new()))
        .build()
        .await
        .unwrap();

    let err = runtime.load("nowhere").await.unwrap_err();
    assert!(matches!(err, RuntimeError::SaveNotFound(slot) if slot == "nowhere"));
}

#[tokio::test]
async fn saving_without_a_repository_fails() {
    let (state, _, _) = duel(4.0);
    let runtime = Runtime::builder().initial_state(state).build().await.unwrap();
    assert!(matches!(
        runtime.save("slot", SaveType::Auto).await,
        Err(RuntimeError::RepositoryNotSet)
    ));
}

#[tokio::test]
async fn restart_returns_units_to_their_spawns() {
    let scenario = ContentFactory::bundled().load_scenario("skirmish").unwrap();
    let mut runtime = Runtime::builder()
        .config(quick_config())
        .scenario(scenario.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let start = handle.query_state().await.unwrap();
    let knight = start.players.ids()[0];
    let origin = start.unit(knight).unwrap().position;

    handle
        .move_unit(knight, origin.offset(0.0, 4.0))
        .await
        .unwrap();
    handle.finish_player_turn().await.unwrap();
    runtime.run_ai_turn().await.unwrap();

    runtime.restart_level().await.unwrap();
    let restarted = handle.query_state().await.unwrap();
    assert_eq!(restarted.turn.turn_count, 0);
    assert_eq!(restarted.turn.phase, TurnPhase::PlayerMovement);
    assert_eq!(restarted.players.len(), scenario.spawns.player.len());
    for unit in restarted.units() {
        assert_eq!(unit.health(), unit.max_health());
        assert!(unit.flags.is_empty());
    }
    assert!(restarted.combat_log.is_empty());
}

#[test]
fn file_repository_round_trips_through_json() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let snapshot = snapshot();

    let saved = repo.save("slot-1", &snapshot).unwrap();
    assert!(repo.exists("slot-1"));
    assert!(dir.path().join("slot-1.save.json").exists());

    let loaded = repo.load("slot-1").unwrap().unwrap();
    assert_eq!(loaded.snapshot, snapshot);
    assert_eq!(loaded.last_saved, saved.last_saved);
    assert_eq!(repo.load("slot-2").unwrap(), None);
}

#[test]
fn file_repository_lists_and_deletes() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let snapshot = snapshot();

    repo.save("b", &snapshot.clone().with_save_type(SaveType::Auto))
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    repo.save("a", &snapshot).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let slots: Vec<_> = repo.list().unwrap().into_iter().map(|s| s.slot).collect();
    assert_eq!(slots, ["a", "b"]);
    assert_eq!(repo.latest().unwrap().unwrap().slot, "a");

    repo.delete("a").unwrap();
    assert!(!repo.exists("a"));
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn slot_names_cannot_escape_the_directory() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    assert!(matches!(
        repo.save("../evil", &snapshot()),
        Err(RepositoryError::InvalidSlot(_))
    ));
    assert!(!repo.exists("../evil"));
}

#[test]
fn corrupted_save_is_reported() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("broken.save.json"), "{ not json").unwrap();
    assert!(matches!(
        repo.load("broken"),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn memory_repository_matches_the_file_contract() {
    let repo = InMemorySaveRepo::new();
    let snapshot = snapshot();

    repo.save("slot", &snapshot).unwrap();
    assert_eq!(repo.load("slot").unwrap().unwrap().snapshot, snapshot);
    assert_eq!(repo.list().unwrap()[0].save_name, "duel");
    repo.delete("slot").unwrap();
    assert_eq!(repo.load("slot").unwrap(), None);
    assert!(repo.save("bad slot", &snapshot).is_err());
}
