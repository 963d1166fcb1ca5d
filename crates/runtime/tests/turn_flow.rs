//! Player and AI turns driven through the runtime.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tactics_core::{
    ActionResolution, GameEvent, GameState, Position, RulesError, Team, TurnPhase,
};
use tactics_runtime::{Event, Runtime, RuntimeError, Topic};

use common::{BRAWLER, FrozenAnimator, RIFLE, StuckWalker, duel, quick_config, start};

#[tokio::test]
async fn player_attack_resolves_with_the_roll_drawn_at_begin() {
    let (state, player, ai) = duel(4.0);
    let runtime = start(state).await;
    let handle = runtime.handle();

    assert_eq!(handle.finish_phase().await.unwrap(), TurnPhase::PlayerAttack);

    let odds = handle.preview_odds(player, ai).await.unwrap();
    assert!((odds - 0.5).abs() < 1e-6);

    let action = handle.begin_attack(player, ai).await.unwrap();
    let busy = handle.query_state().await.unwrap();
    assert!(busy.unit(player).unwrap().is_busy());

    let ActionResolution::Attack(event) = handle.complete_action(action).await.unwrap() else {
        panic!("attack should resolve as an attack");
    };
    assert_eq!(event.chance, odds);

    let after = handle.query_state().await.unwrap();
    let defender = after.unit(ai).unwrap();
    if event.is_hit() {
        assert_eq!(defender.health(), 75.0);
    } else {
        assert_eq!(defender.health(), 100.0);
    }
    assert!(after.unit(player).unwrap().has_attacked());
    assert_eq!(after.combat_log.len(), 1);
}

#[tokio::test]
async fn rejected_move_changes_nothing_and_is_published() {
    let (state, player, _) = duel(4.0);
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let before = handle.query_state().await.unwrap();

    let err = handle
        .move_unit(player, Position::planar(-50.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Rules(RulesError::OutOfRange { .. })
    ));
    assert!(err.is_recoverable());

    let after = handle.query_state().await.unwrap();
    assert_eq!(after, before);

    match combat.recv().await.unwrap() {
        Event::Combat(GameEvent::ActionRejected { actor, code, .. }) => {
            assert_eq!(actor, Some(player));
            assert_eq!(code, "RULES_OUT_OF_RANGE");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn ai_turn_attacks_and_returns_control() {
    let (state, player, ai) = duel(2.0);
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.acted, vec![ai]);
    assert!(report.cancelled.is_empty());
    assert_eq!(report.winner, None);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.turn.phase, TurnPhase::PlayerMovement);
    assert_eq!(state.turn.turn_count, 1);
    // A full-health AI unit always hits under the self-health rule.
    assert_eq!(state.unit(player).unwrap().health(), 75.0);
    assert!(!state.unit(ai).unwrap().has_attacked());

    let mut saw_assignment = false;
    let mut saw_player_turn = false;
    while let Ok(event) = turns.try_recv() {
        match event {
            Event::Turn(GameEvent::TargetAssigned { unit, target }) => {
                assert_eq!((unit, target), (ai, Some(player)));
                saw_assignment = true;
            }
            Event::Turn(GameEvent::PlayerTurnStarted { turn }) => {
                assert_eq!(turn, 1);
                saw_player_turn = true;
            }
            _ => {}
        }
    }
    assert!(saw_assignment && saw_player_turn);
}

#[tokio::test]
async fn stalled_action_is_cancelled_without_effect() {
    let (state, player, ai) = duel(2.0);
    let runtime = Runtime::builder()
        .config(quick_config())
        .initial_state(state)
        .presentation(Arc::new(FrozenAnimator))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.cancelled, vec![ai]);
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.unit(player).unwrap().health(), 100.0);
    assert!(state.pending.is_none());
    assert!(state.combat_log.is_empty());
    assert_eq!(state.turn.phase, TurnPhase::PlayerMovement);
}

#[tokio::test]
async fn stalled_walk_times_out_and_the_turn_goes_on() {
    let (state, _, ai) = duel(30.0);
    let runtime = Runtime::builder()
        .config(quick_config())
        .initial_state(state)
        .presentation(Arc::new(StuckWalker))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.move_timeouts, 1);
    assert_eq!(report.acted, vec![ai]);
    let state = handle.query_state().await.unwrap();
    // Advanced the full movement range toward the player.
    assert!((state.unit(ai).unwrap().position.x - 20.0).abs() < 1e-4);
}

#[tokio::test]
async fn killing_the_last_player_ends_the_game() {
    let (mut state, player, ai) = duel(2.0);
    state.unit_mut(player).unwrap().set_health(10.0);
    let runtime = start(state).await;
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.winner, Some(Team::Ai));
    assert_eq!(report.acted, vec![ai]);

    let state = handle.query_state().await.unwrap();
    assert!(state.players.is_empty());
    assert_eq!(state.turn.phase, TurnPhase::GameOver { winner: Team::Ai });

    let err = handle.finish_phase().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Rules(RulesError::Turn(_))));
}

#[tokio::test]
async fn battle_log_narrates_the_fight() {
    let (state, _, _) = duel(2.0);
    let runtime = start(state).await;
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    runtime.run_ai_turn().await.unwrap();

    let mut lines = Vec::new();
    for _ in 0..50 {
        lines = handle.battle_log().await;
        if lines.iter().any(|line| line.contains("your turn")) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(lines.iter().any(|line| line == "Brawler hits Rifle for 25 (75 left)"));
    assert!(lines.iter().any(|line| line.contains("your turn 2")));
}

#[tokio::test]
async fn hurt_ai_unit_flees_then_heals() {
    let (mut state, player, ai) = duel(-3.0);
    state.unit_mut(ai).unwrap().set_health(20.0);
    let runtime = start(state).await;
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.acted, vec![ai]);
    assert!(report.skipped.is_empty());

    let state = handle.query_state().await.unwrap();
    let fled = state.unit(ai).unwrap();
    let from = Position::planar(-3.0, 0.0);
    assert_ne!(fled.position, from);
    assert!(from.distance(fled.position) <= fled.movement_range + 1e-3);
    assert!((Position::ORIGIN.distance(fled.position) - 10.0).abs() < 1e-3);
    assert_eq!(fled.health(), 25.0);
    assert_eq!(state.unit(player).unwrap().health(), 100.0);
    assert!(state.combat_log.is_empty());
}

#[tokio::test]
async fn approach_spends_the_turn_without_attacking() {
    let (state, player, ai) = duel(11.0);
    let runtime = start(state).await;
    let handle = runtime.handle();

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();

    assert_eq!(report.acted, vec![ai]);
    let state = handle.query_state().await.unwrap();
    // Closed in to half the brawler's attack range.
    assert!((state.unit(ai).unwrap().position.x - 1.5).abs() < 1e-4);
    assert_eq!(state.unit(player).unwrap().health(), 100.0);
    assert!(state.combat_log.is_empty());
    assert_eq!(state.turn.phase, TurnPhase::PlayerMovement);
}

#[tokio::test]
async fn every_ai_unit_shares_the_last_player() {
    let mut state = GameState::new(77);
    let player = state
        .spawn_unit(Team::Player, "Rifle", Position::ORIGIN, RIFLE)
        .unwrap();
    let ais: Vec<_> = [2.0, 30.0, 60.0]
        .into_iter()
        .map(|x| {
            state
                .spawn_unit(Team::Ai, "Brawler", Position::planar(x, 0.0), BRAWLER)
                .unwrap()
        })
        .collect();
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle.finish_player_turn().await.unwrap();
    let report = runtime.run_ai_turn().await.unwrap();
    assert_eq!(report.acted, ais);

    let mut assigned = Vec::new();
    while let Ok(event) = turns.try_recv() {
        if let Event::Turn(GameEvent::TargetAssigned { unit, target }) = event {
            assert_eq!(target, Some(player));
            assigned.push(unit);
        }
    }
    assert_eq!(assigned, ais);

    let state = handle.query_state().await.unwrap();
    for id in &ais {
        assert_eq!(state.unit(*id).unwrap().target, Some(player));
    }
    // The nearest attacks; the others advance a full movement range.
    assert_eq!(state.unit(player).unwrap().health(), 75.0);
    assert!((state.unit(ais[1]).unwrap().position.x - 20.0).abs() < 1e-4);
    assert!((state.unit(ais[2]).unwrap().position.x - 50.0).abs() < 1e-4);
}
