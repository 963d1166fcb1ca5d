//! Topic routing and presentation cues as seen by subscribers.

mod common;

use tactics_core::{GameEvent, Position, TurnPhase, UnitId};
use tactics_runtime::{AnimationCue, AnimationSignal, Event, EventBus, Topic};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

use common::{duel, start};

fn drain(rx: &mut Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn cues(events: &[Event]) -> Vec<AnimationCue> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Presentation(cue) => Some(*cue),
            _ => None,
        })
        .collect()
}

#[test]
fn engine_events_are_routed_by_kind() {
    let moved = Event::from(GameEvent::UnitMoved {
        unit: UnitId(1),
        from: Position::ORIGIN,
        to: Position::planar(1.0, 0.0),
        path: vec![],
    });
    assert_eq!(moved.topic(), Topic::Combat);

    let started = Event::from(GameEvent::PlayerTurnStarted { turn: 2 });
    assert_eq!(started.topic(), Topic::Turn);
    assert!(matches!(
        started.game_event(),
        Some(GameEvent::PlayerTurnStarted { turn: 2 })
    ));
    assert!(Event::Log("line".into()).game_event().is_none());
}

#[tokio::test]
async fn subscribers_only_see_their_topic() {
    let bus = EventBus::with_capacity(8);
    let mut receivers = bus.subscribe_multiple(&[Topic::Turn, Topic::Log]);

    bus.publish(Event::Log("hello".into()));
    bus.publish(Event::from(GameEvent::AiTurnStarted { turn: 0 }));
    // Nobody listens to presentation; publishing is still fine.
    bus.publish(Event::Presentation(AnimationCue::new(
        UnitId(1),
        AnimationSignal::Heal,
    )));

    let log = receivers.get_mut(&Topic::Log).unwrap();
    assert!(matches!(log.recv().await.unwrap(), Event::Log(line) if line == "hello"));
    assert!(matches!(log.try_recv(), Err(TryRecvError::Empty)));

    let turn = receivers.get_mut(&Topic::Turn).unwrap();
    assert!(matches!(
        turn.recv().await.unwrap(),
        Event::Turn(GameEvent::AiTurnStarted { turn: 0 })
    ));
}

#[tokio::test]
async fn move_publishes_the_move_and_a_walking_cue() {
    let (state, player, _) = duel(6.0);
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut presentation = handle.subscribe(Topic::Presentation);

    handle
        .move_unit(player, Position::planar(2.0, 0.0))
        .await
        .unwrap();

    match combat.recv().await.unwrap() {
        Event::Combat(GameEvent::UnitMoved { unit, to, .. }) => {
            assert_eq!(unit, player);
            assert_eq!(to, Position::planar(2.0, 0.0));
        }
        other => panic!("expected a move, got {other:?}"),
    }
    assert!(matches!(
        presentation.recv().await.unwrap(),
        Event::Presentation(AnimationCue {
            signal: AnimationSignal::Walking(true),
            ..
        })
    ));
}

#[tokio::test]
async fn phase_changes_go_to_the_turn_topic() {
    let (state, _, _) = duel(6.0);
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut turn = handle.subscribe(Topic::Turn);
    let mut combat = handle.subscribe(Topic::Combat);

    handle.finish_phase().await.unwrap();

    assert!(matches!(
        turn.recv().await.unwrap(),
        Event::Turn(GameEvent::PhaseChanged {
            from: TurnPhase::PlayerMovement,
            to: TurnPhase::PlayerAttack,
        })
    ));
    assert!(drain(&mut combat).is_empty());
}

#[tokio::test]
async fn ai_attack_plays_attack_then_hit_cues() {
    let (state, player, ai) = duel(2.0);
    let runtime = start(state).await;
    let handle = runtime.handle();
    let mut presentation = handle.subscribe(Topic::Presentation);

    handle.finish_player_turn().await.unwrap();
    runtime.run_ai_turn().await.unwrap();

    let cues = cues(&drain(&mut presentation));
    assert_eq!(
        cues,
        vec![
            AnimationCue::new(ai, AnimationSignal::Attack),
            AnimationCue::new(player, AnimationSignal::TakeDamage),
        ]
    );
}
