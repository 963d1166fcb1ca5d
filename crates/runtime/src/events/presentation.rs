//! Animation cues derived from engine events.

use serde::{Deserialize, Serialize};

use tactics_core::{GameEvent, UnitId};

/// Animation trigger sent to whatever renders a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSignal {
    TakeDamage,
    Death,
    Attack,
    Heal,
    Walking(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationCue {
    pub unit: UnitId,
    pub signal: AnimationSignal,
}

impl AnimationCue {
    pub const fn new(unit: UnitId, signal: AnimationSignal) -> Self {
        Self { unit, signal }
    }
}

/// Cues implied by one engine event, in playback order.
///
/// `Walking(false)` is not derived here: arrival is only known once the
/// presentation side reports it.
pub fn cues_for(event: &GameEvent) -> Vec<AnimationCue> {
    match *event {
        GameEvent::ActionStarted {
            actor,
            target: Some(_),
            ..
        } => vec![AnimationCue::new(actor, AnimationSignal::Attack)],
        GameEvent::ActionStarted {
            actor,
            target: None,
            ..
        } => vec![AnimationCue::new(actor, AnimationSignal::Heal)],
        GameEvent::DamageDealt { defender, .. } => {
            vec![AnimationCue::new(defender, AnimationSignal::TakeDamage)]
        }
        GameEvent::UnitDied { unit, .. } => vec![AnimationCue::new(unit, AnimationSignal::Death)],
        GameEvent::UnitMoved { unit, .. } => {
            vec![AnimationCue::new(unit, AnimationSignal::Walking(true))]
        }
        _ => Vec::new(),
    }
}
