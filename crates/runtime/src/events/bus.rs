//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use tactics_core::GameEvent;

use super::presentation::AnimationCue;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Damage, misses, heals, deaths, moves and action lifecycle
    Combat,
    /// Phase changes, turn starts, target assignment and game over
    Turn,
    /// Human-readable battle log lines
    Log,
    /// Fire-and-forget animation cues
    Presentation,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Combat, Topic::Turn, Topic::Log, Topic::Presentation];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(GameEvent),
    Turn(GameEvent),
    Log(String),
    Presentation(AnimationCue),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Turn(_) => Topic::Turn,
            Event::Log(_) => Topic::Log,
            Event::Presentation(_) => Topic::Presentation,
        }
    }

    /// The engine event carried by `Combat` and `Turn`.
    pub fn game_event(&self) -> Option<&GameEvent> {
        match self {
            Event::Combat(event) | Event::Turn(event) => Some(event),
            Event::Log(_) | Event::Presentation(_) => None,
        }
    }
}

impl From<GameEvent> for Event {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::PhaseChanged { .. }
            | GameEvent::AiTurnStarted { .. }
            | GameEvent::PlayerTurnStarted { .. }
            | GameEvent::TargetAssigned { .. }
            | GameEvent::GameOver { .. } => Event::Turn(event),
            _ => Event::Combat(event),
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. The topic set is fixed at construction, so the
/// channel map is shared without a lock.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created up front; a detached receiver is never fed.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
