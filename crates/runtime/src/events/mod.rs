//! Topic-based event bus for runtime events.
//!
//! Engine events are published to specific topics, and consumers subscribe
//! only to the topics they need. The battle log and animation cues are
//! derived views of the same stream.

mod battle_log;
mod bus;
mod presentation;

pub use battle_log::{BattleLog, Narrator};
pub use bus::{Event, EventBus, Topic};
pub use presentation::{AnimationCue, AnimationSignal, cues_for};
