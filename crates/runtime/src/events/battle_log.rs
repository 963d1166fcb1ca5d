//! Human-readable battle log.
//!
//! The simulation worker narrates engine events into short lines and
//! publishes them on [`Topic::Log`](super::Topic::Log). [`BattleLog`] keeps the
//! most recent lines in a bounded ring.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;

use tactics_core::{GameEvent, GameState, UnitId};

use super::{Event, EventBus, Topic};

/// Bounded ring of battle log lines; the oldest line drops first.
#[derive(Debug, Clone)]
pub struct BattleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Spawns a task that appends every [`Topic::Log`] line to a shared log.
    ///
    /// The task ends when the bus is dropped.
    pub fn follow(bus: &EventBus, capacity: usize) -> (Arc<RwLock<BattleLog>>, JoinHandle<()>) {
        let log = Arc::new(RwLock::new(BattleLog::new(capacity)));
        let mut rx = bus.subscribe(Topic::Log);
        let shared = Arc::clone(&log);

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(Event::Log(line)) => shared.write().await.push(line),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(target: "runtime::battle_log", skipped, "Battle log lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        (log, task)
    }
}

/// Unit names used when narrating, kept so dead units can still be named.
#[derive(Debug, Clone, Default)]
pub struct Narrator {
    names: HashMap<UnitId, String>,
}

impl Narrator {
    pub fn from_state(state: &GameState) -> Self {
        let mut narrator = Self::default();
        narrator.learn(state);
        narrator
    }

    /// Records the names of every unit currently in `state`.
    pub fn learn(&mut self, state: &GameState) {
        for unit in state.units() {
            self.names.insert(unit.id, unit.name.clone());
        }
    }

    fn name(&self, id: UnitId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// One log line for `event`, or `None` for bookkeeping-only events.
    pub fn narrate(&self, event: &GameEvent) -> Option<String> {
        let line = match event {
            GameEvent::DamageDealt {
                attacker,
                defender,
                amount,
                remaining,
            } => format!(
                "{} hits {} for {amount:.0} ({remaining:.0} left)",
                self.name(*attacker),
                self.name(*defender),
            ),
            GameEvent::AttackMissed {
                attacker,
                defender,
                chance,
                ..
            } => format!(
                "{} misses {} ({:.0}% chance)",
                self.name(*attacker),
                self.name(*defender),
                chance * 100.0
            ),
            GameEvent::UnitHealed {
                unit,
                amount,
                health,
            } => format!(
                "{} heals {amount:.0} (now {health:.0})",
                self.name(*unit)
            ),
            GameEvent::UnitDied { unit, .. } => format!("{} falls", self.name(*unit)),
            GameEvent::UnitMoved { unit, from, to, .. } => format!(
                "{} moves {:.1}m",
                self.name(*unit),
                from.distance(*to)
            ),
            GameEvent::ActionCancelled { actor, .. } => {
                format!("{} hesitates", self.name(*actor))
            }
            GameEvent::ActionRejected {
                actor: Some(actor),
                reason,
                ..
            } => format!("{}: {reason}", self.name(*actor)),
            GameEvent::ActionRejected {
                actor: None,
                reason,
                ..
            } => format!("rejected: {reason}"),
            GameEvent::AiTurnStarted { turn } => format!("-- enemy turn {} --", turn + 1),
            GameEvent::PlayerTurnStarted { turn } => format!("-- your turn {} --", turn + 1),
            GameEvent::PickupConsumed { unit, kind, .. } => {
                format!("{} picks up {kind}", self.name(*unit))
            }
            GameEvent::GameOver { winner } => format!("Game over: {winner} wins"),
            GameEvent::ActionStarted { .. }
            | GameEvent::PhaseChanged { .. }
            | GameEvent::TargetAssigned { .. } => return None,
        };
        Some(line)
    }
}
