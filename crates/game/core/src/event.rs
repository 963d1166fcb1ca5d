//! Notifications emitted by the engine.
//!
//! The engine queues these while mutating state; the runtime drains them after
//! each command and routes them to subscribers. No rule depends on anyone
//! consuming them.

use crate::state::{ActionHandle, PickupKind, Position, Team, TurnPhase, UnitId};

#[derive(Clone, Debug, PartialEq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameEvent {
    DamageDealt {
        attacker: UnitId,
        defender: UnitId,
        amount: f32,
        remaining: f32,
    },
    AttackMissed {
        attacker: UnitId,
        defender: UnitId,
        chance: f32,
        roll: f32,
    },
    UnitHealed {
        unit: UnitId,
        amount: f32,
        health: f32,
    },
    UnitDied {
        unit: UnitId,
        team: Team,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
        path: Vec<Position>,
    },
    /// A two-phase attack (`target` set) or heal (`target` empty) began.
    ActionStarted {
        handle: ActionHandle,
        actor: UnitId,
        target: Option<UnitId>,
    },
    ActionCancelled {
        handle: ActionHandle,
        actor: UnitId,
    },
    ActionRejected {
        actor: Option<UnitId>,
        code: String,
        reason: String,
    },
    PhaseChanged {
        from: TurnPhase,
        to: TurnPhase,
    },
    AiTurnStarted {
        turn: u32,
    },
    PlayerTurnStarted {
        turn: u32,
    },
    TargetAssigned {
        unit: UnitId,
        target: Option<UnitId>,
    },
    PickupConsumed {
        pickup: u32,
        unit: UnitId,
        kind: PickupKind,
    },
    GameOver {
        winner: Team,
    },
}

impl GameEvent {
    /// Stable snake_case name of the variant, for logs.
    pub fn name(&self) -> &str {
        self.as_ref()
    }

    /// Unit most directly concerned by this event, if any.
    pub fn subject(&self) -> Option<UnitId> {
        match self {
            GameEvent::DamageDealt { defender, .. } => Some(*defender),
            GameEvent::AttackMissed { attacker, .. } => Some(*attacker),
            GameEvent::UnitHealed { unit, .. }
            | GameEvent::UnitDied { unit, .. }
            | GameEvent::UnitMoved { unit, .. }
            | GameEvent::TargetAssigned { unit, .. }
            | GameEvent::PickupConsumed { unit, .. } => Some(*unit),
            GameEvent::ActionStarted { actor, .. } | GameEvent::ActionCancelled { actor, .. } => {
                Some(*actor)
            }
            GameEvent::ActionRejected { actor, .. } => *actor,
            GameEvent::PhaseChanged { .. }
            | GameEvent::AiTurnStarted { .. }
            | GameEvent::PlayerTurnStarted { .. }
            | GameEvent::GameOver { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case() {
        let event = GameEvent::PlayerTurnStarted { turn: 1 };
        assert_eq!(event.name(), "player_turn_started");
        assert_eq!(
            GameEvent::GameOver { winner: Team::Ai }.name(),
            "game_over"
        );
    }
}
