use super::Position;

/// Effect granted by a pickup.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PickupKind {
    /// Restores health, capped at the unit's maximum.
    MedKit { amount: f32 },
    /// Raises the unit's maximum health.
    HealthBoost { amount: f32 },
    /// Multiplies the unit's movement range.
    RangeBoost { factor: f32 },
    /// Next move ignores the movement range.
    Teleport,
}

/// A field pickup that player units trigger by ending a move on it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub id: u32,
    pub position: Position,
    pub radius: f32,
    pub kind: PickupKind,
    /// Full turns the pickup stays inactive after use.
    pub cooldown_turns: u32,
    /// First turn on which the pickup is active again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ready_at_turn: u32,
}

impl Pickup {
    pub fn new(id: u32, position: Position, radius: f32, kind: PickupKind) -> Self {
        Self {
            id,
            position,
            radius,
            kind,
            cooldown_turns: 1,
            ready_at_turn: 0,
        }
    }

    pub fn with_cooldown(mut self, cooldown_turns: u32) -> Self {
        self.cooldown_turns = cooldown_turns;
        self
    }

    pub fn is_ready(&self, turn: u32) -> bool {
        turn >= self.ready_at_turn
    }

    pub fn covers(&self, position: Position) -> bool {
        self.position.distance(position) <= self.radius
    }

    /// Marks the pickup as used on `turn`.
    pub fn consume(&mut self, turn: u32) {
        self.ready_at_turn = turn.saturating_add(self.cooldown_turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_counts_turns() {
        let mut pickup = Pickup::new(1, Position::ORIGIN, 1.0, PickupKind::Teleport)
            .with_cooldown(2);
        assert!(pickup.is_ready(3));
        pickup.consume(3);
        assert!(!pickup.is_ready(4));
        assert!(pickup.is_ready(5));
    }
}
