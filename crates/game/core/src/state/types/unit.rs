use bitflags::bitflags;

use super::{Position, Team, UnitId};

bitflags! {
    /// Per-turn bookkeeping flags carried by every unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        /// Unit has spent its move this turn.
        const MOVED    = 1 << 0;
        /// Unit has spent its attack this turn.
        const ATTACKED = 1 << 1;
        /// An attack or heal is in flight (mutually exclusive).
        const BUSY     = 1 << 2;
        /// Next move ignores the movement range.
        const TELEPORT = 1 << 3;
    }
}

/// Static stat block used to spawn a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub max_health: f32,
    pub base_damage: u32,
    pub attack_range: f32,
    pub movement_range: f32,
    /// Height of the line-of-sight origin above the unit's position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_height: f32,
}

impl UnitStats {
    pub const fn new(
        max_health: f32,
        base_damage: u32,
        attack_range: f32,
        movement_range: f32,
    ) -> Self {
        Self {
            max_health,
            base_damage,
            attack_range,
            movement_range,
            cast_height: 0.0,
        }
    }

    pub const fn with_cast_height(mut self, cast_height: f32) -> Self {
        self.cast_height = cast_height;
        self
    }
}

impl Default for UnitStats {
    fn default() -> Self {
        Self::new(100.0, 10, 1.0, 15.0)
    }
}

/// A combatant on the battlefield.
///
/// Health is private: every mutation goes through a method that clamps it to
/// `[0, max_health]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub position: Position,
    health: f32,
    max_health: f32,
    pub base_damage: u32,
    pub attack_range: f32,
    pub movement_range: f32,
    pub cast_height: f32,
    pub flags: UnitFlags,
    /// Opponent this unit is committed to (AI bookkeeping).
    pub target: Option<UnitId>,
}

impl Unit {
    /// Creates a unit at full health.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        team: Team,
        position: Position,
        stats: UnitStats,
    ) -> Self {
        let max_health = stats.max_health.max(0.0);
        Self {
            id,
            name: name.into(),
            team,
            position,
            health: max_health,
            max_health,
            base_damage: stats.base_damage,
            attack_range: stats.attack_range,
            movement_range: stats.movement_range,
            cast_height: stats.cast_height,
            flags: UnitFlags::empty(),
            target: None,
        }
    }

    /// Builder-style health override (clamped).
    pub fn with_health(mut self, health: f32) -> Self {
        self.set_health(health);
        self
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health lost so far.
    pub fn missing_health(&self) -> f32 {
        self.max_health - self.health
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn stats(&self) -> UnitStats {
        UnitStats {
            max_health: self.max_health,
            base_damage: self.base_damage,
            attack_range: self.attack_range,
            movement_range: self.movement_range,
            cast_height: self.cast_height,
        }
    }

    /// Sets health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: f32) {
        self.health = clamp_health(health, self.max_health);
    }

    /// Subtracts damage, clamped at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, damage: f32) -> f32 {
        let before = self.health;
        self.set_health(self.health - damage.max(0.0));
        before - self.health
    }

    /// Adds health, clamped at `max_health`. Returns the health actually gained.
    pub fn add_health(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.set_health(self.health + amount.max(0.0));
        self.health - before
    }

    /// Raises the health cap. Current health is unchanged.
    pub fn raise_max_health(&mut self, amount: f32) {
        self.max_health += amount.max(0.0);
    }

    pub fn has_moved(&self) -> bool {
        self.flags.contains(UnitFlags::MOVED)
    }

    pub fn has_attacked(&self) -> bool {
        self.flags.contains(UnitFlags::ATTACKED)
    }

    pub fn is_busy(&self) -> bool {
        self.flags.contains(UnitFlags::BUSY)
    }

    pub fn can_teleport(&self) -> bool {
        self.flags.contains(UnitFlags::TELEPORT)
    }

    /// Clears the per-turn move and attack flags.
    pub fn reset_turn_flags(&mut self) {
        self.flags.remove(UnitFlags::MOVED | UnitFlags::ATTACKED);
    }

    /// Origin of line-of-sight casts.
    pub fn cast_point(&self) -> Position {
        self.position.raised(self.cast_height)
    }

    pub fn distance_to(&self, other: &Unit) -> f32 {
        self.position.distance(other.position)
    }
}

fn clamp_health(health: f32, max_health: f32) -> f32 {
    if health.is_nan() {
        return 0.0;
    }
    health.clamp(0.0, max_health.max(0.0))
}
