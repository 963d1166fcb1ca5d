//! Combat events and attack resolution.

use crate::state::{Unit, UnitFlags, UnitId};

use super::hit::{HitRule, is_hit};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Miss,
    Hit,
}

/// Immutable record of one attack attempt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub rule: HitRule,
    /// Hit chance in `[0, 1]`.
    pub chance: f32,
    /// Uniform roll in `[0, 1]`.
    pub roll: f32,
    pub outcome: AttackOutcome,
    /// Health the defender actually lost (0 on a miss).
    pub damage: f32,
    pub turn: u32,
}

impl CombatEvent {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

/// Resolves one attack between two live units.
///
/// On a hit the defender loses the attacker's `base_damage` (clamped at 0).
/// The attacker is marked as having attacked either way. The returned event is
/// not logged here; the caller appends it.
pub fn resolve_attack(
    attacker: &mut Unit,
    defender: &mut Unit,
    rule: HitRule,
    chance: f32,
    roll: f32,
    turn: u32,
) -> CombatEvent {
    let chance = chance.clamp(0.0, 1.0);
    let (outcome, damage) = if is_hit(chance, roll) {
        let dealt = defender.take_damage(attacker.base_damage as f32);
        (AttackOutcome::Hit, dealt)
    } else {
        (AttackOutcome::Miss, 0.0)
    };

    attacker.flags.insert(UnitFlags::ATTACKED);

    CombatEvent {
        attacker: attacker.id,
        defender: defender.id,
        rule,
        chance,
        roll,
        outcome,
        damage,
        turn,
    }
}
