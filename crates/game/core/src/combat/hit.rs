//! Hit chance rules.

use crate::state::Unit;

/// Which odds rule produced an attack's hit chance.
///
/// AI and player attacks genuinely use different formulas; both are kept as
/// named rules and recorded on every combat event.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HitRule {
    /// Chance falls with the attacker's own missing health (AI attacks).
    SelfHealth,
    /// Line of sight and distance falloff (player attacks).
    RangeLineOfSight,
}

/// Chance that `attacker` lands a self-health attack.
///
/// ```text
/// chance = clamp((roll_range - (max_health - health)) / roll_range, 0, 1)
/// ```
///
/// Equals 1 at full health and never increases as health drops.
pub fn self_health_hit_chance(attacker: &Unit, roll_range: f32) -> f32 {
    let missing = attacker.missing_health();
    if roll_range <= 0.0 {
        return if missing <= 0.0 { 1.0 } else { 0.0 };
    }
    ((roll_range - missing) / roll_range).clamp(0.0, 1.0)
}

/// Shared hit test for a chance and a uniform `roll` in `[0, 1]`.
///
/// A certain chance always hits, even on a roll of exactly 1.
pub fn is_hit(chance: f32, roll: f32) -> bool {
    chance >= 1.0 || roll < chance
}
