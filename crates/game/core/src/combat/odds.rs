//! Player-facing attack odds.

use crate::env::OcclusionOracle;
use crate::state::Unit;

/// Odds that `attacker` hits `defender` under the line-of-sight rule.
///
/// The cast runs from the attacker's cast point to the defender. A blocked
/// line, or a defender beyond `attack_range`, yields 0. Otherwise the odds
/// fall off linearly: `1 - distance / attack_range`.
pub fn range_line_of_sight_odds(
    attacker: &Unit,
    defender: &Unit,
    occlusion: &(impl OcclusionOracle + ?Sized),
) -> f32 {
    let range = attacker.attack_range;
    if range <= 0.0 {
        return 0.0;
    }

    let distance = attacker.distance_to(defender);
    if distance > range {
        return 0.0;
    }

    if !occlusion.has_line_of_sight(attacker.cast_point(), defender.position) {
        return 0.0;
    }

    (1.0 - distance / range).clamp(0.0, 1.0)
}
