use std::fmt;

use super::UnitId;
use crate::combat::HitRule;

/// Ticket for a two-phase action, returned by `begin_*` and redeemed by
/// `complete_action` or `cancel_action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionHandle(pub u64);

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action-{}", self.0)
    }
}

/// What a pending action will do once completed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingKind {
    /// Attack with the roll already drawn.
    Attack {
        defender: UnitId,
        rule: HitRule,
        chance: f32,
        roll: f32,
    },
    /// Heal by a fixed amount.
    Heal { amount: f32 },
}

/// Action started by the rules but waiting on the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    pub handle: ActionHandle,
    pub actor: UnitId,
    pub kind: PendingKind,
}
