//! Plain data carried by [`GameState`](super::GameState).
mod common;
mod pending;
mod pickup;
mod roster;
mod turn;
mod unit;

pub use common::{Position, Team, UnitId};
pub use pending::{ActionHandle, PendingAction, PendingKind};
pub use pickup::{Pickup, PickupKind};
pub use roster::Roster;
pub use turn::{PlayerPhase, TurnOwner, TurnPhase, TurnState};
pub use unit::{Unit, UnitFlags, UnitStats};
