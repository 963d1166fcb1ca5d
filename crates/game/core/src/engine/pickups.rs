use crate::event::GameEvent;
use crate::state::{Pickup, PickupKind, UnitFlags, UnitId};

use super::GameEngine;

impl<'a> GameEngine<'a> {
    pub fn add_pickup(&mut self, pickup: Pickup) {
        self.state.pickups.push(pickup);
    }

    /// Applies every ready pickup covering the unit's position.
    pub(super) fn trigger_pickups(&mut self, id: UnitId) {
        let turn = self.state.turn.turn_count;
        let Some(position) = self.state.unit(id).map(|unit| unit.position) else {
            return;
        };

        let mut consumed = Vec::new();
        for pickup in &mut self.state.pickups {
            if pickup.is_ready(turn) && pickup.covers(position) {
                pickup.consume(turn);
                consumed.push((pickup.id, pickup.kind));
            }
        }

        for (pickup, kind) in consumed {
            if let Some(unit) = self.state.unit_mut(id) {
                match kind {
                    PickupKind::MedKit { amount } => {
                        unit.add_health(amount);
                    }
                    PickupKind::HealthBoost { amount } => unit.raise_max_health(amount),
                    PickupKind::RangeBoost { factor } => {
                        unit.movement_range *= factor.max(0.0);
                    }
                    PickupKind::Teleport => unit.flags.insert(UnitFlags::TELEPORT),
                }
            }
            self.emit(GameEvent::PickupConsumed {
                pickup,
                unit: id,
                kind,
            });
        }
    }
}
