use super::{Team, Unit, UnitId};
use crate::state::StateError;

/// Live units of one team, in insertion order.
///
/// Iteration order is the order units were added; every lookup and removal is
/// by [`UnitId`], never by position in the list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    team: Team,
    units: Vec<Unit>,
}

impl Roster {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            units: Vec::new(),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn as_slice(&self) -> &[Unit] {
        &self.units
    }

    /// Unit ids in roster order.
    pub fn ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|unit| unit.id).collect()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a unit, rejecting team mismatches and duplicate ids.
    pub fn insert(&mut self, unit: Unit) -> Result<(), StateError> {
        if unit.team != self.team {
            return Err(StateError::TeamMismatch {
                unit: unit.id,
                expected: self.team,
                actual: unit.team,
            });
        }
        if self.contains(unit.id) {
            return Err(StateError::DuplicateUnit(unit.id));
        }
        self.units.push(unit);
        Ok(())
    }

    /// Removes a unit by identity.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|unit| unit.id == id)?;
        Some(self.units.remove(index))
    }

    /// Removes every dead unit, returning them in roster order.
    pub fn remove_dead(&mut self) -> Vec<Unit> {
        let (dead, alive): (Vec<Unit>, Vec<Unit>) =
            self.units.drain(..).partition(|unit| unit.is_dead());
        self.units = alive;
        dead
    }

    /// Clears move/attack flags on every unit.
    pub fn reset_flags(&mut self) {
        for unit in &mut self.units {
            unit.reset_turn_flags();
        }
    }
}
