//! Authoritative battle state.
//!
//! This module owns rosters, turn bookkeeping, the combat log and the pending
//! two-phase action. Runtime layers clone or query this state but mutate it
//! exclusively through [`GameEngine`](crate::engine::GameEngine).
mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    ActionHandle, PendingAction, PendingKind, Pickup, PickupKind, PlayerPhase, Position, Roster,
    Team, TurnOwner, TurnPhase, TurnState, Unit, UnitFlags, UnitId, UnitStats,
};

use crate::combat::CombatLog;

/// Player-side selection: the unit being commanded and the enemy it aims at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub unit: Option<UnitId>,
    pub target: Option<UnitId>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.unit = None;
        self.target = None;
    }

    pub fn is_empty(&self) -> bool {
        self.unit.is_none() && self.target.is_none()
    }
}

/// Canonical snapshot of the deterministic battle state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed set once per session. Combined with `nonce` for every roll.
    pub seed: u64,

    /// Increments with every accepted rules mutation.
    pub nonce: u64,

    /// Sequential unit id allocator (monotonically increasing, never reused).
    next_unit_id: u32,

    pub turn: TurnState,
    pub players: Roster,
    pub ai: Roster,
    pub combat_log: CombatLog,
    pub selection: Selection,
    pub pending: Option<PendingAction>,
    pub pickups: Vec<Pickup>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            next_unit_id: 1,
            turn: TurnState::new(),
            players: Roster::new(Team::Player),
            ai: Roster::new(Team::Ai),
            combat_log: CombatLog::new(),
            selection: Selection::default(),
            pending: None,
            pickups: Vec::new(),
        }
    }

    /// Allocates a fresh unit id.
    pub fn allocate_unit_id(&mut self) -> Result<UnitId, StateError> {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id =
            self.next_unit_id
                .checked_add(1)
                .ok_or(StateError::UnitIdOverflow {
                    current: self.next_unit_id,
                })?;
        Ok(id)
    }

    /// Creates a unit at full health and adds it to its team's roster.
    pub fn spawn_unit(
        &mut self,
        team: Team,
        name: impl Into<String>,
        position: Position,
        stats: UnitStats,
    ) -> Result<UnitId, StateError> {
        let id = self.allocate_unit_id()?;
        self.roster_mut(team)
            .insert(Unit::new(id, name, team, position, stats))?;
        Ok(id)
    }

    /// Adds a fully-formed unit (e.g. restored from a save), bumping the id
    /// allocator past its id.
    pub fn insert_unit(&mut self, unit: Unit) -> Result<UnitId, StateError> {
        let id = unit.id;
        if self.unit(id).is_some() {
            return Err(StateError::DuplicateUnit(id));
        }
        self.roster_mut(unit.team).insert(unit)?;
        if id.0 >= self.next_unit_id {
            self.next_unit_id = id.0.saturating_add(1);
        }
        Ok(id)
    }

    pub fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::Player => &self.players,
            Team::Ai => &self.ai,
        }
    }

    pub fn roster_mut(&mut self, team: Team) -> &mut Roster {
        match team {
            Team::Player => &mut self.players,
            Team::Ai => &mut self.ai,
        }
    }

    /// Looks a unit up in either roster.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.players.get(id).or_else(|| self.ai.get(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        if self.players.contains(id) {
            return self.players.get_mut(id);
        }
        self.ai.get_mut(id)
    }

    /// Mutable access to two distinct units at once.
    ///
    /// Returns `None` if either is missing or both ids are equal.
    pub fn unit_pair_mut(&mut self, a: UnitId, b: UnitId) -> Option<(&mut Unit, &mut Unit)> {
        if a == b {
            return None;
        }
        let team_a = self.unit(a)?.team;
        let team_b = self.unit(b)?.team;

        if team_a != team_b {
            let (first, second) = match team_a {
                Team::Player => (&mut self.players, &mut self.ai),
                Team::Ai => (&mut self.ai, &mut self.players),
            };
            return Some((first.get_mut(a)?, second.get_mut(b)?));
        }

        let roster = self.roster_mut(team_a);
        let mut first = None;
        let mut second = None;
        for unit in roster.iter_mut() {
            if unit.id == a {
                first = Some(unit);
            } else if unit.id == b {
                second = Some(unit);
            }
        }
        Some((first?, second?))
    }

    /// All live units, players first, each roster in its own order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.players.iter().chain(self.ai.iter())
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.players.iter_mut().chain(self.ai.iter_mut())
    }

    /// Removes a unit from whichever roster holds it.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.players.remove(id).or_else(|| self.ai.remove(id))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
