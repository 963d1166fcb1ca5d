//! Repository contract for saving and loading snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tactics_core::{SaveType, Snapshot};

use super::{RepositoryError, Result};

/// A snapshot as stored in a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub slot: String,
    pub last_saved: DateTime<Utc>,
    pub snapshot: Snapshot,
}

impl SavedGame {
    pub fn new(slot: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            slot: slot.into(),
            last_saved: Utc::now(),
            snapshot,
        }
    }

    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            slot: self.slot.clone(),
            save_name: self.snapshot.save_name.clone(),
            save_type: self.snapshot.save_type,
            last_saved: self.last_saved,
            turn_count: self.snapshot.level.turn_count,
            play_time_secs: self.snapshot.play_time_secs,
        }
    }
}

/// Listing entry for a save slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub slot: String,
    pub save_name: String,
    pub save_type: SaveType,
    pub last_saved: DateTime<Utc>,
    pub turn_count: u32,
    pub play_time_secs: u64,
}

/// Repository for save games, keyed by slot name.
pub trait SaveRepository: Send + Sync {
    /// Writes `snapshot` to `slot`, replacing what was there.
    fn save(&self, slot: &str, snapshot: &Snapshot) -> Result<SavedGame>;

    fn load(&self, slot: &str) -> Result<Option<SavedGame>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// All slots, sorted by name.
    fn list(&self) -> Result<Vec<SaveSummary>> {
        Ok(vec![])
    }

    /// The most recently written slot.
    fn latest(&self) -> Result<Option<SaveSummary>> {
        Ok(self
            .list()?
            .into_iter()
            .max_by_key(|summary| summary.last_saved))
    }
}

/// Slot names become file names: keep them to `[A-Za-z0-9_-]`.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
