//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use tactics_core::Snapshot;

use super::traits::validate_slot;
use super::{RepositoryError, Result, SaveRepository, SaveSummary, SavedGame};

/// In-memory implementation of SaveRepository.
pub struct InMemorySaveRepo {
    saves: RwLock<HashMap<String, SavedGame>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self {
            saves: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySaveRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn save(&self, slot: &str, snapshot: &Snapshot) -> Result<SavedGame> {
        validate_slot(slot)?;
        let saved = SavedGame::new(slot, snapshot.clone());
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), saved.clone());
        Ok(saved)
    }

    fn load(&self, slot: &str) -> Result<Option<SavedGame>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SaveSummary>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut summaries: Vec<SaveSummary> = saves.values().map(SavedGame::summary).collect();
        summaries.sort_by(|a, b| a.slot.cmp(&b.slot));
        Ok(summaries)
    }
}
