//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tactics_core::Snapshot;

use super::traits::validate_slot;
use super::{RepositoryError, Result, SaveRepository, SaveSummary, SavedGame};

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Each slot is stored as `{slot}.save.json`: a pretty-printed [`SavedGame`]
/// so saves stay readable and diffable. Writes go to a temp file first and
/// are renamed into place.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    const EXTENSION: &'static str = ".save.json";

    /// Create a new file-based save repository, creating `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}{}", Self::EXTENSION))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, snapshot: &Snapshot) -> Result<SavedGame> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let saved = SavedGame::new(slot, snapshot.clone());
        let bytes =
            serde_json::to_vec_pretty(&saved).map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());

        Ok(saved)
    }

    fn load(&self, slot: &str) -> Result<Option<SavedGame>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let saved: SavedGame = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {e}", path.display())))?;

        if saved.slot != slot {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds slot '{}'",
                path.display(),
                saved.slot
            )));
        }

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());

        Ok(Some(saved))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<SaveSummary>> {
        let mut summaries = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(slot) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_suffix(Self::EXTENSION))
                && validate_slot(slot).is_ok()
                && let Some(saved) = self.load(slot)?
            {
                summaries.push(saved.summary());
            }
        }

        summaries.sort_by(|a, b| a.slot.cmp(&b.slot));
        Ok(summaries)
    }
}
