//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use tactics_core::RulesConfig;

use crate::loaders::{LoadResult, RulesLoader, ScenarioLoader};
use crate::scenario::Scenario;

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load rules from `rules.toml`, or the defaults if the file is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        RulesLoader::load(&path)
    }

    /// Path of a named scenario under `scenarios/`.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{name}.ron"))
    }

    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.scenario_path(name))
    }

    /// Names of every scenario under `scenarios/`, sorted.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("scenarios");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
