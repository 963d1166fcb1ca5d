//! Content loaders for reading game data from files.
//!
//! Rules are TOML, scenarios are RON. Each loader has a `load(path)` entry
//! point and a `parse(&str)` entry point for bundled data.

pub mod factory;
pub mod rules;
pub mod scenario;

pub use factory::ContentFactory;
pub use rules::RulesLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
