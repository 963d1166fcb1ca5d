//! Rules configuration loader.

use std::path::Path;

use tactics_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
///
/// Missing keys fall back to the defaults, so a file only needs the values
/// it overrides.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rules file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &RulesConfig) -> LoadResult<()> {
        anyhow::ensure!(
            config.roll_range >= 1.0,
            "roll_range must be at least 1, got {}",
            config.roll_range
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&config.flee_health_fraction),
            "flee_health_fraction must lie in [0, 1], got {}",
            config.flee_health_fraction
        );
        anyhow::ensure!(
            config.max_search_radius > 0.0,
            "max_search_radius must be positive"
        );
        anyhow::ensure!(
            config.battle_log_capacity > 0,
            "battle_log_capacity must be positive"
        );
        Ok(())
    }
}
