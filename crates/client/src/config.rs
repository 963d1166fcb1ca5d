//! Headless client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use tactics_content::ContentFactory;

/// Settings for one headless skirmish run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory; the bundled data when unset.
    pub data_dir: Option<PathBuf>,
    pub scenario: String,
    /// Rules file overriding `rules.toml` in the content directory.
    pub rules_path: Option<PathBuf>,
    /// Replaces the scenario seed.
    pub seed: Option<u64>,
    pub max_turns: u32,
    pub save_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Continue from the autosave slot if one exists.
    pub resume: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            scenario: Self::DEFAULT_SCENARIO.to_owned(),
            rules_path: None,
            seed: None,
            max_turns: Self::DEFAULT_MAX_TURNS,
            save_dir: None,
            session_id: None,
            resume: false,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_SCENARIO: &'static str = "skirmish";
    pub const DEFAULT_MAX_TURNS: u32 = 30;
    pub const AUTOSAVE_SLOT: &'static str = "autosave";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - Content directory (default: bundled data)
    /// - `SKIRMISH_SCENARIO` - Scenario name (default: skirmish)
    /// - `SKIRMISH_RULES` - Path to a rules TOML file
    /// - `SKIRMISH_SEED` - Seed override
    /// - `SKIRMISH_MAX_TURNS` - Turn limit (default: 30)
    /// - `SKIRMISH_SAVE_DIR` - Save directory (default: platform-specific)
    /// - `SKIRMISH_SESSION_ID` - Log session name (default: timestamped)
    /// - `SKIRMISH_RESUME` - Resume from the autosave slot (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("SKIRMISH_DATA_DIR").ok().map(PathBuf::from);
        if let Ok(scenario) = env::var("SKIRMISH_SCENARIO")
            && !scenario.trim().is_empty()
        {
            config.scenario = scenario.trim().to_owned();
        }
        config.rules_path = env::var("SKIRMISH_RULES").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("SKIRMISH_SEED");
        if let Some(turns) = read_env::<u32>("SKIRMISH_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.save_dir = env::var("SKIRMISH_SAVE_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("SKIRMISH_SESSION_ID").ok();

        if let Some(resume) = read_env::<bool>("SKIRMISH_RESUME") {
            config.resume = resume;
        } else if env::var("SKIRMISH_RESUME").is_ok() {
            config.resume = true;
        }

        config
    }

    pub fn content(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir.clone()),
            None => ContentFactory::bundled(),
        }
    }

    /// Save directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "tactics")
                .map(|dirs| dirs.data_dir().join("saves"))
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }
}

/// Platform-specific log directory.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/tactics/logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
