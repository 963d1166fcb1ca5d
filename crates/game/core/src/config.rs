/// Tunable rule parameters shared by the engine, AI planner and runtime.
///
/// Every value that used to be a hidden constant in the rules (search cap,
/// roll domain, flee threshold, heal power) is surfaced here so scenarios can
/// override it from a TOML file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Candidates at or beyond this planar distance are never picked as targets.
    pub max_search_radius: f32,

    /// Upper bound of the self-health hit roll domain (`[1, roll_range]`).
    pub roll_range: f32,

    /// AI units below `flee_health_fraction * max_health` flee and heal
    /// instead of attacking.
    pub flee_health_fraction: f32,

    /// Health restored by a single AI heal.
    pub heal_power: f32,

    /// Points sampled on the flee circle.
    pub flee_sample_count: u32,

    /// Hard cap on flee samples, regardless of `flee_sample_count`.
    pub max_flee_samples: u32,

    /// Radius within which a sampled flee point may snap to valid ground.
    pub flee_snap_radius: f32,

    /// Reassign every AI target at the start of each AI turn.
    pub retarget_every_turn: bool,

    /// Lines kept by the human-readable battle log.
    pub battle_log_capacity: usize,
}

impl RulesConfig {
    pub const DEFAULT_MAX_SEARCH_RADIUS: f32 = 100.0;
    pub const DEFAULT_ROLL_RANGE: f32 = 100.0;
    pub const DEFAULT_FLEE_HEALTH_FRACTION: f32 = 0.5;
    pub const DEFAULT_HEAL_POWER: f32 = 5.0;
    pub const DEFAULT_FLEE_SAMPLE_COUNT: u32 = 36;
    pub const DEFAULT_MAX_FLEE_SAMPLES: u32 = 360;
    pub const DEFAULT_FLEE_SNAP_RADIUS: f32 = 1.0;
    pub const DEFAULT_BATTLE_LOG_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            max_search_radius: Self::DEFAULT_MAX_SEARCH_RADIUS,
            roll_range: Self::DEFAULT_ROLL_RANGE,
            flee_health_fraction: Self::DEFAULT_FLEE_HEALTH_FRACTION,
            heal_power: Self::DEFAULT_HEAL_POWER,
            flee_sample_count: Self::DEFAULT_FLEE_SAMPLE_COUNT,
            max_flee_samples: Self::DEFAULT_MAX_FLEE_SAMPLES,
            flee_snap_radius: Self::DEFAULT_FLEE_SNAP_RADIUS,
            retarget_every_turn: false,
            battle_log_capacity: Self::DEFAULT_BATTLE_LOG_CAPACITY,
        }
    }

    /// Effective number of flee samples after applying the hard cap.
    pub fn effective_flee_samples(&self) -> u32 {
        self.flee_sample_count.min(self.max_flee_samples)
    }

    /// Absolute health below which a unit with `max_health` flees.
    pub fn flee_threshold(&self, max_health: f32) -> f32 {
        max_health * self.flee_health_fraction
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
