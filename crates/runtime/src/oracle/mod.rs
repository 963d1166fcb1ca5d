//! Runtime implementations of the `tactics-core` oracle traits.
//!
//! These bundle navigation, occlusion and randomness into an
//! [`OracleManager`] so the runtime can build [`tactics_core::Env`] snapshots
//! on demand. The data is immutable at runtime; dynamic state lives in the
//! simulation worker's [`tactics_core::GameState`].
mod geometry;
mod navigation;
mod occlusion;

use std::sync::Arc;

use tactics_content::Scenario;
use tactics_core::{Env, GameEnv, NavigationOracle, OcclusionOracle, PcgRng, RngOracle};

pub use navigation::ArenaNavigation;
pub use occlusion::{ObstacleField, OpenGround};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) navigation: Arc<dyn NavigationOracle>,
    pub(crate) occlusion: Arc<dyn OcclusionOracle>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(navigation: Arc<dyn NavigationOracle>, occlusion: Arc<dyn OcclusionOracle>) -> Self {
        Self {
            navigation,
            occlusion,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Unbounded flat terrain with nothing in the way.
    pub fn open_ground() -> Self {
        Self::new(Arc::new(OpenGround), Arc::new(OpenGround))
    }

    /// Arena navigation and obstacle occlusion for a scenario.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(
            Arc::new(ArenaNavigation::new(
                scenario.arena,
                scenario.obstacles.clone(),
            )),
            Arc::new(ObstacleField::new(scenario.obstacles.clone())),
        )
    }

    /// Converts oracle manager into GameEnv for tactics-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        let navigation: &dyn NavigationOracle = self.navigation.as_ref();
        let occlusion: &dyn OcclusionOracle = self.occlusion.as_ref();
        let rng: &dyn RngOracle = &self.rng;
        Env::with_all(navigation, occlusion, rng)
    }

    pub fn navigation(&self) -> &dyn NavigationOracle {
        self.navigation.as_ref()
    }

    pub fn occlusion(&self) -> &dyn OcclusionOracle {
        self.occlusion.as_ref()
    }
}
