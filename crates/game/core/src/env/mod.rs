//! Traits describing the world the rules are played in.
//!
//! Oracles expose navigation, occlusion and randomness. The [`Env`] aggregate
//! bundles them so the engine can access everything it needs without hard
//! coupling to concrete implementations.
mod error;
mod navigation;
mod occlusion;
mod rng;

pub use error::OracleError;
pub use navigation::NavigationOracle;
pub use occlusion::OcclusionOracle;
pub use rng::{PcgRng, RngOracle, compute_seed, roll_context};

/// Aggregates the oracles required by the engine and the AI planner.
pub struct Env<'a, N, O, R>
where
    N: NavigationOracle + ?Sized,
    O: OcclusionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    navigation: Option<&'a N>,
    occlusion: Option<&'a O>,
    rng: Option<&'a R>,
}

// Manual impls: a derive would demand `N: Clone`, which trait objects never are.
impl<N, O, R> Clone for Env<'_, N, O, R>
where
    N: NavigationOracle + ?Sized,
    O: OcclusionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, O, R> Copy for Env<'_, N, O, R>
where
    N: NavigationOracle + ?Sized,
    O: OcclusionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn NavigationOracle + 'a, dyn OcclusionOracle + 'a, dyn RngOracle + 'a>;

impl<'a, N, O, R> Env<'a, N, O, R>
where
    N: NavigationOracle + ?Sized,
    O: OcclusionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(navigation: Option<&'a N>, occlusion: Option<&'a O>, rng: Option<&'a R>) -> Self {
        Self {
            navigation,
            occlusion,
            rng,
        }
    }

    pub fn with_all(navigation: &'a N, occlusion: &'a O, rng: &'a R) -> Self {
        Self::new(Some(navigation), Some(occlusion), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            navigation: None,
            occlusion: None,
            rng: None,
        }
    }

    /// Returns the NavigationOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::NavigationNotAvailable` if no navigation oracle was provided.
    pub fn navigation(&self) -> Result<&'a N, OracleError> {
        self.navigation.ok_or(OracleError::NavigationNotAvailable)
    }

    /// Returns the OcclusionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::OcclusionNotAvailable` if no occlusion oracle was provided.
    pub fn occlusion(&self) -> Result<&'a O, OracleError> {
        self.occlusion.ok_or(OracleError::OcclusionNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, N, O, R> Env<'a, N, O, R>
where
    N: NavigationOracle + 'a,
    O: OcclusionOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        self.as_game_env()
    }

    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    ///
    /// Use this when you need to convert multiple times (e.g., in a loop).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let navigation: Option<&'a dyn NavigationOracle> = self.navigation.map(|nav| nav as _);
        let occlusion: Option<&'a dyn OcclusionOracle> = self.occlusion.map(|occ| occ as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(navigation, occlusion, rng)
    }
}
