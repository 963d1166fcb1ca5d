//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when an oracle required by an operation is missing.
///
/// The engine cannot proceed without navigation, occlusion or randomness, so
/// these are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("NavigationOracle not available")]
    NavigationNotAvailable,

    #[error("OcclusionOracle not available")]
    OcclusionNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            NavigationNotAvailable => "ORACLE_NAVIGATION_NOT_AVAILABLE",
            OcclusionNotAvailable => "ORACLE_OCCLUSION_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
