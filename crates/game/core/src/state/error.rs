//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Team, UnitId};

/// Errors raised while assembling or mutating rosters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A unit was added to the other team's roster.
    #[error("unit {unit} belongs to {actual}, cannot join the {expected} roster")]
    TeamMismatch {
        unit: UnitId,
        expected: Team,
        actual: Team,
    },

    /// A unit id is already present.
    #[error("unit {0} is already on the battlefield")]
    DuplicateUnit(UnitId),

    /// Unit id allocation overflow (all ids exhausted).
    #[error("unit id overflow (current: {current})")]
    UnitIdOverflow { current: u32 },

    /// A snapshot record could not be placed: no free spawn point left.
    #[error("no free {team} spawn point for '{name}'")]
    NoFreeSpawnPoint { team: Team, name: String },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::TeamMismatch { .. } | StateError::DuplicateUnit(_) => {
                ErrorSeverity::Validation
            }
            StateError::NoFreeSpawnPoint { .. } => ErrorSeverity::Validation,
            StateError::UnitIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::TeamMismatch { .. } => "STATE_TEAM_MISMATCH",
            StateError::DuplicateUnit(_) => "STATE_DUPLICATE_UNIT",
            StateError::UnitIdOverflow { .. } => "STATE_UNIT_ID_OVERFLOW",
            StateError::NoFreeSpawnPoint { .. } => "STATE_NO_FREE_SPAWN_POINT",
        }
    }
}
