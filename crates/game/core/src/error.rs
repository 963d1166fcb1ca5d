//! Common error infrastructure for tactics-core.
//!
//! Domain errors (`RulesError`, `TurnError`, `FleeError`, ...) live next to the
//! code that raises them. This module only provides the classification shared
//! by all of them so the runtime can decide whether to skip a unit, end the
//! turn, or surface a bug.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the orchestrator may skip the unit or try something else
/// - **Validation**: the request itself was invalid (unknown unit, wrong team)
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: target out of range, unit already attacked, no flee point.
    Recoverable,

    /// Examples: unknown unit, attacking a teammate.
    Validation,

    /// Examples: pending action references a unit that no longer exists.
    Internal,

    /// Examples: state invariant violated on import.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_SNAKE_CASE strings used in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
