//! Errors surfaced by the rules engine.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionHandle, StateError, Team, TurnPhase, UnitId};

/// Turn phase machine violations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("{operation} is not allowed during {actual}")]
    WrongPhase {
        operation: &'static str,
        actual: TurnPhase,
    },

    #[error("the game is over ({winner} won)")]
    GameOver { winner: Team },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::WrongPhase { .. } => ErrorSeverity::Validation,
            TurnError::GameOver { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::WrongPhase { .. } => "TURN_WRONG_PHASE",
            TurnError::GameOver { .. } => "TURN_GAME_OVER",
        }
    }
}

/// Every way a rules command can be rejected.
///
/// A rejected command leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("unit {0} is not a valid target")]
    InvalidTarget(UnitId),

    #[error("unit {unit} belongs to {actual}, expected {expected}")]
    WrongTeam {
        unit: UnitId,
        expected: Team,
        actual: Team,
    },

    #[error("{unit} is out of range ({distance_cm} cm > {range_cm} cm)")]
    OutOfRange {
        unit: UnitId,
        distance_cm: u32,
        range_cm: u32,
    },

    #[error("no valid flee point for {0}")]
    NoValidFleePoint(UnitId),

    #[error("the {0} roster is exhausted")]
    RosterExhausted(Team),

    #[error("unit {0} has already moved this turn")]
    AlreadyMoved(UnitId),

    #[error("unit {0} has already attacked this turn")]
    AlreadyAttacked(UnitId),

    #[error("unit {0} is busy with another action")]
    UnitBusy(UnitId),

    #[error("{pending} is still in progress")]
    ActionInProgress { pending: ActionHandle },

    #[error("{0} is not the pending action")]
    UnknownAction(ActionHandle),

    #[error("no valid path for {0}")]
    PathInvalid(UnitId),

    #[error("no unit or target selected")]
    NoSelection,

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl RulesError {
    pub(crate) fn out_of_range(unit: UnitId, distance: f32, range: f32) -> Self {
        RulesError::OutOfRange {
            unit,
            distance_cm: to_cm(distance),
            range_cm: to_cm(range),
        }
    }
}

// Distances are reported in whole centimetres so the error stays `Eq`.
fn to_cm(meters: f32) -> u32 {
    (meters.max(0.0) * 100.0).round() as u32
}

impl GameError for RulesError {
    fn severity(&self) -> ErrorSeverity {
        use RulesError::*;
        match self {
            Turn(err) => err.severity(),
            Oracle(err) => err.severity(),
            State(err) => err.severity(),
            UnknownUnit(_) | WrongTeam { .. } | UnknownAction(_) => ErrorSeverity::Validation,
            InvalidTarget(_)
            | OutOfRange { .. }
            | NoValidFleePoint(_)
            | RosterExhausted(_)
            | AlreadyMoved(_)
            | AlreadyAttacked(_)
            | UnitBusy(_)
            | ActionInProgress { .. }
            | PathInvalid(_)
            | NoSelection => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use RulesError::*;
        match self {
            UnknownUnit(_) => "RULES_UNKNOWN_UNIT",
            InvalidTarget(_) => "RULES_INVALID_TARGET",
            WrongTeam { .. } => "RULES_WRONG_TEAM",
            OutOfRange { .. } => "RULES_OUT_OF_RANGE",
            NoValidFleePoint(_) => "RULES_NO_VALID_FLEE_POINT",
            RosterExhausted(_) => "RULES_ROSTER_EXHAUSTED",
            AlreadyMoved(_) => "RULES_ALREADY_MOVED",
            AlreadyAttacked(_) => "RULES_ALREADY_ATTACKED",
            UnitBusy(_) => "RULES_UNIT_BUSY",
            ActionInProgress { .. } => "RULES_ACTION_IN_PROGRESS",
            UnknownAction(_) => "RULES_UNKNOWN_ACTION",
            PathInvalid(_) => "RULES_PATH_INVALID",
            NoSelection => "RULES_NO_SELECTION",
            Turn(err) => err.error_code(),
            Oracle(err) => err.error_code(),
            State(err) => err.error_code(),
        }
    }
}
