//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule rejections, worker coordination failures and repository errors
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{ErrorSeverity, GameError, RulesError, StateError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("failed to restore game state")]
    Restore(#[source] StateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an initial game state before building")]
    MissingState,

    #[error("no save repository configured")]
    RepositoryNotSet,

    #[error("save slot '{0}' not found")]
    SaveNotFound(String),
}

impl RuntimeError {
    /// Whether a caller can carry on with the next command.
    ///
    /// Rule rejections leave the state untouched; everything else points at
    /// broken plumbing or storage.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::Rules(error) => matches!(
                error.severity(),
                ErrorSeverity::Recoverable | ErrorSeverity::Validation
            ),
            _ => false,
        }
    }

    pub fn rules_error(&self) -> Option<&RulesError> {
        match self {
            RuntimeError::Rules(error) => Some(error),
            _ => None,
        }
    }
}
