//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from save decoding, the core engine, repositories and worker
//! coordination so clients can bubble them up with consistent context.
use thiserror::Error;

use showdown_core::{CoreError, ErrorSeverity, ShowdownError};

pub use crate::repository::RepositoryError;
pub use crate::save::SaveError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read save file")]
    Io(#[source] std::io::Error),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("comparison worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Severity of the underlying failure; every runtime error stops the loop.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Core(err) => err.severity(),
            Self::Save(_) => ErrorSeverity::Validation,
            Self::Io(_) | Self::Repository(_) => ErrorSeverity::Recoverable,
            Self::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }
}
