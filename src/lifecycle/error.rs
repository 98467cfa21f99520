//! Error types for building and running the mine.

use thiserror::Error;

use crate::config::ConfigError;
use crate::framework::HandoffError;
use crate::observer::ActorToken;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// `start_all` was called on a system that is already running.
    #[error("Workers already started")]
    AlreadyStarted,

    /// A worker lost its location. This is a defect, not a shutdown.
    #[error("{worker} failed: {source}")]
    WorkerFailed {
        worker: ActorToken,
        #[source]
        source: HandoffError,
    },

    #[error("{worker} panicked: {message}")]
    WorkerPanicked { worker: ActorToken, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
