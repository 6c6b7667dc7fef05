//! Error types for eventdesk.

use thiserror::Error;

use crate::id::Id;

/// Errors that can occur in eventdesk operations.
#[derive(Error, Debug)]
pub enum EventDeskError {
    /// The backend could not be reached, or did not answer in time.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Event store responded with status {status}")]
    Response { status: u16 },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: Id },

    /// Local validation failure. Never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EventDeskError {
    /// Load-time failures that come from the network rather than local checks.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            EventDeskError::Transport(_)
                | EventDeskError::Response { .. }
                | EventDeskError::NotFound { .. }
        )
    }
}

/// Result type alias for eventdesk operations.
pub type EventDeskResult<T> = Result<T, EventDeskError>;
