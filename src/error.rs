//! Error types for teller-rs.
//!
//! Business-path errors (validation, not-found, provider) are converted
//! into an Error-status [`AgentResponse`](crate::model::AgentResponse) at
//! the agent boundary — they never escape the dispatcher as `Err`.
//! Instrumentation has no error type at all: emission is best-effort by
//! construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or malformed. Handled locally with a
    /// guidance message; not a failure for metrics purposes.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced account does not exist.
    #[error("account not found: {0}")]
    NotFound(String),

    /// The completion call failed or timed out.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
