//! Recoverable errors for configuration loading and catalog lookup.
//!
//! Tick processing never returns errors: unmet preconditions simply stop
//! an action, and broken internal invariants are asserted.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("unknown buff: {0}")]
    UnknownBuff(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
