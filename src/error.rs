//! Simulation errors

use thiserror::Error;

use crate::face::Face;

/// Errors raised by dice, games and analyzers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown face: {0}")]
    UnknownFace(Face),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidInput(msg.into())
    }
}

/// Library result type
pub type Result<T> = std::result::Result<T, SimError>;
