//! Error types for the scene engine.

use thiserror::Error;

/// Everything the scene engine can reject.
///
/// None of these are fatal during rendering: a malformed hand is logged and
/// skipped for the frame, and config errors surface once at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A hand arrived with fewer landmarks than the 21-point layout needs.
    #[error("malformed hand: expected {expected} landmarks, got {got}")]
    MalformedHand { expected: usize, got: usize },

    /// A `SceneConfig` field is out of range.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
