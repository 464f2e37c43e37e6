//! Error taxonomy for the boundary layers
//!
//! The simulation never fails. Asset loading and score storage produce
//! recoverable errors; missing DOM handles at startup are fatal.

use serde::Deserialize;
use thiserror::Error;

/// Asset load failure (blocks entry to the Ready phase)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("image not found: {path}")]
    NotFound { path: String },

    #[error("image load timeout ({timeout_ms}ms): {path}")]
    Timeout { path: String, timeout_ms: u32 },

    #[error("asset loader failed: {0}")]
    Loader(String),
}

/// Score submission / leaderboard fetch failure (never fatal)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("server error: {0}")]
    Server(String),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Error body returned by the score endpoints
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ScoreError {
    /// Map a non-success HTTP reply to an error, using the `{"error": ...}`
    /// body message when present
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            400 => ScoreError::InvalidInput(message),
            405 => ScoreError::MethodNotAllowed,
            500 => ScoreError::Server(message),
            other => ScoreError::UnexpectedStatus(other),
        }
    }

    /// Whether the player's input was at fault (retrying won't help)
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoreError::InvalidInput(_) | ScoreError::MethodNotAllowed)
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        ScoreError::Malformed(err.to_string())
    }
}

/// Unrecoverable startup failure; moves the app to the Error phase
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FatalError {
    #[error("required element #{0} not found")]
    MissingElement(&'static str),

    #[error("canvas 2d context unavailable")]
    NoCanvasContext,

    #[error("failed to load game resources: {0}")]
    Assets(#[from] AssetError),
}
