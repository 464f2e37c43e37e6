//! High-score storage
//!
//! Backends:
//! - `MemoryScoreStore`: append-only in-process table (tests, native demo)
//! - `LocalScoreStore`: the same table persisted to LocalStorage (WASM only)
//! - `RemoteScoreStore`: HTTP score endpoints (requests are WASM only)
//!
//! Input is validated before it reaches any backend; the remote endpoint
//! validates again on its side.

#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;
pub mod remote;

#[cfg(target_arch = "wasm32")]
pub use local::LocalScoreStore;
pub use memory::MemoryScoreStore;
pub use remote::RemoteScoreStore;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;
use crate::error::ScoreError;
use crate::leaderboard::Leaderboard;

/// A validated score submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub player_name: String,
    pub score: u64,
}

impl Submission {
    /// Validate raw input: the name is trimmed, must be non-empty and is cut
    /// to `MAX_NAME_LEN` characters; the score must be non-negative
    pub fn new(player_name: &str, score: i64) -> Result<Self, ScoreError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(ScoreError::InvalidInput("player name is empty".to_string()));
        }
        let score = u64::try_from(score)
            .map_err(|_| ScoreError::InvalidInput(format!("score {} is negative", score)))?;

        Ok(Self {
            player_name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
        })
    }
}

/// Synchronous score table
pub trait ScoreStore {
    /// Append a score. Invalid input leaves the table untouched.
    fn submit_score(&mut self, player_name: &str, score: i64) -> Result<(), ScoreError>;

    /// Best `limit` scores, highest first
    fn fetch_leaderboard(&self, limit: usize) -> Result<Leaderboard, ScoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_trims_name() {
        let s = Submission::new("  Ann  ", 230).unwrap();
        assert_eq!(s.player_name, "Ann");
        assert_eq!(s.score, 230);
    }

    #[test]
    fn test_submission_rejects_bad_input() {
        assert!(matches!(
            Submission::new("", 10),
            Err(ScoreError::InvalidInput(_))
        ));
        assert!(matches!(
            Submission::new("   ", 10),
            Err(ScoreError::InvalidInput(_))
        ));
        assert!(matches!(
            Submission::new("Ann", -1),
            Err(ScoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_submission_truncates_long_names() {
        let long = "é".repeat(150);
        let s = Submission::new(&long, 0).unwrap();
        assert_eq!(s.player_name.chars().count(), MAX_NAME_LEN);
    }
}
