//! In-process score table

use serde::{Deserialize, Serialize};

use super::{ScoreStore, Submission};
use crate::error::ScoreError;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// One stored score; `id` increases with insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub id: u64,
    pub player_name: String,
    pub score: u64,
}

/// Append-only score table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryScoreStore {
    rows: Vec<ScoreRow>,
    next_id: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }
}

impl ScoreStore for MemoryScoreStore {
    fn submit_score(&mut self, player_name: &str, score: i64) -> Result<(), ScoreError> {
        let submission = Submission::new(player_name, score)?;
        self.next_id += 1;
        self.rows.push(ScoreRow {
            id: self.next_id,
            player_name: submission.player_name,
            score: submission.score,
        });
        Ok(())
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Leaderboard, ScoreError> {
        let rows = self
            .rows
            .iter()
            .map(|r| LeaderboardEntry::new(r.player_name.clone(), r.score))
            .collect();
        Ok(Leaderboard::from_rows(rows, limit))
    }
}
