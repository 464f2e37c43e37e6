//! High score leaderboard snapshot
//!
//! Entries are ordered by score, highest first. Ties keep arrival order.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_LIMIT;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(player_name: impl Into<String>, score: u64) -> Self {
        Self {
            player_name: player_name.into(),
            score,
        }
    }
}

/// Top-N scores as shown in the leaderboard panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from rows in any order, keeping the best `limit`
    pub fn from_rows(rows: Vec<LeaderboardEntry>, limit: usize) -> Self {
        let mut entries = rows;
        // Stable sort keeps arrival order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit.min(MAX_LEADERBOARD_LIMIT));
        Self { entries }
    }

    /// Rank (1-indexed) a score would take if inserted now
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Panel lines, e.g. `"1. Ann: 230"`
    pub fn rows(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No high scores yet".to_string()];
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}: {}", i + 1, e.player_name, e.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_sorted_and_limited() {
        let rows = vec![
            LeaderboardEntry::new("Bo", 50),
            LeaderboardEntry::new("Cy", 400),
            LeaderboardEntry::new("Di", 120),
            LeaderboardEntry::new("Ed", 120),
        ];
        let board = Leaderboard::from_rows(rows, 3);
        let names: Vec<_> = board.entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, ["Cy", "Di", "Ed"]);
        assert_eq!(board.top_score(), Some(400));
    }

    #[test]
    fn test_limit_capped() {
        let rows = (0..20).map(|i| LeaderboardEntry::new(format!("p{i}"), i)).collect();
        assert_eq!(Leaderboard::from_rows(rows, 50).entries.len(), MAX_LEADERBOARD_LIMIT);
    }

    #[test]
    fn test_potential_rank() {
        let board = Leaderboard::from_rows(
            vec![LeaderboardEntry::new("a", 300), LeaderboardEntry::new("b", 100)],
            5,
        );
        assert_eq!(board.potential_rank(500), 1);
        assert_eq!(board.potential_rank(200), 2);
        assert_eq!(board.potential_rank(100), 3);
        assert_eq!(Leaderboard::new().potential_rank(0), 1);
    }

    #[test]
    fn test_rows() {
        assert_eq!(Leaderboard::new().rows(), ["No high scores yet"]);
        let board = Leaderboard::from_rows(
            vec![LeaderboardEntry::new("<b>Ann</b>", 230), LeaderboardEntry::new("Zed", 10)],
            5,
        );
        assert_eq!(board.rows(), ["1. <b>Ann</b>: 230", "2. Zed: 10"]);
    }
}
