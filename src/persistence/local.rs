//! Offline score table persisted to LocalStorage

use super::{MemoryScoreStore, ScoreStore};
use crate::error::ScoreError;
use crate::leaderboard::Leaderboard;

/// `MemoryScoreStore` that saves itself after every accepted submission
#[derive(Debug, Default)]
pub struct LocalScoreStore {
    table: MemoryScoreStore,
}

impl LocalScoreStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sky_hop_scores";

    /// Load the table from LocalStorage, starting empty if absent or corrupt
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<MemoryScoreStore>(&json) {
                    Ok(table) => {
                        log::info!("Loaded {} local scores", table.len());
                        return Self { table };
                    }
                    Err(e) => log::warn!("Discarding corrupt local scores: {}", e),
                }
            }
        }

        log::info!("No local scores found, starting fresh");
        Self::default()
    }

    fn save(&self) -> Result<(), ScoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| ScoreError::Server("LocalStorage unavailable".to_string()))?;
        let json = serde_json::to_string(&self.table)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| ScoreError::Server(format!("{:?}", e)))?;
        log::info!("Local scores saved ({} rows)", self.table.len());
        Ok(())
    }
}

impl ScoreStore for LocalScoreStore {
    fn submit_score(&mut self, player_name: &str, score: i64) -> Result<(), ScoreError> {
        self.table.submit_score(player_name, score)?;
        self.save()
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Leaderboard, ScoreError> {
        self.table.fetch_leaderboard(limit)
    }
}
