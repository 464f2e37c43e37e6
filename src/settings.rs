//! Game settings and preferences
//!
//! Persisted in LocalStorage, separate from the score table.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT, MAX_NAME_LEN};

/// Where finished scores go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBackend {
    /// HTTP score endpoints
    Remote {
        submit_url: String,
        leaderboard_url: String,
    },
    /// Offline table in LocalStorage
    Local,
}

impl Default for ScoreBackend {
    fn default() -> Self {
        ScoreBackend::Remote {
            submit_url: "save_score.php".to_string(),
            leaderboard_url: "get_high_scores.php".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Leaderboard ===
    /// Rows shown in the leaderboard panel
    pub leaderboard_limit: usize,
    pub backend: ScoreBackend,
    /// Pre-fills the name entry after game over
    pub last_player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.3,
            muted: false,

            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            backend: ScoreBackend::default(),
            last_player_name: String::new(),
        }
    }
}

impl Settings {
    /// Clamp out-of-range values from a hand-edited or old save
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.leaderboard_limit = self.leaderboard_limit.clamp(1, MAX_LEADERBOARD_LIMIT);
        if self.last_player_name.chars().count() > MAX_NAME_LEN {
            self.last_player_name = self.last_player_name.chars().take(MAX_NAME_LEN).collect();
        }
        self
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_hop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
