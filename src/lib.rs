//! Sky Hop - An endless vertical jumper
//!
//! Core modules:
//! - `sim`: Round simulation (player, platforms, collisions, camera, scoring)
//! - `app`: Lifecycle state machine (loading → ready → playing → game over)
//! - `platform`: Browser/native platform abstraction (input, frames, assets)
//! - `persistence`: High-score storage backends
//! - `renderer`: Canvas2D sprite rendering

pub mod app;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use app::{App, FrameOutcome, GameOverStage, Phase};
pub use error::{AssetError, FatalError, ScoreError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Top edge of the starting floor
    pub const FLOOR_Y: f32 = 580.0;

    /// Platform pool
    pub const PLATFORM_COUNT: usize = 7;
    pub const PLATFORM_WIDTH: f32 = 70.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Physics is tuned in units per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const MAX_FALL_SPEED: f32 = 20.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal control
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_FRICTION: f32 = 0.85;
    /// Below this the horizontal velocity snaps to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;

    /// Landing band is this many platform-heights deep
    pub const LANDING_MARGIN: f32 = 1.2;

    /// Moving platforms
    pub const MOVING_PLATFORM_CHANCE: f64 = 0.3;
    pub const MOVING_PLATFORM_MIN_SPEED: f32 = 1.0;
    pub const MOVING_PLATFORM_MAX_SPEED: f32 = 2.0;
    /// Half-width of the oscillation window around the spawn x
    pub const MOVING_PLATFORM_RANGE: f32 = 60.0;

    /// Score awards
    pub const SCORE_JUMP: u64 = 10;
    pub const SCORE_RECYCLE: u64 = 20;
    pub const SCORE_CLIMB: u64 = 1;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Per-asset load timeout
    pub const ASSET_TIMEOUT_MS: u32 = 5000;

    /// Leaderboard
    pub const MAX_NAME_LEN: usize = 100;
    pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;
    pub const MAX_LEADERBOARD_LIMIT: usize = 10;
}

/// Visible play field in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical midpoint; the camera keeps the player at or below it
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }
}
