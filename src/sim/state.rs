//! Round state and core simulation types
//!
//! One `RoundState` exists per round; it is rebuilt from scratch on start.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use super::player::Player;
use crate::Viewport;
use crate::consts::*;

/// Things that happened during a tick, for sound and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player jumped off a platform
    Jumped,
    /// A platform scrolled off the bottom and was recycled
    PlatformRecycled,
    /// The starting floor was dropped
    FloorRemoved,
    /// Player fell off the bottom of the viewport
    GameOver,
}

/// Complete state of a round (deterministic for a given seed and inputs)
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Seed the platform layout was generated from
    pub seed: u64,
    pub viewport: Viewport,
    pub player: Player,
    /// Platform pool, floor first while it exists
    pub platforms: Vec<Platform>,
    pub score: u64,
    /// Highest altitude reached, in world units (smaller is higher)
    pub highest_y: f32,
    /// Total distance the world has scrolled down this round
    pub scrolled: f32,
    /// Frames simulated
    pub time_ticks: u64,
    /// Set once the player falls off the bottom
    pub over: bool,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl RoundState {
    /// New round on the default play field
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Viewport::default())
    }

    pub fn with_viewport(seed: u64, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(viewport);

        // Floor plus ledges spaced evenly up the field
        let spacing = FLOOR_Y / PLATFORM_COUNT as f32;
        let mut platforms = Vec::with_capacity(PLATFORM_COUNT);
        platforms.push(Platform::floor(viewport));
        for i in 1..PLATFORM_COUNT {
            let y = FLOOR_Y - i as f32 * spacing;
            platforms.push(Platform::scattered(&mut rng, y, viewport));
        }

        Self {
            seed,
            viewport,
            highest_y: player.pos.y,
            player,
            platforms,
            score: 0,
            scrolled: 0.0,
            time_ticks: 0,
            over: false,
            events: Vec::new(),
            rng,
        }
    }

    /// Player altitude in world units (unaffected by scrolling)
    #[inline]
    pub fn altitude(&self) -> f32 {
        self.player.pos.y - self.scrolled
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }

    pub fn has_floor(&self) -> bool {
        self.platforms.iter().any(Platform::is_floor)
    }

    /// Drop the starting floor if it is still in the pool. It never comes back.
    pub fn remove_floor(&mut self) -> bool {
        let before = self.platforms.len();
        self.platforms.retain(|p| !p.is_floor());
        let removed = self.platforms.len() < before;
        if removed {
            self.push_event(GameEvent::FloorRemoved);
        }
        removed
    }

    pub(crate) fn rng_and_platforms(&mut self) -> (&mut Pcg32, &mut [Platform]) {
        (&mut self.rng, &mut self.platforms)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
