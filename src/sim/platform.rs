//! Platforms: the floor, static ledges and moving ledges
//!
//! Platforms live in a fixed pool for the whole round. One that scrolls off
//! the bottom is recycled in place above the top edge.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::consts::*;

/// Horizontal window a moving platform oscillates in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRange {
    pub min: f32,
    pub max: f32,
}

impl MoveRange {
    /// Window of `half_width` either side of `x`, clamped so the platform
    /// stays on the field
    pub fn around(x: f32, half_width: f32, platform_width: f32, field_width: f32) -> Self {
        let limit = (field_width - platform_width).max(0.0);
        Self {
            min: (x - half_width).clamp(0.0, limit),
            max: (x + half_width).clamp(0.0, limit),
        }
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Full-width starting ledge, dropped after the first jump
    Floor,
    Normal,
    /// `speed` is signed units per frame
    Moving { speed: f32, range: MoveRange },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    /// The full-width floor the player starts on
    pub fn floor(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(0.0, FLOOR_Y),
            size: Vec2::new(viewport.width, PLATFORM_HEIGHT),
            kind: PlatformKind::Floor,
        }
    }

    /// A static ledge at the given height with a random x
    pub fn scattered<R: Rng>(rng: &mut R, y: f32, viewport: Viewport) -> Self {
        let size = Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT);
        Self {
            pos: Vec2::new(random_x(rng, size.x, viewport.width), y),
            size,
            kind: PlatformKind::Normal,
        }
    }

    #[inline]
    pub fn is_floor(&self) -> bool {
        self.kind == PlatformKind::Floor
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Advance one frame. Returns true if the platform was recycled.
    pub fn update<R: Rng>(&mut self, rng: &mut R, viewport: Viewport) -> bool {
        if let PlatformKind::Moving { speed, range } = &mut self.kind {
            let next = self.pos.x + *speed;
            if next <= range.min {
                self.pos.x = range.min;
                *speed = speed.abs();
            } else if next >= range.max {
                self.pos.x = range.max;
                *speed = -speed.abs();
            } else {
                self.pos.x = next;
            }
        }

        if self.pos.y > viewport.height {
            return self.recycle(rng, viewport);
        }
        false
    }

    /// Move above the visible top edge at a random x, possibly as a moving
    /// platform. A recycled floor becomes an ordinary ledge for good.
    pub fn recycle<R: Rng>(&mut self, rng: &mut R, viewport: Viewport) -> bool {
        self.size = Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT);
        self.pos.x = random_x(rng, self.size.x, viewport.width);
        self.pos.y = -self.size.y;

        self.kind = if rng.random_bool(MOVING_PLATFORM_CHANCE) {
            let magnitude = rng.random_range(MOVING_PLATFORM_MIN_SPEED..=MOVING_PLATFORM_MAX_SPEED);
            let speed = if rng.random_bool(0.5) {
                magnitude
            } else {
                -magnitude
            };
            PlatformKind::Moving {
                speed,
                range: MoveRange::around(
                    self.pos.x,
                    MOVING_PLATFORM_RANGE,
                    self.size.x,
                    viewport.width,
                ),
            }
        } else {
            PlatformKind::Normal
        };

        log::debug!("Platform recycled to x={:.1} ({:?})", self.pos.x, self.kind);
        true
    }
}

fn random_x<R: Rng>(rng: &mut R, width: f32, field_width: f32) -> f32 {
    let limit = (field_width - width).max(0.0);
    rng.random_range(0.0..=limit)
}
