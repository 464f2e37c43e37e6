//! The player body
//!
//! Position is the top-left corner of the sprite box in screen units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::Viewport;
use crate::consts::*;

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Airborne after a jump until the next landing
    pub jumping: bool,
}

impl Player {
    /// Create a player standing on the floor, horizontally centered
    pub fn new(viewport: Viewport) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Self::spawn_point(viewport, size),
            vel: Vec2::ZERO,
            size,
            facing: Facing::Right,
            jumping: false,
        }
    }

    fn spawn_point(viewport: Viewport, size: Vec2) -> Vec2 {
        Vec2::new(viewport.width / 2.0 - size.x / 2.0, FLOOR_Y - size.y)
    }

    /// Back to spawn: centered on the floor, at rest, facing right
    pub fn reset(&mut self, viewport: Viewport) {
        self.pos = Self::spawn_point(viewport, self.size);
        self.vel = Vec2::ZERO;
        self.facing = Facing::Right;
        self.jumping = false;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Integrate one frame of horizontal control, gravity and wrapping.
    ///
    /// Gravity is defined per 60 Hz frame and scaled by `dt` so the fall
    /// rate doesn't depend on the display refresh rate.
    pub fn update(&mut self, input: &TickInput, dt: f32, field_width: f32) {
        if input.left {
            self.facing = Facing::Left;
            self.vel.x = (self.vel.x - PLAYER_ACCELERATION).max(-PLAYER_SPEED);
        } else if input.right {
            self.facing = Facing::Right;
            self.vel.x = (self.vel.x + PLAYER_ACCELERATION).min(PLAYER_SPEED);
        } else {
            self.vel.x *= PLAYER_FRICTION;
            if self.vel.x.abs() < VELOCITY_EPSILON {
                self.vel.x = 0.0;
            }
        }

        self.pos.x += self.vel.x;
        self.wrap_horizontal(field_width);

        // Position takes this frame's full velocity; the clamp applies from
        // the next frame on
        self.vel.y += GRAVITY * dt * REFERENCE_FPS;
        self.pos.y += self.vel.y;
        self.vel.y = self.vel.y.min(MAX_FALL_SPEED);
    }

    /// Leaving one side of the field re-enters from the other
    fn wrap_horizontal(&mut self, field_width: f32) {
        if self.right() < 0.0 {
            self.pos.x = field_width - self.size.x;
        } else if self.pos.x > field_width {
            self.pos.x = 0.0;
        }
    }

    /// Launch upward. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.vel.y = JUMP_FORCE;
        self.jumping = true;
        true
    }

    /// Stand on a surface whose top edge is `surface_y`. Only while falling.
    pub fn land(&mut self, surface_y: f32) {
        if self.vel.y > 0.0 {
            self.vel.y = 0.0;
            self.pos.y = surface_y - self.size.y;
            self.jumping = false;
        }
    }
}
