//! Per-frame draw list built from round state
//!
//! Kept free of browser types so ordering and mirroring are testable natively.

use glam::Vec2;

use crate::platform::SpriteKey;
use crate::sim::{Facing, RoundState};

/// One image blit in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub key: SpriteKey,
    pub pos: Vec2,
    pub size: Vec2,
    /// Mirror horizontally about the sprite's own center
    pub flip_x: bool,
}

impl Sprite {
    /// X coordinate to draw at once the context is scaled by (-1, 1)
    pub fn mirrored_x(&self) -> f32 {
        -self.pos.x - self.size.x
    }
}

/// Platforms first, player on top
pub fn build(state: &RoundState) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(state.platforms.len() + 1);

    sprites.extend(state.platforms.iter().map(|p| Sprite {
        key: SpriteKey::Platform,
        pos: p.pos,
        size: p.size,
        flip_x: false,
    }));

    let player = &state.player;
    sprites.push(Sprite {
        key: SpriteKey::Player,
        pos: player.pos,
        size: player.size,
        flip_x: player.facing == Facing::Left,
    });

    sprites
}
