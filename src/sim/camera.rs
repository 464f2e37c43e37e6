//! Vertical camera scrolling
//!
//! The camera never moves; the world does. When the player climbs above the
//! viewport midpoint, the player and every platform shift down by the same
//! amount so the player holds at the midpoint.

use super::platform::Platform;
use super::player::Player;

/// How far the world must shift down this frame, if at all
pub fn scroll_amount(player_y: f32, mid_y: f32) -> Option<f32> {
    (player_y < mid_y).then(|| mid_y - player_y)
}

/// Shift the player and all platforms down by `amount`
pub fn shift_world(player: &mut Player, platforms: &mut [Platform], amount: f32) {
    player.pos.y += amount;
    for platform in platforms.iter_mut() {
        platform.pos.y += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scroll_amount() {
        assert_eq!(scroll_amount(250.0, 300.0), Some(50.0));
        assert_eq!(scroll_amount(300.0, 300.0), None);
        assert_eq!(scroll_amount(450.0, 300.0), None);
    }

    #[test]
    fn test_shift_world_preserves_relative_layout() {
        let viewport = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut player = Player::new(viewport);
        player.pos.y = 220.0;
        let mut platforms = vec![
            Platform::scattered(&mut rng, 280.0, viewport),
            Platform::scattered(&mut rng, 90.0, viewport),
        ];

        let amount = scroll_amount(player.pos.y, viewport.mid_y()).unwrap();
        shift_world(&mut player, &mut platforms, amount);

        assert_eq!(player.pos.y, viewport.mid_y());
        assert_eq!(platforms[0].pos.y, 360.0);
        assert_eq!(platforms[1].pos.y, 170.0);
    }
}
