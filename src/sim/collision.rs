//! Player vs platform contact
//!
//! Platforms are one-way: the player only lands while falling, and only when
//! the bottom edge has crossed into the platform's landing band.

use super::platform::Platform;
use super::player::Player;
use crate::consts::LANDING_MARGIN;

/// Whether `player` lands on `platform` this frame.
///
/// The band extends `LANDING_MARGIN` platform-heights below the top edge,
/// a little deeper than the platform itself, so fast falls still catch.
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    let bottom = player.bottom();
    player.vel.y > 0.0
        && player.pos.x < platform.right()
        && player.right() > platform.pos.x
        && bottom > platform.pos.y
        && bottom < platform.pos.y + platform.size.y * LANDING_MARGIN
}

/// Index of the platform the player lands on. When several overlap, the last
/// in pool order wins.
pub fn landing_platform(player: &Player, platforms: &[Platform]) -> Option<usize> {
    platforms.iter().rposition(|p| lands_on(player, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::consts::*;
    use crate::sim::platform::PlatformKind;
    use glam::Vec2;

    fn ledge(x: f32, y: f32) -> Platform {
        Platform {
            pos: Vec2::new(x, y),
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            kind: PlatformKind::Normal,
        }
    }

    fn falling_at(x: f32, bottom: f32) -> Player {
        let mut player = Player::new(Viewport::default());
        player.pos = Vec2::new(x, bottom - PLAYER_HEIGHT);
        player.vel.y = 3.0;
        player
    }

    #[test]
    fn test_lands_inside_band() {
        let platform = ledge(100.0, 400.0);
        assert!(lands_on(&falling_at(90.0, 401.0), &platform));
        // Deeper than the platform but within the forgiveness margin
        assert!(lands_on(&falling_at(90.0, 423.0), &platform));
        assert!(!lands_on(&falling_at(90.0, 424.5), &platform));
        // Exactly on the top edge has not crossed yet
        assert!(!lands_on(&falling_at(90.0, 400.0), &platform));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platform = ledge(100.0, 400.0);
        let mut player = falling_at(90.0, 405.0);
        player.vel.y = -5.0;
        assert!(!lands_on(&player, &platform));
        player.vel.y = 0.0;
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_horizontal_overlap_required() {
        let platform = ledge(100.0, 400.0);
        // Player spans 50..100, touching but not overlapping
        assert!(!lands_on(&falling_at(50.0, 405.0), &platform));
        assert!(lands_on(&falling_at(50.5, 405.0), &platform));
        assert!(!lands_on(&falling_at(170.0, 405.0), &platform));
    }

    #[test]
    fn test_last_overlap_wins() {
        let platforms = vec![ledge(100.0, 400.0), ledge(300.0, 100.0), ledge(110.0, 398.0)];
        let player = falling_at(100.0, 405.0);
        assert_eq!(landing_platform(&player, &platforms), Some(2));
        assert_eq!(landing_platform(&falling_at(300.0, 50.0), &platforms), None);
    }
}
