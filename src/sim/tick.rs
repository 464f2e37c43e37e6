//! Per-frame simulation tick
//!
//! Order: player motion → landing/jumping → height score → camera scroll →
//! platform motion and recycling → fall-off check.

use super::camera;
use super::collision::landing_platform;
use super::state::{GameEvent, RoundState};
use crate::consts::*;

/// Controls held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump is held; the player jumps as soon as it lands
    pub jump: bool,
}

/// Advance the round by one frame of `dt` seconds
pub fn tick(state: &mut RoundState, input: &TickInput, dt: f32) {
    if state.over {
        return;
    }
    state.time_ticks += 1;

    let viewport = state.viewport;
    state.player.update(input, dt, viewport.width);

    if let Some(index) = landing_platform(&state.player, &state.platforms) {
        let surface_y = state.platforms[index].pos.y;
        state.player.land(surface_y);

        if input.jump && state.player.jump() {
            state.award(SCORE_JUMP);
            state.push_event(GameEvent::Jumped);
            state.remove_floor();
        }
    }

    // One point per frame spent above the previous peak
    let altitude = state.altitude();
    if altitude < state.highest_y {
        state.highest_y = altitude;
        state.award(SCORE_CLIMB);
    }

    if let Some(amount) = camera::scroll_amount(state.player.pos.y, viewport.mid_y()) {
        camera::shift_world(&mut state.player, &mut state.platforms, amount);
        state.scrolled += amount;
    }

    let mut recycled = 0;
    {
        let (rng, platforms) = state.rng_and_platforms();
        for platform in platforms.iter_mut() {
            if platform.update(rng, viewport) {
                recycled += 1;
            }
        }
    }
    for _ in 0..recycled {
        state.award(SCORE_RECYCLE);
        state.push_event(GameEvent::PlatformRecycled);
    }

    if state.player.pos.y > viewport.height {
        state.over = true;
        state.push_event(GameEvent::GameOver);
        log::info!("Player fell off after {} frames, score {}", state.time_ticks, state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::platform::{Platform, PlatformKind};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn jump_held() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_on_floor_stays_put() {
        let mut state = RoundState::new(12345);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.player.pos.y, FLOOR_Y - PLAYER_HEIGHT);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.score, 0);
        assert!(state.has_floor());
        assert!(!state.over);
    }

    #[test]
    fn test_jump_from_floor_removes_it() {
        let mut state = RoundState::new(12345);
        let count = state.platforms.len();
        tick(&mut state, &jump_held(), DT);

        assert_eq!(state.player.vel.y, JUMP_FORCE);
        assert!(state.player.jumping);
        assert_eq!(state.score, SCORE_JUMP);
        assert_eq!(state.platforms.len(), count - 1);
        assert!(!state.has_floor());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Jumped, GameEvent::FloorRemoved]
        );
    }

    #[test]
    fn test_land_on_platform_at_400_holding_jump() {
        let mut state = RoundState::new(5);
        state.platforms = vec![Platform {
            pos: Vec2::new(0.0, 400.0),
            size: Vec2::new(CANVAS_WIDTH, PLATFORM_HEIGHT),
            kind: PlatformKind::Floor,
        }];
        state.player.pos = Vec2::new(175.0, 400.0 - PLAYER_HEIGHT - 2.0);
        state.player.vel.y = 4.0;
        state.player.jumping = true;
        state.highest_y = f32::MIN;

        tick(&mut state, &jump_held(), DT);

        assert_eq!(state.player.vel.y, JUMP_FORCE);
        assert_eq!(state.player.pos.y, 400.0 - PLAYER_HEIGHT);
        assert_eq!(state.score, SCORE_JUMP);
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_land_without_jump_snaps_to_surface() {
        let mut state = RoundState::new(5);
        state.platforms = vec![Platform {
            pos: Vec2::new(150.0, 400.0),
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            kind: PlatformKind::Normal,
        }];
        state.player.pos = Vec2::new(175.0, 400.0 - PLAYER_HEIGHT - 1.0);
        state.player.vel.y = 3.0;
        state.player.jumping = true;
        state.highest_y = f32::MIN;

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.y, 400.0 - PLAYER_HEIGHT);
        assert!(!state.player.jumping);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_climbing_awards_height_points() {
        let mut state = RoundState::new(12345);
        tick(&mut state, &jump_held(), DT);
        let after_jump = state.score;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, after_jump + SCORE_CLIMB);
        assert!(state.highest_y < FLOOR_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_camera_scroll_and_recycle() {
        let mut state = RoundState::new(8);
        let viewport = state.viewport;
        state.remove_floor();
        state.platforms.truncate(1);
        state.platforms[0].pos.y = viewport.height - 5.0;
        state.platforms[0].kind = PlatformKind::Normal;
        state.player.pos.y = 200.0;
        state.player.vel.y = -10.0;
        state.player.jumping = true;
        let score = state.score;

        tick(&mut state, &TickInput::default(), DT);

        // Player pushed back to the midpoint, platform scrolled off and recycled
        assert!((state.player.pos.y - viewport.mid_y()).abs() < 1e-3);
        assert!(state.scrolled > 0.0);
        assert_eq!(state.platforms[0].pos.y, -PLATFORM_HEIGHT);
        assert_eq!(state.score, score + SCORE_CLIMB + SCORE_RECYCLE);
        assert!(state.drain_events().contains(&GameEvent::PlatformRecycled));
    }

    #[test]
    fn test_fall_off_bottom_ends_round() {
        let mut state = RoundState::new(3);
        state.platforms.clear();
        state.player.pos.y = state.viewport.height - 1.0;
        state.player.vel.y = 5.0;

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.over);
        assert!(state.drain_events().contains(&GameEvent::GameOver));

        // No further simulation once over
        let ticks = state.time_ticks;
        tick(&mut state, &jump_held(), DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        let mut a = RoundState::new(99999);
        let mut b = RoundState::new(99999);
        let inputs = [
            jump_held(),
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.over, b.over);
    }

    #[test]
    fn test_viewport_is_respected() {
        let viewport = Viewport::new(300.0, 600.0);
        let state = RoundState::with_viewport(4, viewport);
        assert_eq!(state.platforms[0].size.x, 300.0);
        assert!(state.platforms.iter().all(|p| p.right() <= 300.0));
    }

    proptest! {
        #[test]
        fn prop_score_monotonic(
            seed in any::<u64>(),
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = RoundState::new(seed);
            let mut last = state.score;
            let mut floors_seen_after_removal = false;
            let mut floor_gone = false;
            for (left, right, jump) in moves {
                tick(&mut state, &TickInput { left, right, jump }, DT);
                prop_assert!(state.score >= last);
                last = state.score;
                prop_assert!(state.platforms.iter().filter(|p| p.is_floor()).count() <= 1);
                if floor_gone && state.has_floor() {
                    floors_seen_after_removal = true;
                }
                floor_gone |= !state.has_floor();
            }
            prop_assert!(!floors_seen_after_removal);
        }
    }
}
