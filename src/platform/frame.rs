//! Frame timing and animation-frame scheduling

use crate::consts::{MAX_FRAME_DT, REFERENCE_FPS};

/// Converts frame timestamps (ms) into capped simulation deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing from `now_ms` (round start)
    pub fn restart(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous frame, capped at `MAX_FRAME_DT` so a
    /// suspended tab doesn't launch the player through the floor
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 1.0 / REFERENCE_FPS,
        };
        self.last_ms = Some(now_ms);
        dt.min(MAX_FRAME_DT)
    }
}

/// Pending animation-frame request. Cancelling is idempotent.
#[derive(Debug, Default)]
pub struct FrameHandle {
    id: Option<i32>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: i32) {
        self.id = Some(id);
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_some()
    }

    /// Take the pending request id; a second call yields `None`
    pub fn take(&mut self) -> Option<i32> {
        self.id.take()
    }

    /// Cancel the pending browser callback, if any
    #[cfg(target_arch = "wasm32")]
    pub fn cancel(&mut self) {
        if let Some(id) = self.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
                log::debug!("Cancelled animation frame {}", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_reference_rate() {
        let mut clock = FrameClock::new();
        let dt = clock.delta(1000.0);
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_delta_from_restart() {
        let mut clock = FrameClock::new();
        clock.restart(1000.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
        assert!((clock.delta(1048.0) - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_delta_capped_after_suspend() {
        let mut clock = FrameClock::new();
        clock.restart(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_DT);
        // Clock moves on; next frame is normal again
        assert!((clock.delta(5010.0) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_delta_never_negative() {
        let mut clock = FrameClock::new();
        clock.restart(100.0);
        assert_eq!(clock.delta(90.0), 0.0);
    }

    #[test]
    fn test_handle_take_is_idempotent() {
        let mut handle = FrameHandle::new();
        assert_eq!(handle.take(), None);
        handle.set(17);
        assert!(handle.is_pending());
        assert_eq!(handle.take(), Some(17));
        assert_eq!(handle.take(), None);
        assert!(!handle.is_pending());
    }
}
