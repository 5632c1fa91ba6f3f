//! Redraw gating for the main loop.
//!
//! A frame is drawn when what is on screen changed (different fingerprint) or when
//! the refresh interval elapsed, so time-based effects such as the fading score
//! history keep updating while the player is idle.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    interval: Duration,
    last: Option<(Instant, u64)>,
}

impl RenderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Forget the last frame so the next call renders.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Returns true (and records the frame) if a redraw is due.
    pub fn should_render(&mut self, now: Instant, fingerprint: u64) -> bool {
        let due = match self.last {
            None => true,
            Some((at, fp)) => fp != fingerprint || now.saturating_duration_since(at) >= self.interval,
        };
        if due {
            self.last = Some((now, fingerprint));
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_always_renders() {
        let mut throttle = RenderThrottle::from_millis(250);
        assert!(throttle.should_render(Instant::now(), 7));
    }

    #[test]
    fn unchanged_frame_waits_for_interval() {
        let t0 = Instant::now();
        let mut throttle = RenderThrottle::from_millis(250);
        assert!(throttle.should_render(t0, 1));
        assert!(!throttle.should_render(t0 + Duration::from_millis(100), 1));
        assert!(throttle.should_render(t0 + Duration::from_millis(250), 1));
        assert!(!throttle.should_render(t0 + Duration::from_millis(300), 1));
    }

    #[test]
    fn changed_fingerprint_renders_immediately() {
        let t0 = Instant::now();
        let mut throttle = RenderThrottle::from_millis(250);
        assert!(throttle.should_render(t0, 1));
        assert!(throttle.should_render(t0 + Duration::from_millis(1), 2));
    }

    #[test]
    fn invalidate_forces_redraw() {
        let t0 = Instant::now();
        let mut throttle = RenderThrottle::from_millis(250);
        assert!(throttle.should_render(t0, 1));
        throttle.invalidate();
        assert!(throttle.should_render(t0, 1));
    }
}
