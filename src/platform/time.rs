//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Turns monotonic millisecond timestamps (e.g. `requestAnimationFrame`'s
/// argument) into per-frame deltas in seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, clamped to `[0, MAX_FRAME_DT]`.
    /// The first tick yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }

    /// Forget the last timestamp, e.g. after the page was hidden
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12_345.0), 0.0);
        assert!((clock.tick(12_361.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gaps_are_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(5_000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_time_going_backwards_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.tick(900.0), 0.0);
        clock.reset();
        assert_eq!(clock.tick(2_000.0), 0.0);
    }
}
