//! Frame clock
//!
//! Turns the monotonic timestamps handed to each animation frame into a
//! clamped delta-time, so a suspended tab can't launch the rider across the map.

/// Converts frame timestamps (ms) into delta-time (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Delta since the previous call, clamped to `[0, max_dt]`. The first call yields 0.
    pub fn delta(&mut self, now_ms: f64, max_dt: f32) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, max_dt)
    }

    /// Timestamp of the last frame seen, if any
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.0, 0.1), 0.0);
        assert_eq!(clock.last_timestamp(), Some(1234.0));
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0, 0.1);
        let dt = clock.delta(1016.0, 0.1);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0, 0.1);
        assert_eq!(clock.delta(5000.0, 0.1), 0.1);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(500.0, 0.1);
        assert_eq!(clock.delta(400.0, 0.1), 0.0);
    }
}
