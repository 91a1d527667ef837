//! Scroll speed ramp
//!
//! Base speed climbs by a fixed step once per interval of real time while
//! the run is active. Effective speed is zero outside `Playing`.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;
use crate::Tuning;

/// Base scroll speed and the timestamps driving its ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedController {
    /// Current base speed (units/s)
    pub base_speed: f32,
    /// Timestamp (ms) of the first active tick of this run
    pub game_start_ms: Option<f64>,
    /// Timestamp (ms) of the last speed step
    pub last_increase_ms: f64,
}

impl SpeedController {
    pub fn new(initial_speed: f32) -> Self {
        Self {
            base_speed: initial_speed,
            game_start_ms: None,
            last_increase_ms: 0.0,
        }
    }

    /// Speed the world actually scrolls at for `phase`
    #[inline]
    pub fn effective_speed(&self, phase: GamePhase) -> f32 {
        if phase == GamePhase::Playing {
            self.base_speed
        } else {
            0.0
        }
    }

    /// Advance the ramp. Returns the new base speed when a step was taken.
    pub fn update(&mut self, now_ms: f64, phase: GamePhase, tuning: &Tuning) -> Option<f32> {
        if phase != GamePhase::Playing {
            return None;
        }

        if self.game_start_ms.is_none() {
            self.game_start_ms = Some(now_ms);
            self.last_increase_ms = now_ms;
        }

        let since_last = (now_ms - self.last_increase_ms) / 1000.0;
        if since_last >= f64::from(tuning.speed_interval_secs) {
            self.base_speed += tuning.speed_step;
            self.last_increase_ms = now_ms;
            return Some(self.base_speed);
        }
        None
    }

    /// Seconds of real time since the run started (0 before the first active tick)
    pub fn run_time_secs(&self, now_ms: f64) -> f64 {
        self.game_start_ms
            .map(|start| ((now_ms - start) / 1000.0).max(0.0))
            .unwrap_or(0.0)
    }

    /// Back to the initial speed with the ramp unarmed
    pub fn reset(&mut self, initial_speed: f32) {
        *self = Self::new(initial_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_scenario() {
        let tuning = Tuning::default();
        let mut speed = SpeedController::new(tuning.initial_speed);
        assert_eq!(speed.base_speed, 3.0);

        // First active tick arms the ramp
        assert_eq!(speed.update(10_000.0, GamePhase::Playing, &tuning), None);
        assert_eq!(speed.update(10_500.0, GamePhase::Playing, &tuning), None);
        assert_eq!(speed.update(11_000.0, GamePhase::Playing, &tuning), Some(3.5));
        speed.update(12_000.0, GamePhase::Playing, &tuning);
        speed.update(13_000.0, GamePhase::Playing, &tuning);
        assert_eq!(speed.base_speed, 4.5);
        assert!((speed.run_time_secs(13_000.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_ramp_outside_playing() {
        let tuning = Tuning::default();
        let mut speed = SpeedController::new(tuning.initial_speed);
        for phase in [GamePhase::Ready, GamePhase::Paused, GamePhase::GameOver] {
            assert_eq!(speed.update(50_000.0, phase, &tuning), None);
            assert_eq!(speed.effective_speed(phase), 0.0);
        }
        assert!(speed.game_start_ms.is_none());
        assert_eq!(speed.effective_speed(GamePhase::Playing), 3.0);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut speed = SpeedController::new(tuning.initial_speed);
        speed.update(0.0, GamePhase::Playing, &tuning);
        speed.update(5_000.0, GamePhase::Playing, &tuning);
        assert!(speed.base_speed > 3.0);

        speed.reset(tuning.initial_speed);
        assert_eq!(speed.base_speed, 3.0);
        assert!(speed.game_start_ms.is_none());
    }
}
