//! Lateral steering from held direction keys

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Tuning;

/// Steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` identifier; anything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Directions currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldDirections {
    held: HashSet<Direction>,
}

impl HeldDirections {
    pub fn press(&mut self, dir: Direction) {
        self.held.insert(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.held.remove(&dir);
    }

    #[inline]
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(&dir)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Integrate held input into a new lateral offset.
///
/// Right is applied first, then left; each is clamped to its own road edge,
/// so holding both nets out to roughly zero movement.
pub fn steer(offset: f32, held: &HeldDirections, dt: f32, tuning: &Tuning) -> f32 {
    let step = tuning.lateral_move_speed * dt;
    let edge = tuning.road_half_width;
    let mut offset = offset;

    if held.is_held(Direction::Right) {
        offset = (offset + step).min(edge);
    }
    if held.is_held(Direction::Left) {
        offset = (offset - step).max(-edge);
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("a"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_press_release() {
        let mut held = HeldDirections::default();
        held.press(Direction::Left);
        held.press(Direction::Left);
        assert!(held.is_held(Direction::Left));
        held.release(Direction::Left);
        assert!(!held.is_held(Direction::Left));
        // Releasing something not held is fine
        held.release(Direction::Right);
    }

    #[test]
    fn test_steer_right_and_clamp() {
        let tuning = Tuning::default();
        let mut held = HeldDirections::default();
        held.press(Direction::Right);

        let offset = steer(0.0, &held, 0.1, &tuning);
        assert!((offset - 0.4).abs() < 1e-6);

        let offset = steer(3.9, &held, 0.1, &tuning);
        assert_eq!(offset, 4.0);
    }

    #[test]
    fn test_steer_both_held() {
        let tuning = Tuning::default();
        let mut held = HeldDirections::default();
        held.press(Direction::Right);
        held.press(Direction::Left);

        assert!((steer(1.0, &held, 0.05, &tuning) - 1.0).abs() < 1e-6);
        // At the right edge the right step clamps first, then left pulls back
        let offset = steer(4.0, &held, 0.1, &tuning);
        assert!((offset - 3.6).abs() < 1e-6);
    }

    #[test]
    fn test_no_input_no_motion() {
        let tuning = Tuning::default();
        let held = HeldDirections::default();
        assert_eq!(steer(-2.5, &held, 0.1, &tuning), -2.5);
    }

    proptest! {
        #[test]
        fn prop_offset_stays_on_road(
            start in -4.0f32..=4.0,
            steps in proptest::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..=0.1), 0..200),
        ) {
            let tuning = Tuning::default();
            let mut held = HeldDirections::default();
            let mut offset = start;
            for (left, right, dt) in steps {
                held.clear();
                if left { held.press(Direction::Left); }
                if right { held.press(Direction::Right); }
                offset = steer(offset, &held, dt, &tuning);
                prop_assert!((-4.0..=4.0).contains(&offset));
            }
        }
    }
}
