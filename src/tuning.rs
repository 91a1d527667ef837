//! Game balance and layout tuning
//!
//! Every gameplay constant lives here so a page can override balance from JSON
//! without rebuilding. Missing fields fall back to the defaults in `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must hold at least one element")]
    Empty { field: &'static str },
    #[error("road recycle ceiling {ceiling} must lie below the off-screen threshold {threshold}")]
    CeilingAboveThreshold { ceiling: f32, threshold: f32 },
    #[error("{field} recycles to {landing}, which is past the off-screen threshold {threshold}")]
    FallbackOffScreen {
        field: &'static str,
        landing: f32,
        threshold: f32,
    },
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Largest delta-time accepted per frame (seconds)
    pub max_frame_dt: f32,

    // === Road ring ===
    pub road_segment_count: usize,
    pub road_segment_length: f32,
    pub road_start_z: f32,
    pub road_recycle_ceiling: f32,
    pub road_fallback_z: f32,
    pub off_screen_threshold: f32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_start_z: f32,
    pub obstacle_spacing: f32,
    pub obstacle_fallback_z: f32,
    pub lateral_slots: Vec<f32>,

    // === Rider ===
    pub rider_z: f32,
    pub rider_base_height: f32,
    pub wheel_radius: f32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    pub sway_amplitude: f32,
    pub road_half_width: f32,
    pub lateral_move_speed: f32,

    // === Speed ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_interval_secs: f32,

    // === Collision ===
    pub collision_depth_tolerance: f32,
    pub collision_lateral_radius: f32,
    pub collision_vertical_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,

            road_segment_count: ROAD_SEGMENT_COUNT,
            road_segment_length: ROAD_SEGMENT_LENGTH,
            road_start_z: ROAD_START_Z,
            road_recycle_ceiling: ROAD_RECYCLE_CEILING,
            road_fallback_z: ROAD_FALLBACK_Z,
            off_screen_threshold: OFF_SCREEN_THRESHOLD,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_start_z: OBSTACLE_START_Z,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_fallback_z: OBSTACLE_FALLBACK_Z,
            lateral_slots: LATERAL_SLOTS.to_vec(),

            rider_z: RIDER_Z,
            rider_base_height: RIDER_BASE_HEIGHT,
            wheel_radius: WHEEL_RADIUS,
            bob_frequency: BOB_FREQUENCY,
            bob_amplitude: BOB_AMPLITUDE,
            sway_amplitude: SWAY_AMPLITUDE,
            road_half_width: ROAD_HALF_WIDTH,
            lateral_move_speed: LATERAL_MOVE_SPEED,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_interval_secs: SPEED_INTERVAL_SECS,

            collision_depth_tolerance: COLLISION_DEPTH_TOLERANCE,
            collision_lateral_radius: COLLISION_LATERAL_RADIUS,
            collision_vertical_radius: COLLISION_VERTICAL_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling gaps from defaults, and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values can drive a simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("max_frame_dt", self.max_frame_dt),
            ("road_segment_length", self.road_segment_length),
            ("off_screen_threshold", self.off_screen_threshold),
            ("obstacle_spacing", self.obstacle_spacing),
            ("wheel_radius", self.wheel_radius),
            ("road_half_width", self.road_half_width),
            ("lateral_move_speed", self.lateral_move_speed),
            ("speed_interval_secs", self.speed_interval_secs),
            ("collision_depth_tolerance", self.collision_depth_tolerance),
            ("collision_lateral_radius", self.collision_lateral_radius),
            ("collision_vertical_radius", self.collision_vertical_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("initial_speed", self.initial_speed),
            ("speed_step", self.speed_step),
            ("bob_amplitude", self.bob_amplitude),
            ("sway_amplitude", self.sway_amplitude),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.road_segment_count == 0 {
            return Err(TuningError::Empty { field: "road_segment_count" });
        }
        if self.obstacle_count == 0 {
            return Err(TuningError::Empty { field: "obstacle_count" });
        }
        if self.lateral_slots.is_empty() {
            return Err(TuningError::Empty { field: "lateral_slots" });
        }
        if self.road_recycle_ceiling >= self.off_screen_threshold {
            return Err(TuningError::CeilingAboveThreshold {
                ceiling: self.road_recycle_ceiling,
                threshold: self.off_screen_threshold,
            });
        }

        // Where a pool lands when every element left the screen at once
        let fallbacks = [
            (
                "road_fallback_z",
                (self.road_fallback_z - self.road_segment_length).min(self.road_recycle_ceiling),
            ),
            ("obstacle_fallback_z", self.obstacle_fallback_z - self.obstacle_spacing),
        ];
        for (field, landing) in fallbacks {
            if landing >= self.off_screen_threshold {
                return Err(TuningError::FallbackOffScreen {
                    field,
                    landing,
                    threshold: self.off_screen_threshold,
                });
            }
        }
        Ok(())
    }

    /// Circumference of a rider wheel
    #[inline]
    pub fn wheel_circumference(&self) -> f32 {
        std::f32::consts::TAU * self.wheel_radius
    }

    /// Startup travel-axis position of the obstacle at layout index `index`
    #[inline]
    pub fn obstacle_layout_z(&self, index: usize) -> f32 {
        self.obstacle_start_z + index as f32 * self.obstacle_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_speed": 5.0, "obstacle_count": 8 }"#).unwrap();
        assert_eq!(tuning.initial_speed, 5.0);
        assert_eq!(tuning.obstacle_count, 8);
        assert_eq!(tuning.rider_z, RIDER_Z);
        assert_eq!(tuning.lateral_slots, LATERAL_SLOTS.to_vec());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "wheel_radius": 0.0 }"#),
            Err(TuningError::NotPositive { field: "wheel_radius", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "speed_step": -1.0 }"#),
            Err(TuningError::Negative { field: "speed_step", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "lateral_slots": [] }"#),
            Err(TuningError::Empty { field: "lateral_slots" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "road_recycle_ceiling": 30.0 }"#),
            Err(TuningError::CeilingAboveThreshold { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_count": 0 }"#),
            Err(TuningError::Empty { field: "obstacle_count" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_fallback_z": 40.0 }"#),
            Err(TuningError::FallbackOffScreen { field: "obstacle_fallback_z", .. })
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_obstacle_layout() {
        let tuning = Tuning::default();
        assert_eq!(tuning.obstacle_layout_z(0), -30.0);
        assert_eq!(tuning.obstacle_layout_z(4), 10.0);
    }
}
