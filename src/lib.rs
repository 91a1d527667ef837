//! Cycling Runner - An endless cycling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, scoring, collisions, game state)
//! - `mesh`: Import-time geometry helpers (wheel decomposition)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Frame snapshots handed to the host renderer
//! - `ui`: UI sink and event dispatch
//! - `platform`: Browser/native platform abstraction

pub mod mesh;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};
pub use ui::UiSink;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds). Guards against tab-suspend spikes.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Road ring layout
    pub const ROAD_SEGMENT_COUNT: usize = 10;
    pub const ROAD_SEGMENT_LENGTH: f32 = 25.0;
    pub const ROAD_START_Z: f32 = -45.0;
    pub const ROAD_SEGMENT_Y: f32 = 0.1;
    /// Segments are never recycled closer than this
    pub const ROAD_RECYCLE_CEILING: f32 = -50.0;
    /// Anchor used when every segment is off-screen at once
    pub const ROAD_FALLBACK_Z: f32 = -100.0;

    /// Travel-axis position past which elements are off-screen (camera sits at z=10)
    pub const OFF_SCREEN_THRESHOLD: f32 = 20.0;

    /// Obstacle layout
    pub const OBSTACLE_COUNT: usize = 5;
    pub const OBSTACLE_START_Z: f32 = -30.0;
    pub const OBSTACLE_SPACING: f32 = 10.0;
    pub const OBSTACLE_Y: f32 = 0.1;
    /// Anchor used when every obstacle is off-screen at once
    pub const OBSTACLE_FALLBACK_Z: f32 = -30.0;
    /// Lateral slots an obstacle may occupy (left, center, right)
    pub const LATERAL_SLOTS: [f32; 3] = [-2.0, 0.0, 2.0];

    /// Rider placement
    pub const RIDER_Z: f32 = 6.75;
    pub const RIDER_BASE_HEIGHT: f32 = 1.0;

    /// Scroll speed (units/s)
    pub const INITIAL_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.5;
    /// Seconds of real time between speed steps
    pub const SPEED_INTERVAL_SECS: f32 = 1.0;

    /// Rider animation
    pub const WHEEL_RADIUS: f32 = 0.34;
    pub const BOB_FREQUENCY: f32 = 2.0;
    pub const BOB_AMPLITUDE: f32 = 0.015;
    pub const SWAY_AMPLITUDE: f32 = 0.008;

    /// Lateral control
    pub const ROAD_HALF_WIDTH: f32 = 4.0;
    pub const LATERAL_MOVE_SPEED: f32 = 4.0;

    /// Collision tolerances (per axis)
    pub const COLLISION_DEPTH_TOLERANCE: f32 = 2.0;
    pub const COLLISION_LATERAL_RADIUS: f32 = 1.0;
    pub const COLLISION_VERTICAL_RADIUS: f32 = 1.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
