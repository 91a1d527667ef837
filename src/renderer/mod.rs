//! Render surface boundary
//!
//! Drawing is done by the host page (three.js scene, camera, lights). The core
//! hands it a `FrameSnapshot` once per frame with every transform it owns.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, SimulationState};

/// Anything that can draw a frame from a snapshot
pub trait RenderSurface {
    fn draw(&mut self, snapshot: &FrameSnapshot);
}

/// Rider transform and wheel spin for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiderView {
    pub pos: Vec3,
    pub front_wheel_rotation: f32,
    pub back_wheel_rotation: f32,
}

/// An obstacle instance, keyed by its layout index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub pos: Vec3,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub speed: f32,
    pub rider: Option<RiderView>,
    /// Segment travel positions, by segment id
    pub segments: Vec<f32>,
    pub obstacles: Vec<ObstacleView>,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            speed: state.current_speed,
            rider: state.rider.as_ref().map(|rider| RiderView {
                pos: rider.pos,
                front_wheel_rotation: rider.front_wheel.rotation,
                back_wheel_rotation: rider.back_wheel.rotation,
            }),
            segments: state.segments.iter().map(|s| s.z).collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView { id: o.id, pos: o.pos })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = SimulationState::new(11);
        state.rider_loaded(Ok(()));
        state.obstacle_loaded(3, Ok(()));

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.phase, GamePhase::Ready);
        assert_eq!(snapshot.segments.len(), 10);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.obstacles[0].id, 3);
        assert_eq!(snapshot.obstacles[0].pos.z, 0.0);
        let rider = snapshot.rider.unwrap();
        assert_eq!(rider.pos, Vec3::new(0.0, 1.0, 6.75));
    }

    #[test]
    fn test_json_shape() {
        let state = SimulationState::new(11);
        let json = FrameSnapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Ready");
        assert_eq!(value["score"], 0);
        assert!(value["rider"].is_null());
        assert_eq!(value["segments"].as_array().unwrap().len(), 10);
    }
}
