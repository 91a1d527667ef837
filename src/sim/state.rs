//! Simulation state and core types
//!
//! Everything the per-frame tick reads or writes lives in `SimulationState`;
//! there is no module-level mutable state.

use std::collections::HashSet;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::assets::AssetGate;
use super::clock::FrameClock;
use super::lateral::HeldDirections;
use super::speed::SpeedController;
use crate::Tuning;
use crate::consts::{OBSTACLE_Y, ROAD_SEGMENT_Y};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Assets loading, waiting for a start signal
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Things that happened during a tick or a phase change, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Rider and every obstacle finished loading (or failed)
    AssetsReady,
    /// Left `Ready` for the first time
    Started,
    Paused,
    Resumed,
    /// Base speed stepped up
    SpeedIncreased { speed: f32 },
    /// An obstacle passed the rider and scored
    ObstaclePassed { obstacle: u32, score: u32 },
    /// Rider hit an obstacle
    GameOver { final_score: u32 },
    /// Run restarted after game over
    Reset,
}

/// A piece of road in the scrolling ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: u32,
    /// Travel-axis position (centre of the piece)
    pub z: f32,
}

impl TrackSegment {
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, ROAD_SEGMENT_Y, self.z)
    }
}

/// An obstacle cone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Startup layout index; also the asset instance it belongs to
    pub id: u32,
    /// Index into the tuning's lateral slots
    pub slot: usize,
    pub pos: Vec3,
    /// True once the obstacle is past the rider along the direction of travel
    pub ahead_of_rider: bool,
}

impl Obstacle {
    /// Place at `slot`/`z` and recompute the rider-relative flag
    pub fn place(&mut self, slot: usize, z: f32, tuning: &Tuning) {
        self.slot = slot;
        self.pos = Vec3::new(tuning.lateral_slots[slot], OBSTACLE_Y, z);
        self.ahead_of_rider = z > tuning.rider_z;
    }
}

/// One half of the decomposed wheel set, rotating about its own pivot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelPart {
    /// Accumulated rotation about the axle (radians, normalized)
    pub rotation: f32,
}

/// The player's rider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rider {
    /// Steering offset from the road centre, clamped to the road edges
    pub lateral_offset: f32,
    /// World position including bob and sway
    pub pos: Vec3,
    /// Monotonic pedalling phase driving bob and sway
    pub pedal_angle: f32,
    pub front_wheel: WheelPart,
    pub back_wheel: WheelPart,
}

impl Rider {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lateral_offset: 0.0,
            pos: Self::home(tuning),
            pedal_angle: 0.0,
            front_wheel: WheelPart::default(),
            back_wheel: WheelPart::default(),
        }
    }

    fn home(tuning: &Tuning) -> Vec3 {
        Vec3::new(0.0, tuning.rider_base_height, tuning.rider_z)
    }

    /// Back to the road centre at base height
    pub fn reset_position(&mut self, tuning: &Tuning) {
        self.lateral_offset = 0.0;
        self.pos = Self::home(tuning);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Balance in effect for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Base speed and its ramp
    pub speed: SpeedController,
    /// Speed the world scrolls at this tick; 0 unless `Playing`
    pub current_speed: f32,
    pub score: u32,
    /// Simulation tick counter (active ticks only)
    pub time_ticks: u64,
    /// Fixed-size road ring
    pub segments: Vec<TrackSegment>,
    /// Live obstacles, in asset-load order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles already scored in their current approach cycle
    pub scored: HashSet<u32>,
    /// `None` until the rider asset has loaded
    pub rider: Option<Rider>,
    pub held: HeldDirections,
    pub clock: FrameClock,
    pub assets: AssetGate,
    /// Pending events, drained by the frontend
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let segments = (0..tuning.road_segment_count)
            .map(|i| TrackSegment {
                id: i as u32,
                z: tuning.road_start_z + i as f32 * tuning.road_segment_length,
            })
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            speed: SpeedController::new(tuning.initial_speed),
            current_speed: 0.0,
            score: 0,
            time_ticks: 0,
            segments,
            obstacles: Vec::with_capacity(tuning.obstacle_count),
            scored: HashSet::new(),
            rider: None,
            held: HeldDirections::default(),
            clock: FrameClock::new(),
            assets: AssetGate::new(tuning.obstacle_count),
            events: Vec::new(),
            tuning,
        }
    }

    /// Uniformly random lateral slot
    pub fn random_slot(&mut self) -> usize {
        self.rng.random_range(0..self.tuning.lateral_slots.len())
    }

    /// Add the obstacle for layout index `index` at its startup position
    pub fn spawn_obstacle(&mut self, index: usize) {
        let slot = self.random_slot();
        let mut obstacle = Obstacle {
            id: index as u32,
            slot,
            pos: Vec3::ZERO,
            ahead_of_rider: false,
        };
        obstacle.place(slot, self.tuning.obstacle_layout_z(index), &self.tuning);
        self.obstacles.push(obstacle);
    }

    /// Put every live obstacle back on its startup layout with a fresh slot
    pub fn restore_obstacle_layout(&mut self) {
        let Self {
            obstacles,
            scored,
            rng,
            tuning,
            ..
        } = self;
        for obstacle in obstacles.iter_mut() {
            let slot = rng.random_range(0..tuning.lateral_slots.len());
            let z = tuning.obstacle_layout_z(obstacle.id as usize);
            obstacle.place(slot, z, tuning);
            scored.remove(&obstacle.id);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether per-tick gameplay logic runs
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_layout() {
        let state = SimulationState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.segments.len(), 10);
        assert_eq!(state.segments[0].z, -45.0);
        assert_eq!(state.segments[9].z, 180.0);
        assert!(state.obstacles.is_empty());
        assert!(state.rider.is_none());
        assert_eq!(state.current_speed, 0.0);
    }

    #[test]
    fn test_spawn_obstacle_layout() {
        let mut state = SimulationState::new(7);
        for i in 0..5 {
            state.spawn_obstacle(i);
        }
        let zs: Vec<f32> = state.obstacles.iter().map(|o| o.pos.z).collect();
        assert_eq!(zs, vec![-30.0, -20.0, -10.0, 0.0, 10.0]);
        for obstacle in &state.obstacles {
            assert!(state.tuning.lateral_slots.contains(&obstacle.pos.x));
            assert_eq!(obstacle.ahead_of_rider, obstacle.pos.z > 6.75);
        }
        assert!(state.obstacles[4].ahead_of_rider);
        assert!(!state.obstacles[0].ahead_of_rider);
    }

    #[test]
    fn test_same_seed_same_slots() {
        let mut a = SimulationState::new(42);
        let mut b = SimulationState::new(42);
        for i in 0..5 {
            a.spawn_obstacle(i);
            b.spawn_obstacle(i);
        }
        let slots_a: Vec<usize> = a.obstacles.iter().map(|o| o.slot).collect();
        let slots_b: Vec<usize> = b.obstacles.iter().map(|o| o.slot).collect();
        assert_eq!(slots_a, slots_b);
    }
}
