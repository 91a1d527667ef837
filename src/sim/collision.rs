//! Rider/obstacle collision detection
//!
//! Per-axis proximity tests, no shapes. The travel axis is checked first as a
//! cheap gate; lateral and vertical distances only matter once an obstacle is
//! alongside the rider.

use glam::Vec3;

use super::state::Obstacle;
use crate::Tuning;

/// Result of a collision check against one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the rider overlaps the obstacle
    pub hit: bool,
    /// Absolute per-axis separation (x lateral, y vertical, z travel)
    pub separation: Vec3,
}

impl CollisionResult {
    pub fn miss(separation: Vec3) -> Self {
        Self {
            hit: false,
            separation,
        }
    }
}

/// Check the rider (world position) against a single obstacle
pub fn rider_obstacle_collision(rider_pos: Vec3, obstacle_pos: Vec3, tuning: &Tuning) -> CollisionResult {
    let separation = (rider_pos - obstacle_pos).abs();

    if separation.z >= tuning.collision_depth_tolerance {
        return CollisionResult::miss(separation);
    }

    let hit = separation.x < tuning.collision_lateral_radius && separation.y < tuning.collision_vertical_radius;
    if !hit {
        log::trace!(
            "Near miss: dx={:.2}, dy={:.2}, dz={:.2}",
            separation.x,
            separation.y,
            separation.z
        );
    }
    CollisionResult { hit, separation }
}

/// First obstacle (in pool order) the rider overlaps, if any
pub fn first_collision(rider_pos: Vec3, obstacles: &[Obstacle], tuning: &Tuning) -> Option<u32> {
    obstacles.iter().find_map(|obstacle| {
        let result = rider_obstacle_collision(rider_pos, obstacle.pos, tuning);
        if result.hit {
            log::debug!("Collision with obstacle {}: {:?}", obstacle.id, result.separation);
            Some(obstacle.id)
        } else {
            None
        }
    })
}
