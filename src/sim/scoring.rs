//! Pass detection
//!
//! An obstacle scores once when it crosses the rider's travel position.
//! Membership in the scored set blocks a second point until recycling clears it.

use std::collections::HashSet;

use super::state::Obstacle;

/// Score every obstacle that crossed `rider_z` since the last check.
///
/// Returns the ids that scored this call, in pool order.
pub fn track_passes(obstacles: &mut [Obstacle], scored: &mut HashSet<u32>, rider_z: f32) -> Vec<u32> {
    let mut passed = Vec::new();
    for obstacle in obstacles.iter_mut() {
        if scored.contains(&obstacle.id) {
            continue;
        }
        if obstacle.pos.z > rider_z && !obstacle.ahead_of_rider {
            scored.insert(obstacle.id);
            obstacle.ahead_of_rider = true;
            passed.push(obstacle.id);
        }
    }
    passed
}
