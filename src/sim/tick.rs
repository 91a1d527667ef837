//! Per-frame simulation tick
//!
//! Fixed order each frame: delta-time, speed, then (while playing) rider
//! animation, steering, scoring and collision, then the scrolling rings.
//! Rendering happens after `tick` returns.

use rand::Rng;

use super::animate::animate_rider;
use super::collision::first_collision;
use super::lateral::steer;
use super::scoring::track_passes;
use super::scroll::{RecycleRule, advance_and_recycle};
use super::state::{GameEvent, GamePhase, SimulationState};

/// Advance the simulation to frame timestamp `now_ms`
pub fn tick(state: &mut SimulationState, now_ms: f64) {
    let dt = state.clock.delta(now_ms, state.tuning.max_frame_dt);

    state.current_speed = state.speed.effective_speed(state.phase);
    if let Some(speed) = state.speed.update(now_ms, state.phase, &state.tuning) {
        log::info!("Speed increased to: {:.1}", speed);
        state.events.push(GameEvent::SpeedIncreased { speed });
    }

    if !state.is_active() || dt <= 0.0 {
        return;
    }
    state.time_ticks += 1;

    update_rider(state, dt);

    // A collision this tick freezes the world where it is
    if state.phase == GamePhase::GameOver {
        return;
    }
    scroll_world(state, dt);
}

/// Animate, steer, score and collide. No-op until the rider has loaded.
fn update_rider(state: &mut SimulationState, dt: f32) {
    let Some(rider) = state.rider.as_mut() else {
        return;
    };

    animate_rider(rider, state.current_speed, dt, &state.tuning);
    rider.lateral_offset = steer(rider.lateral_offset, &state.held, dt, &state.tuning);
    let rider_pos = rider.pos;

    for obstacle in track_passes(&mut state.obstacles, &mut state.scored, rider_pos.z) {
        state.score += 1;
        state.events.push(GameEvent::ObstaclePassed {
            obstacle,
            score: state.score,
        });
        log::info!("Point scored! Cone passed rider. Score: {}", state.score);
    }

    if first_collision(rider_pos, &state.obstacles, &state.tuning).is_some() {
        state.end_game();
    }
}

/// Move both rings toward the camera and recycle whatever scrolled off-screen
fn scroll_world(state: &mut SimulationState, dt: f32) {
    let distance = state.current_speed * dt;
    if distance <= 0.0 {
        return;
    }

    let SimulationState {
        segments,
        obstacles,
        scored,
        rng,
        tuning,
        ..
    } = state;

    let road_rule = RecycleRule {
        threshold: tuning.off_screen_threshold,
        spacing: tuning.road_segment_length,
        ceiling: Some(tuning.road_recycle_ceiling),
        fallback: tuning.road_fallback_z,
    };
    advance_and_recycle(segments, distance, &road_rule, |_| {});

    let obstacle_rule = RecycleRule {
        threshold: tuning.off_screen_threshold,
        spacing: tuning.obstacle_spacing,
        ceiling: None,
        fallback: tuning.obstacle_fallback_z,
    };
    let recycled = advance_and_recycle(obstacles, distance, &obstacle_rule, |obstacle| {
        let slot = rng.random_range(0..tuning.lateral_slots.len());
        let z = obstacle.pos.z;
        obstacle.place(slot, z, tuning);
        scored.remove(&obstacle.id);
    });
    if recycled > 0 {
        log::trace!("Recycled {} obstacle(s)", recycled);
    }
}
