//! Rider animation
//!
//! Wheel spin, body bob and sway are all derived from scroll speed and time;
//! nothing here feeds back into the simulation besides the rider's position.

use super::state::Rider;
use crate::{Tuning, normalize_angle};

/// Wheel angular speed (rad/s) for a given scroll speed
#[inline]
pub fn wheel_angular_speed(speed: f32, tuning: &Tuning) -> f32 {
    (speed / tuning.wheel_circumference()) * std::f32::consts::TAU
}

/// Advance pedalling, spin both wheels and update the rider's bobbing position
pub fn animate_rider(rider: &mut Rider, speed: f32, dt: f32, tuning: &Tuning) {
    let angular = wheel_angular_speed(speed, tuning);
    let step = angular * dt;

    // Wheels roll forward, which is a negative rotation about the axle
    rider.front_wheel.rotation = normalize_angle(rider.front_wheel.rotation - step);
    rider.back_wheel.rotation = normalize_angle(rider.back_wheel.rotation - step);

    rider.pedal_angle += step;

    let phase = (rider.pedal_angle * tuning.bob_frequency).sin();
    rider.pos.y = tuning.rider_base_height + phase * tuning.bob_amplitude;
    rider.pos.x = rider.lateral_offset + phase * tuning.sway_amplitude;
}
