//! Pure speed and steering math. Everything here is a function of
//! (state, input, tuning, dt) so it can be tested without a rig.

use bevy_math::{Quat, Vec3};

use crate::DriveInput;
use crate::config::VehicleConfig;

/// The three mutually exclusive speed branches a tick can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivePhase {
    Accelerating,
    Braking,
    Coasting,
}

impl DrivePhase {
    /// Braking takes precedence when both pedals are held.
    pub fn of(input: &DriveInput) -> Self {
        if input.accelerate && !input.brake {
            DrivePhase::Accelerating
        } else if input.brake {
            DrivePhase::Braking
        } else {
            DrivePhase::Coasting
        }
    }
}

/// First-order speed model: one signed rate per phase, clamped to
/// `[0, max_speed]` so repeated ticks can never drift out of range.
pub fn next_speed(current: f32, phase: DrivePhase, config: &VehicleConfig, dt: f32) -> f32 {
    let rate = match phase {
        DrivePhase::Accelerating => config.acceleration,
        DrivePhase::Braking => -config.brake_force,
        DrivePhase::Coasting => -config.deceleration,
    };
    (current + rate * dt).clamp(0.0, config.max_speed)
}

/// World-space forward axis of a body rotation (-Z forward, Y up).
pub fn forward_axis(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// Yaw delta about the up axis for one tick of steering.
pub fn yaw_delta(steer: f32, turn_rate_deg: f32, dt: f32) -> Quat {
    Quat::from_rotation_y((steer * turn_rate_deg * dt).to_radians())
}
