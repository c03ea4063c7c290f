//! Arcade vehicle controller: turns per-tick input snapshots into body
//! motion, wheel steering/braking, visual wheel poses, and audio channel
//! state. The hosting simulation owns the engine; this crate only talks to
//! it through the handle traits in [`rig`].

pub mod audio;
pub mod config;
pub mod controller;
pub mod motion;
pub mod rig;

pub use audio::{AudioChannel, SoundBank};
pub use config::{AudioClips, ConfigError, VehicleConfig};
pub use controller::{VehicleController, VehicleState};
pub use motion::DrivePhase;
pub use rig::{
    BodyProxy, RigBuilder, RigError, VehicleRig, Wheel, WheelProxy, WheelSet, WheelVisual,
};

/// Input snapshot consumed once per fixed simulation step.
///
/// Whatever produced these values (keyboard, gamepad, an AI driver) is the
/// host's concern; the controller only sees the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    /// Steering axis in [-1, 1]; positive yaws about +Y.
    pub steer: f32,
}

impl DriveInput {
    /// Range-limit the steering axis. Out-of-range values are clamped, never
    /// rejected.
    pub fn clamped(self) -> Self {
        Self {
            steer: self.steer.clamp(-1.0, 1.0),
            ..self
        }
    }
}
