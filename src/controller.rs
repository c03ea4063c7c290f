use tracing::{debug, trace};

use crate::DriveInput;
use crate::config::{ConfigError, VehicleConfig};
use crate::motion::{self, DrivePhase};
use crate::rig::VehicleRig;

/// Per-vehicle mutable state, owned by the controller for the vehicle's
/// lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleState {
    current_speed: f32,
    is_braking: bool,
    is_accelerating: bool,
}

impl VehicleState {
    /// Scalar speed in `[0, max_speed]`.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Raw brake flag from the last input snapshot.
    pub fn is_braking(&self) -> bool {
        self.is_braking
    }

    /// Raw accelerate flag from the last input snapshot.
    pub fn is_accelerating(&self) -> bool {
        self.is_accelerating
    }
}

/// Converts per-tick input into body motion, wheel steering/braking, visual
/// wheel poses, and audio channel state.
///
/// The hosting simulation drives it: construct once at spawn, then call
/// [`step`](Self::step) from the fixed-timestep callback with the host's dt.
pub struct VehicleController {
    config: VehicleConfig,
    state: VehicleState,
    rig: VehicleRig,
}

impl VehicleController {
    /// Validate the config, bind the audio clips, and start the spawn-state
    /// channels (engine and idle, looping).
    pub fn new(rig: VehicleRig, config: VehicleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rig = rig;
        rig.sounds.start(&config.audio);
        debug!(
            max_speed = config.max_speed,
            turn_rate = config.turn_rate,
            "vehicle controller ready"
        );

        Ok(Self {
            config,
            state: VehicleState::default(),
            rig,
        })
    }

    /// Advance one fixed simulation step of `dt` seconds.
    pub fn step(&mut self, input: DriveInput, dt: f32) {
        let input = input.clamped();
        self.state.is_accelerating = input.accelerate;
        self.state.is_braking = input.brake;

        let phase = DrivePhase::of(&input);
        self.state.current_speed =
            motion::next_speed(self.state.current_speed, phase, &self.config, dt);
        self.rig.sounds.apply_phase(phase);

        // Translate along the pre-rotation forward vector, then compose the
        // yaw delta.
        let forward = motion::forward_axis(self.rig.body.rotation());
        self.rig
            .body
            .move_position(forward * self.state.current_speed * dt);
        self.rig
            .body
            .move_rotation(motion::yaw_delta(input.steer, self.config.turn_rate, dt));

        let steer_angle = input.steer * self.config.max_steer_angle;
        for wheel in self.rig.wheels.front_pair_mut() {
            wheel.collider.set_steer_angle(steer_angle);
        }

        let brake_torque = if input.brake {
            self.config.brake_force
        } else {
            0.0
        };
        for wheel in self.rig.wheels.rear_pair_mut() {
            wheel.collider.set_brake_torque(brake_torque);
        }

        // Wheel meshes follow their colliders every tick, whatever phase ran.
        for wheel in self.rig.wheels.all_mut() {
            wheel.sync_visual();
        }

        trace!(speed = self.state.current_speed, ?phase, "stepped");
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }
}
