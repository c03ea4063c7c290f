//! Headless demo rig: drives a [`VehicleController`] through a scripted
//! accelerate / steer / coast / brake cycle against in-memory handles, so the
//! crate can be watched working without an engine attached.

use std::path::Path;
use std::sync::{Arc, Mutex};

use bevy_math::{EulerRot, Quat, Vec3};
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use kartdrive::{
    AudioChannel, BodyProxy, DriveInput, RigBuilder, VehicleConfig, VehicleController, Wheel,
    WheelProxy, WheelVisual,
};

const WHEEL_BASE: f32 = 1.18;
const WHEEL_TRACK: f32 = 0.95;
const TICK_HZ: u32 = 50;
const RUN_SECONDS: u32 = 8;

/// Kinematic stand-in for the host's rigid body: integrates the deltas the
/// controller pushes at it.
#[derive(Default)]
struct BodyState {
    position: Vec3,
    rotation: Quat,
}

#[derive(Clone)]
struct DemoBody(Arc<Mutex<BodyState>>);

impl BodyProxy for DemoBody {
    fn rotation(&self) -> Quat {
        self.0.lock().expect("body mutex poisoned").rotation
    }

    fn move_position(&mut self, delta: Vec3) {
        self.0.lock().expect("body mutex poisoned").position += delta;
    }

    fn move_rotation(&mut self, delta: Quat) {
        let mut body = self.0.lock().expect("body mutex poisoned");
        body.rotation = (body.rotation * delta).normalize();
    }
}

/// Wheel stand-in: pose rides along with the body at a fixed axle offset,
/// fronts yawed by the commanded steer angle.
struct DemoWheel {
    body: Arc<Mutex<BodyState>>,
    offset: Vec3,
    steer_angle: f32,
    brake_torque: f32,
}

impl DemoWheel {
    fn new(body: Arc<Mutex<BodyState>>, offset: Vec3) -> Self {
        Self {
            body,
            offset,
            steer_angle: 0.0,
            brake_torque: 0.0,
        }
    }
}

impl WheelProxy for DemoWheel {
    fn set_steer_angle(&mut self, degrees: f32) {
        self.steer_angle = degrees;
    }

    fn set_brake_torque(&mut self, torque: f32) {
        if torque != self.brake_torque {
            trace!(torque, "brake torque changed");
        }
        self.brake_torque = torque;
    }

    fn world_pose(&self) -> (Vec3, Quat) {
        let body = self.body.lock().expect("body mutex poisoned");
        let position = body.position + body.rotation * self.offset;
        let rotation = body.rotation * Quat::from_rotation_y(self.steer_angle.to_radians());
        (position, rotation)
    }
}

struct DemoVisual {
    name: &'static str,
}

impl WheelVisual for DemoVisual {
    fn set_world_pose(&mut self, position: Vec3, rotation: Quat) {
        trace!(wheel = self.name, ?position, ?rotation, "mesh pose");
    }
}

/// Audio stand-in that logs channel transitions instead of making sound.
struct DemoChannel {
    name: &'static str,
    playing: bool,
}

impl DemoChannel {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            playing: false,
        }
    }
}

impl AudioChannel for DemoChannel {
    fn set_clip(&mut self, clip: &str) {
        info!(channel = self.name, clip, "clip bound");
    }

    fn set_looping(&mut self, looping: bool) {
        info!(channel = self.name, looping, "loop flag set");
    }

    fn play(&mut self) {
        self.playing = true;
        info!(channel = self.name, "channel started");
    }

    fn stop(&mut self) {
        self.playing = false;
        info!(channel = self.name, "channel stopped");
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Scripted driver: accelerate, swing right, coast, then stand on the brake.
fn script_input(t: f32) -> DriveInput {
    if t < 2.0 {
        DriveInput {
            accelerate: true,
            ..DriveInput::default()
        }
    } else if t < 4.0 {
        DriveInput {
            accelerate: true,
            steer: 0.5,
            ..DriveInput::default()
        }
    } else if t < 6.0 {
        DriveInput::default()
    } else {
        DriveInput {
            brake: true,
            ..DriveInput::default()
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => VehicleConfig::load(Path::new(&path))
            .unwrap_or_else(|e| panic!("Failed to load vehicle config: {e}")),
        None => VehicleConfig::default(),
    };

    let body = Arc::new(Mutex::new(BodyState::default()));
    let half_track = WHEEL_TRACK / 2.0;
    let axle = |x: f32, z: f32| Vec3::new(x, 0.0, z);

    let rig = RigBuilder::new()
        .body(DemoBody(body.clone()))
        .front_left(Wheel::new(
            DemoWheel::new(body.clone(), axle(-half_track, -WHEEL_BASE)),
            DemoVisual { name: "front_left" },
        ))
        .front_right(Wheel::new(
            DemoWheel::new(body.clone(), axle(half_track, -WHEEL_BASE)),
            DemoVisual { name: "front_right" },
        ))
        .rear_left(Wheel::new(
            DemoWheel::new(body.clone(), axle(-half_track, 0.0)),
            DemoVisual { name: "rear_left" },
        ))
        .rear_right(Wheel::new(
            DemoWheel::new(body.clone(), axle(half_track, 0.0)),
            DemoVisual { name: "rear_right" },
        ))
        .engine_channel(DemoChannel::new("engine"))
        .braking_channel(DemoChannel::new("braking"))
        .idle_channel(DemoChannel::new("idle"))
        .build()
        .unwrap_or_else(|e| panic!("Failed to assemble demo rig: {e}"));

    let mut controller = VehicleController::new(rig, config)
        .unwrap_or_else(|e| panic!("Failed to start vehicle controller: {e}"));

    let dt = 1.0 / TICK_HZ as f32;
    for tick in 0..(RUN_SECONDS * TICK_HZ) {
        let t = tick as f32 * dt;
        controller.step(script_input(t), dt);

        if tick % TICK_HZ == 0 {
            let snapshot = body.lock().expect("body mutex poisoned");
            let (yaw, _, _) = snapshot.rotation.to_euler(EulerRot::YXZ);
            info!(
                t,
                speed = controller.state().current_speed(),
                x = snapshot.position.x,
                z = snapshot.position.z,
                yaw_deg = yaw.to_degrees(),
                "drive cycle"
            );
        }
    }
}
