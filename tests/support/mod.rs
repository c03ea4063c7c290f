// Recording fakes standing in for the host engine, shared by the
// integration tests. Each handle writes into `Arc<Mutex<...>>` state the
// test keeps a second reference to, so everything the controller pushed at
// the host can be asserted after the rig has been moved into it.

use std::sync::{Arc, Mutex, MutexGuard};

use bevy_math::{Quat, Vec3};

use kartdrive::{AudioChannel, BodyProxy, RigBuilder, VehicleRig, Wheel, WheelProxy, WheelVisual};

#[derive(Default)]
pub struct BodyState {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Clone)]
pub struct RecordingBody(Arc<Mutex<BodyState>>);

impl BodyProxy for RecordingBody {
    fn rotation(&self) -> Quat {
        lock(&self.0).rotation
    }

    fn move_position(&mut self, delta: Vec3) {
        lock(&self.0).position += delta;
    }

    fn move_rotation(&mut self, delta: Quat) {
        let mut body = lock(&self.0);
        body.rotation = (body.rotation * delta).normalize();
    }
}

#[derive(Default)]
pub struct WheelState {
    pub steer_angle: f32,
    pub brake_torque: f32,
    pub pose: (Vec3, Quat),
}

#[derive(Clone)]
pub struct RecordingWheel(Arc<Mutex<WheelState>>);

impl WheelProxy for RecordingWheel {
    fn set_steer_angle(&mut self, degrees: f32) {
        lock(&self.0).steer_angle = degrees;
    }

    fn set_brake_torque(&mut self, torque: f32) {
        lock(&self.0).brake_torque = torque;
    }

    fn world_pose(&self) -> (Vec3, Quat) {
        lock(&self.0).pose
    }
}

#[derive(Default)]
pub struct VisualState {
    pub pose: Option<(Vec3, Quat)>,
    pub sync_count: u32,
}

#[derive(Clone)]
pub struct RecordingVisual(Arc<Mutex<VisualState>>);

impl WheelVisual for RecordingVisual {
    fn set_world_pose(&mut self, position: Vec3, rotation: Quat) {
        let mut visual = lock(&self.0);
        visual.pose = Some((position, rotation));
        visual.sync_count += 1;
    }
}

#[derive(Default)]
pub struct ChannelState {
    pub clip: Option<String>,
    pub looping: bool,
    pub playing: bool,
}

#[derive(Clone)]
pub struct RecordingChannel(Arc<Mutex<ChannelState>>);

impl AudioChannel for RecordingChannel {
    fn set_clip(&mut self, clip: &str) {
        lock(&self.0).clip = Some(clip.to_string());
    }

    fn set_looping(&mut self, looping: bool) {
        lock(&self.0).looping = looping;
    }

    fn play(&mut self) {
        lock(&self.0).playing = true;
    }

    fn stop(&mut self) {
        lock(&self.0).playing = false;
    }

    fn is_playing(&self) -> bool {
        lock(&self.0).playing
    }
}

fn lock<T>(state: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    state.lock().expect("test handle mutex poisoned")
}

/// Test-side references into every handle the rig was assembled from.
pub struct HostSide {
    pub body: Arc<Mutex<BodyState>>,
    pub front_left: Arc<Mutex<WheelState>>,
    pub front_right: Arc<Mutex<WheelState>>,
    pub rear_left: Arc<Mutex<WheelState>>,
    pub rear_right: Arc<Mutex<WheelState>>,
    pub front_left_visual: Arc<Mutex<VisualState>>,
    pub front_right_visual: Arc<Mutex<VisualState>>,
    pub rear_left_visual: Arc<Mutex<VisualState>>,
    pub rear_right_visual: Arc<Mutex<VisualState>>,
    pub engine: Arc<Mutex<ChannelState>>,
    pub braking: Arc<Mutex<ChannelState>>,
    pub idle: Arc<Mutex<ChannelState>>,
}

impl HostSide {
    pub fn engine_playing(&self) -> bool {
        lock(&self.engine).playing
    }

    pub fn braking_playing(&self) -> bool {
        lock(&self.braking).playing
    }

    pub fn idle_playing(&self) -> bool {
        lock(&self.idle).playing
    }
}

/// Assemble a fully bound recording rig plus the host-side references.
pub fn recording_rig() -> (VehicleRig, HostSide) {
    let body = Arc::new(Mutex::new(BodyState::default()));
    let wheel = || Arc::new(Mutex::new(WheelState::default()));
    let visual = || Arc::new(Mutex::new(VisualState::default()));
    let channel = || Arc::new(Mutex::new(ChannelState::default()));

    let host = HostSide {
        body: body.clone(),
        front_left: wheel(),
        front_right: wheel(),
        rear_left: wheel(),
        rear_right: wheel(),
        front_left_visual: visual(),
        front_right_visual: visual(),
        rear_left_visual: visual(),
        rear_right_visual: visual(),
        engine: channel(),
        braking: channel(),
        idle: channel(),
    };

    let rig = RigBuilder::new()
        .body(RecordingBody(body))
        .front_left(Wheel::new(
            RecordingWheel(host.front_left.clone()),
            RecordingVisual(host.front_left_visual.clone()),
        ))
        .front_right(Wheel::new(
            RecordingWheel(host.front_right.clone()),
            RecordingVisual(host.front_right_visual.clone()),
        ))
        .rear_left(Wheel::new(
            RecordingWheel(host.rear_left.clone()),
            RecordingVisual(host.rear_left_visual.clone()),
        ))
        .rear_right(Wheel::new(
            RecordingWheel(host.rear_right.clone()),
            RecordingVisual(host.rear_right_visual.clone()),
        ))
        .engine_channel(RecordingChannel(host.engine.clone()))
        .braking_channel(RecordingChannel(host.braking.clone()))
        .idle_channel(RecordingChannel(host.idle.clone()))
        .build()
        .expect("recording rig is fully bound");

    (rig, host)
}
