//! Handle traits binding the controller to the hosting engine.
//!
//! The host keeps ownership of the actual rigid body, wheel colliders,
//! meshes, and audio sources; the controller talks to them through these
//! narrow traits so it can be driven headless against fakes.

use bevy_math::{Quat, Vec3};
use thiserror::Error;

use crate::audio::{AudioChannel, SoundBank};

/// Rigid-body handle accepting incremental position/rotation commands.
pub trait BodyProxy: Send {
    /// Current world rotation of the body.
    fn rotation(&self) -> Quat;
    /// Apply a world-space position delta.
    fn move_position(&mut self, delta: Vec3);
    /// Compose a rotation delta onto the current rotation.
    fn move_rotation(&mut self, delta: Quat);
}

/// One wheel's physics simulation: steer/brake inputs in, world pose out.
pub trait WheelProxy: Send {
    fn set_steer_angle(&mut self, degrees: f32);
    fn set_brake_torque(&mut self, torque: f32);
    fn world_pose(&self) -> (Vec3, Quat);
}

/// Visual transform target a wheel mesh is parented to.
pub trait WheelVisual: Send {
    fn set_world_pose(&mut self, position: Vec3, rotation: Quat);
}

/// A wheel collider paired with the mesh transform that follows it.
pub struct Wheel {
    pub collider: Box<dyn WheelProxy>,
    pub visual: Box<dyn WheelVisual>,
}

impl Wheel {
    pub fn new(collider: impl WheelProxy + 'static, visual: impl WheelVisual + 'static) -> Self {
        Self {
            collider: Box::new(collider),
            visual: Box::new(visual),
        }
    }

    /// Copy the collider's world pose verbatim onto the mesh transform.
    pub(crate) fn sync_visual(&mut self) {
        let (position, rotation) = self.collider.world_pose();
        self.visual.set_world_pose(position, rotation);
    }
}

/// The four wheel corners. Fronts steer, rears brake.
pub struct WheelSet {
    pub front_left: Wheel,
    pub front_right: Wheel,
    pub rear_left: Wheel,
    pub rear_right: Wheel,
}

impl WheelSet {
    pub fn front_pair_mut(&mut self) -> [&mut Wheel; 2] {
        [&mut self.front_left, &mut self.front_right]
    }

    pub fn rear_pair_mut(&mut self) -> [&mut Wheel; 2] {
        [&mut self.rear_left, &mut self.rear_right]
    }

    pub fn all_mut(&mut self) -> [&mut Wheel; 4] {
        [
            &mut self.front_left,
            &mut self.front_right,
            &mut self.rear_left,
            &mut self.rear_right,
        ]
    }
}

/// Everything the controller needs from the host, fully bound.
pub struct VehicleRig {
    pub body: Box<dyn BodyProxy>,
    pub wheels: WheelSet,
    pub sounds: SoundBank,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RigError {
    #[error("required handle `{0}` was not bound before build")]
    MissingBinding(&'static str),
}

/// Collects handle bindings and checks completeness once, at build time.
///
/// An unbound handle is a setup mistake; reporting it here keeps the per-tick
/// path free of such checks.
#[derive(Default)]
pub struct RigBuilder {
    body: Option<Box<dyn BodyProxy>>,
    front_left: Option<Wheel>,
    front_right: Option<Wheel>,
    rear_left: Option<Wheel>,
    rear_right: Option<Wheel>,
    engine_channel: Option<Box<dyn AudioChannel>>,
    braking_channel: Option<Box<dyn AudioChannel>>,
    idle_channel: Option<Box<dyn AudioChannel>>,
}

impl RigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: impl BodyProxy + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn front_left(mut self, wheel: Wheel) -> Self {
        self.front_left = Some(wheel);
        self
    }

    pub fn front_right(mut self, wheel: Wheel) -> Self {
        self.front_right = Some(wheel);
        self
    }

    pub fn rear_left(mut self, wheel: Wheel) -> Self {
        self.rear_left = Some(wheel);
        self
    }

    pub fn rear_right(mut self, wheel: Wheel) -> Self {
        self.rear_right = Some(wheel);
        self
    }

    pub fn engine_channel(mut self, channel: impl AudioChannel + 'static) -> Self {
        self.engine_channel = Some(Box::new(channel));
        self
    }

    pub fn braking_channel(mut self, channel: impl AudioChannel + 'static) -> Self {
        self.braking_channel = Some(Box::new(channel));
        self
    }

    pub fn idle_channel(mut self, channel: impl AudioChannel + 'static) -> Self {
        self.idle_channel = Some(Box::new(channel));
        self
    }

    pub fn build(self) -> Result<VehicleRig, RigError> {
        fn take<T>(slot: Option<T>, name: &'static str) -> Result<T, RigError> {
            slot.ok_or(RigError::MissingBinding(name))
        }

        Ok(VehicleRig {
            body: take(self.body, "body")?,
            wheels: WheelSet {
                front_left: take(self.front_left, "front_left wheel")?,
                front_right: take(self.front_right, "front_right wheel")?,
                rear_left: take(self.rear_left, "rear_left wheel")?,
                rear_right: take(self.rear_right, "rear_right wheel")?,
            },
            sounds: SoundBank::new(
                take(self.engine_channel, "engine channel")?,
                take(self.braking_channel, "braking channel")?,
                take(self.idle_channel, "idle channel")?,
            ),
        })
    }
}
