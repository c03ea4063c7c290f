//! Audio channel state switching for the three vehicle sounds.

use tracing::trace;

use crate::config::AudioClips;
use crate::motion::DrivePhase;

/// One independently playable sound source bound to a clip, owned by the
/// host's audio system.
pub trait AudioChannel: Send {
    fn set_clip(&mut self, clip: &str);
    fn set_looping(&mut self, looping: bool);
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// The engine, braking, and idle channels plus the switching policy between
/// them.
///
/// Transitions are edge-triggered: a channel already in the desired state is
/// left alone, so repeated ticks in one phase issue no host calls.
pub struct SoundBank {
    engine: Box<dyn AudioChannel>,
    braking: Box<dyn AudioChannel>,
    idle: Box<dyn AudioChannel>,
}

impl SoundBank {
    pub fn new(
        engine: Box<dyn AudioChannel>,
        braking: Box<dyn AudioChannel>,
        idle: Box<dyn AudioChannel>,
    ) -> Self {
        Self {
            engine,
            braking,
            idle,
        }
    }

    /// Bind clips and loop flags, then start the spawn-state channels.
    ///
    /// Engine and idle loop for the vehicle's lifetime; the braking channel
    /// is a one-shot retriggered on each braking phase entry.
    pub(crate) fn start(&mut self, clips: &AudioClips) {
        self.engine.set_clip(&clips.engine);
        self.braking.set_clip(&clips.braking);
        self.idle.set_clip(&clips.idle);

        self.engine.set_looping(true);
        self.braking.set_looping(false);
        self.idle.set_looping(true);

        self.engine.play();
        self.idle.play();
    }

    /// Drive the channels to the desired end-state for this tick's phase.
    ///
    /// The brake channel is cut when leaving the braking phase so it can
    /// never sound over the engine or idle loops.
    pub(crate) fn apply_phase(&mut self, phase: DrivePhase) {
        trace!(?phase, "audio phase");
        match phase {
            DrivePhase::Accelerating => {
                play_if_stopped(self.engine.as_mut());
                stop_if_playing(self.braking.as_mut());
                stop_if_playing(self.idle.as_mut());
            }
            DrivePhase::Braking => {
                play_if_stopped(self.braking.as_mut());
                stop_if_playing(self.engine.as_mut());
                stop_if_playing(self.idle.as_mut());
            }
            DrivePhase::Coasting => {
                play_if_stopped(self.idle.as_mut());
                stop_if_playing(self.engine.as_mut());
                stop_if_playing(self.braking.as_mut());
            }
        }
    }
}

fn play_if_stopped(channel: &mut dyn AudioChannel) {
    if !channel.is_playing() {
        channel.play();
    }
}

fn stop_if_playing(channel: &mut dyn AudioChannel) {
    if channel.is_playing() {
        channel.stop();
    }
}
