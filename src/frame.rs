//! Per-tick inputs and outputs exchanged with the host.

use crate::effects::{
    EffectKind, EmotionAuraOutput, EyeFocusOutput, HeartbeatOutput, IdleBloomOutput,
    LovePulseOutput,
};
use crate::params::{NoParameters, ParameterSource};
use glam::{Vec3, Vec4};
use smallvec::SmallVec;

/// Where the avatar is looking and what the host's gaze ray hit, if anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeSample {
    pub origin: Vec3,
    pub forward: Vec3,
    /// Hit point of the gaze ray against the scene, when it hit within range.
    pub focus: Option<Vec3>,
}

/// Pose of the local viewer (camera) used to judge who they are looking at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerPose {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Everything the effects may read during one tick. Every sample is
/// optional; an effect whose inputs are missing simply produces nothing.
#[derive(Clone, Copy)]
pub struct FrameInputs<'a> {
    pub params: &'a dyn ParameterSource,
    /// Avatar root position.
    pub position: Option<Vec3>,
    /// Ground point under the avatar, when the host has one.
    pub ground: Option<Vec3>,
    pub chest: Option<Vec3>,
    pub hands: [Option<Vec3>; 2],
    pub gaze: Option<GazeSample>,
    pub viewer: Option<ViewerPose>,
    /// Positions of other players that may receive love pulses.
    pub targets: &'a [Vec3],
}

static NO_PARAMETERS: NoParameters = NoParameters;

impl<'a> FrameInputs<'a> {
    pub fn new(params: &'a dyn ParameterSource) -> Self {
        Self {
            params,
            position: None,
            ground: None,
            chest: None,
            hands: [None, None],
            gaze: None,
            viewer: None,
            targets: &[],
        }
    }

    /// Inputs with no samples and no parameters.
    pub fn empty() -> FrameInputs<'static> {
        FrameInputs::new(&NO_PARAMETERS)
    }
}

impl std::fmt::Debug for FrameInputs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameInputs")
            .field("position", &self.position)
            .field("ground", &self.ground)
            .field("chest", &self.chest)
            .field("hands", &self.hands)
            .field("gaze", &self.gaze)
            .field("viewer", &self.viewer)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Heartbeat,
    FocusChime,
    LoveActivation,
    LoveHeartbeat,
    BloomChime,
    AmbientStart,
    AmbientStop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundCue {
    pub kind: SoundKind,
    pub pitch: f32,
    pub volume: f32,
}

/// Discrete things that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum FxEvent {
    Activated(EffectKind),
    Deactivated(EffectKind),
    RippleFired {
        slot: usize,
        origin: Vec3,
    },
    HeartBurst {
        position: Vec3,
        count: u32,
        color: Vec4,
        size: f32,
        lifetime_sec: f32,
        velocity: Vec3,
    },
    BloomStarted {
        center: Vec3,
        flowers: usize,
    },
    BloomEnded,
    Sound(SoundCue),
}

pub type FxEvents = SmallVec<[FxEvent; 8]>;

/// Everything the presentation layer needs after one system tick.
#[derive(Clone, Debug, Default)]
pub struct FrameOutputs {
    pub enabled: bool,
    pub emotion_aura: EmotionAuraOutput,
    pub heartbeat: HeartbeatOutput,
    pub eye_focus: EyeFocusOutput,
    pub love_pulse: LovePulseOutput,
    pub idle_bloom: IdleBloomOutput,
    pub events: FxEvents,
}

impl FrameOutputs {
    pub fn sounds(&self) -> impl Iterator<Item = &SoundCue> {
        self.events.iter().filter_map(|e| match e {
            FxEvent::Sound(cue) => Some(cue),
            _ => None,
        })
    }
}
