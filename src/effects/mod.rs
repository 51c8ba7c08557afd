//! The five reactive effects.
//!
//! Each effect owns its state machine and is advanced by the system once per
//! tick with the shared [`FrameInputs`](crate::FrameInputs).

mod emotion_aura;
mod eye_focus_ray;
mod heartbeat_glow;
mod idle_bloom;
mod love_pulse;

pub use emotion_aura::*;
pub use eye_focus_ray::*;
pub use heartbeat_glow::*;
pub use idle_bloom::*;
pub use love_pulse::*;

use crate::frame::{FxEvent, FxEvents};
use crate::params::names;
use aura_core::EffectState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    EmotionAura,
    HeartbeatGlow,
    EyeFocusRay,
    LovePulse,
    IdleBloom,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::EmotionAura,
        EffectKind::HeartbeatGlow,
        EffectKind::EyeFocusRay,
        EffectKind::LovePulse,
        EffectKind::IdleBloom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::EmotionAura => "EmotionAura",
            EffectKind::HeartbeatGlow => "HeartbeatGlow",
            EffectKind::EyeFocusRay => "EyeFocusRay",
            EffectKind::LovePulse => "LovePulse",
            EffectKind::IdleBloom => "IdleBloom",
        }
    }

    /// Bool parameter that toggles this effect on and off.
    pub fn toggle_parameter(self) -> &'static str {
        match self {
            EffectKind::EmotionAura => names::EMOTION_AURA,
            EffectKind::HeartbeatGlow => names::HEARTBEAT_GLOW,
            EffectKind::EyeFocusRay => names::EYE_FOCUS_RAY,
            EffectKind::LovePulse => names::LOVE_PULSE,
            EffectKind::IdleBloom => names::IDLE_BLOOM,
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Step `state` and report activation/deactivation edges.
pub(crate) fn advance_state(
    kind: EffectKind,
    state: &mut EffectState,
    engaged: bool,
    release_done: bool,
    events: &mut FxEvents,
) {
    let prev = *state;
    *state = prev.step(engaged, release_done);
    if prev == *state {
        return;
    }
    log::debug!("[{kind}] {prev:?} -> {:?}", *state);
    match *state {
        EffectState::Triggered => {
            log::info!("[{kind}] activated");
            events.push(FxEvent::Activated(kind));
        }
        EffectState::Releasing if prev.is_engaged() => {
            log::info!("[{kind}] deactivated");
            events.push(FxEvent::Deactivated(kind));
        }
        _ => {}
    }
}
