use super::{advance_state, EffectKind};
use crate::config::EmotionAuraConfig;
use crate::frame::{FrameInputs, FxEvents};
use crate::params::{names, ChangeWatch};
use aura_core::{EffectState, Emotion, EmotionCrossfade, RetriggerMode};
use glam::Vec4;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmotionAuraOutput {
    pub state: EffectState,
    /// Emotion the aura is showing or heading to.
    pub emotion: Emotion,
    pub progress: f32,
    pub color: Vec4,
    pub light_intensity: f32,
    /// Particles per second.
    pub emission_rate: f32,
}

/// Ambient aura whose color and light follow the `Emotion` parameter.
pub struct EmotionAura {
    config: EmotionAuraConfig,
    enabled: bool,
    state: EffectState,
    crossfade: EmotionCrossfade,
    emotion_param: ChangeWatch<i32>,
    clock_sec: f64,
}

impl EmotionAura {
    pub fn new(config: EmotionAuraConfig) -> Self {
        let mode = if config.retrigger_from_blend {
            RetriggerMode::FromBlend
        } else {
            RetriggerMode::FromPrevious
        };
        let crossfade = EmotionCrossfade::new(
            Emotion::Neutral,
            config.animation_speed,
            config.emotion_palette(),
        )
        .with_retrigger_mode(mode);
        let neutral_value = config.emotion_values[0];
        Self {
            config,
            enabled: true,
            state: EffectState::Inactive,
            crossfade,
            emotion_param: ChangeWatch::new(neutral_value),
            clock_sec: 0.0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn emotion(&self) -> Emotion {
        self.crossfade.target()
    }

    pub fn crossfade(&self) -> &EmotionCrossfade {
        &self.crossfade
    }

    /// Head to `emotion` directly, bypassing the parameter.
    pub fn set_emotion(&mut self, emotion: Emotion) {
        self.crossfade.set_target(emotion);
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        self.config.animation_speed = speed.clamp(0.1, 5.0);
        self.crossfade.set_speed(self.config.animation_speed);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity.clamp(0.1, 3.0);
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        inputs: &FrameInputs<'_>,
        events: &mut FxEvents,
    ) -> EmotionAuraOutput {
        self.clock_sec += dt.as_secs_f64();
        advance_state(EffectKind::EmotionAura, &mut self.state, self.enabled, true, events);
        if !self.enabled {
            return EmotionAuraOutput {
                state: self.state,
                emotion: self.crossfade.target(),
                progress: self.crossfade.progress(),
                ..EmotionAuraOutput::default()
            };
        }

        if let Some(value) = self.emotion_param.poll(inputs.params.get_int(names::EMOTION)) {
            match self.config.emotion_for_value(value) {
                Some(emotion) => self.crossfade.set_target(emotion),
                None => log::debug!("[EmotionAura] no emotion mapped to {value}"),
            }
        }

        let look = self.crossfade.tick(dt);
        let sway = (self.clock_sec * 2.0 * self.config.animation_speed as f64).sin() as f32 * 0.2 + 0.8;
        let intensity = self.config.intensity;
        EmotionAuraOutput {
            state: self.state,
            emotion: self.crossfade.target(),
            progress: self.crossfade.progress(),
            color: look.color,
            light_intensity: look.light_intensity * sway * intensity,
            emission_rate: self.crossfade.target().emission_rate() * sway * intensity,
        }
    }
}
