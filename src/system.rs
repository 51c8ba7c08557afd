//! Top-level orchestration: parameter toggles plus the five effects.

use crate::config::AuraConfig;
use crate::effects::{EffectKind, EmotionAura, EyeFocusRay, HeartbeatGlow, IdleBloom, LovePulse};
use crate::error::ConfigError;
use crate::frame::{FrameInputs, FrameOutputs, FxEvents};
use crate::params::{names, ChangeWatch, ParamKind, ParameterSpec};
use std::time::Duration;

pub struct AuraSystem {
    config: AuraConfig,
    master: bool,
    flags: [bool; 5],
    master_param: ChangeWatch<bool>,
    toggle_params: [ChangeWatch<bool>; 5],
    emotion_aura: EmotionAura,
    heartbeat: HeartbeatGlow,
    eye_focus: EyeFocusRay,
    love_pulse: LovePulse,
    idle_bloom: IdleBloom,
}

impl AuraSystem {
    pub fn new(config: AuraConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let s = &config.system;
        let flags = [
            s.emotion_aura,
            s.heartbeat_glow,
            s.eye_focus_ray,
            s.love_pulse,
            s.idle_bloom,
        ];
        let mut system = Self {
            master: s.enabled,
            flags,
            master_param: ChangeWatch::new(s.enabled),
            toggle_params: flags.map(ChangeWatch::new),
            emotion_aura: EmotionAura::new(config.emotion_aura.clone()),
            heartbeat: HeartbeatGlow::new(config.heartbeat.clone()),
            eye_focus: EyeFocusRay::new(config.eye_focus.clone()),
            love_pulse: LovePulse::new(config.love_pulse.clone()),
            idle_bloom: IdleBloom::new(config.idle_bloom.clone()),
            config,
        };
        system.apply_enabled();
        log::info!(
            "aura system ready (enabled={}, effects={:?})",
            system.master,
            system.enabled_effects().collect::<Vec<_>>()
        );
        Ok(system)
    }

    pub fn config(&self) -> &AuraConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.master
    }

    /// Master switch. Turning it back on restores each effect's own flag.
    pub fn set_master(&mut self, enabled: bool) {
        if self.master != enabled {
            log::info!("aura system {}", if enabled { "enabled" } else { "disabled" });
        }
        self.master = enabled;
        self.apply_enabled();
    }

    pub fn set_effect_enabled(&mut self, kind: EffectKind, enabled: bool) {
        self.flags[index(kind)] = enabled;
        self.apply_enabled();
    }

    /// Whether `kind` is running, taking the master switch into account.
    pub fn is_effect_enabled(&self, kind: EffectKind) -> bool {
        self.master && self.flags[index(kind)]
    }

    pub fn enabled_effects(&self) -> impl Iterator<Item = EffectKind> + '_ {
        EffectKind::ALL
            .into_iter()
            .filter(move |&kind| self.is_effect_enabled(kind))
    }

    pub fn emotion_aura(&self) -> &EmotionAura {
        &self.emotion_aura
    }

    pub fn emotion_aura_mut(&mut self) -> &mut EmotionAura {
        &mut self.emotion_aura
    }

    pub fn heartbeat(&self) -> &HeartbeatGlow {
        &self.heartbeat
    }

    pub fn heartbeat_mut(&mut self) -> &mut HeartbeatGlow {
        &mut self.heartbeat
    }

    pub fn eye_focus(&self) -> &EyeFocusRay {
        &self.eye_focus
    }

    pub fn eye_focus_mut(&mut self) -> &mut EyeFocusRay {
        &mut self.eye_focus
    }

    pub fn love_pulse(&self) -> &LovePulse {
        &self.love_pulse
    }

    pub fn love_pulse_mut(&mut self) -> &mut LovePulse {
        &mut self.love_pulse
    }

    pub fn idle_bloom(&self) -> &IdleBloom {
        &self.idle_bloom
    }

    pub fn idle_bloom_mut(&mut self) -> &mut IdleBloom {
        &mut self.idle_bloom
    }

    pub fn tick(&mut self, dt: Duration, inputs: &FrameInputs<'_>) -> FrameOutputs {
        self.poll_toggles(inputs);

        let mut events = FxEvents::new();
        let emotion_aura = self.emotion_aura.tick(dt, inputs, &mut events);
        let heartbeat = self.heartbeat.tick(dt, inputs, &mut events);
        let eye_focus = self.eye_focus.tick(dt, inputs, &mut events);
        let love_pulse = self.love_pulse.tick(dt, inputs, &mut events);
        let idle_bloom = self.idle_bloom.tick(dt, inputs, &mut events);

        FrameOutputs {
            enabled: self.master,
            emotion_aura,
            heartbeat,
            eye_focus,
            love_pulse,
            idle_bloom,
            events,
        }
    }

    /// Parameters the host should provide, in the order the effects read them.
    pub fn declared_parameters(&self) -> Vec<ParameterSpec> {
        let mut specs = vec![toggle(names::SYSTEM_ENABLED, self.config.system.enabled)];
        for kind in EffectKind::ALL {
            if !self.flags[index(kind)] {
                continue;
            }
            specs.push(toggle(kind.toggle_parameter(), true));
            match kind {
                EffectKind::EmotionAura => specs.push(ParameterSpec {
                    name: names::EMOTION,
                    kind: ParamKind::Int,
                    default: self.config.emotion_aura.emotion_values[0] as f32,
                    saved: false,
                }),
                EffectKind::HeartbeatGlow => specs.push(input(names::HEARTBEAT_TRIGGER)),
                EffectKind::EyeFocusRay => specs.push(input(names::EYE_BEAM_FORCE)),
                EffectKind::LovePulse => specs.push(input(names::LOVE_PULSE_TRIGGER)),
                EffectKind::IdleBloom => {
                    specs.push(input(names::IDLE_BLOOM_TRIGGER));
                    specs.push(input(names::IS_MOVING));
                }
            }
        }
        specs
    }

    fn poll_toggles(&mut self, inputs: &FrameInputs<'_>) {
        let params = inputs.params;
        let mut changed = false;
        if let Some(enabled) = self.master_param.poll(params.get_bool(names::SYSTEM_ENABLED)) {
            log::info!("aura system {}", if enabled { "enabled" } else { "disabled" });
            self.master = enabled;
            changed = true;
        }
        for kind in EffectKind::ALL {
            let i = index(kind);
            if let Some(enabled) = self.toggle_params[i].poll(params.get_bool(kind.toggle_parameter())) {
                log::debug!("[{kind}] toggle -> {enabled}");
                self.flags[i] = enabled;
                changed = true;
            }
        }
        if changed {
            self.apply_enabled();
        }
    }

    fn apply_enabled(&mut self) {
        let on = |kind| self.master && self.flags[index(kind)];
        let emotion = on(EffectKind::EmotionAura);
        let heartbeat = on(EffectKind::HeartbeatGlow);
        let eye = on(EffectKind::EyeFocusRay);
        let love = on(EffectKind::LovePulse);
        let bloom = on(EffectKind::IdleBloom);
        self.emotion_aura.set_enabled(emotion);
        self.heartbeat.set_enabled(heartbeat);
        self.eye_focus.set_enabled(eye);
        self.love_pulse.set_enabled(love);
        self.idle_bloom.set_enabled(bloom);
    }
}

fn index(kind: EffectKind) -> usize {
    kind as usize
}

fn toggle(name: &'static str, on: bool) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParamKind::Bool,
        default: if on { 1.0 } else { 0.0 },
        saved: true,
    }
}

fn input(name: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParamKind::Bool,
        default: 0.0,
        saved: false,
    }
}
