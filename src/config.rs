//! Effect configuration.
//!
//! Every struct defaults to the tuned values the effects were designed
//! around; a TOML file only needs the fields it wants to change.
//! [`AuraConfig::validated`] pulls values back into their supported ranges.

use crate::error::ConfigError;
use aura_core::constants::{DEFAULT_FLOWER_COLORS, DEFAULT_MOTION_EPSILON, FLOWER_PETALS};
use aura_core::{Emotion, EmotionPalette};
use glam::Vec4;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuraConfig {
    pub system: SystemConfig,
    pub emotion_aura: EmotionAuraConfig,
    pub heartbeat: HeartbeatConfig,
    pub eye_focus: EyeFocusConfig,
    pub love_pulse: LovePulseConfig,
    pub idle_bloom: IdleBloomConfig,
}

/// Master switch plus the initial state of each effect toggle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub enabled: bool,
    pub emotion_aura: bool,
    pub heartbeat_glow: bool,
    pub eye_focus_ray: bool,
    pub love_pulse: bool,
    pub idle_bloom: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            emotion_aura: true,
            heartbeat_glow: true,
            eye_focus_ray: true,
            love_pulse: true,
            idle_bloom: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionAuraConfig {
    pub animation_speed: f32,
    pub intensity: f32,
    /// RGBA per emotion in Neutral, Happy, Love, Shy, Angry, Sad, Excited, Calm order.
    pub palette: [[f32; 4]; 8],
    /// Parameter value that selects each emotion, same order as `palette`.
    pub emotion_values: [i32; 8],
    /// Restart a retriggered crossfade from the blended look instead of the
    /// previous emotion's palette color.
    pub retrigger_from_blend: bool,
}

impl Default for EmotionAuraConfig {
    fn default() -> Self {
        let palette = EmotionPalette::default();
        Self {
            animation_speed: 1.0,
            intensity: 1.0,
            palette: palette.colors.map(|c| c.to_array()),
            emotion_values: [0, 1, 2, 3, 4, 5, 6, 7],
            retrigger_from_blend: false,
        }
    }
}

impl EmotionAuraConfig {
    pub fn emotion_palette(&self) -> EmotionPalette {
        EmotionPalette {
            colors: self.palette.map(Vec4::from_array),
        }
    }

    pub fn emotion_for_value(&self, value: i32) -> Option<Emotion> {
        self.emotion_values
            .iter()
            .position(|&v| v == value)
            .map(|i| Emotion::ALL[i])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    pub speed: f32,
    pub intensity: f32,
    pub color: [f32; 4],
    pub max_ripple_radius: f32,
    pub ripple_count: usize,
    /// How close a hand must be to the chest to start the heartbeat.
    pub trigger_radius: f32,
    pub base_light_intensity: f32,
    pub base_light_color: [f32; 4],
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            speed: 1.2,
            intensity: 0.8,
            color: [1.0, 0.3, 0.3, 0.7],
            max_ripple_radius: 5.0,
            ripple_count: 3,
            trigger_radius: 0.3,
            base_light_intensity: 0.5,
            base_light_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeFocusConfig {
    pub ray_length: f32,
    pub ray_thickness: f32,
    pub color: [f32; 4],
    pub intensity: f32,
    /// Minimum dot product between the gaze and the direction to the hit.
    pub gaze_threshold: f32,
    pub focus_hold_sec: f32,
}

impl Default for EyeFocusConfig {
    fn default() -> Self {
        Self {
            ray_length: 5.0,
            ray_thickness: 0.02,
            color: [0.5, 0.8, 1.0, 0.6],
            intensity: 1.0,
            gaze_threshold: 0.8,
            focus_hold_sec: 0.5,
        }
    }
}

impl EyeFocusConfig {
    pub fn gaze_angle_rad(&self) -> f32 {
        self.gaze_threshold.clamp(-1.0, 1.0).acos()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LovePulseConfig {
    pub detection_distance: f32,
    pub gaze_angle_deg: f32,
    pub accumulation_sec: f32,
    pub particle_count: u32,
    pub color: [f32; 4],
    pub intensity: f32,
    pub pulse_speed: f32,
    pub base_light_intensity: f32,
}

impl Default for LovePulseConfig {
    fn default() -> Self {
        Self {
            detection_distance: 3.0,
            gaze_angle_deg: 30.0,
            accumulation_sec: 3.0,
            particle_count: 15,
            color: [1.0, 0.4, 0.7, 0.8],
            intensity: 1.0,
            pulse_speed: 1.2, // one cycle per beat at 72 BPM
            base_light_intensity: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleBloomConfig {
    pub idle_sec: f32,
    pub growth_speed: f32,
    pub max_size: f32,
    pub flower_count: usize,
    pub bloom_radius: f32,
    pub petals: usize,
    pub flower_colors: Vec<[f32; 4]>,
    pub motion_sensitivity: f32,
    pub base_light_intensity: f32,
}

impl Default for IdleBloomConfig {
    fn default() -> Self {
        Self {
            idle_sec: 10.0,
            growth_speed: 0.5,
            max_size: 1.5,
            flower_count: 8,
            bloom_radius: 1.2,
            petals: FLOWER_PETALS,
            flower_colors: DEFAULT_FLOWER_COLORS.to_vec(),
            motion_sensitivity: DEFAULT_MOTION_EPSILON,
            base_light_intensity: 0.2,
        }
    }
}

impl AuraConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AuraConfig = toml::from_str(text)?;
        config.validated()
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject non-finite numbers and clamp everything else into range.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let e = &mut self.emotion_aura;
        clamp_f32("emotion_aura.animation_speed", &mut e.animation_speed, 0.1, 5.0)?;
        clamp_f32("emotion_aura.intensity", &mut e.intensity, 0.1, 3.0)?;
        for color in &mut e.palette {
            clamp_color("emotion_aura.palette", color)?;
        }
        for (i, value) in e.emotion_values.iter().enumerate() {
            if e.emotion_values[..i].contains(value) {
                return Err(ConfigError::DuplicateEmotionValue { value: *value });
            }
        }

        let h = &mut self.heartbeat;
        clamp_f32("heartbeat.speed", &mut h.speed, 0.5, 3.0)?;
        clamp_f32("heartbeat.intensity", &mut h.intensity, 0.1, 2.0)?;
        clamp_f32("heartbeat.max_ripple_radius", &mut h.max_ripple_radius, 1.0, 10.0)?;
        clamp_usize("heartbeat.ripple_count", &mut h.ripple_count, 1, 5);
        clamp_f32("heartbeat.trigger_radius", &mut h.trigger_radius, 0.1, 1.0)?;
        clamp_f32("heartbeat.base_light_intensity", &mut h.base_light_intensity, 0.0, 8.0)?;
        clamp_color("heartbeat.color", &mut h.color)?;
        clamp_color("heartbeat.base_light_color", &mut h.base_light_color)?;

        let f = &mut self.eye_focus;
        clamp_f32("eye_focus.ray_length", &mut f.ray_length, 1.0, 10.0)?;
        clamp_f32("eye_focus.ray_thickness", &mut f.ray_thickness, 0.01, 0.1)?;
        clamp_f32("eye_focus.intensity", &mut f.intensity, 0.1, 2.0)?;
        clamp_f32("eye_focus.gaze_threshold", &mut f.gaze_threshold, 0.1, 1.0)?;
        clamp_f32("eye_focus.focus_hold_sec", &mut f.focus_hold_sec, 0.1, 2.0)?;
        clamp_color("eye_focus.color", &mut f.color)?;

        let l = &mut self.love_pulse;
        clamp_f32("love_pulse.detection_distance", &mut l.detection_distance, 1.0, 10.0)?;
        clamp_f32("love_pulse.gaze_angle_deg", &mut l.gaze_angle_deg, 0.0, 90.0)?;
        clamp_f32("love_pulse.accumulation_sec", &mut l.accumulation_sec, 1.0, 10.0)?;
        clamp_f32("love_pulse.intensity", &mut l.intensity, 0.1, 3.0)?;
        clamp_f32("love_pulse.pulse_speed", &mut l.pulse_speed, 0.5, 3.0)?;
        clamp_f32("love_pulse.base_light_intensity", &mut l.base_light_intensity, 0.0, 8.0)?;
        let mut count = l.particle_count as usize;
        clamp_usize("love_pulse.particle_count", &mut count, 5, 50);
        l.particle_count = count as u32;
        clamp_color("love_pulse.color", &mut l.color)?;

        let b = &mut self.idle_bloom;
        clamp_f32("idle_bloom.idle_sec", &mut b.idle_sec, 5.0, 30.0)?;
        clamp_f32("idle_bloom.growth_speed", &mut b.growth_speed, 0.1, 2.0)?;
        clamp_f32("idle_bloom.max_size", &mut b.max_size, 0.5, 3.0)?;
        clamp_usize("idle_bloom.flower_count", &mut b.flower_count, 3, 15);
        clamp_f32("idle_bloom.bloom_radius", &mut b.bloom_radius, 0.5, 3.0)?;
        clamp_usize("idle_bloom.petals", &mut b.petals, 3, 12);
        clamp_f32("idle_bloom.motion_sensitivity", &mut b.motion_sensitivity, 0.01, 0.1)?;
        clamp_f32("idle_bloom.base_light_intensity", &mut b.base_light_intensity, 0.0, 8.0)?;
        if b.flower_colors.is_empty() {
            return Err(ConfigError::EmptyPalette {
                field: "idle_bloom.flower_colors",
            });
        }
        for color in &mut b.flower_colors {
            clamp_color("idle_bloom.flower_colors", color)?;
        }

        Ok(self)
    }
}

fn clamp_f32(field: &'static str, value: &mut f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    let clamped = value.clamp(min, max);
    if clamped != *value {
        log::warn!("{field}={value} out of range [{min}, {max}], using {clamped}");
        *value = clamped;
    }
    Ok(())
}

fn clamp_usize(field: &'static str, value: &mut usize, min: usize, max: usize) {
    let clamped = (*value).clamp(min, max);
    if clamped != *value {
        log::warn!("{field}={value} out of range [{min}, {max}], using {clamped}");
        *value = clamped;
    }
}

fn clamp_color(field: &'static str, color: &mut [f32; 4]) -> Result<(), ConfigError> {
    for channel in color.iter_mut() {
        clamp_f32(field, channel, 0.0, 1.0)?;
    }
    Ok(())
}
