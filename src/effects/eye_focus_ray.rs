use super::{advance_state, EffectKind};
use crate::config::EyeFocusConfig;
use crate::frame::{FrameInputs, FxEvent, FxEvents, GazeSample, SoundCue, SoundKind};
use crate::params::{names, BoolEdge, Edge};
use aura_core::{EffectState, Observation, Trigger, TriggerCondition};
use glam::{Vec3, Vec4};
use std::time::Duration;

/// Line segment drawn from the eyes to the focus point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Beam {
    pub start: Vec3,
    pub end: Vec3,
    pub thickness: f32,
    pub color: Vec4,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EyeFocusOutput {
    pub state: EffectState,
    pub beam: Option<Beam>,
    pub light_intensity: f32,
    /// The focus light sits at the beam's far end.
    pub light_position: Option<Vec3>,
}

/// Beam that appears after the avatar holds its gaze on something.
pub struct EyeFocusRay {
    config: EyeFocusConfig,
    enabled: bool,
    state: EffectState,
    gaze: Trigger,
    force: BoolEdge,
    forced: bool,
    clock_sec: f64,
}

impl EyeFocusRay {
    pub fn new(config: EyeFocusConfig) -> Self {
        let gaze = Trigger::new(gaze_condition(&config));
        Self {
            config,
            enabled: true,
            state: EffectState::Inactive,
            gaze,
            force: BoolEdge::new(false),
            forced: false,
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

    /// Seconds the current gaze has been held.
    pub fn gaze_dwell_sec(&self) -> f32 {
        self.gaze.dwell_sec()
    }

    pub fn set_ray_length(&mut self, length: f32) {
        self.config.ray_length = length.clamp(1.0, 10.0);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity.clamp(0.1, 2.0);
    }

    pub fn set_gaze_threshold(&mut self, threshold: f32) {
        self.config.gaze_threshold = threshold.clamp(0.1, 1.0);
        self.gaze.set_condition(gaze_condition(&self.config));
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        inputs: &FrameInputs<'_>,
        events: &mut FxEvents,
    ) -> EyeFocusOutput {
        self.clock_sec += dt.as_secs_f64();

        match self.force.poll(inputs.params.get_bool(names::EYE_BEAM_FORCE)) {
            Edge::Rising => self.forced = true,
            Edge::Falling => {
                self.forced = false;
                self.gaze.reset();
            }
            Edge::None => {}
        }
        if !self.enabled {
            self.forced = false;
        }

        let focus = inputs
            .gaze
            .filter(|_| self.enabled)
            .and_then(|g| self.focus_in_range(&g));
        let observation = inputs.gaze.zip(focus).map(|(g, hit)| Observation::Alignment {
            forward: g.forward,
            to_target: hit - g.origin,
        });
        let holding = self.gaze.evaluate(dt, observation).active;
        let engaged = self.enabled && (holding || self.forced);

        advance_state(EffectKind::EyeFocusRay, &mut self.state, engaged, true, events);
        if self.state == EffectState::Triggered {
            events.push(FxEvent::Sound(SoundCue {
                kind: SoundKind::FocusChime,
                pitch: 1.0,
                volume: 1.0,
            }));
        }

        let mut out = EyeFocusOutput {
            state: self.state,
            ..EyeFocusOutput::default()
        };
        let Some(gaze) = inputs.gaze.filter(|_| self.state.is_engaged()) else {
            return out;
        };

        let c = &self.config;
        let end = focus.unwrap_or(gaze.origin + gaze.forward.normalize_or_zero() * c.ray_length);
        let mut color = Vec4::from_array(c.color);
        color.w *= (self.clock_sec * 5.0).sin() as f32 * 0.2 + 0.8;
        out.beam = Some(Beam {
            start: gaze.origin,
            end,
            thickness: c.ray_thickness,
            color,
        });
        out.light_intensity = c.intensity * ((self.clock_sec * 3.0).sin() as f32 * 0.3 + 0.7);
        out.light_position = Some(end);
        out
    }

    fn focus_in_range(&self, gaze: &GazeSample) -> Option<Vec3> {
        gaze.focus
            .filter(|hit| hit.distance(gaze.origin) <= self.config.ray_length)
    }
}

fn gaze_condition(config: &EyeFocusConfig) -> TriggerCondition {
    TriggerCondition::GazeAlignment {
        angle_rad: config.gaze_angle_rad(),
        hold_sec: config.focus_hold_sec,
    }
}
