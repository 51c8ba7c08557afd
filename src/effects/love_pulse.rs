use super::{advance_state, EffectKind};
use crate::config::LovePulseConfig;
use crate::frame::{FrameInputs, FxEvent, FxEvents, SoundCue, SoundKind, ViewerPose};
use crate::params::{names, BoolEdge, Edge};
use aura_core::constants::LOVE_DECAY_RATE;
use aura_core::{
    EffectState, LapsePolicy, Observation, PulseGenerator, Trigger, TriggerCondition,
};
use glam::{Vec3, Vec4};
use std::time::Duration;

const HEART_SIZE: f32 = 0.15;
const HEART_LIFETIME_SEC: f32 = 2.5;
const HEART_SPEED: f32 = 2.0;
const HEART_LIFT: f32 = 1.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LovePulseOutput {
    pub state: EffectState,
    /// Accumulated gaze time in seconds.
    pub love: f32,
    pub wave: f32,
    pub light_intensity: f32,
    pub light_color: Vec4,
    /// Player currently being looked at, if any.
    pub target: Option<Vec3>,
}

/// Hearts that pulse out after the viewer keeps looking at a nearby player.
pub struct LovePulse {
    config: LovePulseConfig,
    enabled: bool,
    state: EffectState,
    love: Trigger,
    manual: BoolEdge,
    pulse: PulseGenerator,
}

impl LovePulse {
    pub fn new(config: LovePulseConfig) -> Self {
        let love = Trigger::new(love_condition(&config)).with_lapse(LapsePolicy::Decay {
            rate: LOVE_DECAY_RATE,
        });
        let pulse = PulseGenerator::new(config.pulse_speed);
        Self {
            config,
            enabled: true,
            state: EffectState::Inactive,
            love,
            manual: BoolEdge::new(false),
            pulse,
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

    pub fn love_sec(&self) -> f32 {
        self.love.dwell_sec()
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity.clamp(0.1, 3.0);
    }

    pub fn set_detection_distance(&mut self, distance: f32) {
        self.config.detection_distance = distance.clamp(1.0, 10.0);
    }

    /// Fill the accumulator so the pulse starts on the next tick.
    pub fn trigger_now(&mut self) {
        if self.enabled {
            self.love.force_full();
        }
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        inputs: &FrameInputs<'_>,
        events: &mut FxEvents,
    ) -> LovePulseOutput {
        let manual = self.manual.poll(inputs.params.get_bool(names::LOVE_PULSE_TRIGGER));

        let target = if self.enabled {
            self.looked_at_target(inputs)
        } else {
            None
        };
        let observation = match (target, inputs.viewer) {
            (Some(target), Some(viewer)) => Some(Observation::Alignment {
                forward: viewer.forward,
                to_target: target - viewer.position,
            }),
            _ => None,
        };
        self.love.evaluate(dt, observation);
        if manual == Edge::Rising {
            log::debug!("[LovePulse] manual trigger");
            self.trigger_now();
        }
        if !self.enabled {
            self.love.reset();
        }

        let engaged = self.enabled && self.love.is_active();
        advance_state(EffectKind::LovePulse, &mut self.state, engaged, true, events);
        if self.state == EffectState::Triggered {
            self.pulse.reset();
            events.push(FxEvent::Sound(SoundCue {
                kind: SoundKind::LoveActivation,
                pitch: 1.0,
                volume: self.config.intensity * 0.4,
            }));
        }

        let c = &self.config;
        let mut out = LovePulseOutput {
            state: self.state,
            love: self.love.dwell_sec(),
            light_color: Vec4::from_array(c.color),
            target,
            ..LovePulseOutput::default()
        };
        if !self.state.is_engaged() {
            return out;
        }

        let sample = self.pulse.tick(dt);
        out.wave = sample.value;
        out.light_intensity = c.base_light_intensity * c.intensity * (0.7 + 0.3 * sample.value);
        if sample.beat {
            let origin = inputs.position.or(inputs.chest).unwrap_or(Vec3::ZERO);
            let toward = target
                .map(|t| (t - origin).normalize_or_zero())
                .unwrap_or(Vec3::ZERO);
            events.push(FxEvent::HeartBurst {
                position: origin,
                count: c.particle_count,
                color: Vec4::from_array(c.color),
                size: HEART_SIZE * c.intensity,
                lifetime_sec: HEART_LIFETIME_SEC,
                velocity: toward * HEART_SPEED + Vec3::Y * HEART_LIFT,
            });
            let fill = (out.love / c.accumulation_sec).min(1.0);
            events.push(FxEvent::Sound(SoundCue {
                kind: SoundKind::LoveHeartbeat,
                pitch: 1.0 + fill * 0.3,
                volume: c.intensity * 0.4,
            }));
        }
        out
    }

    /// First candidate within range that the viewer is looking at.
    fn looked_at_target(&self, inputs: &FrameInputs<'_>) -> Option<Vec3> {
        let position = inputs.position?;
        let viewer: ViewerPose = inputs.viewer?;
        inputs
            .targets
            .iter()
            .copied()
            .filter(|t| t.distance(position) <= self.config.detection_distance)
            .filter(|t| t.distance(position) > f32::EPSILON)
            .find(|&t| {
                self.love.test(Some(Observation::Alignment {
                    forward: viewer.forward,
                    to_target: t - viewer.position,
                }))
            })
    }
}

fn love_condition(config: &LovePulseConfig) -> TriggerCondition {
    TriggerCondition::GazeAlignment {
        angle_rad: config.gaze_angle_deg.to_radians(),
        hold_sec: config.accumulation_sec,
    }
}
