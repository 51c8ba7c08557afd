use super::{advance_state, EffectKind};
use crate::config::HeartbeatConfig;
use crate::frame::{FrameInputs, FxEvent, FxEvents, SoundCue, SoundKind};
use crate::params::{names, BoolEdge, Edge};
use aura_core::constants::RIPPLE_POOL_MAX;
use aura_core::{
    ripple_quad, EffectState, Mesh, Observation, PulseGenerator, RipplePool, Trigger,
    TriggerCondition,
};
use glam::{Vec3, Vec4};
use smallvec::SmallVec;
use std::time::Duration;

/// One visible ripple ring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RippleView {
    pub origin: Vec3,
    pub radius: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeartbeatOutput {
    pub state: EffectState,
    pub wave: f32,
    pub light_intensity: f32,
    pub light_color: Vec4,
    pub emission_rate: f32,
    pub ripples: SmallVec<[RippleView; RIPPLE_POOL_MAX]>,
}

/// Chest glow that beats while a hand rests on the chest.
pub struct HeartbeatGlow {
    config: HeartbeatConfig,
    enabled: bool,
    state: EffectState,
    touch: Trigger,
    manual: BoolEdge,
    pulse: PulseGenerator,
    ripples: RipplePool,
    quad: Mesh,
    last_chest: Option<Vec3>,
}

impl HeartbeatGlow {
    pub fn new(config: HeartbeatConfig) -> Self {
        let touch = Trigger::new(TriggerCondition::ProximityDwell {
            distance: config.trigger_radius,
            hold_sec: 0.0,
        });
        let pulse = PulseGenerator::new(config.speed);
        let ripples = RipplePool::new(config.ripple_count, config.max_ripple_radius, config.color[3]);
        let quad = ripple_quad(config.max_ripple_radius);
        Self {
            config,
            enabled: true,
            state: EffectState::Inactive,
            touch,
            manual: BoolEdge::new(false),
            pulse,
            ripples,
            quad,
            last_chest: None,
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

    pub fn ripples(&self) -> &RipplePool {
        &self.ripples
    }

    /// Ground quad each ripple ring is drawn on. Sized for the largest ring.
    pub fn mesh(&self) -> &Mesh {
        &self.quad
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = speed.clamp(0.5, 3.0);
        self.pulse.set_speed(self.config.speed);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity.clamp(0.1, 2.0);
    }

    pub fn set_max_ripple_radius(&mut self, radius: f32) {
        self.config.max_ripple_radius = radius.clamp(1.0, 10.0);
        self.ripples.set_max_radius(self.config.max_ripple_radius);
        self.quad = ripple_quad(self.config.max_ripple_radius);
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        inputs: &FrameInputs<'_>,
        events: &mut FxEvents,
    ) -> HeartbeatOutput {
        if let Some(chest) = inputs.chest {
            self.last_chest = Some(chest);
        }

        match self.manual.poll(inputs.params.get_bool(names::HEARTBEAT_TRIGGER)) {
            Edge::Rising => log::debug!("[HeartbeatGlow] manual trigger on"),
            Edge::Falling => log::debug!("[HeartbeatGlow] manual trigger off"),
            Edge::None => {}
        }
        let touching = self.touch.evaluate(dt, hand_distance(inputs)).active;
        let engaged = self.enabled && (touching || self.manual.last());

        let was = self.state;
        advance_state(EffectKind::HeartbeatGlow, &mut self.state, engaged, true, events);
        if self.state == EffectState::Triggered {
            self.pulse.reset();
        }
        if self.state == EffectState::Releasing && was.is_engaged() {
            self.ripples.stop_all();
        }

        let mut wave = 0.0;
        if self.state.is_engaged() {
            let sample = self.pulse.tick(dt);
            wave = sample.value;
            if sample.beat {
                self.beat(events);
            }
        }
        self.ripples.tick(dt);

        let c = &self.config;
        let base_color = Vec4::from_array(c.base_light_color);
        // The chest light is off unless the heart is beating.
        let light_intensity = if self.state.is_engaged() {
            c.base_light_intensity + wave * c.intensity
        } else {
            0.0
        };
        HeartbeatOutput {
            state: self.state,
            wave,
            light_intensity,
            light_color: base_color.lerp(Vec4::from_array(c.color), wave),
            emission_rate: wave * 20.0 * c.intensity,
            ripples: self
                .ripples
                .active()
                .map(|r| RippleView {
                    origin: r.origin,
                    radius: r.radius,
                    alpha: r.alpha(),
                })
                .collect(),
        }
    }

    fn beat(&mut self, events: &mut FxEvents) {
        if let Some(origin) = self.last_chest {
            let slot = self.ripples.fire(origin);
            events.push(FxEvent::RippleFired { slot, origin });
        }
        events.push(FxEvent::Sound(SoundCue {
            kind: SoundKind::Heartbeat,
            pitch: self.config.speed,
            volume: self.config.intensity * 0.5,
        }));
    }
}

/// Distance from the chest to the closer hand.
fn hand_distance(inputs: &FrameInputs<'_>) -> Option<Observation> {
    let chest = inputs.chest?;
    inputs
        .hands
        .iter()
        .flatten()
        .map(|hand| hand.distance(chest))
        .reduce(f32::min)
        .map(Observation::Distance)
}
