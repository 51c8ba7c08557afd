use super::{advance_state, EffectKind};
use crate::config::IdleBloomConfig;
use crate::frame::{FrameInputs, FxEvent, FxEvents, SoundCue, SoundKind};
use crate::params::{names, BoolEdge, Edge};
use aura_core::constants::ground_fallback_offset;
use aura_core::{
    bloom_alpha, bloom_scale, flower_mesh, flower_ring, BloomInstance, EffectState, Mesh,
    MotionDetector,
};
use glam::{Vec3, Vec4};
use std::time::Duration;

const AMBIENT_VOLUME: f32 = 0.3;
const LIGHT_LIFT: f32 = 0.5;

/// One flower of the ring as it should be drawn this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowerView {
    pub position: Vec3,
    /// Base color with alpha scaled by growth.
    pub color: Vec4,
    pub scale: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdleBloomOutput {
    pub state: EffectState,
    pub growth: f32,
    pub idle_sec: f32,
    pub flowers: Vec<FlowerView>,
    pub light_intensity: f32,
    pub light_position: Option<Vec3>,
    pub emission_rate: f32,
}

struct Flower {
    position: Vec3,
    color: Vec4,
}

/// A ring of flowers that grows around an avatar left standing still.
pub struct IdleBloom {
    config: IdleBloomConfig,
    enabled: bool,
    state: EffectState,
    motion: MotionDetector,
    manual: BoolEdge,
    bloom: BloomInstance,
    flowers: Vec<Flower>,
    mesh: Mesh,
    clock_sec: f64,
}

impl IdleBloom {
    pub fn new(config: IdleBloomConfig) -> Self {
        let motion = MotionDetector::new(config.motion_sensitivity, config.idle_sec);
        let bloom = BloomInstance::new(config.growth_speed);
        let mesh = flower_mesh(config.petals);
        Self {
            config,
            enabled: true,
            state: EffectState::Inactive,
            motion,
            manual: BoolEdge::new(false),
            bloom,
            flowers: Vec::new(),
            mesh,
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

    pub fn bloom(&self) -> &BloomInstance {
        &self.bloom
    }

    /// Shared petal mesh every flower is drawn with.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn set_idle_threshold(&mut self, idle_sec: f32) {
        self.config.idle_sec = idle_sec.clamp(5.0, 30.0);
        self.motion
            .set_threshold(self.config.motion_sensitivity, self.config.idle_sec);
    }

    pub fn set_growth_speed(&mut self, speed: f32) {
        self.config.growth_speed = speed.clamp(0.1, 2.0);
        self.bloom.set_growth_speed(self.config.growth_speed);
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        inputs: &FrameInputs<'_>,
        events: &mut FxEvents,
    ) -> IdleBloomOutput {
        self.clock_sec += dt.as_secs_f64();

        let manual = self.manual.poll(inputs.params.get_bool(names::IDLE_BLOOM_TRIGGER));
        if self.enabled {
            let moving = inputs.params.get_bool(names::IS_MOVING).unwrap_or(false);
            self.motion.observe(dt, inputs.position, moving);
            if manual == Edge::Rising {
                log::debug!("[IdleBloom] manual trigger");
                self.motion.force_idle();
            }
        } else {
            self.motion.reset();
        }

        let prev = self.state;
        let engaged = self.enabled && self.motion.is_idle();
        advance_state(
            EffectKind::IdleBloom,
            &mut self.state,
            engaged,
            self.bloom.is_dormant(),
            events,
        );
        match (prev, self.state) {
            (_, EffectState::Triggered) => self.start(inputs, events),
            (EffectState::Triggered | EffectState::Active, EffectState::Releasing) => {
                self.bloom.wither();
                events.push(ambient(SoundKind::AmbientStop));
            }
            (EffectState::Releasing, EffectState::Inactive) => {
                self.flowers.clear();
                events.push(FxEvent::BloomEnded);
            }
            _ => {}
        }

        let growth = self.bloom.tick(dt);
        let c = &self.config;
        let scale = bloom_scale(growth, c.max_size);
        let alpha = bloom_alpha(growth);
        let sway = (self.clock_sec * 0.5).sin() as f32 * 0.1 + 0.9;
        let lit = self.state.is_engaged();
        IdleBloomOutput {
            state: self.state,
            growth,
            idle_sec: self.motion.idle_sec(),
            flowers: self
                .flowers
                .iter()
                .map(|f| FlowerView {
                    position: f.position,
                    color: f.color.truncate().extend(f.color.w * alpha),
                    scale,
                })
                .collect(),
            light_intensity: if lit { c.base_light_intensity * sway * growth } else { 0.0 },
            light_position: inputs
                .position
                .filter(|_| lit)
                .map(|p| p + Vec3::Y * LIGHT_LIFT),
            emission_rate: if lit { 3.0 * growth } else { 0.0 },
        }
    }

    fn start(&mut self, inputs: &FrameInputs<'_>, events: &mut FxEvents) {
        let center = inputs
            .ground
            .or_else(|| inputs.position.map(|p| p + ground_fallback_offset()))
            .unwrap_or(Vec3::ZERO);
        let colors = &self.config.flower_colors;
        self.flowers = flower_ring(self.config.flower_count, self.config.bloom_radius)
            .into_iter()
            .zip(colors.iter().cycle())
            .map(|(offset, color)| Flower {
                position: center + offset,
                color: Vec4::from_array(*color),
            })
            .collect();
        self.bloom.grow();
        events.push(FxEvent::BloomStarted {
            center,
            flowers: self.flowers.len(),
        });
        events.push(FxEvent::Sound(SoundCue {
            kind: SoundKind::BloomChime,
            pitch: 1.0,
            volume: 1.0,
        }));
        events.push(ambient(SoundKind::AmbientStart));
    }
}

fn ambient(kind: SoundKind) -> FxEvent {
    FxEvent::Sound(SoundCue {
        kind,
        pitch: 1.0,
        volume: AMBIENT_VOLUME,
    })
}
