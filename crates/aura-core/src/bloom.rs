//! Growth timer for idle flowers: a slow linear ramp up while the avatar
//! stays idle and a fixed-length ramp down once it moves again.

use crate::constants::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BloomPhase {
    #[default]
    Dormant,
    Growing,
    /// Shrinking from `from` to zero over the wither window.
    Withering { from: f32, elapsed: f32 },
}

#[derive(Clone, Debug)]
pub struct BloomInstance {
    growth: f32,
    growth_speed: f32,
    phase: BloomPhase,
}

impl BloomInstance {
    pub fn new(growth_speed: f32) -> Self {
        Self {
            growth: 0.0,
            growth_speed,
            phase: BloomPhase::Dormant,
        }
    }

    pub fn growth(&self) -> f32 {
        self.growth
    }

    pub fn phase(&self) -> BloomPhase {
        self.phase
    }

    pub fn set_growth_speed(&mut self, speed: f32) {
        self.growth_speed = speed;
    }

    pub fn is_dormant(&self) -> bool {
        self.phase == BloomPhase::Dormant
    }

    /// Start (or resume) growing from the current size.
    pub fn grow(&mut self) {
        self.phase = BloomPhase::Growing;
    }

    /// Begin withering. Does nothing while already dormant or withering.
    pub fn wither(&mut self) {
        if self.phase == BloomPhase::Growing {
            self.phase = BloomPhase::Withering {
                from: self.growth,
                elapsed: 0.0,
            };
        }
    }

    pub fn tick(&mut self, dt: Duration) -> f32 {
        let dt_sec = dt.as_secs_f32();
        match self.phase {
            BloomPhase::Dormant => {}
            BloomPhase::Growing => {
                self.growth = (self.growth + dt_sec * self.growth_speed).clamp(0.0, 1.0);
            }
            BloomPhase::Withering { from, elapsed } => {
                let elapsed = elapsed + dt_sec;
                if elapsed >= BLOOM_WITHER_SEC {
                    self.growth = 0.0;
                    self.phase = BloomPhase::Dormant;
                } else {
                    self.growth = from * (1.0 - elapsed / BLOOM_WITHER_SEC);
                    self.phase = BloomPhase::Withering { from, elapsed };
                }
            }
        }
        self.growth
    }
}

#[inline]
pub fn bloom_scale(growth: f32, max_size: f32) -> f32 {
    growth.clamp(0.0, 1.0) * max_size
}

#[inline]
pub fn bloom_alpha(growth: f32) -> f32 {
    growth.clamp(0.0, 1.0) * BLOOM_ALPHA_SCALE
}
