//! Double-beat heart waveform and the beat scheduler built on top of it.
//!
//! The same generator drives the heartbeat glow and the love pulse; the two
//! effects differ only in the speed and intensity they feed it.

use crate::constants::*;
use std::time::Duration;

/// Sample the heart waveform at `phase` (cycles). Always in \[0, 1\].
///
/// One cycle holds two Gaussian bumps, a strong one followed by a weaker
/// echo, which reads as "lub-dub".
#[inline]
pub fn heartbeat_wave(phase: f32) -> f32 {
    let x = phase.rem_euclid(1.0) * WAVE_CYCLE_SPAN;
    let first = (-(x - WAVE_FIRST_BUMP_CENTER).powi(2)).exp();
    let second = (-(x - WAVE_SECOND_BUMP_CENTER).powi(2)).exp() * WAVE_SECOND_BUMP_WEIGHT;
    (first + second).clamp(0.0, 1.0)
}

/// Minimum spacing between two beat events at `speed`.
#[inline]
pub fn refractory_sec(speed: f32) -> f64 {
    60.0 / (speed as f64 * BASELINE_BPM as f64)
}

/// Output of one generator step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PulseSample {
    pub phase: f64,
    pub value: f32,
    /// True on the tick a discrete beat fires.
    pub beat: bool,
}

/// Phase accumulator that turns elapsed time into wave samples and beats.
#[derive(Clone, Debug)]
pub struct PulseGenerator {
    speed: f32,
    phase: f64,
    clock_sec: f64,
    last_beat_sec: Option<f64>,
}

impl PulseGenerator {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: clamp_speed(speed),
            phase: 0.0,
            clock_sec: 0.0,
            last_beat_sec: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_speed(speed);
    }

    /// Restart the cycle. Called when the owning effect (re)activates.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.last_beat_sec = None;
    }

    pub fn tick(&mut self, dt: Duration) -> PulseSample {
        let dt_sec = dt.as_secs_f64();
        self.clock_sec += dt_sec;
        let last_phase = self.phase;
        self.phase += dt_sec * self.speed as f64;
        let value = heartbeat_wave(self.phase.rem_euclid(1.0) as f32);

        // Counted on phase rather than samples, so a coarse tick that steps
        // over the whole bump still fires.
        let crossed = rising_edges(self.phase) > rising_edges(last_phase);
        let rested = self
            .last_beat_sec
            .map_or(true, |t| self.clock_sec - t >= refractory_sec(self.speed));
        let beat = crossed && rested;
        if beat {
            self.last_beat_sec = Some(self.clock_sec);
        }

        PulseSample {
            phase: self.phase,
            value,
            beat,
        }
    }
}

/// Rising threshold crossings the wave has made by `phase`.
#[inline]
fn rising_edges(phase: f64) -> f64 {
    (phase - BEAT_RISE_PHASE).floor()
}

fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(f32::EPSILON, PULSE_SPEED_MAX)
    } else {
        1.0
    }
}
