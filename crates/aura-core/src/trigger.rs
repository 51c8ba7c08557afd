//! Dwell-based trigger evaluation and the per-effect lifecycle.
//!
//! A [`Trigger`] turns a per-tick observation (an alignment, a distance, a
//! motion magnitude or a plain flag) into "satisfied now" plus an accumulated
//! dwell time, and reports when the dwell crosses its hold threshold.

use glam::Vec3;
use std::time::Duration;

/// Lifecycle of one effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectState {
    #[default]
    Inactive,
    /// First tick after activation.
    Triggered,
    Active,
    /// Winding down; stays here until the owner reports the release finished.
    Releasing,
}

impl EffectState {
    /// Advance the lifecycle by one tick.
    pub fn step(self, engaged: bool, release_done: bool) -> Self {
        use EffectState::*;
        match (self, engaged) {
            (Inactive, true) | (Releasing, true) => Triggered,
            (Inactive, false) => Inactive,
            (Triggered, true) | (Active, true) => Active,
            (Triggered, false) | (Active, false) => Releasing,
            (Releasing, false) => {
                if release_done {
                    Inactive
                } else {
                    Releasing
                }
            }
        }
    }

    /// Triggered or Active.
    pub fn is_engaged(self) -> bool {
        matches!(self, EffectState::Triggered | EffectState::Active)
    }

    pub fn is_visible(self) -> bool {
        self != EffectState::Inactive
    }
}

/// What happens to the accumulated dwell on a tick where the condition fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LapsePolicy {
    Reset,
    /// Drain at `rate` seconds per second, floored at zero.
    Decay { rate: f32 },
}

/// The predicate a trigger evaluates every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerCondition {
    GazeAlignment { angle_rad: f32, hold_sec: f32 },
    ProximityDwell { distance: f32, hold_sec: f32 },
    IdleTimeout { motion_epsilon: f32, idle_sec: f32 },
    ExternalFlag,
}

impl TriggerCondition {
    pub fn hold_sec(&self) -> f32 {
        match *self {
            TriggerCondition::GazeAlignment { hold_sec, .. } => hold_sec,
            TriggerCondition::ProximityDwell { hold_sec, .. } => hold_sec,
            TriggerCondition::IdleTimeout { idle_sec, .. } => idle_sec,
            TriggerCondition::ExternalFlag => 0.0,
        }
    }
}

/// One tick of input for a trigger. `None` in the evaluator means the host
/// had nothing to report this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Observation {
    /// Looking along `forward` while the target lies along `to_target`.
    /// Neither vector needs to be normalized.
    Alignment { forward: Vec3, to_target: Vec3 },
    Distance(f32),
    Motion(f32),
    Flag(bool),
}

/// Result of one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerReading {
    pub satisfied: bool,
    pub dwell_sec: f32,
    pub active: bool,
    /// Became active this tick.
    pub rising: bool,
    /// Stopped being active this tick.
    pub falling: bool,
}

#[derive(Clone, Debug)]
pub struct Trigger {
    condition: TriggerCondition,
    lapse: LapsePolicy,
    cos_threshold: f32,
    dwell_sec: f64,
    active: bool,
}

impl Trigger {
    pub fn new(condition: TriggerCondition) -> Self {
        Self {
            condition,
            lapse: LapsePolicy::Reset,
            cos_threshold: cos_threshold(condition),
            dwell_sec: 0.0,
            active: false,
        }
    }

    pub fn with_lapse(mut self, lapse: LapsePolicy) -> Self {
        self.lapse = lapse;
        self
    }

    /// Swap the predicate, keeping the accumulated dwell.
    pub fn set_condition(&mut self, condition: TriggerCondition) {
        self.condition = condition;
        self.cos_threshold = cos_threshold(condition);
    }

    pub fn condition(&self) -> TriggerCondition {
        self.condition
    }

    pub fn cos_threshold(&self) -> f32 {
        self.cos_threshold
    }

    pub fn dwell_sec(&self) -> f32 {
        self.dwell_sec as f32
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether `observation` satisfies the condition, with no side effects.
    pub fn test(&self, observation: Option<Observation>) -> bool {
        let Some(observation) = observation else {
            return false;
        };
        match (self.condition, observation) {
            (TriggerCondition::GazeAlignment { .. }, Observation::Alignment { forward, to_target }) => {
                let f = forward.normalize_or_zero();
                let t = to_target.normalize_or_zero();
                if f == Vec3::ZERO || t == Vec3::ZERO {
                    return false;
                }
                f.dot(t) >= self.cos_threshold
            }
            (TriggerCondition::ProximityDwell { distance, .. }, Observation::Distance(d)) => {
                d <= distance
            }
            (TriggerCondition::IdleTimeout { motion_epsilon, .. }, Observation::Motion(m)) => {
                m <= motion_epsilon
            }
            (TriggerCondition::ExternalFlag, Observation::Flag(flag)) => flag,
            (condition, observation) => {
                log::debug!("trigger {condition:?} ignored mismatched {observation:?}");
                false
            }
        }
    }

    pub fn evaluate(&mut self, dt: Duration, observation: Option<Observation>) -> TriggerReading {
        let satisfied = self.test(observation);
        let dt_sec = dt.as_secs_f64();
        if satisfied {
            self.dwell_sec += dt_sec;
        } else {
            match self.lapse {
                LapsePolicy::Reset => self.dwell_sec = 0.0,
                LapsePolicy::Decay { rate } => {
                    self.dwell_sec = (self.dwell_sec - dt_sec * rate as f64).max(0.0);
                }
            }
        }
        self.settle(satisfied)
    }

    /// Jump straight to the hold threshold, as a manual trigger does.
    pub fn force_full(&mut self) -> TriggerReading {
        let hold = self.condition.hold_sec() as f64;
        self.dwell_sec = self.dwell_sec.max(hold);
        self.settle(true)
    }

    pub fn reset(&mut self) {
        self.dwell_sec = 0.0;
        self.active = false;
    }

    fn settle(&mut self, satisfied: bool) -> TriggerReading {
        let was_active = self.active;
        let hold = self.condition.hold_sec() as f64;
        self.active = match self.lapse {
            LapsePolicy::Reset => satisfied && self.dwell_sec >= hold,
            // Decaying accumulators latch until fully drained.
            LapsePolicy::Decay { .. } => {
                if was_active {
                    self.dwell_sec > 0.0
                } else {
                    self.dwell_sec >= hold
                }
            }
        };
        TriggerReading {
            satisfied,
            dwell_sec: self.dwell_sec as f32,
            active: self.active,
            rising: self.active && !was_active,
            falling: was_active && !self.active,
        }
    }
}

fn cos_threshold(condition: TriggerCondition) -> f32 {
    match condition {
        TriggerCondition::GazeAlignment { angle_rad, .. } => angle_rad.cos(),
        _ => 1.0,
    }
}
