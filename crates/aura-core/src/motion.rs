//! Idle detection from a stream of positions.

use crate::trigger::{Observation, Trigger, TriggerCondition};
use glam::Vec3;
use std::time::Duration;

/// What the detector saw this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionReading {
    /// Distance moved since the previous sample (0 without a sample).
    pub magnitude: f32,
    pub moved: bool,
    pub idle_sec: f32,
    /// True only on the tick the idle threshold is reached.
    pub idle_fired: bool,
    pub idle: bool,
}

/// Tracks the last position and reports when the avatar has stood still
/// long enough. Motion above `epsilon` restarts the idle clock.
#[derive(Clone, Debug)]
pub struct MotionDetector {
    trigger: Trigger,
    last_position: Option<Vec3>,
}

impl MotionDetector {
    pub fn new(motion_epsilon: f32, idle_sec: f32) -> Self {
        Self {
            trigger: Trigger::new(TriggerCondition::IdleTimeout {
                motion_epsilon,
                idle_sec,
            }),
            last_position: None,
        }
    }

    /// Change the epsilon/threshold without losing the idle time gathered so far.
    pub fn set_threshold(&mut self, motion_epsilon: f32, idle_sec: f32) {
        self.trigger.set_condition(TriggerCondition::IdleTimeout {
            motion_epsilon,
            idle_sec,
        });
    }

    pub fn idle_sec(&self) -> f32 {
        self.trigger.dwell_sec()
    }

    pub fn is_idle(&self) -> bool {
        self.trigger.is_active()
    }

    /// Feed one tick. Without a position (and without `external_motion`)
    /// the idle clock holds still for this tick; `external_motion` counts as
    /// movement regardless of position.
    pub fn observe(
        &mut self,
        dt: Duration,
        position: Option<Vec3>,
        external_motion: bool,
    ) -> MotionReading {
        let magnitude = match (position, self.last_position) {
            (Some(now), Some(before)) => now.distance(before),
            _ => 0.0,
        };
        if position.is_some() {
            self.last_position = position;
        }

        let observation = if external_motion {
            Observation::Motion(f32::INFINITY)
        } else if position.is_some() {
            Observation::Motion(magnitude)
        } else {
            return MotionReading {
                idle_sec: self.trigger.dwell_sec(),
                idle: self.trigger.is_active(),
                ..MotionReading::default()
            };
        };
        let reading = self.trigger.evaluate(dt, Some(observation));
        MotionReading {
            magnitude,
            moved: !reading.satisfied,
            idle_sec: reading.dwell_sec,
            idle_fired: reading.rising,
            idle: reading.active,
        }
    }

    /// Pretend the avatar has already been idle for the full threshold.
    pub fn force_idle(&mut self) -> bool {
        self.trigger.force_full().rising
    }

    /// Restart the idle clock as if the avatar just moved.
    pub fn reset(&mut self) {
        self.trigger.reset();
    }
}
