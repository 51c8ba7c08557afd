// Dwell triggers and the effect lifecycle.

use aura_core::{
    EffectState, LapsePolicy, Observation, Trigger, TriggerCondition,
};
use glam::Vec3;
use std::time::Duration;

const DT: Duration = Duration::from_millis(125);

fn gaze_trigger(hold_sec: f32) -> Trigger {
    Trigger::new(TriggerCondition::GazeAlignment {
        angle_rad: 30f32.to_radians(),
        hold_sec,
    })
}

fn looking_at(target: Vec3) -> Option<Observation> {
    Some(Observation::Alignment {
        forward: Vec3::Z,
        to_target: target,
    })
}

#[test]
fn gaze_within_angle_satisfies() {
    let t = gaze_trigger(0.5);
    assert!(t.test(looking_at(Vec3::new(0.0, 0.0, 4.0))));
    assert!(t.test(looking_at(Vec3::new(1.0, 0.0, 4.0))));
    assert!(!t.test(looking_at(Vec3::new(4.0, 0.0, 1.0))));
    assert!(!t.test(looking_at(Vec3::new(0.0, 0.0, -1.0))));
    assert!(!t.test(looking_at(Vec3::ZERO)));
    assert!(!t.test(None));
}

#[test]
fn gaze_becomes_active_after_hold() {
    let mut t = gaze_trigger(0.5);
    let on = looking_at(Vec3::Z * 2.0);
    for _ in 0..3 {
        let r = t.evaluate(DT, on);
        assert!(r.satisfied);
        assert!(!r.active);
    }
    let r = t.evaluate(DT, on);
    assert!(r.active);
    assert!(r.rising);
    assert_eq!(r.dwell_sec, 0.5);

    let r = t.evaluate(DT, on);
    assert!(r.active);
    assert!(!r.rising);
}

#[test]
fn single_miss_resets_dwell() {
    let mut t = gaze_trigger(0.5);
    let on = looking_at(Vec3::Z);
    for _ in 0..6 {
        t.evaluate(DT, on);
    }
    assert!(t.is_active());

    let r = t.evaluate(DT, None);
    assert!(r.falling);
    assert!(!r.active);
    assert_eq!(r.dwell_sec, 0.0);

    // Needs the full hold again.
    for _ in 0..3 {
        assert!(!t.evaluate(DT, on).active);
    }
    assert!(t.evaluate(DT, on).active);
}

#[test]
fn active_iff_continuously_held() {
    let pattern = [true, true, false, true, true, true, true, true, false, true];
    let mut t = gaze_trigger(0.5);
    let mut run = 0;
    for &looking in &pattern {
        let obs = if looking { looking_at(Vec3::Z) } else { None };
        let r = t.evaluate(DT, obs);
        run = if looking { run + 1 } else { 0 };
        assert_eq!(r.active, run >= 4, "run {run}");
    }
}

#[test]
fn proximity_with_zero_hold_tracks_distance() {
    let mut t = Trigger::new(TriggerCondition::ProximityDwell {
        distance: 0.3,
        hold_sec: 0.0,
    });
    assert!(t.evaluate(DT, Some(Observation::Distance(0.2))).rising);
    assert!(t.evaluate(DT, Some(Observation::Distance(0.3))).active);
    assert!(t.evaluate(DT, Some(Observation::Distance(0.5))).falling);
}

#[test]
fn decay_drains_twice_as_fast_and_latches() {
    let mut t = gaze_trigger(1.0).with_lapse(LapsePolicy::Decay { rate: 2.0 });
    let on = looking_at(Vec3::Z);
    for _ in 0..8 {
        t.evaluate(DT, on);
    }
    assert!(t.is_active());
    assert_eq!(t.dwell_sec(), 1.0);

    // Looking away drains 0.25 per tick but stays latched until empty.
    for expected in [0.75, 0.5, 0.25] {
        let r = t.evaluate(DT, None);
        assert_eq!(r.dwell_sec, expected);
        assert!(r.active);
    }
    let r = t.evaluate(DT, None);
    assert_eq!(r.dwell_sec, 0.0);
    assert!(r.falling);
}

#[test]
fn decay_resumes_accumulation_from_partial_dwell() {
    let mut t = gaze_trigger(1.0).with_lapse(LapsePolicy::Decay { rate: 2.0 });
    let on = looking_at(Vec3::Z);
    for _ in 0..6 {
        t.evaluate(DT, on);
    }
    t.evaluate(DT, None);
    assert_eq!(t.dwell_sec(), 0.5);
    for _ in 0..3 {
        assert!(!t.evaluate(DT, on).active);
    }
    assert!(t.evaluate(DT, on).rising);
}

#[test]
fn force_full_activates_immediately() {
    let mut t = gaze_trigger(3.0).with_lapse(LapsePolicy::Decay { rate: 2.0 });
    let r = t.force_full();
    assert!(r.rising);
    assert_eq!(t.dwell_sec(), 3.0);
    t.reset();
    assert!(!t.is_active());
    assert_eq!(t.dwell_sec(), 0.0);
}

#[test]
fn mismatched_observation_is_ignored() {
    let t = gaze_trigger(0.5);
    assert!(!t.test(Some(Observation::Distance(0.0))));
    let flag = Trigger::new(TriggerCondition::ExternalFlag);
    assert!(flag.test(Some(Observation::Flag(true))));
    assert!(!flag.test(Some(Observation::Motion(0.0))));
}

#[test]
fn set_condition_keeps_dwell() {
    let mut t = gaze_trigger(2.0);
    for _ in 0..8 {
        t.evaluate(DT, looking_at(Vec3::Z));
    }
    assert!(!t.is_active());
    t.set_condition(TriggerCondition::GazeAlignment {
        angle_rad: 30f32.to_radians(),
        hold_sec: 1.0,
    });
    assert_eq!(t.dwell_sec(), 1.0);
    assert!(t.evaluate(DT, looking_at(Vec3::Z)).rising);
}

#[test]
fn lifecycle_steps() {
    use EffectState::*;
    assert_eq!(Inactive.step(false, true), Inactive);
    assert_eq!(Inactive.step(true, false), Triggered);
    assert_eq!(Triggered.step(true, false), Active);
    assert_eq!(Active.step(true, false), Active);
    assert_eq!(Active.step(false, false), Releasing);
    assert_eq!(Triggered.step(false, true), Releasing);
    assert_eq!(Releasing.step(false, false), Releasing);
    assert_eq!(Releasing.step(false, true), Inactive);
    assert_eq!(Releasing.step(true, false), Triggered);

    assert!(Triggered.is_engaged() && Active.is_engaged());
    assert!(!Releasing.is_engaged());
    assert!(Releasing.is_visible());
    assert!(!Inactive.is_visible());
}
