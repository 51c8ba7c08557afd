// Whole-system ticking, toggles and parameter declarations.

use aura_fx::aura_core::EffectState;
use aura_fx::params::names;
use aura_fx::{
    AuraConfig, AuraSystem, ConfigError, EffectKind, FrameInputs, FxEvent, ParamKind,
    ParameterMap, ParameterSpec,
};
use glam::Vec3;
use std::time::Duration;

const DT: Duration = Duration::from_millis(125);

fn system() -> AuraSystem {
    AuraSystem::new(AuraConfig::default()).unwrap()
}

fn activated(out: &aura_fx::FrameOutputs) -> Vec<EffectKind> {
    out.events
        .iter()
        .filter_map(|e| match e {
            FxEvent::Activated(kind) => Some(*kind),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_inputs_only_wake_the_emotion_aura() {
    let mut sys = system();
    let out = sys.tick(DT, &FrameInputs::empty());
    assert!(out.enabled);
    assert_eq!(activated(&out), vec![EffectKind::EmotionAura]);
    assert_eq!(out.heartbeat.state, EffectState::Inactive);
    assert_eq!(out.eye_focus.state, EffectState::Inactive);
    assert_eq!(out.love_pulse.state, EffectState::Inactive);
    assert_eq!(out.idle_bloom.state, EffectState::Inactive);
    assert!(out.sounds().next().is_none());
}

#[test]
fn master_off_disables_everything_and_on_restores_flags() {
    let mut sys = system();
    let mut params = ParameterMap::new();
    params.set_bool(names::HEARTBEAT_TRIGGER, true);
    params.set_bool(names::LOVE_PULSE, false);
    sys.tick(DT, &FrameInputs::new(&params));
    assert!(!sys.is_effect_enabled(EffectKind::LovePulse));
    assert_eq!(sys.heartbeat().state(), EffectState::Triggered);

    params.set_bool(names::SYSTEM_ENABLED, false);
    let out = sys.tick(DT, &FrameInputs::new(&params));
    assert!(!out.enabled);
    assert_eq!(sys.enabled_effects().count(), 0);
    assert_eq!(out.heartbeat.state, EffectState::Releasing);
    assert_eq!(out.heartbeat.light_intensity, 0.0);
    assert!(out
        .events
        .contains(&FxEvent::Deactivated(EffectKind::HeartbeatGlow)));
    let out = sys.tick(DT, &FrameInputs::new(&params));
    assert_eq!(out.heartbeat.state, EffectState::Inactive);
    assert_eq!(out.heartbeat.light_intensity, 0.0);

    params.set_bool(names::SYSTEM_ENABLED, true);
    sys.tick(DT, &FrameInputs::new(&params));
    let on: Vec<_> = sys.enabled_effects().collect();
    assert_eq!(
        on,
        vec![
            EffectKind::EmotionAura,
            EffectKind::HeartbeatGlow,
            EffectKind::EyeFocusRay,
            EffectKind::IdleBloom
        ]
    );
    assert_eq!(sys.heartbeat().state(), EffectState::Triggered);
}

#[test]
fn toggles_are_only_applied_on_change() {
    let mut sys = system();
    let mut params = ParameterMap::new();
    params.set_bool(names::EYE_FOCUS_RAY, true);
    sys.tick(DT, &FrameInputs::new(&params));

    // A direct call wins until the parameter actually changes.
    sys.set_effect_enabled(EffectKind::EyeFocusRay, false);
    sys.tick(DT, &FrameInputs::new(&params));
    assert!(!sys.is_effect_enabled(EffectKind::EyeFocusRay));

    params.set_bool(names::EYE_FOCUS_RAY, false);
    sys.tick(DT, &FrameInputs::new(&params));
    params.set_bool(names::EYE_FOCUS_RAY, true);
    sys.tick(DT, &FrameInputs::new(&params));
    assert!(sys.is_effect_enabled(EffectKind::EyeFocusRay));
}

#[test]
fn set_master_matches_parameter_behavior() {
    let mut sys = system();
    sys.set_effect_enabled(EffectKind::IdleBloom, false);
    sys.set_master(false);
    assert!(!sys.is_enabled());
    assert!(!sys.is_effect_enabled(EffectKind::EmotionAura));
    sys.set_master(true);
    assert!(sys.is_effect_enabled(EffectKind::EmotionAura));
    assert!(!sys.is_effect_enabled(EffectKind::IdleBloom));
}

#[test]
fn config_disabled_effects_start_off() {
    let mut config = AuraConfig::default();
    config.system.heartbeat_glow = false;
    let mut sys = AuraSystem::new(config).unwrap();
    let mut params = ParameterMap::new();
    params.set_bool(names::HEARTBEAT_TRIGGER, true);
    let out = sys.tick(DT, &FrameInputs::new(&params));
    assert_eq!(out.heartbeat.state, EffectState::Inactive);
    assert!(!sys.heartbeat().is_enabled());
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = AuraConfig::default();
    config.heartbeat.speed = f32::INFINITY;
    assert!(matches!(
        AuraSystem::new(config),
        Err(ConfigError::NonFinite { field: "heartbeat.speed" })
    ));
}

#[test]
fn declared_parameters_cover_every_polled_name() {
    let sys = system();
    let specs = sys.declared_parameters();
    let names_declared: Vec<&str> = specs.iter().map(|s| s.name).collect();
    for name in [
        names::SYSTEM_ENABLED,
        names::EMOTION_AURA,
        names::HEARTBEAT_GLOW,
        names::EYE_FOCUS_RAY,
        names::LOVE_PULSE,
        names::IDLE_BLOOM,
        names::EMOTION,
        names::HEARTBEAT_TRIGGER,
        names::EYE_BEAM_FORCE,
        names::LOVE_PULSE_TRIGGER,
        names::IDLE_BLOOM_TRIGGER,
        names::IS_MOVING,
    ] {
        assert!(names_declared.contains(&name), "{name} missing");
    }
    let emotion = specs.iter().find(|s| s.name == names::EMOTION).unwrap();
    assert_eq!(emotion.kind, ParamKind::Int);
    assert!(!emotion.saved);
    let toggle = specs.iter().find(|s| s.name == names::LOVE_PULSE).unwrap();
    assert!(toggle.saved);
    assert_eq!(toggle.default, 1.0);
    let trigger = specs.iter().find(|s| s.name == names::HEARTBEAT_TRIGGER).unwrap();
    assert_eq!(
        *trigger,
        ParameterSpec {
            name: names::HEARTBEAT_TRIGGER,
            kind: ParamKind::Bool,
            default: 0.0,
            saved: false,
        }
    );
}

#[test]
fn disabled_effects_are_not_declared() {
    let mut config = AuraConfig::default();
    config.system.love_pulse = false;
    let sys = AuraSystem::new(config).unwrap();
    let specs = sys.declared_parameters();
    assert!(specs.iter().all(|s| s.name != names::LOVE_PULSE));
    assert!(specs.iter().all(|s| s.name != names::LOVE_PULSE_TRIGGER));
}

#[test]
fn full_scene_runs_every_effect() {
    let mut sys = system();
    let mut params = ParameterMap::new();
    params.set_int(names::EMOTION, 2);
    params.set_bool(names::LOVE_PULSE_TRIGGER, true);
    params.set_bool(names::IDLE_BLOOM_TRIGGER, true);
    params.set_bool(names::EYE_BEAM_FORCE, true);
    params.set_bool(names::HEARTBEAT_TRIGGER, true);
    let mut inputs = FrameInputs::new(&params);
    inputs.position = Some(Vec3::ZERO);
    inputs.gaze = Some(aura_fx::GazeSample {
        origin: Vec3::Y,
        forward: Vec3::Z,
        focus: None,
    });

    let out = sys.tick(DT, &inputs);
    let mut kinds = activated(&out);
    kinds.sort_by_key(|k| *k as usize);
    assert_eq!(kinds, EffectKind::ALL.to_vec());
    assert!(out.eye_focus.beam.is_some());
    assert_eq!(out.idle_bloom.flowers.len(), 8);
    assert!(out.sounds().count() >= 4);
}
