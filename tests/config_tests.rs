// Config defaults, TOML loading and validation.

use aura_fx::{AuraConfig, ConfigError};
use aura_fx::aura_core::Emotion;

#[test]
fn defaults_match_tuned_values() {
    let c = AuraConfig::default();
    assert!(c.system.enabled);
    assert_eq!(c.heartbeat.speed, 1.2);
    assert_eq!(c.heartbeat.trigger_radius, 0.3);
    assert_eq!(c.eye_focus.gaze_threshold, 0.8);
    assert_eq!(c.eye_focus.focus_hold_sec, 0.5);
    assert_eq!(c.love_pulse.detection_distance, 3.0);
    assert_eq!(c.love_pulse.accumulation_sec, 3.0);
    assert_eq!(c.idle_bloom.idle_sec, 10.0);
    assert_eq!(c.idle_bloom.flower_count, 8);
    assert_eq!(c.clone().validated().unwrap(), c);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let text = r#"
        [heartbeat]
        speed = 2.0

        [system]
        love_pulse = false
    "#;
    let c = AuraConfig::from_toml_str(text).unwrap();
    assert_eq!(c.heartbeat.speed, 2.0);
    assert_eq!(c.heartbeat.intensity, 0.8);
    assert!(!c.system.love_pulse);
    assert!(c.system.idle_bloom);
    assert_eq!(c.eye_focus, AuraConfig::default().eye_focus);
}

#[test]
fn out_of_range_values_are_clamped() {
    let text = r#"
        [heartbeat]
        speed = 9.0
        ripple_count = 12

        [idle_bloom]
        idle_sec = 1.0
        flower_count = 40

        [eye_focus]
        ray_length = 0.2
        color = [2.0, 0.5, -1.0, 1.0]
    "#;
    let c = AuraConfig::from_toml_str(text).unwrap();
    assert_eq!(c.heartbeat.speed, 3.0);
    assert_eq!(c.heartbeat.ripple_count, 5);
    assert_eq!(c.idle_bloom.idle_sec, 5.0);
    assert_eq!(c.idle_bloom.flower_count, 15);
    assert_eq!(c.eye_focus.ray_length, 1.0);
    assert_eq!(c.eye_focus.color, [1.0, 0.5, 0.0, 1.0]);
}

#[test]
fn non_finite_values_are_rejected() {
    let text = "[love_pulse]\nintensity = nan\n";
    match AuraConfig::from_toml_str(text) {
        Err(ConfigError::NonFinite { field }) => assert_eq!(field, "love_pulse.intensity"),
        other => panic!("expected NonFinite, got {other:?}"),
    }
}

#[test]
fn empty_flower_palette_is_rejected() {
    let text = "[idle_bloom]\nflower_colors = []\n";
    assert!(matches!(
        AuraConfig::from_toml_str(text),
        Err(ConfigError::EmptyPalette { .. })
    ));
}

#[test]
fn duplicate_emotion_values_are_rejected() {
    let text = "[emotion_aura]\nemotion_values = [0, 1, 2, 3, 4, 5, 6, 1]\n";
    assert!(matches!(
        AuraConfig::from_toml_str(text),
        Err(ConfigError::DuplicateEmotionValue { value: 1 })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = AuraConfig::from_toml_str("[heartbeat\nspeed = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse config"));
}

#[test]
fn toml_round_trip_preserves_config() {
    let mut c = AuraConfig::default();
    c.love_pulse.particle_count = 30;
    c.emotion_aura.retrigger_from_blend = true;
    let text = c.to_toml_string().unwrap();
    assert_eq!(AuraConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn custom_emotion_mapping() {
    let text = "[emotion_aura]\nemotion_values = [10, 11, 12, 13, 14, 15, 16, 17]\n";
    let c = AuraConfig::from_toml_str(text).unwrap();
    assert_eq!(c.emotion_aura.emotion_for_value(14), Some(Emotion::Angry));
    assert_eq!(c.emotion_aura.emotion_for_value(0), None);
}

#[test]
fn gaze_angle_from_threshold() {
    let c = AuraConfig::default();
    let deg = c.eye_focus.gaze_angle_rad().to_degrees();
    assert!((deg - 36.87).abs() < 0.01);
}
