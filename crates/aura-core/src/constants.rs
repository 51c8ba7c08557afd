use glam::Vec3;

// Shared timing/geometry tuning constants used by every effect.

// Heartbeat waveform
pub const WAVE_CYCLE_SPAN: f32 = 10.0; // one phase cycle is mapped onto 0..10
pub const WAVE_FIRST_BUMP_CENTER: f32 = 2.0;
pub const WAVE_SECOND_BUMP_CENTER: f32 = 4.0;
pub const WAVE_SECOND_BUMP_WEIGHT: f32 = 0.7;
pub const BEAT_THRESHOLD: f32 = 0.8; // wave level that counts as a beat
pub const BEAT_RISE_PHASE: f64 = 0.152_56; // cycle offset where the first bump rises through BEAT_THRESHOLD
pub const BASELINE_BPM: f32 = 72.0;
pub const PULSE_SPEED_MAX: f32 = 3.0;

// Trigger accumulation
pub const LOVE_DECAY_RATE: f32 = 2.0; // love drains twice as fast as it builds

// Ripples
pub const RIPPLE_SPEED: f32 = 5.0; // radius units per second
pub const RIPPLE_POOL_MAX: usize = 5;

// Blooms
pub const BLOOM_WITHER_SEC: f32 = 2.0;
pub const BLOOM_ALPHA_SCALE: f32 = 0.8; // alpha at full growth
pub const FLOWER_PETALS: usize = 5;
pub const PETAL_INNER_RADIUS: f32 = 0.3;
pub const PETAL_TIP_RADIUS: f32 = 0.5;
pub const PETAL_TIP_HEIGHT: f32 = 0.1;
pub const PETAL_TIP_TWIST_RAD: f32 = 0.2;
pub const GROUND_FALLBACK_DROP: f32 = 1.0; // feet sit this far below the root when no ground is known

// Motion
pub const DEFAULT_MOTION_EPSILON: f32 = 0.02;

// Default palette for idle flowers
pub const DEFAULT_FLOWER_COLORS: [[f32; 4]; 4] = [
    [1.0, 0.7, 0.8, 0.8], // pink
    [0.8, 0.9, 1.0, 0.8], // pale blue
    [1.0, 1.0, 0.7, 0.8], // pale yellow
    [0.9, 0.8, 1.0, 0.8], // lavender
];

#[inline]
pub fn ground_fallback_offset() -> Vec3 {
    Vec3::new(0.0, -GROUND_FALLBACK_DROP, 0.0)
}
