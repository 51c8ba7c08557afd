//! Headless runner: drives the aura system through a scripted avatar
//! timeline at a fixed frame rate and logs everything it emits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use aura_fx::{
    params::names, AuraConfig, AuraSystem, FrameInputs, FxEvent, GazeSample, ParameterMap,
    ViewerPose,
};
use glam::Vec3;
use rand::prelude::*;

const FRAME_HZ: u32 = 60;
const JITTER: f32 = 0.002; // well under the default motion epsilon

struct Args {
    config: Option<PathBuf>,
    seconds: f32,
    seed: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        seconds: 30.0,
        seed: 7,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--seconds" => {
                args.seconds = value()?.parse().context("--seconds must be a number")?;
            }
            "--seed" => args.seed = value()?.parse().context("--seed must be an integer")?,
            other => bail!("unknown argument {other}"),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AuraConfig> {
    let Some(path) = path else {
        return Ok(AuraConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    AuraConfig::from_toml_str(&text).with_context(|| format!("loading {}", path.display()))
}

/// Avatar samples for time `t` along the demo script.
struct Script {
    rng: StdRng,
    friend: Vec3,
}

impl Script {
    fn frame(&mut self, t: f32, params: &mut ParameterMap) -> Sample {
        let walking = t < 2.0;
        let x = if walking { t } else { 2.0 };
        let jitter = Vec3::new(
            self.rng.gen_range(-JITTER..JITTER),
            0.0,
            self.rng.gen_range(-JITTER..JITTER),
        );
        let position = Vec3::new(x, 0.0, 0.0) + if walking { Vec3::ZERO } else { jitter * 0.5 };
        let chest = position + Vec3::new(0.0, 1.3, 0.0);

        params.set_bool(names::IS_MOVING, walking);
        params.set_int(names::EMOTION, if t >= 1.0 { 1 } else { 0 });

        let hand_on_chest = (2.0..4.0).contains(&t);
        let hands = [
            Some(if hand_on_chest {
                chest + Vec3::new(0.1, 0.0, 0.1)
            } else {
                chest + Vec3::new(0.5, -0.6, 0.0)
            }),
            Some(chest + Vec3::new(-0.5, -0.6, 0.0)),
        ];

        let eye = chest + Vec3::new(0.0, 0.3, 0.0);
        let staring = (4.0..6.0).contains(&t);
        let gaze = GazeSample {
            origin: eye,
            forward: if staring { Vec3::Z } else { Vec3::NEG_Y },
            focus: staring.then(|| eye + Vec3::Z * 2.0),
        };

        let admiring = (6.0..10.0).contains(&t);
        let viewer = ViewerPose {
            position: eye,
            forward: if admiring {
                (self.friend - eye).normalize_or_zero()
            } else {
                Vec3::NEG_Z
            },
        };

        Sample {
            position,
            chest,
            hands,
            gaze,
            viewer,
        }
    }
}

struct Sample {
    position: Vec3,
    chest: Vec3,
    hands: [Option<Vec3>; 2],
    gaze: GazeSample,
    viewer: ViewerPose,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;
    let mut system = AuraSystem::new(config).context("building aura system")?;
    for param in system.declared_parameters() {
        log::debug!("parameter {} {:?} default={}", param.name, param.kind, param.default);
    }

    let friend = Vec3::new(2.0, 1.6, 2.0);
    let targets = [friend];
    let mut script = Script {
        rng: StdRng::seed_from_u64(args.seed),
        friend,
    };
    let mut params = ParameterMap::new();
    let dt = Duration::from_secs_f64(1.0 / FRAME_HZ as f64);
    let frames = (args.seconds.max(0.0) * FRAME_HZ as f32).round() as u32;

    let mut beats = 0usize;
    for frame in 0..frames {
        let t = frame as f32 / FRAME_HZ as f32;
        let sample = script.frame(t, &mut params);
        let mut inputs = FrameInputs::new(&params);
        inputs.position = Some(sample.position);
        inputs.chest = Some(sample.chest);
        inputs.hands = sample.hands;
        inputs.gaze = Some(sample.gaze);
        inputs.viewer = Some(sample.viewer);
        inputs.targets = &targets;

        let out = system.tick(dt, &inputs);
        for event in &out.events {
            match event {
                FxEvent::RippleFired { .. } | FxEvent::HeartBurst { .. } => beats += 1,
                _ => {}
            }
            log::info!("t={t:6.2}s {event:?}");
        }
        if frame % FRAME_HZ == 0 {
            log::debug!(
                "t={t:6.2}s emotion={:?} heart={:.2} love={:.2} idle={:.1}s bloom={:.2}",
                out.emotion_aura.emotion,
                out.heartbeat.wave,
                out.love_pulse.love,
                out.idle_bloom.idle_sec,
                out.idle_bloom.growth,
            );
        }
    }

    let petals = system.idle_bloom().mesh();
    log::info!(
        "ran {frames} frames, {beats} beat events, flower mesh {} triangles ({} vertex bytes)",
        petals.triangle_count(),
        petals.vertex_bytes().len(),
    );
    Ok(())
}
