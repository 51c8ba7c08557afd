//! Emotion categories and the crossfade between their aura looks.

use glam::Vec4;
use std::time::Duration;

/// Discrete emotion reported by the avatar's expression parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Love,
    Shy,
    Angry,
    Sad,
    Excited,
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Love,
        Emotion::Shy,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Excited,
        Emotion::Calm,
    ];

    /// Map the integer expression parameter onto an emotion.
    pub fn from_parameter(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn parameter_value(self) -> i32 {
        self as i32
    }

    /// Particles per second the aura emits for this emotion.
    pub fn emission_rate(self) -> f32 {
        match self {
            Emotion::Neutral => 30.0,
            Emotion::Happy => 35.0,
            Emotion::Love => 40.0,
            Emotion::Shy => 20.0,
            Emotion::Angry => 45.0,
            Emotion::Sad => 15.0,
            Emotion::Excited => 50.0,
            Emotion::Calm => 25.0,
        }
    }

    pub fn light_intensity(self) -> f32 {
        match self {
            Emotion::Neutral => 0.5,
            Emotion::Happy => 0.9,
            Emotion::Love => 0.8,
            Emotion::Shy => 0.4,
            Emotion::Angry => 1.0,
            Emotion::Sad => 0.3,
            Emotion::Excited => 1.2,
            Emotion::Calm => 0.6,
        }
    }
}

/// RGBA aura color per emotion, indexed in [`Emotion::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct EmotionPalette {
    pub colors: [Vec4; 8],
}

impl Default for EmotionPalette {
    fn default() -> Self {
        Self {
            colors: [
                Vec4::new(0.8, 0.8, 0.8, 0.3),
                Vec4::new(1.0, 1.0, 0.3, 0.5),
                Vec4::new(1.0, 0.3, 0.5, 0.6),
                Vec4::new(1.0, 0.7, 0.7, 0.4),
                Vec4::new(1.0, 0.2, 0.2, 0.7),
                Vec4::new(0.4, 0.4, 1.0, 0.4),
                Vec4::new(1.0, 0.5, 0.0, 0.8),
                Vec4::new(0.3, 0.8, 0.5, 0.3),
            ],
        }
    }
}

impl EmotionPalette {
    pub fn color(&self, emotion: Emotion) -> Vec4 {
        self.colors[emotion as usize]
    }

    pub fn look(&self, emotion: Emotion) -> AuraLook {
        AuraLook {
            color: self.color(emotion),
            light_intensity: emotion.light_intensity(),
        }
    }
}

/// The interpolated quantities of an aura.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AuraLook {
    pub color: Vec4,
    pub light_intensity: f32,
}

impl AuraLook {
    pub fn lerp(self, other: AuraLook, t: f32) -> AuraLook {
        let t = t.clamp(0.0, 1.0);
        AuraLook {
            color: self.color.lerp(other.color, t),
            light_intensity: self.light_intensity + (other.light_intensity - self.light_intensity) * t,
        }
    }
}

/// Where a retriggered transition starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetriggerMode {
    /// Restart from the previous discrete emotion. A retrigger mid-flight
    /// snaps the look back to that emotion's palette entry.
    #[default]
    FromPrevious,
    /// Restart from the look blended on the last tick.
    FromBlend,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossfadeState {
    Steady(Emotion),
    Transitioning {
        from: Emotion,
        to: Emotion,
        progress: f32,
    },
}

#[derive(Clone, Debug)]
pub struct EmotionCrossfade {
    state: CrossfadeState,
    speed: f32,
    mode: RetriggerMode,
    palette: EmotionPalette,
    start_look: AuraLook,
    blended: AuraLook,
}

impl EmotionCrossfade {
    pub fn new(initial: Emotion, speed: f32, palette: EmotionPalette) -> Self {
        let look = palette.look(initial);
        Self {
            state: CrossfadeState::Steady(initial),
            speed,
            mode: RetriggerMode::default(),
            palette,
            start_look: look,
            blended: look,
        }
    }

    pub fn with_retrigger_mode(mut self, mode: RetriggerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> CrossfadeState {
        self.state
    }

    /// The emotion the aura is heading to (or resting at).
    pub fn target(&self) -> Emotion {
        match self.state {
            CrossfadeState::Steady(e) => e,
            CrossfadeState::Transitioning { to, .. } => to,
        }
    }

    pub fn progress(&self) -> f32 {
        match self.state {
            CrossfadeState::Steady(_) => 1.0,
            CrossfadeState::Transitioning { progress, .. } => progress,
        }
    }

    pub fn blended(&self) -> AuraLook {
        self.blended
    }

    pub fn palette(&self) -> &EmotionPalette {
        &self.palette
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Head towards `emotion`. Asking for the current target does nothing.
    pub fn set_target(&mut self, emotion: Emotion) {
        let previous = self.target();
        if previous == emotion {
            return;
        }
        self.start_look = match self.mode {
            RetriggerMode::FromPrevious => self.palette.look(previous),
            RetriggerMode::FromBlend => self.blended,
        };
        log::debug!("emotion crossfade {previous:?} -> {emotion:?}");
        self.state = CrossfadeState::Transitioning {
            from: previous,
            to: emotion,
            progress: 0.0,
        };
    }

    pub fn tick(&mut self, dt: Duration) -> AuraLook {
        if let CrossfadeState::Transitioning { from, to, progress } = self.state {
            let progress = (progress + dt.as_secs_f32() * self.speed).clamp(0.0, 1.0);
            self.blended = self.start_look.lerp(self.palette.look(to), progress);
            self.state = if progress >= 1.0 {
                CrossfadeState::Steady(to)
            } else {
                CrossfadeState::Transitioning { from, to, progress }
            };
        }
        self.blended
    }
}
