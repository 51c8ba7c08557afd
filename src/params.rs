//! Avatar parameter polling.
//!
//! The host owns the real parameter store; effects only ever ask for a value
//! by name each tick and remember what they saw last, so toggles and manual
//! triggers are seen as edges instead of levels.

use fnv::FnvHashMap;

/// Names of the parameters the effects poll.
pub mod names {
    pub const SYSTEM_ENABLED: &str = "ReactiveAuraFX/SystemEnabled";
    pub const EMOTION_AURA: &str = "ReactiveAuraFX/EmotionAura";
    pub const HEARTBEAT_GLOW: &str = "ReactiveAuraFX/HeartbeatGlow";
    pub const EYE_FOCUS_RAY: &str = "ReactiveAuraFX/EyeFocusRay";
    pub const LOVE_PULSE: &str = "ReactiveAuraFX/LovePulse";
    pub const IDLE_BLOOM: &str = "ReactiveAuraFX/IdleBloom";

    pub const EMOTION: &str = "Emotion";
    pub const HEARTBEAT_TRIGGER: &str = "HeartbeatTrigger";
    pub const EYE_BEAM_FORCE: &str = "EyeBeamForce";
    pub const LOVE_PULSE_TRIGGER: &str = "LovePulseTrigger";
    pub const IDLE_BLOOM_TRIGGER: &str = "IdleBloomTrigger";
    pub const IS_MOVING: &str = "IsMoving";
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// Read access to the host's parameters. A missing parameter is `None` and
/// the caller treats it as "nothing to report".
pub trait ParameterSource {
    fn get(&self, name: &str) -> Option<ParamValue>;

    fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ParamValue::Bool(b) => Some(b),
            ParamValue::Int(i) => Some(i != 0),
            ParamValue::Float(f) => Some(f > 0.5),
        }
    }

    fn get_int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ParamValue::Bool(b) => Some(b as i32),
            ParamValue::Int(i) => Some(i),
            ParamValue::Float(f) if f.is_finite() => Some(f.round() as i32),
            ParamValue::Float(_) => None,
        }
    }
}

/// Source with no parameters at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoParameters;

impl ParameterSource for NoParameters {
    fn get(&self, _name: &str) -> Option<ParamValue> {
        None
    }
}

/// Simple in-memory parameter store.
#[derive(Clone, Debug, Default)]
pub struct ParameterMap {
    values: FnvHashMap<String, ParamValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set(name, ParamValue::Bool(value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, ParamValue::Int(value));
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, ParamValue::Float(value));
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParameterSource for ParameterMap {
    fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    None,
    Rising,
    Falling,
}

/// Edge detector over a polled bool. A missing value keeps the memo and
/// reports no edge.
#[derive(Clone, Copy, Debug)]
pub struct BoolEdge {
    last: bool,
}

impl BoolEdge {
    pub fn new(initial: bool) -> Self {
        Self { last: initial }
    }

    pub fn last(&self) -> bool {
        self.last
    }

    pub fn poll(&mut self, value: Option<bool>) -> Edge {
        let Some(value) = value else {
            return Edge::None;
        };
        let edge = match (self.last, value) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::None,
        };
        self.last = value;
        edge
    }
}

/// Reports a polled value only when it differs from the last one seen.
#[derive(Clone, Copy, Debug)]
pub struct ChangeWatch<T> {
    last: T,
}

impl<T: Copy + PartialEq> ChangeWatch<T> {
    pub fn new(initial: T) -> Self {
        Self { last: initial }
    }

    pub fn last(&self) -> T {
        self.last
    }

    pub fn poll(&mut self, value: Option<T>) -> Option<T> {
        let value = value?;
        if value == self.last {
            return None;
        }
        self.last = value;
        Some(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
}

/// Declaration of one parameter the host should provide.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: f32,
    pub saved: bool,
}
