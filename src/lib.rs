//! Reactive avatar effects driven by proximity, gaze, emotion and stillness.
//!
//! [`AuraSystem`] owns the five effects and is advanced once per frame with
//! [`FrameInputs`]; everything it produces comes back as [`FrameOutputs`].
//! The engine-agnostic primitives live in [`aura_core`].

pub mod config;
pub mod effects;
pub mod error;
pub mod frame;
pub mod params;
pub mod system;

pub use aura_core;
pub use config::*;
pub use effects::*;
pub use error::ConfigError;
pub use frame::*;
pub use params::{
    BoolEdge, ChangeWatch, Edge, NoParameters, ParamKind, ParamValue, ParameterMap,
    ParameterSource, ParameterSpec,
};
pub use system::AuraSystem;
