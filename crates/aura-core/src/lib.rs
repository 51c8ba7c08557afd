//! Engine-agnostic building blocks for reactive avatar effects.
//!
//! Everything here is a plain value type advanced by an explicit
//! `tick(dt, ..)`; nothing reads clocks or global state.

pub mod bloom;
pub mod constants;
pub mod crossfade;
pub mod mesh;
pub mod motion;
pub mod pulse;
pub mod ripple;
pub mod trigger;

pub use bloom::*;
pub use crossfade::*;
pub use mesh::*;
pub use motion::*;
pub use pulse::*;
pub use ripple::*;
pub use trigger::*;
