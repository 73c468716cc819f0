//! Configuration Model
//!
//! The payload plus visual style that fully determines a rendered symbol,
//! and the reducer every mutation goes through.

pub mod model;
pub mod presets;
pub mod types;

pub use model::{apply, apply_patch, clamp_logo_scale, reset, ConfigPatch, ConfigUpdate};
pub use presets::{find_preset, Preset, PRESETS};
pub use types::*;
