//! Core logic for two interactive 2-D sketches.
//!
//! Main components:
//! - [`particle_system`] — emitter that spawns fading particles at the pointer.
//! - [`particle`] — a single decaying particle.
//! - [`tree`] — recursive fractal tree decorated by season.
//! - [`season`] — pointer-to-season mapping and palettes.
//! - [`sketch`] — the setup/frame lifecycle a host drives.
//! - [`canvas`] — drawing surface trait and the recording [`canvas::DrawList`].
//! - [`config`] — tunable parameters and their validation.
//! - [`color`] — RGBA color on a 0..255 scale.
//! - [`types`] — shared input types.

pub mod canvas;
pub mod color;
pub mod config;
pub mod particle;
pub mod particle_system;
pub mod season;
pub mod sketch;
pub mod tree;
pub mod types;
