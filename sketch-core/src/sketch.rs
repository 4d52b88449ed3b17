use crate::{
    canvas::Canvas, config::Config, particle_system::ParticleFrame, tree::TreeFrame,
    types::PointerState,
};
use rand::RngCore;

/// What a sketch reports about the frame it just drew.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSummary {
    Particles(ParticleFrame),
    Tree(TreeFrame),
}

/// Lifecycle the host run-loop drives: `setup` once, then `frame` per tick.
///
/// Both hooks take trait objects so a host can hold either sketch behind
/// a `Box<dyn Sketch>` or switch between concrete ones at runtime.
pub trait Sketch {
    fn name(&self) -> &'static str;

    /// Resets the sketch to its initial state.
    fn setup(&mut self, rng: &mut dyn RngCore);

    /// Advances one tick and draws it onto `canvas`.
    fn frame(
        &mut self,
        pointer: &PointerState,
        canvas: &mut dyn Canvas,
        rng: &mut dyn RngCore,
    ) -> FrameSummary;

    /// Replaces the sketch's configuration. Takes effect from the next frame.
    fn set_config(&mut self, cfg: &Config);
}
