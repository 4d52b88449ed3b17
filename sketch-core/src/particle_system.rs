//! Particle emitter sketch.
//!
//! Each frame:
//! 1. Clear to black.
//! 2. Spawn one particle at the pointer while it is pressed.
//! 3. Update and render every particle.
//! 4. Drop particles whose lifespan fell below zero.
//! 5. Draw the particle count.

use crate::{
    canvas::Canvas,
    color::Rgba,
    config::{CanvasSize, Config, ParticleConfig},
    particle::Particle,
    sketch::{FrameSummary, Sketch},
    types::PointerState,
};
use glam::Vec2;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

const OVERLAY_POS: Vec2 = Vec2::new(10.0, 20.0);
const OVERLAY_SIZE: f32 = 14.0;

/// Summary of one [`ParticleSystem::frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticleFrame {
    pub spawned: usize,
    pub expired: usize,
    pub alive: usize,
}

#[derive(Debug)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    cfg: ParticleConfig,
    canvas: CanvasSize,
}

impl ParticleSystem {
    pub fn new(cfg: &Config) -> Self {
        Self {
            particles: Vec::new(),
            cfg: cfg.particles,
            canvas: cfg.canvas,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Replaces all particles with `initial_count` fresh ones scattered
    /// uniformly over the canvas.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let CanvasSize { width, height } = self.canvas;
        self.particles = (0..self.cfg.initial_count)
            .map(|_| {
                let pos = Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
                Particle::spawn(pos, &self.cfg, rng)
            })
            .collect();

        debug!(count = self.particles.len(), "particle system initialized");
    }

    /// Runs one tick of the emitter and draws it onto `canvas`.
    ///
    /// Expired particles are removed with [`Vec::retain`], which keeps the
    /// survivors in their original order.
    ///
    /// ### Returns
    /// How many particles were spawned, expired and are still alive.
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        pointer: &PointerState,
        canvas: &mut dyn Canvas,
        rng: &mut R,
    ) -> ParticleFrame {
        canvas.background(Rgba::BLACK);

        let mut spawned = 0;
        if pointer.pressed {
            self.particles.push(Particle::spawn(pointer.pos, &self.cfg, rng));
            spawned = 1;
        }

        for p in &mut self.particles {
            p.update();
            p.render(canvas);
        }

        let before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        let alive = self.particles.len();

        canvas.text(
            OVERLAY_POS,
            OVERLAY_SIZE,
            Rgba::WHITE,
            &format!("Particles: {alive}"),
        );

        let stats = ParticleFrame {
            spawned,
            expired: before - alive,
            alive,
        };
        trace!(?stats, "particle frame");
        stats
    }
}

impl Sketch for ParticleSystem {
    fn name(&self) -> &'static str {
        "Particles"
    }

    fn setup(&mut self, rng: &mut dyn RngCore) {
        self.initialize(rng);
    }

    fn frame(
        &mut self,
        pointer: &PointerState,
        canvas: &mut dyn Canvas,
        rng: &mut dyn RngCore,
    ) -> FrameSummary {
        FrameSummary::Particles(ParticleSystem::frame(self, pointer, canvas, rng))
    }

    fn set_config(&mut self, cfg: &Config) {
        self.cfg = cfg.particles;
        self.canvas = cfg.canvas;
    }
}
