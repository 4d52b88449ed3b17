use crate::{canvas::Canvas, color::Rgba, config::ParticleConfig};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// A decaying point mass whose lifespan doubles as its alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub lifespan: f32,
    pub decay: f32,
    pub diameter: f32,
    pub color: Rgba,
}

impl Particle {
    /// Spawns a particle at `pos` moving in a random direction.
    ///
    /// The speed is drawn from `min_speed..max_speed` and every RGB
    /// channel from `channel_min..channel_max`; alpha starts at the
    /// configured lifespan.
    ///
    /// ### Panics
    /// Panics if either range is empty. [`crate::config::Config::validate`]
    /// rejects such configurations.
    pub fn spawn<R: Rng + ?Sized>(pos: Vec2, cfg: &ParticleConfig, rng: &mut R) -> Self {
        let dir = Vec2::from_angle(rng.random_range(0.0..TAU));
        let speed = rng.random_range(cfg.min_speed..cfg.max_speed);

        let mut channel = || rng.random_range(cfg.channel_min..cfg.channel_max);
        let color = Rgba::new(channel(), channel(), channel(), cfg.lifespan);

        Self {
            pos,
            vel: dir * speed,
            acc: cfg.gravity,
            lifespan: cfg.lifespan,
            decay: cfg.decay,
            diameter: cfg.diameter,
            color,
        }
    }

    pub fn update(&mut self) {
        self.vel += self.acc;
        self.pos += self.vel;
        self.lifespan -= self.decay;
        self.color.a = self.lifespan;
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.pos, self.diameter, self.color);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifespan < 0.0
    }
}
