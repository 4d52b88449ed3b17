use glam::Vec2;
use std::{f32::consts::FRAC_PI_4, fmt};

/// Most segments a single tree frame may draw.
pub const MAX_BRANCHES: usize = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Config {
    pub canvas: CanvasSize,
    pub particles: ParticleConfig,
    pub tree: TreeConfig,
    /// Fixed seed for the sketch RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Particles scattered over the canvas by `setup`.
    pub initial_count: usize,
    /// Starting lifespan, which doubles as the starting alpha.
    pub lifespan: f32,
    /// Lifespan lost per update.
    pub decay: f32,
    pub gravity: Vec2,
    pub min_speed: f32,
    pub max_speed: f32,
    pub diameter: f32,
    /// Lower bound (inclusive) for each random RGB channel.
    pub channel_min: f32,
    /// Upper bound (exclusive) for each random RGB channel.
    pub channel_max: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig {
    pub trunk_len: f32,
    /// Branches at or below this length have no children.
    pub min_len: f32,
    pub branch_angle: f32,
    /// Length factor of the two side branches.
    pub split_factor: f32,
    /// Only branches longer than this grow the third, straighter branch.
    pub middle_min_len: f32,
    pub middle_factor: f32,
    /// The third branch turns by `branch_angle * middle_angle_factor`.
    pub middle_angle_factor: f32,
    /// Branches shorter than this carry a seasonal decoration.
    pub decoration_max_len: f32,
    pub ground_height: f32,
    /// Probability that a winter node gets a snow speckle.
    pub snow_chance: f64,
    /// Snow speckles land within `[-snow_spread, snow_spread)` of the node.
    pub snow_spread: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            initial_count: 100,
            lifespan: 255.0,
            decay: 2.0,
            gravity: Vec2::new(0.0, 0.1),
            min_speed: 1.0,
            max_speed: 3.0,
            diameter: 8.0,
            channel_min: 100.0,
            channel_max: 255.0,
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            trunk_len: 120.0,
            min_len: 10.0,
            branch_angle: FRAC_PI_4,
            split_factor: 0.67,
            middle_min_len: 40.0,
            middle_factor: 0.6,
            middle_angle_factor: 0.3,
            decoration_max_len: 30.0,
            ground_height: 50.0,
            snow_chance: 0.2,
            snow_spread: 10.0,
        }
    }
}

/// A rule violated by a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    CanvasSize { width: f32, height: f32 },
    Decay(f32),
    SpeedRange { min: f32, max: f32 },
    ChannelRange { min: f32, max: f32 },
    TrunkLen(f32),
    MinBranchLen(f32),
    ShrinkFactor { name: &'static str, value: f32 },
    SnowChance(f64),
    SnowSpread(f32),
    TooManyBranches { limit: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::CanvasSize { width, height } => {
                write!(f, "canvas size must be positive, got {width}x{height}")
            }
            ConfigError::Decay(v) => write!(f, "particle decay must be positive, got {v}"),
            ConfigError::SpeedRange { min, max } => {
                write!(f, "speed range {min}..{max} is empty")
            }
            ConfigError::ChannelRange { min, max } => {
                write!(f, "color channel range {min}..{max} is empty")
            }
            ConfigError::TrunkLen(v) => {
                write!(f, "trunk length must be positive, got {v}")
            }
            ConfigError::MinBranchLen(v) => {
                write!(f, "minimum branch length must be positive, got {v}")
            }
            ConfigError::ShrinkFactor { name, value } => {
                write!(f, "{name} must lie strictly between 0 and 1, got {value}")
            }
            ConfigError::SnowChance(v) => write!(f, "snow chance must lie in 0..=1, got {v}"),
            ConfigError::SnowSpread(v) => write!(f, "snow spread must be positive, got {v}"),
            ConfigError::TooManyBranches { limit } => {
                write!(f, "tree would draw more than {limit} branches")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_empty(min: f32, max: f32) -> bool {
    min.is_finite() && max.is_finite() && min < max
}

fn shrink(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ShrinkFactor { name, value })
    }
}

impl TreeConfig {
    /// Counts the segments a tree from `trunk_len` draws, giving up once
    /// the count passes `limit`.
    ///
    /// Mirrors the gates of [`crate::tree::TreeRenderer::branch`] without
    /// drawing. The early exit also bounds the recursion depth.
    ///
    /// ### Returns
    /// The segment count, or `None` if it exceeds `limit`.
    pub fn branch_count(&self, limit: usize) -> Option<usize> {
        let mut count = 0;
        let within = self.count_from(self.trunk_len, limit, &mut count);
        within.then_some(count)
    }

    fn count_from(&self, len: f32, limit: usize, count: &mut usize) -> bool {
        *count += 1;
        if *count > limit {
            return false;
        }
        if len <= self.min_len {
            return true;
        }
        let side = len * self.split_factor;
        self.count_from(side, limit, count)
            && self.count_from(side, limit, count)
            && (len <= self.middle_min_len
                || self.count_from(len * self.middle_factor, limit, count))
    }
}

impl Config {
    /// Checks every rule the sketches rely on.
    ///
    /// Empty ranges would panic inside the RNG. Shrink factors must stay
    /// below one and the whole tree within [`MAX_BRANCHES`] segments.
    ///
    /// ### Returns
    /// The first violated rule, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasSize { width, height } = self.canvas;
        if !positive(width) || !positive(height) {
            return Err(ConfigError::CanvasSize { width, height });
        }

        let p = &self.particles;
        if !positive(p.decay) {
            return Err(ConfigError::Decay(p.decay));
        }
        if !non_empty(p.min_speed, p.max_speed) {
            return Err(ConfigError::SpeedRange {
                min: p.min_speed,
                max: p.max_speed,
            });
        }
        if !non_empty(p.channel_min, p.channel_max) {
            return Err(ConfigError::ChannelRange {
                min: p.channel_min,
                max: p.channel_max,
            });
        }

        let t = &self.tree;
        if !positive(t.trunk_len) {
            return Err(ConfigError::TrunkLen(t.trunk_len));
        }
        if !positive(t.min_len) {
            return Err(ConfigError::MinBranchLen(t.min_len));
        }
        shrink("split_factor", t.split_factor)?;
        shrink("middle_factor", t.middle_factor)?;
        if t.branch_count(MAX_BRANCHES).is_none() {
            return Err(ConfigError::TooManyBranches {
                limit: MAX_BRANCHES,
            });
        }
        if !(0.0..=1.0).contains(&t.snow_chance) {
            return Err(ConfigError::SnowChance(t.snow_chance));
        }
        if !positive(t.snow_spread) {
            return Err(ConfigError::SnowSpread(t.snow_spread));
        }

        Ok(())
    }
}
