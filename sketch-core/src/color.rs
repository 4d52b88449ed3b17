/// An RGBA color with channels on a `0..=255` scale.
///
/// Channels are stored as `f32` and are not clamped here: a particle's
/// alpha keeps falling below zero on its last update and the painter is
/// expected to clamp when converting to an 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::gray(0.0);
    pub const WHITE: Rgba = Rgba::gray(255.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 255.0)
    }

    pub const fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Clamps every channel into `0..=255` and rounds to bytes, in `[r, g, b, a]` order.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| c.clamp(0.0, 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_rgba8_clamps_out_of_range_channels() {
        let c = Rgba::new(300.0, 127.6, 0.0, -1.0);
        assert_eq!(c.to_rgba8(), [255, 128, 0, 0]);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Rgba::rgb(10.0, 20.0, 30.0).with_alpha(-4.0);
        assert_eq!(c, Rgba::new(10.0, 20.0, 30.0, -4.0));
    }
}
