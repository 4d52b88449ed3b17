use crate::color::Rgba;

const GRASS: Rgba = Rgba::rgb(34.0, 139.0, 34.0);

/// Render mode of the tree sketch, chosen by the pointer's x position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Splits the canvas into four equal vertical bands, left to right.
    ///
    /// `x` is not constrained: anything left of the canvas is spring and
    /// anything at or past its right edge is winter.
    pub fn from_pointer_x(x: f32, width: f32) -> Season {
        let band = (x / width * 4.0).floor();
        // NaN (zero width with x == 0) falls through to spring.
        let index = if band >= 3.0 {
            3
        } else if band >= 0.0 {
            band as usize
        } else {
            0
        };
        Season::ALL[index]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    pub fn background(self) -> Rgba {
        match self {
            Season::Spring => Rgba::rgb(200.0, 250.0, 200.0),
            Season::Summer => Rgba::rgb(100.0, 200.0, 250.0),
            Season::Fall => Rgba::rgb(250.0, 200.0, 100.0),
            Season::Winter => Rgba::rgb(240.0, 240.0, 255.0),
        }
    }

    /// Grass for every season except winter, which is snow.
    pub fn ground(self) -> Rgba {
        match self {
            Season::Winter => Rgba::WHITE,
            _ => GRASS,
        }
    }
}
