use glam::Vec2;

/// Pointer state handed to a sketch once per frame.
///
/// `pos` is in canvas coordinates (origin top-left, y down) and is not
/// constrained to the canvas: the pointer may sit outside it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    pub pressed: bool,
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            pressed: false,
        }
    }

    pub fn pressed_at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            pressed: true,
        }
    }
}
