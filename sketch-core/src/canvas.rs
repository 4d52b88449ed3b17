//! Drawing surface the sketches render onto.
//!
//! Sketches only ever talk to the [`Canvas`] trait. The core ships one
//! implementation, [`DrawList`], which records every primitive as a
//! [`Shape`] in draw order; tests inspect it and the viewer paints it.

use crate::color::Rgba;
use glam::Vec2;

/// Text anchored at its left baseline, sized in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
    pub content: String,
}

/// One recorded drawing primitive, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Fills the whole canvas.
    Background(Rgba),
    /// Axis-aligned filled rectangle from its top-left corner.
    Rect { min: Vec2, size: Vec2, fill: Rgba },
    /// Filled circle without outline.
    Circle {
        center: Vec2,
        diameter: f32,
        fill: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Text(Text),
}

pub trait Canvas {
    fn background(&mut self, color: Rgba);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, fill: Rgba);
    fn fill_circle(&mut self, center: Vec2, diameter: f32, fill: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn text(&mut self, pos: Vec2, size: f32, color: Rgba, content: &str);
}

/// A [`Canvas`] that records shapes instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.shapes.iter().filter_map(|s| match *s {
            Shape::Circle {
                center,
                diameter,
                fill,
            } => Some((center, diameter, fill)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, f32)> + '_ {
        self.shapes.iter().filter_map(|s| match *s {
            Shape::Line {
                from, to, width, ..
            } => Some((from, to, width)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn background(&mut self, color: Rgba) {
        self.shapes.push(Shape::Background(color));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, fill: Rgba) {
        self.shapes.push(Shape::Rect { min, size, fill });
    }

    fn fill_circle(&mut self, center: Vec2, diameter: f32, fill: Rgba) {
        self.shapes.push(Shape::Circle {
            center,
            diameter,
            fill,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.shapes.push(Shape::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn text(&mut self, pos: Vec2, size: f32, color: Rgba, content: &str) {
        self.shapes.push(Shape::Text(Text {
            pos,
            size,
            color,
            content: content.to_owned(),
        }));
    }
}

/// Linearly re-maps `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// The result is not clamped, so values outside the input range
/// extrapolate along the same line.
#[inline]
pub fn map_range(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_hits_endpoints() {
        assert_eq!(map_range(10.0, 10.0, 120.0, 1.0, 15.0), 1.0);
        assert_eq!(map_range(120.0, 10.0, 120.0, 1.0, 15.0), 15.0);
    }

    #[test]
    fn map_range_extrapolates_outside_input_range() {
        let below = map_range(5.0, 10.0, 120.0, 1.0, 15.0);
        assert!(below < 1.0 && below > 0.0, "got {below}");

        let above = map_range(230.0, 10.0, 120.0, 1.0, 15.0);
        assert!((above - 29.0).abs() < 1e-4, "got {above}");
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.background(Rgba::BLACK);
        list.fill_circle(Vec2::new(1.0, 2.0), 8.0, Rgba::WHITE);
        list.text(Vec2::ZERO, 14.0, Rgba::WHITE, "hi");

        assert_eq!(list.len(), 3);
        assert_eq!(list.shapes[0], Shape::Background(Rgba::BLACK));
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.texts().next().map(|t| t.content.as_str()), Some("hi"));

        list.clear();
        assert!(list.is_empty());
    }
}
