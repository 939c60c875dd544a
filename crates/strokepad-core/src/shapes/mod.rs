//! Shape definitions for the editor.

mod stroke;

pub use kurbo::Point;
pub use stroke::Stroke;

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn yellow() -> Self {
        Self::new(255, 255, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Presentation attributes of a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in screen pixels (divided by the shape's scale when drawn).
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }

    /// Style used to draw the halo behind the highlighted stroke.
    pub fn highlight() -> Self {
        Self::new(SerializableColor::yellow(), 6.0)
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 2.0)
    }
}

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a floating point coordinate down onto the pixel grid.
    pub fn floor(point: Point) -> Self {
        Self::new(point.x.floor() as i32, point.y.floor() as i32)
    }

    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// An integer pixel translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    pub dx: i32,
    pub dy: i32,
}

impl PixelOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Pixel delta between two pointer positions, `to - from`, floored.
    pub fn between(from: Point, to: Point) -> Self {
        Self::new((to.x - from.x).floor() as i32, (to.y - from.y).floor() as i32)
    }

    pub fn to_vec2(self) -> kurbo::Vec2 {
        kurbo::Vec2::new(f64::from(self.dx), f64::from(self.dy))
    }
}

/// Saturates at the `i32` range, so huge drags clamp instead of overflowing.
impl Add for PixelOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx.saturating_add(rhs.dx), self.dy.saturating_add(rhs.dy))
    }
}

impl Sub for PixelOffset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dx.saturating_sub(rhs.dx), self.dy.saturating_sub(rhs.dy))
    }
}
