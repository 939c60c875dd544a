//! Drawing surface abstraction that strokes render onto.

use crate::shapes::PixelPoint;
use kurbo::{Affine, Point};
use peniko::Color;

/// A 2D drawing target with a current transform and stroke state.
///
/// Mirrors the retained-mode canvases of windowing toolkits: every draw call
/// is mapped through the current transform, which can be concatenated onto
/// and saved/restored around nested drawing.
pub trait DrawingSurface {
    /// Push the current transform and stroke state.
    fn save(&mut self);

    /// Pop back to the most recently saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Concatenate `affine` onto the current transform (applied to points first).
    fn transform(&mut self, affine: Affine);

    /// Set the stroke color and width used by subsequent draws.
    fn set_stroke(&mut self, color: Color, width: f64);

    /// Draw a connected open polyline through `points`.
    fn draw_polyline(&mut self, points: &[PixelPoint]);

    /// Draw an unfilled circle.
    fn draw_circle(&mut self, center: Point, radius: f64);
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline {
        transform: Affine,
        color: Color,
        width: f64,
        points: Vec<PixelPoint>,
    },
    Circle {
        transform: Affine,
        color: Color,
        width: f64,
        center: Point,
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct SurfaceState {
    transform: Affine,
    color: Color,
    width: f64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// A headless surface that records every draw call with its resolved state.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded draw calls, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The transform that the next draw call would use.
    pub fn current_transform(&self) -> Affine {
        self.state.transform
    }

    /// Number of saved states not yet restored.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop recorded commands and reset all state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.state.transform = self.state.transform * affine;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.color = color;
        self.state.width = width;
    }

    fn draw_polyline(&mut self, points: &[PixelPoint]) {
        self.commands.push(DrawCommand::Polyline {
            transform: self.state.transform,
            color: self.state.color,
            width: self.state.width,
            points: points.to_vec(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            transform: self.state.transform,
            color: self.state.color,
            width: self.state.width,
            center,
            radius,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore_transform() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.transform(Affine::translate((5.0, 5.0)));
        assert_eq!(surface.depth(), 1);
        surface.restore();
        assert_eq!(surface.current_transform(), Affine::IDENTITY);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut surface = RecordingSurface::new();
        surface.transform(Affine::scale(2.0));
        surface.restore();
        assert_eq!(surface.current_transform(), Affine::scale(2.0));
    }

    #[test]
    fn test_records_resolved_state() {
        let mut surface = RecordingSurface::new();
        surface.set_stroke(Color::WHITE, 3.0);
        surface.draw_circle(Point::new(1.0, 2.0), 15.0);

        match &surface.commands()[0] {
            DrawCommand::Circle { color, width, radius, .. } => {
                assert_eq!(*color, Color::WHITE);
                assert!((width - 3.0).abs() < f64::EPSILON);
                assert!((radius - 15.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
