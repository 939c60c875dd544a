//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, paint_scene};
use kurbo::{Affine, BezPath, Circle, Point, Stroke};
use peniko::Color;
use strokepad_core::shapes::PixelPoint;
use strokepad_core::surface::DrawingSurface;
use vello::Scene;

#[derive(Debug, Clone, Copy)]
struct PenState {
    transform: Affine,
    color: Color,
    width: f64,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
///
/// Also usable directly as a [`DrawingSurface`]: draw calls are encoded into
/// the Vello scene with the current transform and pen.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    pen: PenState,
    saved: Vec<PenState>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            pen: PenState::default(),
            saved: Vec::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Clear the scene and the pen stack.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.pen = PenState::default();
        self.saved.clear();
    }

    fn stroke_path(&mut self, path: &impl kurbo::Shape) {
        let stroke = Stroke::new(self.pen.width);
        self.scene
            .stroke(&stroke, self.pen.transform, self.pen.color, None, path);
    }
}

impl DrawingSurface for VelloRenderer {
    fn save(&mut self) {
        self.saved.push(self.pen);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(pen) => self.pen = pen,
            None => log::warn!("Unbalanced restore on Vello surface"),
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.pen.transform = self.pen.transform * affine;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.pen.color = color;
        self.pen.width = width;
    }

    fn draw_polyline(&mut self, points: &[PixelPoint]) {
        // A single point has no segment to stroke.
        if points.len() < 2 {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(points[0].to_point());
        for point in &points[1..] {
            path.line_to(point.to_point());
        }
        self.stroke_path(&path);
    }

    fn draw_circle(&mut self, center: Point, radius: f64) {
        self.stroke_path(&Circle::new(center, radius));
    }
}

impl Renderer for VelloRenderer {
    fn paint(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.reset();
        paint_scene(self, ctx);
        log::trace!("Painted {} strokes", ctx.scene.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strokepad_core::scene::Scene as StrokeScene;
    use strokepad_core::shapes::Stroke as Polyline;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_paint_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let scene = StrokeScene::new();
        renderer.paint(&RenderContext::new(&scene)).unwrap();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_paint_scene_with_strokes() {
        let mut renderer = VelloRenderer::new();
        let mut scene = StrokeScene::new();
        scene.add_shape(Polyline::from_points(vec![
            Point::new(10.0, 10.0),
            Point::new(40.0, 25.0),
        ]));

        renderer.paint(&RenderContext::new(&scene)).unwrap();
        assert!(!renderer.scene().encoding().is_empty());

        let taken = renderer.take_scene();
        assert!(!taken.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_single_point_is_not_stroked() {
        let mut renderer = VelloRenderer::new();
        renderer.draw_polyline(&[PixelPoint::new(3, 3)]);
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_save_restore_transform() {
        let mut renderer = VelloRenderer::new();
        renderer.save();
        renderer.transform(Affine::translate((5.0, 5.0)));
        renderer.set_stroke(Color::WHITE, 4.0);
        renderer.restore();

        assert_eq!(renderer.pen.transform, Affine::IDENTITY);
        assert!((renderer.pen.width - 1.0).abs() < f64::EPSILON);
        assert!(renderer.saved.is_empty());

        // Extra restores are tolerated.
        renderer.restore();
        assert_eq!(renderer.pen.transform, Affine::IDENTITY);
    }
}
