//! Freehand stroke shape.

use super::{PixelOffset, PixelPoint, ShapeId, ShapeStyle};
use crate::error::{EditError, EditResult};
use crate::surface::DrawingSurface;
use kurbo::{Affine, Point, Rect, Vec2};
use std::cell::{Ref, RefCell};
use uuid::Uuid;

/// Slack added to hit tolerances to absorb floating point noise from rotation.
const HIT_EPSILON: f64 = 1e-9;

/// Pixel data derived from the raw points.
#[derive(Debug, Clone, Default)]
struct GeometryCache {
    /// Cleared whenever the points change.
    valid: bool,
    pixel_points: Vec<PixelPoint>,
    centroid: Option<PixelPoint>,
}

/// A freehand stroke: a polyline with its own style and transform.
///
/// The transform is a uniform scale and a rotation, both pivoted at the
/// centroid of the raw points, followed by a translation. The translation is
/// split into a committed part and a pending part that tracks an in-progress
/// drag.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub(crate) id: ShapeId,
    /// Points in drawing order, in model space.
    points: Vec<Point>,
    /// Reserved; not read by the render path.
    pub closed: bool,
    /// Reserved; not read by the render path.
    pub filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
    scale: f64,
    /// Rotation in degrees.
    rotation: i32,
    committed_translation: PixelOffset,
    pending_translation: PixelOffset,
    cache: RefCell<GeometryCache>,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            closed: false,
            filled: false,
            style: ShapeStyle::default(),
            scale: 1.0,
            rotation: 0,
            committed_translation: PixelOffset::ZERO,
            pending_translation: PixelOffset::ZERO,
            cache: RefCell::new(GeometryCache::default()),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Add a point to the end of the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.cache.get_mut().valid = false;
    }

    /// Remove every point.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.cache.get_mut().valid = false;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the uniform scale. Must be finite and strictly positive.
    pub fn set_scale(&mut self, scale: f64) -> EditResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EditError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation = degrees;
    }

    fn rotation_radians(&self) -> f64 {
        f64::from(self.rotation).to_radians()
    }

    pub fn committed_translation(&self) -> PixelOffset {
        self.committed_translation
    }

    pub fn pending_translation(&self) -> PixelOffset {
        self.pending_translation
    }

    /// Replace the in-progress drag delta.
    pub fn set_pending_translation(&mut self, offset: PixelOffset) {
        self.pending_translation = offset;
    }

    /// Fold the pending translation into the committed one.
    pub fn commit_pending_translation(&mut self) {
        self.committed_translation = self.committed_translation + self.pending_translation;
        self.pending_translation = PixelOffset::ZERO;
    }

    /// Translation used for rendering and hit-testing.
    pub fn effective_translation(&self) -> PixelOffset {
        self.committed_translation + self.pending_translation
    }

    /// Rebuild the pixel cache and centroid if the points changed since the
    /// last call.
    pub fn recompute_geometry(&self) {
        // Readers may still hold `pixel_points()`; only borrow mutably to rebuild.
        if self.cache.borrow().valid {
            return;
        }
        let mut cache = self.cache.borrow_mut();

        cache.pixel_points = self.points.iter().map(|&p| PixelPoint::floor(p)).collect();
        cache.centroid = if self.points.is_empty() {
            None
        } else {
            let count = self.points.len() as f64;
            let sum = self
                .points
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
            Some(PixelPoint::floor((sum / count).to_point()))
        };
        cache.valid = true;
    }

    /// Mean of the raw points, floored; `None` for an empty stroke.
    pub fn centroid(&self) -> Option<PixelPoint> {
        self.recompute_geometry();
        self.cache.borrow().centroid
    }

    /// The points snapped to the pixel grid.
    pub fn pixel_points(&self) -> Ref<'_, [PixelPoint]> {
        self.recompute_geometry();
        Ref::map(self.cache.borrow(), |cache| cache.pixel_points.as_slice())
    }

    /// Model-to-screen transform: pivot at the centroid, translate, rotate,
    /// scale, pivot back. `None` for an empty stroke.
    pub fn transform(&self) -> Option<Affine> {
        let center = self.centroid()?.to_point().to_vec2();
        Some(
            Affine::translate(center)
                * Affine::translate(self.effective_translation().to_vec2())
                * Affine::rotate(self.rotation_radians())
                * Affine::scale(self.scale)
                * Affine::translate(-center),
        )
    }

    /// Screen-to-model transform, the inverse of [`Stroke::transform`].
    pub fn inverse_transform(&self) -> Option<Affine> {
        let center = self.centroid()?.to_point().to_vec2();
        let translation = self.effective_translation().to_vec2();
        Some(
            Affine::translate(center)
                * Affine::scale(1.0 / self.scale)
                * Affine::rotate(-self.rotation_radians())
                * Affine::translate(-(center + translation)),
        )
    }

    /// Map a model-space point to screen space.
    pub fn to_screen(&self, point: Point) -> Option<Point> {
        self.transform().map(|affine| affine * point)
    }

    /// Map a screen-space point back into model space.
    pub fn to_model(&self, point: Point) -> Option<Point> {
        self.inverse_transform().map(|affine| affine * point)
    }

    /// Check if a screen point lies within `tolerance` (per axis, in model
    /// space) of any of the stroke's points.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let Some(local) = self.to_model(point) else {
            return false;
        };
        let tolerance = tolerance + HIT_EPSILON;
        self.points
            .iter()
            .any(|p| (p.x - local.x).abs() <= tolerance && (p.y - local.y).abs() <= tolerance)
    }

    /// Axis-aligned bounds of the transformed points in screen space.
    pub fn screen_bounds(&self) -> Option<Rect> {
        let affine = self.transform()?;
        let mut points = self.points.iter().map(|&p| affine * p);
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p)))
    }

    /// Draw the stroke with its own style.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S, ambient: Affine) {
        self.render_with_style(surface, ambient, &self.style);
    }

    /// Draw the stroke with `style` instead of its own.
    ///
    /// The stroke width is divided by the scale so that lines keep their
    /// on-screen thickness. The surface state is restored afterwards.
    pub fn render_with_style<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        ambient: Affine,
        style: &ShapeStyle,
    ) {
        let Some(transform) = self.transform() else {
            return;
        };

        surface.save();
        surface.transform(ambient * transform);
        surface.set_stroke(style.stroke(), style.stroke_width / self.scale);
        surface.draw_polyline(&self.pixel_points());
        surface.restore();
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new()
    }
}
