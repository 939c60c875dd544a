//! Renderer trait abstraction.

use kurbo::{Affine, Point};
use peniko::Color;
use strokepad_core::config::EditorConfig;
use strokepad_core::scene::Scene;
use strokepad_core::shapes::{PixelPoint, ShapeStyle};
use strokepad_core::surface::{DrawingSurface, RecordingSurface};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid render context: {0}")]
    InvalidContext(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single paint of the canvas.
pub struct RenderContext<'a> {
    /// The scene to paint.
    pub scene: &'a Scene,
    /// Transform applied on top of every stroke's own transform.
    pub transform: Affine,
    /// Last point of the stroke being drawn, if any.
    pub cursor: Option<Point>,
    /// Radius of the circle drawn around the cursor.
    pub cursor_radius: f64,
    /// Color of the cursor circle.
    pub cursor_color: Color,
    /// Halo drawn under the highlighted stroke.
    pub highlight_style: ShapeStyle,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with the default editor settings.
    pub fn new(scene: &'a Scene) -> Self {
        Self::from_config(scene, &EditorConfig::default())
    }

    /// Create a render context using the styles from `config`.
    pub fn from_config(scene: &'a Scene, config: &EditorConfig) -> Self {
        Self {
            scene,
            transform: Affine::IDENTITY,
            cursor: None,
            cursor_radius: config.cursor_radius,
            cursor_color: Color::BLACK,
            highlight_style: config.highlight_style.clone(),
            background_color: Color::WHITE,
        }
    }

    /// Set the ambient transform (e.g. device scale).
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the drawing cursor.
    pub fn with_cursor(mut self, cursor: Option<Point>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the highlight halo style.
    pub fn with_highlight_style(mut self, style: ShapeStyle) -> Self {
        self.highlight_style = style;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Check that the context can be painted.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.transform.is_finite() {
            return Err(RendererError::InvalidContext(format!(
                "non-finite transform {:?}",
                self.transform
            )));
        }
        if !self.cursor_radius.is_finite() || self.cursor_radius < 0.0 {
            return Err(RendererError::InvalidContext(format!(
                "cursor radius {}",
                self.cursor_radius
            )));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
///
/// Implementations reset their output and paint the whole canvas each call.
pub trait Renderer {
    /// Paint a frame.
    fn paint(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Paint the canvas onto any drawing surface: the cursor circle, the
/// highlight halo, then every stroke in z-order.
pub fn paint_scene<S: DrawingSurface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    if let Some(cursor) = ctx.cursor {
        surface.save();
        surface.transform(ctx.transform);
        surface.set_stroke(ctx.cursor_color, 1.0);
        surface.draw_circle(PixelPoint::floor(cursor).to_point(), ctx.cursor_radius);
        surface.restore();
    }

    if let Some(shape) = ctx.scene.highlighted_shape() {
        shape.render_with_style(surface, ctx.transform, &ctx.highlight_style);
    }

    for shape in ctx.scene.shapes_ordered() {
        shape.render(surface, ctx.transform);
    }
}

/// Headless renderer, useful for tests and for inspecting a frame.
impl Renderer for RecordingSurface {
    fn paint(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.clear();
        paint_scene(self, ctx);
        Ok(())
    }
}
