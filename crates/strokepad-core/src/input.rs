//! Pointer gesture handling: drawing new strokes and dragging the selection.

use crate::config::EditorConfig;
use crate::scene::Scene;
use crate::shapes::{PixelOffset, ShapeId, ShapeStyle, Stroke};
use kurbo::Point;

/// Pointer event in screen coordinates (origin top-left, y down).
///
/// A click is reported by the toolkit after the press/release pair that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Point),
    Dragged(Point),
    Released(Point),
    Clicked(Point),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Active {
        press: Point,
        /// Stroke being drawn, if the press started a new one.
        provisional: Option<ShapeId>,
        dragged: bool,
    },
}

/// Turns pointer events into scene edits.
///
/// Without a selection, a press-drag-release draws a new stroke. With a
/// selection, it translates the highlighted stroke. Drags do not notify
/// observers; the release notifies once.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    stroke_style: ShapeStyle,
    cursor: Option<Point>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            stroke_style: ShapeStyle::default(),
            cursor: None,
        }
    }

    /// Create a controller that draws with the configured stroke style.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            stroke_style: config.stroke_style.clone(),
            ..Self::new()
        }
    }

    /// Whether a press has been seen and not yet released.
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Last point added to the stroke being drawn.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Stroke currently being drawn, if any.
    pub fn provisional(&self) -> Option<ShapeId> {
        match self.state {
            GestureState::Active { provisional, .. } => provisional,
            GestureState::Idle => None,
        }
    }

    /// Dispatch a pointer event.
    pub fn handle_event(&mut self, scene: &mut Scene, event: PointerEvent) {
        match event {
            PointerEvent::Pressed(point) => self.pointer_pressed(scene, point),
            PointerEvent::Dragged(point) => self.pointer_dragged(scene, point),
            PointerEvent::Released(point) => self.pointer_released(scene, point),
            PointerEvent::Clicked(point) => self.pointer_clicked(scene, point),
        }
    }

    /// Start a gesture. Without a selection this adds an empty stroke that
    /// the drag fills in.
    pub fn pointer_pressed(&mut self, scene: &mut Scene, point: Point) {
        // A press without a release (lost pointer grab) leaves a stale stroke.
        if let Some(stale) = self.provisional() {
            scene.remove_shape(stale);
        }

        let provisional = if scene.highlighted().is_none() {
            let mut stroke = Stroke::new();
            stroke.style = self.stroke_style.clone();
            Some(scene.add_shape(stroke))
        } else {
            None
        };

        log::trace!("Pointer pressed at ({}, {})", point.x, point.y);
        self.state = GestureState::Active {
            press: point,
            provisional,
            dragged: false,
        };
        self.cursor = None;
    }

    /// Continue a gesture: move the selection or extend the new stroke.
    pub fn pointer_dragged(&mut self, scene: &mut Scene, point: Point) {
        let GestureState::Active {
            press,
            provisional,
            ref mut dragged,
        } = self.state
        else {
            return;
        };
        *dragged = true;

        if let Some(shape) = scene.highlighted_shape_mut() {
            shape.set_pending_translation(PixelOffset::between(press, point));
        } else if let Some(shape) = provisional.and_then(|id| scene.get_shape_mut(id)) {
            shape.add_point(point);
            self.cursor = Some(point);
        }
        log::trace!("Pointer dragged to ({}, {})", point.x, point.y);
    }

    /// Finish a gesture and notify observers once.
    pub fn pointer_released(&mut self, scene: &mut Scene, point: Point) {
        let GestureState::Active {
            provisional,
            dragged,
            ..
        } = std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return;
        };
        self.cursor = None;

        let keep_stroke = dragged && scene.highlighted().is_none();
        if dragged {
            if let Some(shape) = scene.highlighted_shape_mut() {
                shape.commit_pending_translation();
                log::debug!(
                    "Moved stroke {} to {:?}",
                    shape.id(),
                    shape.committed_translation()
                );
            }
        }
        if let Some(id) = provisional {
            if keep_stroke {
                log::debug!("Finished stroke {id}");
            } else {
                scene.remove_shape(id);
            }
        }

        log::trace!("Pointer released at ({}, {})", point.x, point.y);
        scene.flush();
    }

    /// Select the stroke under the pointer, or clear the selection.
    pub fn pointer_clicked(&mut self, scene: &mut Scene, point: Point) {
        scene.highlight_at(point);
    }
}
