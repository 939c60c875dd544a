//! Scene model: the strokes, the current selection and its observers.

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::observer::{ObserverId, SceneObserver};
use crate::panel::ToolbarAction;
use crate::shapes::{Point, ShapeId, Stroke};
use kurbo::Size;
use std::collections::HashMap;
use std::fmt;

/// Default hit tolerance in model-space pixels (per axis).
pub const HIT_TOLERANCE: f64 = 3.0;

/// Slack before flooring transformed coordinates, so that a rotation landing
/// a hair below an integer does not lose a pixel.
const BOUNDS_EPSILON: f64 = 1e-9;

/// All strokes of a drawing plus the highlighted one.
///
/// Mutations do not notify on their own; callers batch their changes and
/// call [`Scene::flush`]. Operations that change the selection or that back a
/// toolbar control notify before returning.
pub struct Scene {
    /// All strokes, keyed by ID.
    shapes: HashMap<ShapeId, Stroke>,
    /// Paint order (back to front).
    z_order: Vec<ShapeId>,
    /// Always a key of `shapes` when set.
    highlighted: Option<ShapeId>,
    hit_tolerance: f64,
    observers: Vec<(ObserverId, Box<dyn SceneObserver>)>,
    next_observer_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("shapes", &self.z_order.len())
            .field("highlighted", &self.highlighted)
            .field("hit_tolerance", &self.hit_tolerance)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            highlighted: None,
            hit_tolerance: HIT_TOLERANCE,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Create an empty scene using the hit tolerance from `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            hit_tolerance: config.hit_tolerance,
            ..Self::new()
        }
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }

    /// Add a stroke on top of the others. A stroke whose ID is already in the
    /// scene replaces the old one and moves to the top.
    pub fn add_shape(&mut self, shape: Stroke) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_some() {
            self.z_order.retain(|&shape_id| shape_id != id);
        }
        self.z_order.push(id);
        log::debug!("Added stroke {id} ({} total)", self.z_order.len());
        id
    }

    /// Remove a stroke, clearing the selection if it was highlighted.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Stroke> {
        let shape = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
        log::debug!("Removed stroke {id} ({} left)", self.z_order.len());
        Some(shape)
    }

    /// Remove the most recently added stroke.
    pub fn remove_last_shape(&mut self) -> Option<Stroke> {
        let id = *self.z_order.last()?;
        self.remove_shape(id)
    }

    /// Get a stroke by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Stroke> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a stroke by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Stroke> {
        self.shapes.get_mut(&id)
    }

    /// Get strokes in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl DoubleEndedIterator<Item = &Stroke> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    pub fn highlighted(&self) -> Option<ShapeId> {
        self.highlighted
    }

    pub fn highlighted_shape(&self) -> Option<&Stroke> {
        self.highlighted.and_then(|id| self.shapes.get(&id))
    }

    pub fn highlighted_shape_mut(&mut self) -> Option<&mut Stroke> {
        self.highlighted.and_then(|id| self.shapes.get_mut(&id))
    }

    /// Change the selection and notify observers.
    pub fn set_highlighted(&mut self, id: Option<ShapeId>) -> EditResult<()> {
        if let Some(id) = id {
            if !self.shapes.contains_key(&id) {
                return Err(EditError::UnknownShape(id));
            }
        }
        self.highlighted = id;
        log::debug!("Highlight set to {id:?}");
        self.flush();
        Ok(())
    }

    /// Select whatever is under `point` (or nothing) and notify observers.
    pub fn highlight_at(&mut self, point: Point) -> Option<ShapeId> {
        let hit = self.hit_test(point);
        self.highlighted = hit;
        log::debug!("Highlight at ({}, {}) -> {hit:?}", point.x, point.y);
        self.flush();
        hit
    }

    /// Find the topmost stroke with a point near `point` (screen space).
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        // Reverse z-order so the most recently drawn stroke wins.
        self.shapes_ordered()
            .rev()
            .find(|shape| shape.hit_test(point, self.hit_tolerance))
            .map(Stroke::id)
    }

    /// Largest transformed x coordinate of any point, at least 0.
    pub fn bounding_right(&self) -> u32 {
        self.bounding_extent(|p| p.x)
    }

    /// Largest transformed y coordinate of any point, at least 0.
    pub fn bounding_bottom(&self) -> u32 {
        self.bounding_extent(|p| p.y)
    }

    /// Size a drawing surface needs to enclose every stroke.
    pub fn content_size(&self) -> Size {
        Size::new(
            f64::from(self.bounding_right()),
            f64::from(self.bounding_bottom()),
        )
    }

    fn bounding_extent(&self, axis: impl Fn(Point) -> f64) -> u32 {
        let mut extent = 0.0_f64;
        for shape in self.shapes_ordered() {
            let Some(affine) = shape.transform() else {
                continue;
            };
            for &point in shape.points() {
                extent = extent.max((axis(affine * point) + BOUNDS_EPSILON).floor());
            }
        }
        extent as u32
    }

    /// Set the highlighted stroke's scale and notify observers.
    pub fn set_highlighted_scale(&mut self, scale: f64) -> EditResult<()> {
        let shape = self.highlighted_shape_mut().ok_or(EditError::NoSelection)?;
        shape.set_scale(scale)?;
        self.flush();
        Ok(())
    }

    /// Set the highlighted stroke's rotation (degrees) and notify observers.
    pub fn set_highlighted_rotation(&mut self, degrees: i32) -> EditResult<()> {
        let shape = self.highlighted_shape_mut().ok_or(EditError::NoSelection)?;
        shape.set_rotation(degrees);
        self.flush();
        Ok(())
    }

    /// Remove the highlighted stroke, clear the selection and notify observers.
    pub fn delete_highlighted(&mut self) -> EditResult<Stroke> {
        let id = self.highlighted.ok_or(EditError::NoSelection)?;
        let shape = self.remove_shape(id).ok_or(EditError::UnknownShape(id))?;
        self.flush();
        Ok(shape)
    }

    /// Apply a toolbar control change.
    pub fn apply_toolbar_action(&mut self, action: ToolbarAction) -> EditResult<()> {
        let result = match action {
            ToolbarAction::Delete => self.delete_highlighted().map(|_| ()),
            ToolbarAction::SetScale(scale) => self.set_highlighted_scale(scale),
            ToolbarAction::SetRotation(degrees) => self.set_highlighted_rotation(degrees),
        };
        if let Err(e) = &result {
            log::warn!("Toolbar action {action:?} rejected: {e}");
        }
        result
    }

    /// Register an observer and bring it up to date immediately.
    pub fn register_observer(&mut self, observer: impl SceneObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;

        let mut observer: Box<dyn SceneObserver> = Box::new(observer);
        observer.on_scene_changed(self);
        self.observers.push((id, observer));
        id
    }

    /// Stop notifying an observer. Returns false if it was not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Notify every observer that the scene changed.
    pub fn flush(&mut self) {
        // Observers only see `&Scene`, so none can register or mutate while
        // the list is detached.
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers {
            observer.on_scene_changed(self);
        }
        self.observers = observers;
    }
}
