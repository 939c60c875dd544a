//! Toolbar and status bar state derived from the scene.
//!
//! The widgets themselves belong to the UI toolkit; these types hold what
//! they display and translate control changes into scene edits.

use crate::config::EditorConfig;
use crate::observer::SceneObserver;
use crate::scene::Scene;
use crate::shapes::ShapeId;

/// A change requested through a toolbar control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    /// Delete the highlighted stroke.
    Delete,
    /// Set the highlighted stroke's uniform scale.
    SetScale(f64),
    /// Set the highlighted stroke's rotation in degrees.
    SetRotation(i32),
}

/// Convert a scale slider position (hundredths) to a scale factor.
pub fn scale_from_slider(value: i32) -> f64 {
    f64::from(value) / 100.0
}

/// Convert a scale factor to the nearest scale slider position.
pub fn slider_from_scale(scale: f64) -> i32 {
    (scale * 100.0).round() as i32
}

/// Format a scale with one decimal, as shown next to the slider.
pub fn format_scale(scale: f64) -> String {
    format!("{scale:.1}")
}

/// What the toolbar shows: the delete button, the scale slider and the
/// rotation slider, each with its enabled state and label.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub delete_enabled: bool,
    pub scale_enabled: bool,
    pub rotate_enabled: bool,
    pub scale_slider: i32,
    pub scale_label: String,
    pub rotate_slider: i32,
    pub rotate_label: String,
    scale_range: (i32, i32),
    rotation_range: (i32, i32),
    /// Stroke the slider values were last synchronized from.
    synced_with: Option<ShapeId>,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ToolbarState {
    /// Create a toolbar with everything disabled and neutral slider values.
    pub fn new(config: &EditorConfig) -> Self {
        let mut state = Self {
            delete_enabled: false,
            scale_enabled: false,
            rotate_enabled: false,
            scale_slider: 0,
            scale_label: String::new(),
            rotate_slider: 0,
            rotate_label: String::new(),
            scale_range: config.scale_slider,
            rotation_range: config.rotation_slider,
            synced_with: None,
        };
        state.set_scale_slider(100);
        state.set_rotate_slider(0);
        state
    }

    /// Build the toolbar for the current state of `scene`.
    pub fn from_scene(scene: &Scene, config: &EditorConfig) -> Self {
        let mut state = Self::new(config);
        state.update(scene);
        state
    }

    /// Re-read the scene. Slider values are only pulled from the highlighted
    /// stroke when the highlight changes, so dragging a slider is not fought
    /// by its own notifications.
    pub fn update(&mut self, scene: &Scene) {
        let highlighted = scene.highlighted_shape();
        let enabled = highlighted.is_some();
        self.delete_enabled = enabled;
        self.scale_enabled = enabled;
        self.rotate_enabled = enabled;

        match highlighted {
            Some(shape) if self.synced_with != Some(shape.id()) => {
                self.set_scale_slider(slider_from_scale(shape.scale()));
                self.set_rotate_slider(shape.rotation());
                self.synced_with = Some(shape.id());
            }
            Some(_) => {}
            None => self.synced_with = None,
        }
    }

    /// The scale slider moved. Returns the edit to apply, if a stroke is
    /// being controlled.
    pub fn scale_slider_moved(&mut self, value: i32) -> Option<ToolbarAction> {
        self.set_scale_slider(value);
        self.controlling()
            .then(|| ToolbarAction::SetScale(scale_from_slider(self.scale_slider)))
    }

    /// The rotation slider moved. Returns the edit to apply, if a stroke is
    /// being controlled.
    pub fn rotate_slider_moved(&mut self, value: i32) -> Option<ToolbarAction> {
        self.set_rotate_slider(value);
        self.controlling()
            .then_some(ToolbarAction::SetRotation(self.rotate_slider))
    }

    /// The delete button was pressed.
    pub fn delete_pressed(&self) -> Option<ToolbarAction> {
        self.delete_enabled.then_some(ToolbarAction::Delete)
    }

    fn controlling(&self) -> bool {
        self.scale_enabled && self.synced_with.is_some()
    }

    fn set_scale_slider(&mut self, value: i32) {
        let (min, max) = self.scale_range;
        self.scale_slider = value.clamp(min, max);
        self.scale_label = format_scale(scale_from_slider(self.scale_slider));
    }

    fn set_rotate_slider(&mut self, value: i32) {
        let (min, max) = self.rotation_range;
        self.rotate_slider = value.clamp(min, max);
        self.rotate_label = self.rotate_slider.to_string();
    }
}

impl SceneObserver for ToolbarState {
    fn on_scene_changed(&mut self, scene: &Scene) {
        self.update(scene);
    }
}

/// Status line: stroke count and, when a stroke is highlighted, its point
/// count, scale and rotation.
pub fn status_text(scene: &Scene) -> String {
    let mut text = match scene.len() {
        1 => "1 Stroke".to_string(),
        n => format!("{n} Strokes"),
    };
    if let Some(shape) = scene.highlighted_shape() {
        text.push_str(&format!(
            ", Selection ({} points, scale: {}, rotation {})",
            shape.len(),
            format_scale(shape.scale()),
            shape.rotation()
        ));
    }
    text
}

/// Status bar that keeps its text in sync with the scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    pub text: String,
}

impl SceneObserver for StatusBar {
    fn on_scene_changed(&mut self, scene: &Scene) {
        self.text = status_text(scene);
    }
}
