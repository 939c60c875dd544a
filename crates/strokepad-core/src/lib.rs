//! StrokePad Core Library
//!
//! Toolkit-agnostic model for the StrokePad freehand editor: strokes, the
//! scene that owns them, pointer gestures and the toolbar/status read models.

pub mod config;
pub mod error;
pub mod input;
pub mod observer;
pub mod panel;
pub mod scene;
pub mod shapes;
pub mod surface;

pub use config::{ConfigError, EditorConfig};
pub use error::{EditError, EditResult};
pub use input::{GestureController, PointerEvent};
pub use observer::{ObserverId, SceneObserver};
pub use panel::{StatusBar, ToolbarAction, ToolbarState, status_text};
pub use scene::Scene;
pub use shapes::{PixelOffset, PixelPoint, Point, SerializableColor, ShapeId, ShapeStyle, Stroke};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
