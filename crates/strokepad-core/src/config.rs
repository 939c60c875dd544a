//! Editor configuration.

use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable editor settings. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hit tolerance in model-space pixels (per axis).
    pub hit_tolerance: f64,
    /// Style given to newly drawn strokes.
    pub stroke_style: ShapeStyle,
    /// Style of the halo drawn behind the highlighted stroke.
    pub highlight_style: ShapeStyle,
    /// Radius of the circle that follows the pointer while drawing.
    pub cursor_radius: f64,
    /// Scale slider range, in hundredths.
    pub scale_slider: (i32, i32),
    /// Rotation slider range, in degrees.
    pub rotation_slider: (i32, i32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: crate::scene::HIT_TOLERANCE,
            stroke_style: ShapeStyle::default(),
            highlight_style: ShapeStyle::highlight(),
            cursor_radius: 15.0,
            scale_slider: (50, 200),
            rotation_slider: (-180, 180),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hit_tolerance.is_finite() || self.hit_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hit_tolerance must be a non-negative number, got {}",
                self.hit_tolerance
            )));
        }
        for (name, style) in [
            ("stroke_style", &self.stroke_style),
            ("highlight_style", &self.highlight_style),
        ] {
            if !style.stroke_width.is_finite() || style.stroke_width <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}.stroke_width must be positive, got {}",
                    style.stroke_width
                )));
            }
        }
        if !self.cursor_radius.is_finite() || self.cursor_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cursor_radius must be a non-negative number, got {}",
                self.cursor_radius
            )));
        }
        let (min_scale, max_scale) = self.scale_slider;
        if min_scale <= 0 || min_scale > max_scale {
            return Err(ConfigError::Invalid(format!(
                "scale_slider must be a positive, ordered range, got {min_scale}..={max_scale}"
            )));
        }
        let (min_rotation, max_rotation) = self.rotation_slider;
        if min_rotation > max_rotation {
            return Err(ConfigError::Invalid(format!(
                "rotation_slider must be ordered, got {min_rotation}..={max_rotation}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.hit_tolerance - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.highlight_style.stroke_color, SerializableColor::yellow());
        assert!((config.highlight_style.stroke_width - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "hit_tolerance": 5.0 }"#).unwrap();
        assert!((config.hit_tolerance - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.stroke_style, ShapeStyle::default());
        assert_eq!(config.scale_slider, (50, 200));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = EditorConfig::default();
        config.cursor_radius = 8.0;
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "hit_tolerance": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "scale_slider": [200, 50] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(
                r#"{ "stroke_style": { "stroke_color": { "r": 0, "g": 0, "b": 0, "a": 255 }, "stroke_width": 0.0 } }"#
            ),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cursor_radius": 20.0 }}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert!((config.cursor_radius - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
