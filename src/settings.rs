// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! The constants below are the built-in defaults. A [`Settings`] value can
//! override the tunable ones from a TOML file; everything that is not set
//! in the file falls back to these defaults.

use kurbo::{Point, Vec2};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// VIEWPORT SETTINGS
// ============================================================================
/// Minimum zoom level (quarter size)
const MIN_ZOOM: f64 = 0.25;

/// Maximum zoom level (4x original size)
const MAX_ZOOM: f64 = 4.0;

/// Wheel zoom sensitivity `k` in `exp(-delta_y * k)`.
///
/// One notch of a typical mouse wheel reports 100 pixels, which gives a
/// factor of about 1.16 per notch.
const WHEEL_SENSITIVITY: f64 = 0.0015;

// ============================================================================
// POINT DEFAULTS
// ============================================================================
/// Position of the very first point (and of the point restored by reset)
const INITIAL_POSITION: [f64; 2] = [400.0, 400.0];

/// Incoming tangent of a freshly created point
const DEFAULT_LEFT: [f64; 2] = [-80.0, -80.0];

/// Outgoing tangent of a freshly created point
const DEFAULT_RIGHT: [f64; 2] = [80.0, -80.0];

/// Grow-handle preview offset of a freshly created point
const DEFAULT_GROW: [f64; 2] = [0.0, -150.0];

// ============================================================================
// SAMPLING SETTINGS
// ============================================================================
/// Samples per segment for arc length
const LENGTH_SAMPLES: usize = 100;

/// Samples per segment for enclosed area
const AREA_SAMPLES: usize = 20;

/// Samples per segment for the revolved-volume profile
const VOLUME_SAMPLES: usize = 30;

// ============================================================================
// POINTER SETTINGS
// ============================================================================
/// Window in which a second tap on the same segment counts as a double tap
const DOUBLE_TAP_MS: u64 = 300;

/// Width of the invisible stroke used for segment taps (screen pixels)
const HIT_STROKE_WIDTH: f64 = 30.0;

/// Maximum distance for picking a handle (screen pixels)
const HANDLE_PICK_RADIUS: f64 = 12.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Viewport settings (zoom limits, wheel response)
pub mod editor {
    /// Minimum zoom level
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Exponential wheel zoom sensitivity
    pub const WHEEL_SENSITIVITY: f64 = super::WHEEL_SENSITIVITY;
}

/// Offsets given to newly created points
pub mod defaults {
    pub const INITIAL_POSITION: [f64; 2] = super::INITIAL_POSITION;
    pub const LEFT: [f64; 2] = super::DEFAULT_LEFT;
    pub const RIGHT: [f64; 2] = super::DEFAULT_RIGHT;
    pub const GROW: [f64; 2] = super::DEFAULT_GROW;
}

/// Per-segment sample counts for the approximate measurements
pub mod sampling {
    pub const LENGTH: usize = super::LENGTH_SAMPLES;
    pub const AREA: usize = super::AREA_SAMPLES;
    pub const VOLUME: usize = super::VOLUME_SAMPLES;
}

/// Tap and hit-test settings
pub mod tap {
    /// Double-tap window in milliseconds
    pub const DOUBLE_TAP_MS: u64 = super::DOUBLE_TAP_MS;

    /// Invisible hit stroke width for segments
    pub const HIT_STROKE_WIDTH: f64 = super::HIT_STROKE_WIDTH;

    /// Handle pick radius
    pub const HANDLE_PICK_RADIUS: f64 = super::HANDLE_PICK_RADIUS;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

/// Errors raised while loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Tunable editor settings.
///
/// Every field is optional in the TOML source:
///
/// ```toml
/// min_zoom = 0.5
/// double_tap_ms = 250
/// right = [60.0, -60.0]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub wheel_sensitivity: f64,
    pub double_tap_ms: u64,
    pub hit_stroke_width: f64,
    pub handle_pick_radius: f64,
    pub initial_position: [f64; 2],
    pub left: [f64; 2],
    pub right: [f64; 2],
    pub grow: [f64; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_zoom: editor::MIN_ZOOM,
            max_zoom: editor::MAX_ZOOM,
            wheel_sensitivity: editor::WHEEL_SENSITIVITY,
            double_tap_ms: tap::DOUBLE_TAP_MS,
            hit_stroke_width: tap::HIT_STROKE_WIDTH,
            handle_pick_radius: tap::HANDLE_PICK_RADIUS,
            initial_position: defaults::INITIAL_POSITION,
            left: defaults::LEFT,
            right: defaults::RIGHT,
            grow: defaults::GROW,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text and validate them
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml_str(&source)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "zoom range [{}, {}] is empty, not positive or not finite",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.wheel_sensitivity > 0.0 && self.wheel_sensitivity.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "wheel_sensitivity must be positive, got {}",
                self.wheel_sensitivity
            )));
        }
        if self.hit_stroke_width < 0.0 || self.handle_pick_radius < 0.0 {
            return Err(SettingsError::Invalid(
                "hit widths must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn double_tap(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }

    pub fn initial_position(&self) -> Point {
        Point::new(self.initial_position[0], self.initial_position[1])
    }

    pub fn left(&self) -> Vec2 {
        Vec2::new(self.left[0], self.left[1])
    }

    pub fn right(&self) -> Vec2 {
        Vec2::new(self.right[0], self.right[1])
    }

    pub fn grow(&self) -> Vec2 {
        Vec2::new(self.grow[0], self.grow[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.double_tap(), Duration::from_millis(300));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings = Settings::from_toml_str("max_zoom = 8.0\nright = [60.0, -30.0]\n").unwrap();
        assert_eq!(settings.max_zoom, 8.0);
        assert_eq!(settings.right(), Vec2::new(60.0, -30.0));
        assert_eq!(settings.min_zoom, editor::MIN_ZOOM);
        assert_eq!(settings.left(), Vec2::new(-80.0, -80.0));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let err = Settings::from_toml_str("min_zoom = 5.0\nmax_zoom = 2.0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn infinite_max_zoom_is_rejected() {
        let err = Settings::from_toml_str("max_zoom = inf\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn defaults_come_from_public_constants() {
        let settings = Settings::default();
        assert_eq!(settings.wheel_sensitivity, editor::WHEEL_SENSITIVITY);
        assert_eq!(settings.double_tap_ms, tap::DOUBLE_TAP_MS);
        assert_eq!(settings.grow, defaults::GROW);
    }

    #[test]
    fn non_positive_sensitivity_is_rejected() {
        let err = Settings::from_toml_str("wheel_sensitivity = 0.0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = Settings::from_toml_str("zoom_speed = 2\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/curvedit.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/curvedit.toml"));
    }
}
