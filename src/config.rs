// config.rs

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

const OVERLAY_JSON: &str = include_str!("../assets/overlay.json");

/// Number of points in the tail (index 0 = head)
pub const TAIL_LENGTH: usize = 25;

/// Fraction of the remaining distance each point covers per tick
pub const SMOOTHING: f64 = 0.5;

/// Nominal tick period (~60 Hz)
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Screen-space nudge so the head doesn't sit under the cursor hotspot
pub const CURSOR_OFFSET: IVec2 = IVec2::new(5, 5);

/// Default fraction of the primary screen width past which the close button shows
pub const CLOSE_THRESHOLD: f32 = 0.9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse overlay settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid overlay setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Appearance and window glue, embedded at compile time.
///
/// Trail length and smoothing are deliberately not part of this: they stay
/// constants above.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OverlaySettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub line_width: f32,
    /// Linear RGBA
    pub line_color: [f32; 4],
    /// Fraction of the primary screen width (0, 1]
    pub close_threshold: f32,
    /// Side of the close box in logical pixels
    pub close_size: f32,
    /// Let the toolkit pointer stand in when the native cursor query fails
    pub fallback_on_native_failure: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            title: "Pet Tail".into(),
            width: 480,
            height: 360,
            line_width: 6.0,
            line_color: [1.0, 0.55, 0.2, 1.0],
            close_threshold: CLOSE_THRESHOLD,
            close_size: 18.0,
            fallback_on_native_failure: false,
        }
    }
}

impl OverlaySettings {
    /// Parse the embedded settings
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(OVERLAY_JSON)
    }

    /// Load the embedded settings, falling back to defaults if they are broken
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to load overlay settings: {}", e);
                warn!("Using built-in overlay defaults");
                Self::default()
            }
        }
    }

    fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("window must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if !(self.close_threshold > 0.0 && self.close_threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "close_threshold",
                reason: format!("expected a fraction in (0, 1], got {}", self.close_threshold),
            });
        }
        if !(self.line_width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "line_width",
                reason: format!("expected a positive width, got {}", self.line_width),
            });
        }
        if self.close_size < 0.0 {
            return Err(ConfigError::Invalid {
                field: "close_size",
                reason: format!("expected a non-negative size, got {}", self.close_size),
            });
        }
        Ok(())
    }

    pub fn line_color(&self) -> Color {
        let [r, g, b, a] = self.line_color;
        Color::linear_rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_parse() {
        let settings = OverlaySettings::load().unwrap();
        assert_eq!(settings.close_threshold, 0.9);
        assert!(!settings.fallback_on_native_failure);
        assert!(settings.width > 0 && settings.height > 0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = OverlaySettings::from_json(r#"{ "title": "Tail" }"#).unwrap();
        assert_eq!(settings.title, "Tail");
        assert_eq!(settings.close_threshold, CLOSE_THRESHOLD);
        assert_eq!(settings.width, OverlaySettings::default().width);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        // Tail length is a compile-time constant, not a setting
        let result = OverlaySettings::from_json(r#"{ "tail_length": 40 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        for json in [r#"{ "close_threshold": 0.0 }"#, r#"{ "close_threshold": 1.5 }"#] {
            let result = OverlaySettings::from_json(json);
            assert!(matches!(
                result,
                Err(ConfigError::Invalid { field: "close_threshold", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_empty_window() {
        let result = OverlaySettings::from_json(r#"{ "width": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_animator_constants() {
        assert_eq!(TAIL_LENGTH, 25);
        assert!(SMOOTHING > 0.0 && SMOOTHING < 1.0);
        assert_eq!(TICK_INTERVAL.as_millis(), 16);
        assert_eq!(CURSOR_OFFSET, IVec2::new(5, 5));
    }
}
