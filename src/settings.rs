//! Converter parameters.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration:
//!
//! ```
//! use linecanvas::settings::ConverterSettings;
//!
//! let json = r#"{"brightness": 140, "tool": "eraser"}"#;
//! let settings = ConverterSettings::from_json(json).unwrap();
//! assert_eq!(settings.brightness, 140);
//! assert_eq!(settings.contrast, 100);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compositor::{Tool, DEFAULT_PENCIL_SIZE, MAX_PENCIL_SIZE, MIN_PENCIL_SIZE};
use crate::error::{FilterError, Result};
use crate::filters::{EdgeChannel, Filter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Brightness percentage; the slider offers 0-200.
    pub brightness: i32,
    /// Contrast value for the stretch formula; the slider offers 0-200.
    pub contrast: i32,
    /// Stroke width in pixels, 1-20.
    pub pencil_size: u32,
    pub tool: Tool,
    pub edge_channel: EdgeChannel,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            pencil_size: DEFAULT_PENCIL_SIZE,
            tool: Tool::Pencil,
            edge_channel: EdgeChannel::Red,
        }
    }
}

impl ConverterSettings {
    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|err| FilterError::Config(err.to_string()))?;
        settings.validate()?;
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| FilterError::Config(err.to_string()))
    }

    /// Only the pencil size has a hard range. Brightness and contrast pass
    /// through as given.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PENCIL_SIZE..=MAX_PENCIL_SIZE).contains(&self.pencil_size) {
            return Err(FilterError::Config(format!(
                "pencil_size must be within {MIN_PENCIL_SIZE}..={MAX_PENCIL_SIZE}, got {}",
                self.pencil_size
            )));
        }
        Ok(())
    }

    /// The brightness/contrast step these settings describe.
    pub fn adjustment(&self) -> Filter {
        Filter::BrightnessContrast {
            brightness: self.brightness,
            contrast: self.contrast,
        }
    }

    /// The line-drawing step these settings describe.
    pub fn line_drawing(&self) -> Filter {
        Filter::Sobel {
            channel: self.edge_channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_converter_sliders() {
        let settings = ConverterSettings::default();
        assert_eq!(settings.brightness, 100);
        assert_eq!(settings.contrast, 100);
        assert_eq!(settings.pencil_size, 5);
        assert_eq!(settings.tool, Tool::Pencil);
        assert_eq!(settings.edge_channel, EdgeChannel::Red);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(
            ConverterSettings::from_json("{}").unwrap(),
            ConverterSettings::default()
        );
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let settings =
            ConverterSettings::from_json(r#"{"contrast": 259, "edge_channel": "mean"}"#).unwrap();
        assert_eq!(settings.contrast, 259);
        assert_eq!(settings.edge_channel, EdgeChannel::Mean);
        assert_eq!(settings.pencil_size, 5);
    }

    #[test]
    fn test_pencil_size_out_of_range_is_rejected() {
        for json in [r#"{"pencil_size": 0}"#, r#"{"pencil_size": 21}"#] {
            assert!(matches!(
                ConverterSettings::from_json(json),
                Err(FilterError::Config(_))
            ));
        }
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            ConverterSettings::from_json(r#"{"tool": "spray"}"#),
            Err(FilterError::Config(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = ConverterSettings {
            brightness: 0,
            contrast: 200,
            pencil_size: 20,
            tool: Tool::Eraser,
            edge_channel: EdgeChannel::Mean,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(ConverterSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_adjustment_step() {
        let settings = ConverterSettings {
            brightness: 80,
            contrast: 20,
            ..Default::default()
        };
        assert_eq!(
            settings.adjustment(),
            Filter::BrightnessContrast {
                brightness: 80,
                contrast: 20
            }
        );
    }
}
