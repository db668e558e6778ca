//! YAML configuration for diagram styling and layout physics.
//!
//! Every section is optional; omitted keys fall back to the defaults below.
//!
//! ```yaml
//! style:
//!   min_name_chars: 20
//!   edge_color: "#ff8800"
//! physics:
//!   spring_length: 300
//! canvas:
//!   height: 900px
//! ```

use crate::error::DiagramError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound for any pixel-valued style setting
pub const MAX_STYLE_PIXELS: u32 = 10_000;

/// Upper bound for the minimum panel widths, in characters
pub const MAX_STYLE_CHARS: usize = 10_000;

/// Table image measurements and colors.
///
/// All widths are derived from a fixed monospace character width, so
/// `char_width` and `font_size` should be changed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Font size in pixels for all table text
    pub font_size: u32,
    /// Height of the header row and every column row
    pub row_height: u32,
    /// Approximate advance of one monospace character
    pub char_width: u32,
    /// Horizontal padding on each side of a panel
    pub padding: u32,
    /// Name panel is never narrower than this many characters
    pub min_name_chars: usize,
    /// Type panel is never narrower than this many characters
    pub min_type_chars: usize,
    /// Absolute pixel floor for either panel
    pub min_panel_width: u32,
    /// Fill of the header band
    pub header_fill: String,
    /// Color of foreign-key edges
    pub edge_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 14,
            row_height: 24,
            char_width: 9,
            padding: 10,
            min_name_chars: 30,
            min_type_chars: 10,
            min_panel_width: 50,
            header_fill: "#e0e0e0".to_string(),
            edge_color: "#3388ff".to_string(),
        }
    }
}

/// Barnes-Hut parameters forwarded verbatim to the force-directed runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_strength: f64,
    pub damping: f64,
    pub overlap: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -2000.0,
            central_gravity: 0.4,
            spring_length: 250.0,
            spring_strength: 0.05,
            damping: 0.25,
            overlap: 0.2,
        }
    }
}

/// Canvas appearance of the interactive document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// CSS height of the network canvas
    pub height: String,
    /// CSS width of the network canvas
    pub width: String,
    pub background: String,
    pub font_color: String,
    /// Draw arrow heads on edges
    pub directed: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            height: "600px".to_string(),
            width: "100%".to_string(),
            background: "white".to_string(),
            font_color: "black".to_string(),
            directed: true,
        }
    }
}

/// Complete diagram configuration threaded through rendering and building
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    pub style: StyleConfig,
    pub physics: PhysicsConfig,
    pub canvas: CanvasConfig,
}

impl DiagramConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, DiagramError> {
        let content = fs::read_to_string(path).map_err(|e| DiagramError::read(path, e))?;
        Self::from_yaml(&content).map_err(|message| DiagramError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let config: DiagramConfig = if content.trim().is_empty() {
            DiagramConfig::default()
        } else {
            serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make table layout degenerate
    pub fn validate(&self) -> Result<(), String> {
        let style = &self.style;
        if style.char_width == 0 {
            return Err("style.char_width must be greater than 0".to_string());
        }
        if style.row_height == 0 {
            return Err("style.row_height must be greater than 0".to_string());
        }
        if style.font_size == 0 {
            return Err("style.font_size must be greater than 0".to_string());
        }

        let pixels = [
            ("font_size", style.font_size),
            ("row_height", style.row_height),
            ("char_width", style.char_width),
            ("padding", style.padding),
            ("min_panel_width", style.min_panel_width),
        ];
        for (key, value) in pixels {
            if value > MAX_STYLE_PIXELS {
                return Err(format!(
                    "style.{key} must be at most {MAX_STYLE_PIXELS}, got {value}"
                ));
            }
        }

        let chars = [
            ("min_name_chars", style.min_name_chars),
            ("min_type_chars", style.min_type_chars),
        ];
        for (key, value) in chars {
            if value > MAX_STYLE_CHARS {
                return Err(format!(
                    "style.{key} must be at most {MAX_STYLE_CHARS}, got {value}"
                ));
            }
        }
        Ok(())
    }
}
