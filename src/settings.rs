//! Game settings
//!
//! Read once at startup (never persisted). In the browser the JSON comes
//! from the canvas `data-settings` attribute; natively from a file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::color::{DEFAULT_PALETTE, Rgb};

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Not valid JSON for [`Settings`]
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings read error: {}", e),
            SettingsError::Parse(e) => write!(f, "settings parse error: {}", e),
            SettingsError::Invalid(what) => write!(f, "invalid settings: {}", what),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    pub rows: u32,
    pub cols: u32,
    /// Gap between bubbles as a fraction of the radius
    pub spacing_ratio: f32,
    /// Fraction of canvas width the grid may use
    pub grid_area_width: f32,
    /// Fraction of canvas height the grid may use
    pub grid_area_height: f32,
    pub min_radius: f32,
    pub max_radius: f32,

    // === Scoring ===
    pub base_points: u64,
    pub combo_window_ms: f64,
    /// `null` for an unbounded multiplier
    pub combo_cap: Option<u32>,

    // === Regeneration ===
    pub regen_interval_ms: f64,

    // === Visuals ===
    /// Idle breathing animation
    pub wobble: bool,
    /// Bubble colors as `rgb(r,g,b)` strings
    pub palette: Vec<String>,
    pub glow_duration_ms: u32,
    pub combo_text_duration_ms: u32,

    // === Audio ===
    /// Pop volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed (random if absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            spacing_ratio: SPACING_TO_RADIUS_RATIO,
            grid_area_width: GRID_AREA_WIDTH,
            grid_area_height: GRID_AREA_HEIGHT,
            min_radius: MIN_BUBBLE_RADIUS,
            max_radius: MAX_BUBBLE_RADIUS,

            base_points: BASE_POINTS,
            combo_window_ms: COMBO_WINDOW_MS,
            combo_cap: Some(COMBO_CAP),

            regen_interval_ms: REGEN_INTERVAL_MS,

            wobble: true,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|c| format!("rgb({},{},{})", c.r, c.g, c.b))
                .collect(),
            glow_duration_ms: GLOW_DURATION_MS,
            combo_text_duration_ms: COMBO_TEXT_DURATION_MS,

            sfx_volume: 0.6,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document. Missing keys take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse, logging and falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SettingsError::Invalid("rows and cols must be at least 1"));
        }
        if !(self.spacing_ratio >= 0.0) {
            return Err(SettingsError::Invalid("spacing_ratio must be non-negative"));
        }
        let area_ok = |f: f32| f > 0.0 && f <= 1.0;
        if !area_ok(self.grid_area_width) || !area_ok(self.grid_area_height) {
            return Err(SettingsError::Invalid("grid area fractions must be in (0, 1]"));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(SettingsError::Invalid("need 0 < min_radius <= max_radius"));
        }
        if !(self.combo_window_ms >= 0.0) {
            return Err(SettingsError::Invalid("combo_window_ms must be non-negative"));
        }
        if self.combo_cap == Some(0) {
            return Err(SettingsError::Invalid("combo_cap must be at least 1"));
        }
        if !(self.regen_interval_ms > 0.0) {
            return Err(SettingsError::Invalid("regen_interval_ms must be positive"));
        }
        if self.palette.is_empty() {
            return Err(SettingsError::Invalid("palette must not be empty"));
        }
        Ok(())
    }

    /// Attribute on the canvas element holding the settings JSON
    #[allow(dead_code)]
    const CANVAS_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        match canvas.get_attribute(Self::CANVAS_ATTRIBUTE) {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parsed palette. Malformed entries become the neutral color.
    pub fn palette(&self) -> Vec<Rgb> {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE.to_vec();
        }
        self.palette.iter().map(|s| Rgb::parse_or_neutral(s)).collect()
    }

    /// Effective pop volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.palette(), DEFAULT_PALETTE.to_vec());
        assert_eq!(settings.rows * settings.cols, 70);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "rows": 3, "combo_window_ms": 400 }"#).unwrap();
        assert_eq!(settings.rows, 3);
        assert_eq!(settings.cols, GRID_COLS);
        assert_eq!(settings.combo_window_ms, 400.0);
        assert_eq!(settings.combo_cap, Some(COMBO_CAP));
    }

    #[test]
    fn test_null_cap_is_unbounded() {
        let settings = Settings::from_json(r#"{ "combo_cap": null }"#).unwrap();
        assert_eq!(settings.combo_cap, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "rows": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "regen_interval_ms": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "min_radius": 40, "max_radius": 10 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "palette": [] }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Settings::from_json_or_default("garbage"), Settings::default());
    }

    #[test]
    fn test_malformed_palette_entry_is_neutral() {
        let settings =
            Settings::from_json(r#"{ "palette": ["rgb(1,2,3)", "blue"] }"#).unwrap();
        assert_eq!(settings.palette(), vec![Rgb::new(1, 2, 3), Rgb::NEUTRAL]);
    }

    #[test]
    fn test_muted_volume() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
