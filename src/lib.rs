//! Bubble Pop - A bubble-wrap stress-relief toy
//!
//! Core modules:
//! - `sim`: Deterministic session state (grid layout, pops, combos, regeneration)
//! - `renderer`: Bubble styling and 2D canvas drawing
//! - `platform`: Browser glue helpers (canvas sizing, pointer/key mapping)
//! - `settings`: Data-driven configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Rgb, Session, SessionEvent, StressTier};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the wobble speeds are tuned for (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta fed to the animation (tab switches etc.)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Grid defaults
    pub const GRID_ROWS: u32 = 7;
    pub const GRID_COLS: u32 = 10;
    /// Spacing between bubbles relative to bubble radius
    pub const SPACING_TO_RADIUS_RATIO: f32 = 0.4;
    /// Fraction of the canvas the grid may occupy
    pub const GRID_AREA_WIDTH: f32 = 0.95;
    pub const GRID_AREA_HEIGHT: f32 = 0.90;
    pub const MIN_BUBBLE_RADIUS: f32 = 8.0;
    pub const MAX_BUBBLE_RADIUS: f32 = 35.0;

    /// Scoring defaults
    pub const BASE_POINTS: u64 = 10;
    pub const COMBO_WINDOW_MS: f64 = 500.0;
    pub const COMBO_CAP: u32 = 5;

    /// Delay between two regenerated bubbles
    pub const REGEN_INTERVAL_MS: f64 = 60.0;

    /// Transient overlay lifetimes
    pub const GLOW_DURATION_MS: u32 = 600;
    pub const COMBO_TEXT_DURATION_MS: u32 = 600;

    /// Idle wobble: amplitude as a fraction of base radius
    pub const WOBBLE_MIN_AMPLITUDE: f32 = 0.03;
    pub const WOBBLE_MAX_AMPLITUDE: f32 = 0.07;
    /// Idle wobble: phase increment per 60 Hz frame (radians)
    pub const WOBBLE_MIN_SPEED: f32 = 0.02;
    pub const WOBBLE_MAX_SPEED: f32 = 0.05;

    /// Popped bubbles shrink to a dot of base_radius / POPPED_SHRINK
    pub const POPPED_SHRINK: f32 = 1.8;

    /// Stress tier thresholds (percentage of bubbles remaining, inclusive)
    pub const RELIEVED_MAX_PERCENT: f32 = 30.0;
    pub const NEUTRAL_MAX_PERCENT: f32 = 60.0;
}

/// Squared distance check used for circle hit-testing
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_phase(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
