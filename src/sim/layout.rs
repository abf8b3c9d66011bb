//! Grid layout arithmetic
//!
//! Fits `rows × cols` circles into a padded sub-rectangle of the canvas.
//! For `n` bubbles along an axis the grid needs `n·D + (n-1)·S` where
//! `S = D/2 · ratio`, so the largest diameter is `area / (n + (n-1)·ratio/2)`.
//!
//! The radius is clamped to `[min_radius, max_radius]`, except that
//! `min_radius` gives way when the grid would otherwise spill off the canvas.
//! The default 7×10 grid fits at `min_radius` on anything from 189×132 up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Inputs to the layout computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    /// Spacing between neighbours as a fraction of the radius
    pub spacing_ratio: f32,
    /// Fraction of canvas width/height the grid may use
    pub area_fraction: Vec2,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl GridSpec {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rows: settings.rows,
            cols: settings.cols,
            spacing_ratio: settings.spacing_ratio,
            area_fraction: Vec2::new(settings.grid_area_width, settings.grid_area_height),
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
        }
    }

    pub fn count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Result of laying out a grid on a canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub canvas: Vec2,
    pub radius: f32,
    pub spacing: f32,
    /// Bubble centres in row-major order
    pub centers: Vec<Vec2>,
}

impl GridLayout {
    /// Distance between two neighbouring centres
    pub fn pitch(&self) -> f32 {
        self.radius * 2.0 + self.spacing
    }
}

/// Diameter that fits `n` circles plus `n-1` gaps into `extent`
fn fit_diameter(extent: f32, n: u32, spacing_ratio: f32) -> f32 {
    let n = n as f32;
    extent / (n + (n - 1.0).max(0.0) * (spacing_ratio / 2.0))
}

/// Compute radius, spacing and centres for a canvas of `width × height`
pub fn compute_layout(width: f32, height: f32, spec: &GridSpec) -> GridLayout {
    let canvas = Vec2::new(width.max(0.0), height.max(0.0));

    if spec.rows == 0 || spec.cols == 0 {
        return GridLayout {
            canvas,
            radius: spec.max_radius,
            spacing: spec.max_radius * spec.spacing_ratio,
            centers: Vec::new(),
        };
    }

    let area = canvas * spec.area_fraction;
    let diameter = fit_diameter(area.x, spec.cols, spec.spacing_ratio)
        .min(fit_diameter(area.y, spec.rows, spec.spacing_ratio));

    // Largest radius whose grid still fits the whole canvas
    let ceiling = fit_diameter(canvas.x, spec.cols, spec.spacing_ratio)
        .min(fit_diameter(canvas.y, spec.rows, spec.spacing_ratio));
    let radius = (diameter / 2.0)
        .clamp(spec.min_radius, spec.max_radius)
        .min(ceiling / 2.0);

    let mut layout = GridLayout {
        canvas,
        radius,
        spacing: radius * spec.spacing_ratio,
        centers: Vec::with_capacity(spec.count()),
    };
    let pitch = layout.pitch();

    let grid_size = Vec2::new(spec.cols as f32, spec.rows as f32) * pitch - layout.spacing;
    let first = (canvas - grid_size) / 2.0 + Vec2::splat(radius);

    for row in 0..spec.rows {
        for col in 0..spec.cols {
            layout.centers.push(first + Vec2::new(col as f32, row as f32) * pitch);
        }
    }

    layout
}
