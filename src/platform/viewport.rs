//! Canvas sizing
//!
//! Fits a 4:3 canvas into its container, capped at 800 px wide and kept
//! above a small minimum so the grid stays usable.

/// Widest the canvas grows
pub const MAX_CANVAS_WIDTH: f32 = 800.0;
/// Smallest canvas the default grid fits on at its minimum radius
pub const MIN_CANVAS_WIDTH: u32 = 190;
pub const MIN_CANVAS_HEIGHT: u32 = 142;
/// Share of the container width the canvas may take
const CONTAINER_FILL: f32 = 0.98;
/// Vertical room reserved around the canvas
const VERTICAL_PADDING: f32 = 40.0;
/// Height as a fraction of width (4:3)
const HEIGHT_PER_WIDTH: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Canvas size for a container of `container_width`, a window of
/// `window_height` and a HUD taking `ui_height` above the canvas
pub fn fit_canvas(container_width: f32, window_height: f32, ui_height: f32) -> CanvasSize {
    let max_width = container_width * CONTAINER_FILL;
    let available_height = window_height - ui_height - VERTICAL_PADDING;

    let mut width = max_width.min(MAX_CANVAS_WIDTH);
    let mut height = width * HEIGHT_PER_WIDTH;
    if height > available_height {
        height = available_height;
        width = height / HEIGHT_PER_WIDTH;
    }
    width = width.min(max_width);

    CanvasSize {
        width: (width.floor().max(0.0) as u32).max(MIN_CANVAS_WIDTH),
        height: (height.floor().max(0.0) as u32).max(MIN_CANVAS_HEIGHT),
    }
}
