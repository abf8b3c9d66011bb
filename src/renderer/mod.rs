//! Rendering module
//!
//! `style` turns bubbles into gradient/shape descriptions; `canvas` replays
//! them on a 2D canvas context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use style::{BubbleStyle, RadialGradient};
