//! Platform helpers
//!
//! Browser-independent pieces of the platform glue:
//! - Pointer/key translation
//! - Canvas sizing inside its container

pub mod input;
pub mod viewport;

pub use input::{KeyAction, client_to_surface, key_action};
pub use viewport::{CanvasSize, fit_canvas};
