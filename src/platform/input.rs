//! Input translation

use glam::Vec2;

/// Actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Rebuild the grid
    Reset,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "r" | "R" => Some(KeyAction::Reset),
        _ => None,
    }
}

/// Client (viewport) coordinates to canvas-local coordinates.
///
/// `scale` maps CSS pixels to canvas pixels when the canvas backing store
/// differs from its displayed size.
pub fn client_to_surface(client: Vec2, rect_origin: Vec2, scale: Vec2) -> Vec2 {
    (client - rect_origin) * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_key_any_case() {
        assert_eq!(key_action("r"), Some(KeyAction::Reset));
        assert_eq!(key_action("R"), Some(KeyAction::Reset));
        assert_eq!(key_action("Enter"), None);
        assert_eq!(key_action("t"), None);
    }

    #[test]
    fn test_client_to_surface() {
        let p = client_to_surface(Vec2::new(110.0, 70.0), Vec2::new(10.0, 20.0), Vec2::ONE);
        assert_eq!(p, Vec2::new(100.0, 50.0));

        let p = client_to_surface(Vec2::new(110.0, 70.0), Vec2::new(10.0, 20.0), Vec2::splat(2.0));
        assert_eq!(p, Vec2::new(200.0, 100.0));
    }
}
