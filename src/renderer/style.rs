//! Per-bubble draw descriptions
//!
//! Pure geometry + color stops; the canvas backend just replays them.

use glam::Vec2;

use crate::consts::POPPED_SHRINK;
use crate::sim::{Bubble, Rgb};

/// Canvas background
pub const BACKGROUND: Rgb = Rgb::new(0xc8, 0xdc, 0xff);
/// Fill for the dot left behind by a popped bubble
pub const POPPED_FILL: &str = "rgba(100, 100, 100, 0.6)";

/// A radial gradient between two circles
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    /// (offset 0..=1, CSS color)
    pub stops: Vec<(f32, String)>,
}

/// Ellipse shape for the specular highlight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
    pub rotation: f32,
}

/// How to draw one bubble this frame
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleStyle {
    Popped {
        center: Vec2,
        radius: f32,
    },
    Intact {
        center: Vec2,
        radius: f32,
        body: RadialGradient,
        highlight: RadialGradient,
        highlight_shape: Ellipse,
        rim: RadialGradient,
        rim_radius: f32,
    },
}

impl BubbleStyle {
    pub fn for_bubble(bubble: &Bubble) -> Self {
        if bubble.popped {
            return BubbleStyle::Popped {
                center: bubble.pos,
                radius: bubble.base_radius / POPPED_SHRINK,
            };
        }

        let c = bubble.pos;
        let r = bubble.display_radius.max(0.0);
        let color = bubble.color;

        let body = RadialGradient {
            inner_center: c - Vec2::splat(r * 0.1),
            inner_radius: r * 0.1,
            outer_center: c,
            outer_radius: r,
            stops: vec![
                (0.0, color.lighten(40).css_alpha(1.0)),
                (0.8, color.css()),
                (1.0, color.darken(20).css_alpha(0.9)),
            ],
        };

        let hl_center = c + Vec2::new(-r * 0.35, -r * 0.45);
        let hl_radius = r * 0.25;
        let highlight = RadialGradient {
            inner_center: hl_center,
            inner_radius: hl_radius * 0.1,
            outer_center: hl_center,
            outer_radius: hl_radius,
            stops: vec![
                (0.0, "rgba(255, 255, 255, 0.95)".to_string()),
                (0.5, "rgba(255, 255, 255, 0.7)".to_string()),
                (1.0, "rgba(255, 255, 255, 0)".to_string()),
            ],
        };
        let highlight_shape = Ellipse {
            center: hl_center + Vec2::splat(r * 0.05),
            radii: Vec2::new(hl_radius, hl_radius * 0.8),
            rotation: std::f32::consts::FRAC_PI_4,
        };

        // Faint bluish rim light, lower right
        let rim_center = c + Vec2::splat(r * 0.3);
        let rim_radius = r * 0.15;
        let rim = RadialGradient {
            inner_center: rim_center,
            inner_radius: rim_radius * 0.1,
            outer_center: rim_center,
            outer_radius: rim_radius,
            stops: vec![
                (0.0, "rgba(220, 220, 255, 0.25)".to_string()),
                (1.0, "rgba(220, 220, 255, 0)".to_string()),
            ],
        };

        BubbleStyle::Intact {
            center: c,
            radius: r,
            body,
            highlight,
            highlight_shape,
            rim,
            rim_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Wobble;

    fn bubble(color: Rgb) -> Bubble {
        let wobble = Wobble {
            phase: 0.0,
            speed: 0.03,
            amplitude: 1.0,
        };
        Bubble::new(Vec2::new(50.0, 60.0), 18.0, color, wobble)
    }

    #[test]
    fn test_popped_is_small_dot() {
        let mut b = bubble(Rgb::NEUTRAL);
        b.pop();
        match BubbleStyle::for_bubble(&b) {
            BubbleStyle::Popped { center, radius } => {
                assert_eq!(center, Vec2::new(50.0, 60.0));
                assert!((radius - 10.0).abs() < 1e-5);
            }
            other => panic!("expected popped style, got {:?}", other),
        }
    }

    #[test]
    fn test_body_gradient_derived_from_color() {
        let b = bubble(Rgb::new(255, 105, 180));
        let BubbleStyle::Intact { body, .. } = BubbleStyle::for_bubble(&b) else {
            panic!("expected intact style");
        };
        assert_eq!(body.stops[0].1, "rgba(255, 145, 220, 1)");
        assert_eq!(body.stops[1].1, "rgb(255, 105, 180)");
        assert_eq!(body.stops[2].1, "rgba(235, 85, 160, 0.9)");
        assert_eq!(body.outer_radius, 18.0);
    }

    #[test]
    fn test_intact_uses_display_radius() {
        let mut b = bubble(Rgb::NEUTRAL);
        b.display_radius = 20.0;
        let BubbleStyle::Intact { radius, .. } = BubbleStyle::for_bubble(&b) else {
            panic!("expected intact style");
        };
        assert_eq!(radius, 20.0);
    }
}
