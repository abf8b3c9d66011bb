//! Structured bubble colors
//!
//! Colors are parsed from `rgb(r,g,b)` text once, when settings are loaded.
//! Everything after that works on the three channels directly.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback for palette entries that fail to parse
    pub const NEUTRAL: Rgb = Rgb::new(200, 200, 200);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rgb(r,g,b)` (whitespace around channels is allowed)
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Self::new(r, g, b))
    }

    /// Parse, falling back to [`Rgb::NEUTRAL`]
    pub fn parse_or_neutral(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Malformed color {:?}, using neutral", s);
            Self::NEUTRAL
        })
    }

    /// Add `amount` to every channel, saturating at 255
    pub fn lighten(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }

    /// Subtract `amount` from every channel, saturating at 0
    pub fn darken(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_sub(amount),
            self.g.saturating_sub(amount),
            self.b.saturating_sub(amount),
        )
    }

    /// CSS `rgb()` string
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string with the given alpha
    pub fn css_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Default bubble palette
pub const DEFAULT_PALETTE: [Rgb; 7] = [
    Rgb::new(255, 105, 180), // hot pink
    Rgb::new(0, 191, 255),   // deep sky blue
    Rgb::new(50, 205, 50),   // lime green
    Rgb::new(255, 215, 0),   // gold
    Rgb::new(147, 112, 219), // medium purple
    Rgb::new(255, 69, 0),    // orange red
    Rgb::new(0, 255, 255),   // cyan
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(Rgb::parse("rgb(255,105,180)"), Some(Rgb::new(255, 105, 180)));
        assert_eq!(Rgb::parse(" rgb( 1, 2 ,3 ) "), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Rgb::parse("#ff00ff"), None);
        assert_eq!(Rgb::parse("rgb(1,2)"), None);
        assert_eq!(Rgb::parse("rgb(1,2,3,4)"), None);
        assert_eq!(Rgb::parse("rgb(256,0,0)"), None);
        assert_eq!(Rgb::parse("rgba(1,2,3)"), None);
    }

    #[test]
    fn test_malformed_falls_back_to_neutral() {
        assert_eq!(Rgb::parse_or_neutral("not a color"), Rgb::NEUTRAL);
        assert_eq!(Rgb::parse_or_neutral("rgb(0,191,255)"), Rgb::new(0, 191, 255));
    }

    #[test]
    fn test_lighten_darken_saturate() {
        let c = Rgb::new(230, 10, 100);
        assert_eq!(c.lighten(40), Rgb::new(255, 50, 140));
        assert_eq!(c.darken(20), Rgb::new(210, 0, 80));
    }

    #[test]
    fn test_css_strings() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.css(), "rgb(1, 2, 3)");
        assert_eq!(c.css_alpha(0.9), "rgba(1, 2, 3, 0.9)");
    }
}
