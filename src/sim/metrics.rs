//! Stress meter derived from the bubble grid

use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::color::Rgb;
use crate::consts::{NEUTRAL_MAX_PERCENT, RELIEVED_MAX_PERCENT};

/// Discrete stress display category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressTier {
    /// Few bubbles left
    Relieved,
    Neutral,
    /// Most bubbles still intact (or no grid at all)
    Stressed,
}

impl StressTier {
    /// Tier for a percentage of bubbles remaining
    pub fn from_percentage(percentage_remaining: f32) -> Self {
        if percentage_remaining <= RELIEVED_MAX_PERCENT {
            StressTier::Relieved
        } else if percentage_remaining <= NEUTRAL_MAX_PERCENT {
            StressTier::Neutral
        } else {
            StressTier::Stressed
        }
    }

    /// Stress bar fill color
    pub fn color(&self) -> Rgb {
        match self {
            StressTier::Relieved => Rgb::new(0x6d, 0xec, 0x78),
            StressTier::Neutral => Rgb::new(0xff, 0xc1, 0x07),
            StressTier::Stressed => Rgb::new(0xff, 0x33, 0x33),
        }
    }

    /// Face shown next to the meter
    pub fn icon(&self) -> &'static str {
        match self {
            StressTier::Relieved => "\u{1F604}",
            StressTier::Neutral => "\u{1F610}",
            StressTier::Stressed => "\u{1F630}",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressTier::Relieved => "relieved",
            StressTier::Neutral => "neutral",
            StressTier::Stressed => "stressed",
        }
    }
}

/// Snapshot of the stress meter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressReading {
    pub popped: usize,
    pub total: usize,
    /// 0..=100
    pub percentage_remaining: f32,
    pub tier: StressTier,
}

impl StressReading {
    pub fn from_counts(popped: usize, total: usize) -> Self {
        // An empty grid reads as 0% remaining but maximum stress
        if total == 0 {
            return Self {
                popped: 0,
                total: 0,
                percentage_remaining: 0.0,
                tier: StressTier::Stressed,
            };
        }
        // remaining·100/total keeps exact tier boundaries exact in f32
        let remaining = total.saturating_sub(popped);
        let percentage_remaining = (remaining as f32 * 100.0) / total as f32;
        Self {
            popped,
            total,
            percentage_remaining,
            tier: StressTier::from_percentage(percentage_remaining),
        }
    }

    pub fn from_bubbles(bubbles: &[Bubble]) -> Self {
        let popped = bubbles.iter().filter(|b| b.popped).count();
        Self::from_counts(popped, bubbles.len())
    }
}
