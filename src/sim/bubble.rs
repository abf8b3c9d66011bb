//! Bubble entity

use glam::Vec2;
use rand::Rng;

use super::color::Rgb;
use crate::consts::*;
use crate::{point_in_circle, wrap_phase};

/// Idle "breathing" animation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    /// Current phase angle (radians)
    pub phase: f32,
    /// Phase increment per 60 Hz frame
    pub speed: f32,
    /// Radius fluctuation in pixels
    pub amplitude: f32,
}

impl Wobble {
    /// Randomised wobble so neighbouring bubbles don't breathe in sync
    pub fn random(rng: &mut impl Rng, base_radius: f32) -> Self {
        Self {
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            speed: rng.random_range(WOBBLE_MIN_SPEED..WOBBLE_MAX_SPEED),
            amplitude: base_radius * rng.random_range(WOBBLE_MIN_AMPLITUDE..WOBBLE_MAX_AMPLITUDE),
        }
    }

    /// Radius offset at the current phase
    pub fn offset(&self) -> f32 {
        self.amplitude * self.phase.sin()
    }
}

/// A single poppable bubble
#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    /// Radius from layout; hit-testing always uses this
    pub base_radius: f32,
    /// Animated radius used for drawing
    pub display_radius: f32,
    pub color: Rgb,
    pub popped: bool,
    pub wobble: Wobble,
}

impl Bubble {
    pub fn new(pos: Vec2, base_radius: f32, color: Rgb, wobble: Wobble) -> Self {
        Self {
            pos,
            base_radius,
            display_radius: base_radius,
            color,
            popped: false,
            wobble,
        }
    }

    /// True if `point` lands on this bubble and it can still be popped
    pub fn is_hit(&self, point: Vec2) -> bool {
        !self.popped && point_in_circle(point, self.pos, self.base_radius)
    }

    /// Mark popped. Returns false if it already was.
    pub fn pop(&mut self) -> bool {
        if self.popped {
            return false;
        }
        self.popped = true;
        self.display_radius = self.base_radius;
        true
    }

    /// Bring the bubble back with a fresh color and animation phase
    pub fn regenerate(&mut self, color: Rgb, phase: f32) {
        self.popped = false;
        self.color = color;
        self.display_radius = self.base_radius;
        self.wobble.phase = wrap_phase(phase);
    }

    /// Advance the idle wobble by `frames` 60 Hz frames
    pub fn animate(&mut self, frames: f32) {
        if self.popped {
            return;
        }
        self.wobble.phase = wrap_phase(self.wobble.phase + self.wobble.speed * frames);
        self.display_radius = (self.base_radius + self.wobble.offset()).max(0.0);
    }
}
