//! Session state: the bubble grid, score/combo bookkeeping and regeneration
//!
//! Everything mutable about a play-through lives on [`Session`]. Platform
//! code feeds it pointer positions and timestamps, then drains
//! [`SessionEvent`]s to play sounds and spawn overlays.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, Wobble};
use super::color::Rgb;
use super::layout::{GridLayout, GridSpec, compute_layout};
use super::metrics::StressReading;
use super::regen::Regeneration;
use crate::settings::Settings;

/// Coarse session phase. Popping and "all popped" are transient and
/// resolve within a single `handle_pop` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Accepting pops
    Idle,
    /// Staggered reveal in flight, pops are ignored
    Regenerating,
}

/// Score and combo tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub base_points: u64,
    /// Max gap between pops for the multiplier to grow (exclusive)
    pub combo_window_ms: f64,
    /// Multiplier ceiling; `None` means unbounded
    pub combo_cap: Option<u32>,
}

impl ScoringRules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_points: settings.base_points,
            combo_window_ms: settings.combo_window_ms,
            combo_cap: settings.combo_cap,
        }
    }

    /// Multiplier for a pop at `now` given the previous pop
    pub fn next_multiplier(&self, current: u32, last_pop_ms: Option<f64>, now_ms: f64) -> u32 {
        match last_pop_ms {
            Some(last) if now_ms - last < self.combo_window_ms => {
                let next = current.saturating_add(1);
                match self.combo_cap {
                    Some(cap) => next.min(cap.max(1)),
                    None => next,
                }
            }
            _ => 1,
        }
    }
}

/// Things the platform layer should react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Grid was (re)built; score and combo are back to zero
    Rebuilt { bubbles: usize, radius: f32 },
    /// A bubble popped: play the pop sound
    Popped {
        index: usize,
        pos: Vec2,
        multiplier: u32,
        points: u64,
    },
    /// Multiplier above 1: show floating combo text
    Combo { multiplier: u32, pos: Vec2 },
    RegenerationStarted { count: usize },
    /// A bubble came back: show a glow overlay
    Revealed { index: usize, pos: Vec2, radius: f32 },
    RegenerationFinished,
}

/// Result of a successful pop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopOutcome {
    pub index: usize,
    pub multiplier: u32,
    pub points: u64,
    /// This pop cleared the grid and started regeneration
    pub cleared: bool,
}

/// Full mutable state for one play-through
#[derive(Debug, Clone)]
pub struct Session {
    grid: GridSpec,
    rules: ScoringRules,
    palette: Vec<Rgb>,
    wobble_enabled: bool,
    layout: GridLayout,
    bubbles: Vec<Bubble>,
    score: u64,
    combo: u32,
    last_pop_ms: Option<f64>,
    regeneration: Option<Regeneration>,
    rng: Pcg32,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session and build its grid for a `width × height` canvas
    pub fn new(settings: &Settings, width: f32, height: f32, seed: u64) -> Self {
        let grid = GridSpec::from_settings(settings);
        let mut session = Self {
            layout: compute_layout(width, height, &grid),
            grid,
            rules: ScoringRules::from_settings(settings),
            palette: settings.palette(),
            wobble_enabled: settings.wobble,
            bubbles: Vec::new(),
            score: 0,
            combo: 1,
            last_pop_ms: None,
            regeneration: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.rebuild(width, height);
        session
    }

    /// Lay out a fresh grid and clear score, combo and regeneration
    pub fn rebuild(&mut self, width: f32, height: f32) {
        if let Some(regen) = self.regeneration.take() {
            log::info!(
                "Rebuild cancelled regeneration with {} bubbles pending",
                regen.remaining()
            );
        }

        self.layout = compute_layout(width, height, &self.grid);
        self.score = 0;
        self.combo = 1;
        self.last_pop_ms = None;

        let radius = self.layout.radius;
        let centers = self.layout.centers.clone();
        let mut bubbles = Vec::with_capacity(centers.len());
        for center in centers {
            let color = self.random_color();
            let wobble = Wobble::random(&mut self.rng, radius);
            bubbles.push(Bubble::new(center, radius, color, wobble));
        }
        self.bubbles = bubbles;

        log::info!(
            "Grid built: canvas {}x{}, {} bubbles, radius {:.1}, spacing {:.1}",
            self.layout.canvas.x,
            self.layout.canvas.y,
            self.bubbles.len(),
            self.layout.radius,
            self.layout.spacing
        );
        self.events.push(SessionEvent::Rebuilt {
            bubbles: self.bubbles.len(),
            radius,
        });
    }

    /// Canvas changed size: the old layout is invalid, always rebuild
    pub fn resize(&mut self, width: f32, height: f32) {
        self.rebuild(width, height);
    }

    /// Manual reset. Ignored while regenerating; returns whether it ran.
    pub fn request_reset(&mut self) -> bool {
        if self.is_regenerating() {
            log::info!("Reset ignored while regenerating");
            return false;
        }
        let canvas = self.layout.canvas;
        self.rebuild(canvas.x, canvas.y);
        true
    }

    /// Pop the topmost unpopped bubble under `point`
    pub fn handle_pop(&mut self, point: Vec2, now_ms: f64) -> Option<PopOutcome> {
        if self.is_regenerating() {
            return None;
        }
        // Later bubbles draw on top, so scan back to front
        let index = self.bubbles.iter().rposition(|b| b.is_hit(point))?;
        self.pop_index(index, now_ms)
    }

    /// Pop a bubble by index, bypassing the hit-test.
    /// Already-popped bubbles and out-of-range indices are ignored.
    pub fn pop_index(&mut self, index: usize, now_ms: f64) -> Option<PopOutcome> {
        if self.is_regenerating() {
            return None;
        }
        let bubble = self.bubbles.get_mut(index)?;
        if !bubble.pop() {
            return None;
        }
        let pos = bubble.pos;

        self.combo = self.rules.next_multiplier(self.combo, self.last_pop_ms, now_ms);
        self.last_pop_ms = Some(now_ms);
        let points = self.rules.base_points.saturating_mul(self.combo as u64);
        self.score = self.score.saturating_add(points);

        self.events.push(SessionEvent::Popped {
            index,
            pos,
            multiplier: self.combo,
            points,
        });
        if self.combo > 1 {
            self.events.push(SessionEvent::Combo {
                multiplier: self.combo,
                pos,
            });
        }

        let cleared = self.all_popped() && self.start_regeneration();

        Some(PopOutcome {
            index,
            multiplier: self.combo,
            points,
            cleared,
        })
    }

    /// Snapshot the popped bubbles and begin revealing them.
    /// Returns false if a sequence is already running or nothing is popped.
    pub fn start_regeneration(&mut self) -> bool {
        if self.is_regenerating() {
            return false;
        }
        let order: Vec<usize> = self
            .bubbles
            .iter()
            .enumerate()
            .filter(|(_, b)| b.popped)
            .map(|(i, _)| i)
            .collect();
        if order.is_empty() {
            return false;
        }

        log::info!("Regenerating {} bubbles", order.len());
        self.events
            .push(SessionEvent::RegenerationStarted { count: order.len() });
        self.regeneration = Some(Regeneration::new(order));
        true
    }

    /// Reveal the next bubble in the snapshot. Returns its index, or `None`
    /// when no sequence is running.
    pub fn advance_regeneration(&mut self) -> Option<usize> {
        let index = self.regeneration.as_mut()?.next_index();

        if let Some(index) = index {
            let color = self.random_color();
            let phase = self.rng.random_range(0.0..std::f32::consts::TAU);
            if let Some(bubble) = self.bubbles.get_mut(index) {
                bubble.regenerate(color, phase);
                self.events.push(SessionEvent::Revealed {
                    index,
                    pos: bubble.pos,
                    radius: bubble.base_radius,
                });
            }
        }

        if self.regeneration.as_ref().is_some_and(Regeneration::is_complete) {
            self.regeneration = None;
            log::info!("Regeneration finished");
            self.events.push(SessionEvent::RegenerationFinished);
        }

        index
    }

    /// Advance the idle wobble by `frames` 60 Hz frames
    pub fn animate(&mut self, frames: f32) {
        if !self.wobble_enabled {
            return;
        }
        for bubble in &mut self.bubbles {
            bubble.animate(frames);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn stress(&self) -> StressReading {
        StressReading::from_bubbles(&self.bubbles)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_regenerating() {
            SessionPhase::Regenerating
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_regenerating(&self) -> bool {
        self.regeneration.is_some()
    }

    /// Bubbles still waiting to be revealed
    pub fn pending_reveals(&self) -> usize {
        self.regeneration.as_ref().map_or(0, Regeneration::remaining)
    }

    pub fn all_popped(&self) -> bool {
        !self.bubbles.is_empty() && self.bubbles.iter().all(|b| b.popped)
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo
    }

    pub fn last_pop_ms(&self) -> Option<f64> {
        self.last_pop_ms
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    fn random_color(&mut self) -> Rgb {
        self.palette
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Rgb::NEUTRAL)
    }
}
