//! Deterministic session module
//!
//! All game-state logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Timestamps are passed in, never read
//! - Stable iteration order (by bubble index)
//! - No rendering or platform dependencies

pub mod bubble;
pub mod color;
pub mod layout;
pub mod metrics;
pub mod regen;
pub mod state;
pub mod tick;

pub use bubble::{Bubble, Wobble};
pub use color::{DEFAULT_PALETTE, Rgb};
pub use layout::{GridLayout, GridSpec, compute_layout};
pub use metrics::{StressReading, StressTier};
pub use regen::Regeneration;
pub use state::{PopOutcome, ScoringRules, Session, SessionEvent, SessionPhase};
pub use tick::{RegenTimer, TickInput, TickReport, tick};
