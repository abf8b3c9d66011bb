//! Frame tick
//!
//! Applies one frame's worth of input to a [`Session`], drives the
//! regeneration timer and advances the idle wobble.

use glam::Vec2;

use super::state::{PopOutcome, Session};
use crate::consts::{FRAME_MS, MAX_FRAME_MS};

/// Input commands collected since the last frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-down position in canvas space
    pub pointer: Option<Vec2>,
    /// Rebuild request (`r` key)
    pub reset: bool,
    /// New canvas size after a resize
    pub resize: Option<Vec2>,
}

/// Timer for the staggered reveal
#[derive(Debug, Clone)]
pub struct RegenTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl RegenTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            elapsed_ms: 0.0,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Accumulate `dt_ms`; true when a reveal is due. At most one reveal
    /// fires per call and leftover time never queues a second one, so
    /// `step(0.0)` never fires.
    pub fn step(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            if self.elapsed_ms >= self.interval_ms {
                self.elapsed_ms = 0.0;
            }
            true
        } else {
            false
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub popped: Option<PopOutcome>,
    /// Index of the bubble revealed this tick
    pub revealed: Option<usize>,
    /// Grid was rebuilt (reset or resize)
    pub rebuilt: bool,
}

/// Advance the session by one frame
pub fn tick(
    session: &mut Session,
    timer: &mut RegenTimer,
    input: &TickInput,
    now_ms: f64,
    dt_ms: f64,
) -> TickReport {
    let mut report = TickReport::default();

    if let Some(size) = input.resize {
        session.resize(size.x, size.y);
        timer.restart();
        report.rebuilt = true;
    }

    if input.reset && session.request_reset() {
        timer.restart();
        report.rebuilt = true;
    }

    if let Some(point) = input.pointer {
        report.popped = session.handle_pop(point, now_ms);
    }

    if report.popped.is_some_and(|p| p.cleared) {
        // First bubble comes back immediately, the rest on the timer
        timer.restart();
        report.revealed = session.advance_regeneration();
    } else if session.is_regenerating() && timer.step(dt_ms) {
        report.revealed = session.advance_regeneration();
    }

    let frames = (dt_ms as f32).clamp(0.0, MAX_FRAME_MS) / FRAME_MS;
    session.animate(frames);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn setup() -> (Session, RegenTimer) {
        let settings = Settings::default();
        let session = Session::new(&settings, 800.0, 600.0, 4242);
        (session, RegenTimer::new(settings.regen_interval_ms))
    }

    fn click(pos: Vec2) -> TickInput {
        TickInput {
            pointer: Some(pos),
            ..Default::default()
        }
    }

    #[test]
    fn test_timer_fires_once_per_interval() {
        let mut timer = RegenTimer::new(60.0);
        assert!(!timer.step(30.0));
        assert!(timer.step(30.0));
        assert!(!timer.step(59.0));
        assert!(timer.step(1.0));
    }

    #[test]
    fn test_timer_does_not_burst_after_stall() {
        let mut timer = RegenTimer::new(60.0);
        assert!(timer.step(1000.0));
        assert!(!timer.step(0.0));
        assert!(!timer.step(59.0));
        assert!(timer.step(1.0));
    }

    #[test]
    fn test_timer_keeps_leftover_below_one_interval() {
        let mut timer = RegenTimer::new(60.0);
        assert!(timer.step(119.0));
        assert!(!timer.step(0.0));
        assert!(timer.step(1.0));

        // Exactly two intervals: the second is dropped rather than queued
        assert!(timer.step(120.0));
        assert!(!timer.step(0.0));
    }

    #[test]
    fn test_click_during_regeneration_does_not_reveal() {
        let (mut session, mut timer) = setup();
        for i in 0..70 {
            session.pop_index(i, i as f64 * 1000.0);
        }
        session.advance_regeneration();
        // A stalled frame leaves the timer just short of the next reveal
        let idle = TickInput::default();
        let report = tick(&mut session, &mut timer, &idle, 1e5, 119.0);
        assert!(report.revealed.is_some());
        let pending = session.pending_reveals();

        let pos = session.bubbles()[69].pos;
        let report = tick(&mut session, &mut timer, &click(pos), 1e5 + 1.0, 0.0);
        assert_eq!(report.revealed, None);
        assert_eq!(report.popped, None);
        assert_eq!(session.pending_reveals(), pending);
    }

    #[test]
    fn test_click_pops() {
        let (mut session, mut timer) = setup();
        let pos = session.bubbles()[0].pos;
        let report = tick(&mut session, &mut timer, &click(pos), 0.0, FRAME_MS as f64);
        assert_eq!(report.popped.map(|p| p.index), Some(0));
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_clear_reveals_on_schedule() {
        let (mut session, mut timer) = setup();
        for i in 0..69 {
            session.pop_index(i, i as f64 * 1000.0);
        }
        let last = session.bubbles()[69].pos;
        let report = tick(&mut session, &mut timer, &click(last), 1e5, 16.0);
        assert!(report.popped.is_some_and(|p| p.cleared));
        assert_eq!(report.revealed, Some(0));
        assert_eq!(session.pending_reveals(), 69);

        // Frames shorter than the interval reveal nothing until it elapses
        let idle = TickInput::default();
        let report = tick(&mut session, &mut timer, &idle, 1e5 + 30.0, 30.0);
        assert_eq!(report.revealed, None);
        let report = tick(&mut session, &mut timer, &idle, 1e5 + 60.0, 30.0);
        assert_eq!(report.revealed, Some(1));

        let mut now = 1e5 + 60.0;
        for _ in 0..68 {
            now += 60.0;
            tick(&mut session, &mut timer, &idle, now, 60.0);
        }
        assert!(!session.is_regenerating());
        assert!(session.bubbles().iter().all(|b| !b.popped));
    }

    #[test]
    fn test_reset_input_ignored_while_regenerating() {
        let (mut session, mut timer) = setup();
        for i in 0..70 {
            session.pop_index(i, i as f64 * 1000.0);
        }
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        let report = tick(&mut session, &mut timer, &input, 0.0, 1.0);
        assert!(!report.rebuilt);
        assert!(session.is_regenerating());
    }

    #[test]
    fn test_resize_rebuilds() {
        let (mut session, mut timer) = setup();
        session.pop_index(0, 0.0);
        let input = TickInput {
            resize: Some(Vec2::new(640.0, 480.0)),
            ..Default::default()
        };
        let report = tick(&mut session, &mut timer, &input, 10.0, 1.0);
        assert!(report.rebuilt);
        assert_eq!(session.score(), 0);
        assert_eq!(session.layout().canvas, Vec2::new(640.0, 480.0));
    }
}
