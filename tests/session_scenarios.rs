use bubble_pop::Settings;
use bubble_pop::sim::{RegenTimer, Session, SessionEvent, StressTier, TickInput, tick};
use proptest::prelude::*;

fn session() -> Session {
    Session::new(&Settings::default(), 800.0, 600.0, 2024)
}

#[test]
fn combo_scenario_on_default_grid() {
    let mut s = session();
    assert_eq!(s.bubbles().len(), 70);

    let p0 = s.bubbles()[0].pos;
    let p1 = s.bubbles()[1].pos;
    let p2 = s.bubbles()[2].pos;

    let first = s.handle_pop(p0, 0.0).expect("pop #0");
    assert_eq!(first.index, 0);
    assert_eq!(first.multiplier, 1);
    assert_eq!(s.score(), 10);

    let second = s.handle_pop(p1, 100.0).expect("pop #1");
    assert_eq!(second.multiplier, 2);
    assert_eq!(s.score(), 30);

    let third = s.handle_pop(p2, 1000.0).expect("pop #2");
    assert_eq!(third.multiplier, 1);
    assert_eq!(s.score(), 40);
}

#[test]
fn combo_scenario_with_400ms_window() {
    let settings = Settings::from_json(r#"{ "combo_window_ms": 400 }"#).unwrap();
    let mut s = Session::new(&settings, 800.0, 600.0, 1);
    s.pop_index(0, 0.0);
    s.pop_index(1, 100.0);
    assert_eq!(s.score(), 30);
    // 450 ms gap would still combo with a 500 ms window
    s.pop_index(2, 550.0);
    assert_eq!(s.combo_multiplier(), 1);
    assert_eq!(s.score(), 40);
}

#[test]
fn full_clear_regenerates_everything_in_seventy_steps() {
    let mut s = session();
    s.drain_events();

    for i in 0..70 {
        s.pop_index(i, i as f64 * 1000.0);
    }
    assert!(s.is_regenerating());
    assert_eq!(s.stress().percentage_remaining, 0.0);
    assert_eq!(s.stress().tier, StressTier::Relieved);

    let mut revealed = Vec::new();
    for step in 0..70 {
        assert!(s.is_regenerating(), "still regenerating before step {}", step);
        revealed.push(s.advance_regeneration().expect("reveal"));
    }
    assert!(!s.is_regenerating());
    assert!(s.bubbles().iter().all(|b| !b.popped));
    assert_eq!(revealed, (0..70).collect::<Vec<_>>());
    assert_eq!(s.stress().tier, StressTier::Stressed);

    let events = s.drain_events();
    let started = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::RegenerationStarted { count: 70 }))
        .count();
    let finished = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::RegenerationFinished))
        .count();
    let glows = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::Revealed { .. }))
        .count();
    assert_eq!((started, finished, glows), (1, 1, 70));
}

#[test]
fn input_during_regeneration_is_rejected() {
    let mut s = session();
    for i in 0..70 {
        s.pop_index(i, i as f64 * 1000.0);
    }
    let score = s.score();
    let last_pop = s.last_pop_ms();

    // Reveal half, then hammer every bubble while the rest are pending
    for _ in 0..35 {
        s.advance_regeneration();
    }
    let positions: Vec<_> = s.bubbles().iter().map(|b| b.pos).collect();
    for (i, pos) in positions.iter().enumerate() {
        assert!(s.handle_pop(*pos, 1e6 + i as f64).is_none());
    }
    assert_eq!(s.score(), score);
    assert_eq!(s.last_pop_ms(), last_pop);
    assert_eq!(s.pending_reveals(), 35);

    let unpopped = s.bubbles().iter().filter(|b| !b.popped).count();
    assert_eq!(unpopped, 35);
}

#[test]
fn scheduler_drives_regeneration_at_interval() {
    let settings = Settings::default();
    let mut s = Session::new(&settings, 800.0, 600.0, 99);
    let mut timer = RegenTimer::new(settings.regen_interval_ms);

    let positions: Vec<_> = s.bubbles().iter().map(|b| b.pos).collect();
    let mut now = 0.0;
    for pos in positions {
        now += 1000.0;
        let input = TickInput {
            pointer: Some(pos),
            ..Default::default()
        };
        tick(&mut s, &mut timer, &input, now, 16.0);
    }
    assert!(s.is_regenerating());

    let mut ticks = 0;
    while s.is_regenerating() {
        now += settings.regen_interval_ms;
        let dt = settings.regen_interval_ms;
        let report = tick(&mut s, &mut timer, &TickInput::default(), now, dt);
        assert!(report.revealed.is_some());
        ticks += 1;
        assert!(ticks <= 70);
    }
    // First reveal happened on the clearing pop
    assert_eq!(ticks, 69);
    assert!(s.bubbles().iter().all(|b| !b.popped));
    assert_eq!(s.score(), 700);
}

#[test]
fn pops_work_again_after_regeneration() {
    let mut s = session();
    for i in 0..70 {
        s.pop_index(i, i as f64 * 1000.0);
    }
    while s.advance_regeneration().is_some() {}
    let score = s.score();
    let pos = s.bubbles()[10].pos;
    assert!(s.handle_pop(pos, 1e6).is_some());
    assert_eq!(s.score(), score + 10);
}

proptest! {
    #[test]
    fn prop_score_matches_multiplier_history(gaps in prop::collection::vec(0u32..1200, 1..60)) {
        let mut s = session();
        let rules = *s.rules();
        let mut now = 0.0;
        let mut expected = 0u64;
        let mut last: Option<f64> = None;
        let mut mult = 1u32;

        for (i, gap) in gaps.iter().enumerate() {
            now += *gap as f64;
            let outcome = s.pop_index(i, now).expect("fresh bubble");

            mult = match last {
                Some(t) if now - t < rules.combo_window_ms => (mult + 1).min(5),
                _ => 1,
            };
            last = Some(now);
            expected += 10 * mult as u64;

            prop_assert_eq!(outcome.multiplier, mult);
            prop_assert_eq!(outcome.points, 10 * mult as u64);
            prop_assert!(s.combo_multiplier() >= 1 && s.combo_multiplier() <= 5);
        }
        prop_assert_eq!(s.score(), expected);
    }
}
