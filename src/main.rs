//! Bubble Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent, Window};

    use bubble_pop::audio::{AudioManager, SoundEffect};
    use bubble_pop::consts::MAX_FRAME_MS;
    use bubble_pop::platform::{KeyAction, client_to_surface, fit_canvas, key_action};
    use bubble_pop::renderer::CanvasRenderer;
    use bubble_pop::sim::{RegenTimer, Session, SessionEvent, TickInput, tick};
    use bubble_pop::Settings;
    use glam::Vec2;

    const CANVAS_ID: &str = "gameCanvas";

    /// Game instance holding all state
    struct Game {
        session: Session,
        timer: RegenTimer,
        settings: Settings,
        canvas: HtmlCanvasElement,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn new(settings: Settings, canvas: HtmlCanvasElement, seed: u64) -> Self {
            let width = canvas.width() as f32;
            let height = canvas.height() as f32;
            Self {
                session: Session::new(&settings, width, height, seed),
                timer: RegenTimer::new(settings.regen_interval_ms),
                audio: AudioManager::new(settings.effective_volume()),
                settings,
                canvas,
                renderer: None,
                last_time: 0.0,
            }
        }

        /// Run one tick and react to whatever it produced
        fn step(&mut self, input: &TickInput, now: f64, dt: f64) {
            tick(&mut self.session, &mut self.timer, input, now, dt);
            for event in self.session.drain_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&self, event: SessionEvent) {
            match event {
                SessionEvent::Popped { multiplier, .. } => {
                    self.audio.play(SoundEffect::Pop { multiplier });
                }
                SessionEvent::Combo { multiplier, pos } => {
                    let duration = self.settings.combo_text_duration_ms;
                    show_combo_text(&self.canvas, multiplier, pos, duration);
                }
                SessionEvent::Revealed { pos, radius, .. } => {
                    show_glow(&self.canvas, pos, radius, self.settings.glow_duration_ms);
                    self.audio.play(SoundEffect::Reveal);
                }
                SessionEvent::RegenerationFinished => {
                    self.audio.play(SoundEffect::RegenerationDone);
                }
                SessionEvent::RegenerationStarted { count } => {
                    log::debug!("Regeneration of {} bubbles started", count);
                }
                SessionEvent::Rebuilt { bubbles, radius } => {
                    log::debug!("Rebuilt {} bubbles (r={:.1})", bubbles, radius);
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(&self.session) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("scoreDisplay") {
                el.set_text_content(Some(&format!("Score: {}", self.session.score())));
            }

            let stress = self.session.stress();
            if let Some(el) = document.get_element_by_id("stressLevel") {
                let style = format!(
                    "width: {}%; background-color: {};",
                    stress.percentage_remaining,
                    stress.tier.color().css()
                );
                let _ = el.set_attribute("style", &style);
            }
            if let Some(el) = document.get_element_by_id("faceDisplay") {
                el.set_text_content(Some(stress.tier.icon()));
            }
        }
    }

    fn now(window: &Window) -> f64 {
        window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Canvas-space point to page coordinates (accounts for scroll and CSS scaling)
    fn page_position(canvas: &HtmlCanvasElement, pos: Vec2) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let scroll = web_sys::window()
            .map(|w| {
                Vec2::new(
                    w.scroll_x().unwrap_or(0.0) as f32,
                    w.scroll_y().unwrap_or(0.0) as f32,
                )
            })
            .unwrap_or(Vec2::ZERO);
        let scale = css_scale(canvas);
        Vec2::new(rect.left() as f32, rect.top() as f32) + scroll + pos / scale
    }

    /// Canvas pixels per CSS pixel
    fn css_scale(canvas: &HtmlCanvasElement) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Vec2::ONE;
        }
        Vec2::new(
            canvas.width() as f32 / rect.width() as f32,
            canvas.height() as f32 / rect.height() as f32,
        )
    }

    /// Spawn an absolutely-positioned overlay and remove it after `duration_ms`
    fn spawn_overlay(style: &str, text: Option<&str>, class: Option<&str>, duration_ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let Some(body) = document.body() else { return };
        let Ok(el) = document.create_element("div") else { return };

        let _ = el.set_attribute("style", style);
        if let Some(class) = class {
            el.set_class_name(class);
        }
        if text.is_some() {
            el.set_text_content(text);
        }
        if body.append_child(&el).is_err() {
            return;
        }

        let closure = Closure::once(move || el.remove());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            duration_ms as i32,
        );
        closure.forget();
    }

    fn show_combo_text(canvas: &HtmlCanvasElement, multiplier: u32, pos: Vec2, duration_ms: u32) {
        if multiplier <= 1 {
            return;
        }
        let page = page_position(canvas, pos);
        let style = format!(
            "position: absolute; left: {}px; top: {}px; transform: translateX(-50%); \
             color: white; font-size: clamp(16px, 3vw, 22px); font-weight: bold; \
             text-shadow: 1px 1px 2px black; pointer-events: none; z-index: 100; \
             animation: combo-float {}ms ease-out forwards;",
            page.x,
            page.y - 20.0,
            duration_ms
        );
        spawn_overlay(&style, Some(&format!("x{}!", multiplier)), Some("combo-text"), duration_ms);
    }

    fn show_glow(canvas: &HtmlCanvasElement, pos: Vec2, radius: f32, duration_ms: u32) {
        let scale = css_scale(canvas);
        let page = page_position(canvas, pos);
        let r = radius / scale.x;
        let style = format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
             border-radius: 50%; z-index: 5; pointer-events: none;",
            page.x - r,
            page.y - r,
            r * 2.0,
            r * 2.0
        );
        spawn_overlay(&style, None, Some("bubble-glow"), duration_ms);
    }

    /// Size the canvas to its container; returns the new backing size
    fn fit_to_container(window: &Window, document: &Document, canvas: &HtmlCanvasElement) -> Vec2 {
        let container_width = document
            .query_selector(".wrapper")
            .ok()
            .flatten()
            .map(|w| w.client_width() as f32)
            .unwrap_or_else(|| {
                window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(800.0) as f32
            });
        let window_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as f32;
        let ui_height = document
            .get_element_by_id("ui")
            .map(|el| el.client_height() as f32)
            .unwrap_or(0.0);

        let size = fit_canvas(container_width, window_height, ui_height);
        canvas.set_width(size.width);
        canvas.set_height(size.height);
        Vec2::new(size.width as f32, size.height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Bubble Pop starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no #{} canvas", CANVAS_ID);
            return;
        };

        let settings = Settings::load(&canvas);
        fit_to_container(&window, &document, &canvas);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, canvas.clone(), seed)));
        log::info!("Session initialized with seed: {}", seed);

        match canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
        {
            Some(ctx) => game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx)),
            None => log::error!("2D canvas context unavailable"),
        }

        {
            let mut g = game.borrow_mut();
            let events = g.session.drain_events();
            for event in events {
                g.handle_event(event);
            }
            g.update_hud(&document);
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_resize_handler(&window, &canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bubble Pop running!");
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down (mouse, touch and pen)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                // Keep touch taps from scrolling/zooming the page
                event.prevent_default();
                let Some(window) = web_sys::window() else { return };
                let rect = canvas_clone.get_bounding_client_rect();
                let point = client_to_surface(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                    css_scale(&canvas_clone),
                );
                let input = TickInput {
                    pointer: Some(point),
                    ..Default::default()
                };
                let mut g = game.borrow_mut();
                g.step(&input, now(&window), 0.0);
                if let Some(document) = window.document() {
                    g.update_hud(&document);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if key_action(&event.key()) != Some(KeyAction::Reset) {
                    return;
                }
                let Some(window) = web_sys::window() else { return };
                log::info!("R pressed - recreating bubbles");
                let input = TickInput {
                    reset: true,
                    ..Default::default()
                };
                let mut g = game.borrow_mut();
                g.step(&input, now(&window), 0.0);
                if let Some(document) = window.document() {
                    g.update_hud(&document);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let Some(document) = window.document() else { return };
            let size = fit_to_container(&window, &document, &canvas_clone);
            let input = TickInput {
                resize: Some(size),
                ..Default::default()
            };
            let mut g = game.borrow_mut();
            g.step(&input, now(&window), 0.0);
            g.update_hud(&document);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                (time - g.last_time).min(MAX_FRAME_MS as f64)
            } else {
                0.0
            };
            g.last_time = time;

            let was_regenerating = g.session.is_regenerating();
            g.step(&TickInput::default(), time, dt);
            g.render();
            if was_regenerating {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    g.update_hud(&document);
                }
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use bubble_pop::Settings;

    env_logger::init();
    log::info!("Bubble Pop (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the real thing");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_file(std::path::Path::new(&path))
            .with_context(|| format!("loading settings from {}", path))?,
        None => Settings::default(),
    };

    demo::run(&settings);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless session: pop everything, then let it regenerate
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bubble_pop::Settings;
    use bubble_pop::sim::{RegenTimer, Session, SessionEvent, TickInput, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(settings: &Settings) {
        let seed = settings.seed.unwrap_or(0x5eed);
        let mut session = Session::new(settings, 800.0, 600.0, seed);
        let mut timer = RegenTimer::new(settings.regen_interval_ms);
        let mut now = 0.0;

        let targets: Vec<_> = session.bubbles().iter().map(|b| b.pos).collect();
        for (i, pos) in targets.into_iter().enumerate() {
            // Quick bursts of three, then a pause that breaks the combo
            now += if i % 3 == 0 { 900.0 } else { 150.0 };
            let input = TickInput {
                pointer: Some(pos),
                ..Default::default()
            };
            tick(&mut session, &mut timer, &input, now, FRAME_MS);
            report(&mut session);
        }

        let mut frames = 0u32;
        while session.is_regenerating() {
            now += FRAME_MS;
            tick(&mut session, &mut timer, &TickInput::default(), now, FRAME_MS);
            report(&mut session);
            frames += 1;
        }

        let stress = session.stress();
        log::info!(
            "Demo done: score {}, {} frames of regeneration, stress {:.0}% ({})",
            session.score(),
            frames,
            stress.percentage_remaining,
            stress.tier.as_str()
        );
        println!("Final score: {}", session.score());
    }

    fn report(session: &mut Session) {
        for event in session.drain_events() {
            match event {
                SessionEvent::Popped {
                    index,
                    multiplier,
                    points,
                    ..
                } => {
                    let stress = session.stress();
                    log::info!(
                        "pop #{} x{} +{} -> score {} ({:.0}% left, {})",
                        index,
                        multiplier,
                        points,
                        session.score(),
                        stress.percentage_remaining,
                        stress.tier.as_str()
                    );
                }
                SessionEvent::Combo { multiplier, .. } => log::debug!("combo x{}!", multiplier),
                SessionEvent::Revealed { index, .. } => log::debug!("revealed #{}", index),
                other => log::info!("{:?}", other),
            }
        }
    }
}
