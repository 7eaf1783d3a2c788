//! Star Strike entry point
//!
//! On the web: DOM HUD, input listeners and the animation-frame loop.
//! Natively: a headless attract-mode run that logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use star_strike::Game;
    use star_strike::hud::{HudSink, HudState, Screen};
    use star_strike::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use star_strike::sim::GamePhase;

    /// Writes the HUD into the page's elements
    struct DomHud {
        document: Document,
        last: Option<HudState>,
    }

    impl DomHud {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Set one inline style property, leaving the others alone
        fn set_style(&self, id: &str, property: &str, value: &str) {
            if let Some(el) = self.element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                let _ = el.style().set_property(property, value);
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            self.set_style(id, "display", if visible { "block" } else { "none" });
        }

        fn set_class(&self, id: &str, class: &str, on: bool) {
            if let Some(el) = self.element(id) {
                let _ = el.class_list().toggle_with_force(class, on);
            }
        }

        fn set_width(&self, id: &str, pct: f32) {
            self.set_style(id, "width", &format!("{pct}%"));
        }
    }

    impl HudSink for DomHud {
        fn apply(&mut self, hud: &HudState) {
            if self.last.as_ref() == Some(hud) {
                return;
            }

            self.set_text("score-display", &hud.score);
            self.set_text("high-score-display", &hud.high_score);
            self.set_text("level-display", &hud.level.to_string());

            self.set_width("health-bar", hud.health_pct);
            self.set_class("health-bar", "from-red-600", hud.health_critical);

            self.set_visible("boss-ui", hud.boss_health_pct.is_some());
            if let Some(pct) = hud.boss_health_pct {
                self.set_width("boss-health-fill", pct);
            }

            self.set_class("icon-shield", "active", hud.shield_active);
            self.set_class("icon-hyper", "active", hud.hyper_active);

            self.set_visible("start-screen", hud.screen == Screen::Start);
            self.set_visible("pause-screen", hud.screen == Screen::Paused);
            self.set_visible("pause-indicator", hud.screen == Screen::Paused);
            match &hud.screen {
                Screen::GameOver { final_score } => {
                    self.set_text("final-score", final_score);
                    self.set_visible("game-over-screen", true);
                }
                _ => self.set_visible("game-over-screen", false),
            }

            if let Some(fps) = hud.fps {
                self.set_text("fps-display", &fps.to_string());
            }

            self.last = Some(hud.clone());
        }
    }

    /// Game plus the raw input sources that feed its trigger
    struct App {
        game: Game,
        hud: DomHud,
        touching: bool,
        space: bool,
        control: bool,
    }

    impl App {
        fn sync_fire(&mut self) {
            self.game.input.fire = self.touching || self.space || self.control;
        }

        fn set_pointer(&mut self, x: f64, y: f64) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            self.game.input.pointer = Vec2::new(
                ((x / w) * 2.0 - 1.0) as f32,
                (-(y / h) * 2.0 + 1.0) as f32,
            );
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Star Strike starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to attach to");
            return;
        };

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{e}; high scores will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let seed: u64 = rand::random();
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, store),
            hud: DomHud {
                document,
                last: None,
            },
            touching: false,
            space: false,
            control: false,
        }));

        setup_input_handlers(app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Star Strike running!");
    }

    /// Attach a listener for the lifetime of the page
    fn listen<T: ?Sized + WasmClosure>(target: &web_sys::EventTarget, event: &str, closure: Closure<T>) {
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {event}");
        }
        closure.forget();
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let app = app.clone();
            listen(&window, "keydown", Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "p" => a.game.input.pause = true,
                    " " => a.space = true,
                    "control" => a.control = true,
                    "enter" => a.game.input.start = true,
                    "i" => {
                        a.game.input.autopilot = !a.game.input.autopilot;
                        log::info!("Autopilot: {}", a.game.input.autopilot);
                    }
                    _ => {}
                }
                a.sync_fire();
            }));
        }
        {
            let app = app.clone();
            listen(&window, "keyup", Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    " " => a.space = false,
                    "control" => a.control = false,
                    _ => {}
                }
                a.sync_fire();
            }));
        }

        // Mouse
        {
            let app = app.clone();
            listen(&window, "mousemove", Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .set_pointer(event.client_x() as f64, event.client_y() as f64);
            }));
        }
        {
            let app = app.clone();
            listen(&window, "mousedown", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.touching = true;
                a.sync_fire();
            }));
        }
        {
            let app = app.clone();
            listen(&window, "mouseup", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.touching = false;
                a.sync_fire();
            }));
        }

        // Touch
        {
            let app = app.clone();
            listen(&window, "touchstart", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                a.touching = true;
                if let Some(touch) = event.touches().get(0) {
                    a.set_pointer(touch.client_x() as f64, touch.client_y() as f64);
                }
                a.sync_fire();
            }));
        }
        {
            let app = app.clone();
            listen(&window, "touchmove", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .set_pointer(touch.client_x() as f64, touch.client_y() as f64);
                }
            }));
        }
        {
            listen(&window, "touchend", Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut a = app.borrow_mut();
                a.touching = false;
                a.sync_fire();
            }));
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                listen(&btn, "click", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut().game.input.start = true;
                }));
            }
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let doc = document.clone();
        listen(&document, "visibilitychange", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if a.game.state().phase == GamePhase::Running {
                    a.game.input.pause = true;
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        }));
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let a = &mut *a;
            // rAF timestamps are milliseconds
            let hud = a.game.frame(time / 1000.0);
            a.hud.apply(&hud);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless runner unless overridden
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: usize = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_strike::Game;
    use star_strike::hud::{HudSink, LogSink};
    use star_strike::persistence::{FileStore, KeyValueStore, MemoryStore};
    use star_strike::sim::GamePhase;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Strike (native) starting headless attract run...");

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(HEADLESS_FRAMES);

    // STAR_STRIKE_DATA=<dir> persists the high score between runs
    let store: Box<dyn KeyValueStore> = match std::env::var_os("STAR_STRIKE_DATA") {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::new()),
    };

    let seed: u64 = rand::random();
    let mut game = Game::new(seed, store);
    let mut sink = LogSink::default();
    game.input.start = true;
    game.input.autopilot = true;

    let mut now = 0.0;
    let mut played = 0;
    for _ in 0..frames {
        let hud = game.frame(now);
        sink.apply(&hud);
        now += 1.0 / 60.0;
        played += 1;
        if game.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    log::info!(
        "Run finished after {played} frames ({:.1}s simulated): score {}, level {}, health {}, best {}",
        state.time,
        state.score,
        state.level,
        state.ship.health,
        game.high_score()
    );
}
