//! Dash Runner entry point
//!
//! Browser builds run the game loop off `requestAnimationFrame` and hand each
//! frame's snapshot to a JS renderer. Native builds run a headless attract-mode
//! session for testing balance changes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use dash_runner::audio::AudioManager;
    use dash_runner::consts::SIM_DT;
    use dash_runner::platform::{JumpInput, Renderer, snapshot_json};
    use dash_runner::sim::{GamePhase, GameState};
    use dash_runner::{GameDriver, HighScores, Settings, Tuning};

    // JS hook: the page may define `window.renderDash(snapshot)` to draw a frame
    #[wasm_bindgen(inline_js = "
        export function render_snapshot(json) {
            if (typeof window.renderDash !== 'function') {
                return false;
            }
            window.renderDash(JSON.parse(json));
            return true;
        }
    ")]
    extern "C" {
        fn render_snapshot(json: &str) -> bool;
    }

    /// Forwards snapshots to the page; degrades to a no-op without a hook
    #[derive(Default)]
    struct JsRenderer {
        warned: bool,
    }

    impl Renderer for JsRenderer {
        fn render(&mut self, state: &GameState) {
            let drawn = match snapshot_json(state) {
                Ok(json) => render_snapshot(&json),
                Err(e) => {
                    log::error!("Snapshot serialization failed: {}", e);
                    false
                }
            };
            if !drawn && !self.warned {
                log::warn!("window.renderDash not found - rendering disabled");
                self.warned = true;
            }
        }
    }

    /// Jump button level shared with DOM listeners
    #[derive(Clone, Default)]
    struct JumpButton(Rc<Cell<bool>>);

    impl JumpInput for JumpButton {
        fn jump_held(&mut self) -> bool {
            self.0.get()
        }
    }

    struct Game {
        driver: GameDriver,
        button: JumpButton,
        last_time: f64,
    }

    impl Game {
        /// Press: start a session from the menu/game over screen, otherwise jump
        fn press(&mut self) {
            self.button.0.set(true);
            if self.driver.phase() != GamePhase::Playing {
                let seed = js_sys::Date::now() as u64;
                self.driver.start(seed);
            }
        }

        fn release(&mut self) {
            self.button.0.set(false);
        }

        fn toggle_mute(&mut self) {
            let muted = self.driver.settings.toggle_mute();
            log::info!("Sound {}", if muted { "muted" } else { "on" });
        }
    }

    fn viewport_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Dash Runner starting...");

        let settings = Settings::load();
        let high_scores = HighScores::load();
        if let Some(best) = high_scores.top_score() {
            log::info!("Best score so far: {}", best);
        }

        let button = JumpButton::default();
        let seed = js_sys::Date::now() as u64;
        let mut driver = GameDriver::new(seed, Tuning::default(), settings.clone())
            .with_renderer(JsRenderer::default())
            .with_sound(AudioManager::new(settings.sfx_level()))
            .with_reporter(high_scores)
            .with_input(button.clone());
        let (w, h) = viewport_size();
        driver.resize(w, h);

        let game = Rc::new(RefCell::new(Game {
            driver,
            button,
            last_time: 0.0,
        }));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Dash Runner running (seed {})", seed);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        game.borrow_mut().press();
                    }
                    "m" | "M" => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "ArrowUp" | "w" | "W") {
                    game.borrow_mut().release();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().release();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().release();
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = viewport_size();
                game.borrow_mut().driver.resize(w, h);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.driver.update(dt);
            g.driver.render();
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
mod headless {
    use dash_runner::platform::{LogSound, Renderer};
    use dash_runner::sim::{GamePhase, GameState};
    use dash_runner::{GameDriver, HighScores, Settings, Tuning};

    /// Environment variable naming a JSON tuning file
    const TUNING_ENV: &str = "DASH_TUNING";
    const DEFAULT_TICKS: u64 = 60 * 60;

    /// Logs a one-line status every few seconds of game time
    struct StatusLog {
        every: u64,
    }

    impl Renderer for StatusLog {
        fn render(&mut self, state: &GameState) {
            if state.time_ticks > 0 && state.time_ticks % self.every == 0 {
                log::info!(
                    "t={}s score={} combo={} x{} speed={:.2} interval={:.1} obstacles={}",
                    state.time_ticks / 60,
                    state.scoring.score,
                    state.scoring.combo,
                    state.scoring.multiplier,
                    state.difficulty.game_speed,
                    state.difficulty.obstacle_interval,
                    state.obstacles.len()
                );
            }
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Usage: dash-runner [ticks] [seed]
    pub fn run() {
        let mut args = std::env::args().skip(1);
        let ticks = args
            .next()
            .and_then(|a| a.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);

        let mut driver = GameDriver::new(seed, load_tuning(), Settings::load())
            .with_renderer(StatusLog { every: 600 })
            .with_sound(LogSound)
            .with_reporter(HighScores::load());
        driver.autopilot = true;
        driver.start(seed);

        for _ in 0..ticks {
            driver.step();
            driver.render();
            if driver.phase() == GamePhase::GameOver {
                break;
            }
        }

        let state = &driver.state;
        println!(
            "{} after {} ticks: score {} (combo {}, multiplier x{})",
            if state.phase == GamePhase::GameOver { "Crashed" } else { "Survived" },
            state.time_ticks,
            state.scoring.score,
            state.scoring.combo,
            state.scoring.multiplier
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dash Runner (native, headless) starting...");
    headless::run();
}

/// Browser builds start from `wasm_main`
#[cfg(target_arch = "wasm32")]
fn main() {}
