//! Shooting Game entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent, Window};

    use shooting_game::platform::detect_control_scheme;
    use shooting_game::renderer::CanvasPresenter;
    use shooting_game::sim::{ControlScheme, GamePhase, Playfield};
    use shooting_game::{Session, Tuning};

    /// Touch movement below this (px, both axes) counts as a tap
    const TAP_SLOP: f32 = 30.0;

    /// Game instance holding all state
    struct Game {
        session: Session,
        presenter: CanvasPresenter,
        scheme: ControlScheme,
        touch_start: (f32, f32),
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shooting Game starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let scheme = detect_control_scheme();
        let tuning = Tuning::default();
        let spawn_interval_ms = tuning.spawn_interval_ms;
        let now = js_sys::Date::now();
        let session = Session::new(
            now as u64,
            tuning,
            Playfield::new(width, height),
            scheme,
            now,
        );

        let game = Rc::new(RefCell::new(Game {
            session,
            presenter: CanvasPresenter::new(ctx, width as f64, height as f64, scheme),
            scheme,
            touch_start: (0.0, 0.0),
        }));

        match scheme {
            ControlScheme::Keyboard => setup_keyboard_handlers(&window, game.clone()),
            ControlScheme::Touch => setup_touch_handlers(&canvas, game.clone()),
        }
        setup_resize_handler(&window, &canvas, game.clone());
        setup_spawn_timer(&window, game.clone(), spawn_interval_ms);

        request_animation_frame(game);

        log::info!("Shooting Game running!");
    }

    fn setup_keyboard_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let input = &mut g.session.input;
                match event.key().as_str() {
                    "ArrowLeft" => input.move_left = Some(true),
                    "ArrowRight" => input.move_right = Some(true),
                    " " => input.fire += 1,
                    "z" | "Z" => input.fire_laser = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.session.input.move_left = Some(false),
                    "ArrowRight" => g.session.input.move_right = Some(false),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Tap fires, horizontal flick pushes the ship, two fingers fire the laser
    fn setup_touch_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let touches = event.touches();
                if touches.length() == 2 {
                    g.session.input.fire_laser = true;
                    return;
                }
                if let Some(touch) = touches.get(0) {
                    g.touch_start = (touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let mut g = game.borrow_mut();
                let dx = touch.client_x() as f32 - g.touch_start.0;
                let dy = touch.client_y() as f32 - g.touch_start.1;
                if dx.abs() < TAP_SLOP && dy.abs() < TAP_SLOP {
                    g.session.input.fire += 1;
                } else if dx.abs() > dy.abs() && dx.abs() > TAP_SLOP {
                    let speed = g.session.state.tuning.flick_speed;
                    g.session.input.flick = Some(speed.copysign(dx));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            let mut g = game.borrow_mut();
            g.session.resize(Playfield::new(width, height));
            g.presenter.set_size(width as f64, height as f64);
            log::info!("Resized to {}x{} ({:?})", width, height, g.scheme);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_spawn_timer(window: &Window, game: Rc<RefCell<Game>>, interval_ms: f64) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().session.spawn_enemy();
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        );
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Game {
                session, presenter, ..
            } = &mut *g;
            if session.frame(js_sys::Date::now(), presenter) {
                true
            } else if session.state.phase == GamePhase::Lost {
                // A lost run starts over straight away
                let now = js_sys::Date::now();
                session.restart(now as u64, now);
                true
            } else {
                false
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shooting Game (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => shooting_game::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                shooting_game::Tuning::default()
            }
        },
        None => shooting_game::Tuning::default(),
    };

    let summary = demo::run(tuning, 42);
    println!(
        "\nDemo finished: {:?}, score {}, {}s",
        summary.outcome, summary.score, summary.clear_time_secs
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use shooting_game::platform::detect_control_scheme;
    use shooting_game::sim::{GamePhase, Playfield};
    use shooting_game::{FrameSnapshot, Presenter, Session, Summary, Tuning};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_DEMO_MS: f64 = 5.0 * 60.0 * 1000.0;

    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
        summary: Option<Summary>,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, frame: &FrameSnapshot) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::debug!(
                    "t={}s score={} lives={} enemies={} gauge={:.2}",
                    frame.elapsed_secs,
                    frame.score,
                    frame.lives,
                    frame.enemies.len(),
                    frame.gauge
                );
            }
        }

        fn finish(&mut self, summary: &Summary) {
            log::info!("Session over after {} frames: {:?}", self.frames, summary);
            self.summary = Some(*summary);
        }
    }

    /// Play one session with the autopilot on a simulated clock
    pub fn run(tuning: Tuning, seed: u64) -> Summary {
        let spawn_interval = tuning.spawn_interval_ms;
        let mut session = Session::new(
            seed,
            tuning,
            Playfield::new(800.0, 600.0),
            detect_control_scheme(),
            0.0,
        );
        session.input.autopilot = true;

        let mut presenter = LogPresenter::default();
        let mut now = 0.0;
        let mut next_spawn = spawn_interval;
        while now < MAX_DEMO_MS {
            now += FRAME_MS;
            while now >= next_spawn {
                session.spawn_enemy();
                next_spawn += spawn_interval;
            }
            if !session.frame(now, &mut presenter) {
                break;
            }
        }

        presenter.summary.unwrap_or(Summary {
            outcome: GamePhase::Playing,
            score: session.state.score,
            clear_time_secs: session.state.elapsed_secs(),
        })
    }
}
