//! Sky Hop entry point
//!
//! In the browser: binds the page, loads sprites and runs the frame loop.
//! Natively: plays a headless autopilot round and prints the leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use sky_hop::app::PendingSubmission;
    use sky_hop::audio::{AudioManager, SoundEffect};
    use sky_hop::consts::*;
    use sky_hop::error::ScoreError;
    use sky_hop::leaderboard::Leaderboard;
    use sky_hop::persistence::{LocalScoreStore, RemoteScoreStore, ScoreStore, Submission};
    use sky_hop::platform::{AssetManifest, Controls, FrameHandle, KeyFocus, load_images};
    use sky_hop::renderer::CanvasRenderer;
    use sky_hop::settings::ScoreBackend;
    use sky_hop::ui::{self, Hud};
    use sky_hop::{App, FrameOutcome, Phase, Settings};

    /// Everything the frame loop and the DOM handlers share
    struct Game {
        app: App,
        controls: Controls,
        frame: FrameHandle,
        renderer: Option<CanvasRenderer>,
        hud: Hud,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        /// Back to the start screen after a round
        fn return_to_ready(&mut self) {
            self.hud.hide_name_entry();
            self.hud.set_start_available(self.app.phase() == Phase::Ready);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Sky Hop starting...");

        let hud = match Hud::bind() {
            Ok(hud) => hud,
            Err(e) => {
                log::error!("{}", e);
                ui::show_fatal(&e.to_string());
                return;
            }
        };

        let canvas = hud.canvas().clone();
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let settings = Settings::load();
        let audio = AudioManager::new(&settings);
        hud.set_start_available(false);
        hud.notify("Loading...");

        let game = Rc::new(RefCell::new(Game {
            app: App::new(),
            controls: Controls::new(),
            frame: FrameHandle::new(),
            renderer: None,
            hud,
            audio,
            settings,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game.clone());
        setup_name_entry(game.clone());

        let manifest = AssetManifest::default();
        let loaded = load_images(&manifest).await;
        {
            let mut g = game.borrow_mut();
            match loaded {
                Ok(images) => match CanvasRenderer::new(&canvas, images) {
                    Ok(renderer) => {
                        g.renderer = Some(renderer);
                        g.app.assets_loaded(Ok(()));
                    }
                    Err(e) => g.app.fail(e),
                },
                Err(e) => {
                    g.app.assets_loaded(Err(e));
                }
            }

            if g.app.phase() == Phase::Ready {
                g.hud.notify("Press Start to play");
                g.hud.set_start_available(true);
            } else {
                let message = g.app.last_error().unwrap_or("startup failed").to_string();
                g.hud.show_error(&message);
                return;
            }
        }

        wasm_bindgen_futures::spawn_local(refresh_leaderboard(game.clone(), false));
        log::info!("Sky Hop ready!");
    }

    fn setup_input_handlers(canvas: &web_sys::HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let focus = key_focus(&event);
                let mut g = game.borrow_mut();
                let playing = g.app.phase() == Phase::Playing;
                if g.controls.key_event(&event.key(), pressed, focus, playing) {
                    // Keep arrows/space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    if rect.width() <= 0.0 {
                        return;
                    }
                    // Client pixels to field units
                    let x = (touch.client_x() as f64 - rect.left()) * CANVAS_WIDTH as f64
                        / rect.width();
                    game.borrow_mut().controls.touch(x as f32, CANVAS_WIDTH);
                }
            });
            let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if event.touches().length() == 0 {
                    game.borrow_mut().controls.touch_end();
                }
            });
            let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().controls.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys typed into an input/textarea belong to that field
    fn key_focus(event: &KeyboardEvent) -> KeyFocus {
        let editable = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|el| {
                matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA")
                    || el.has_attribute("contenteditable")
            });
        if editable {
            KeyFocus::TextField
        } else {
            KeyFocus::Game
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let button = game.borrow().hud.start_button().clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            start_round(&game);
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_round(game: &Rc<RefCell<Game>>) {
        let seed = js_sys::Date::now() as u64;
        {
            let mut g = game.borrow_mut();
            g.audio.resume();
            if !g.app.start(seed, now_ms()) {
                return;
            }
            g.controls.clear();
            g.hud.hide_game_over();
            g.hud.set_start_available(false);
            g.hud.set_score(0);
        }
        request_animation_frame(game);
    }

    fn setup_name_entry(game: Rc<RefCell<Game>>) {
        let (submit, skip) = {
            let g = game.borrow();
            (g.hud.element(ui::ids::SUBMIT_NAME), g.hud.element(ui::ids::SKIP_NAME))
        };

        if let Some(btn) = submit {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let name = game.borrow().hud.entered_name();
                finish_name_entry(&game, name);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = skip {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                finish_name_entry(&game, None);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame.set(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            // This callback is the pending one
            g.frame.take();

            let input = g.controls.snapshot();
            let outcome = g.app.frame(time, &input);

            g.audio.play_events(&g.app.drain_events());
            if let Some(round) = g.app.round() {
                if let Some(renderer) = &g.renderer {
                    renderer.render(round);
                }
                g.hud.set_score(round.score);
            }
            outcome
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(&game),
            FrameOutcome::Ended { score } => begin_name_entry(&game, score),
            FrameOutcome::Idle => {}
        }
    }

    fn begin_name_entry(game: &Rc<RefCell<Game>>, score: u64) {
        let prompted = {
            let mut g = game.borrow_mut();
            g.frame.cancel();
            g.controls.clear();
            g.hud.show_game_over(score);

            let prefill = g.settings.last_player_name.clone();
            if g.hud.has_name_entry() {
                g.hud.show_name_entry(&prefill);
                return;
            }
            g.hud.prompt_name(&prefill)
        };
        finish_name_entry(game, prompted);
    }

    /// Name supplied (or declined); hand any submission to the reporter
    fn finish_name_entry(game: &Rc<RefCell<Game>>, name: Option<String>) {
        let pending = {
            let mut g = game.borrow_mut();
            let pending = g.app.name_entered(name.as_deref());
            g.hud.hide_name_entry();
            match &pending {
                Some(p) => {
                    g.settings.last_player_name = p.submission.player_name.clone();
                    g.settings.save();
                    g.hud.notify("Saving score...");
                }
                None => g.return_to_ready(),
            }
            pending
        };

        if let Some(pending) = pending {
            wasm_bindgen_futures::spawn_local(report_score(game.clone(), pending));
        }
    }

    /// Score reporter: submit, settle the round, then refresh the leaderboard
    async fn report_score(game: Rc<RefCell<Game>>, pending: PendingSubmission) {
        let backend = game.borrow().settings.backend.clone();
        let result = submit(&backend, &pending.submission).await;

        {
            let mut g = game.borrow_mut();
            match &result {
                Ok(()) => {
                    g.audio.play(SoundEffect::ScoreSaved);
                    g.hud.notify("Score saved!");
                }
                Err(e) if e.is_client_error() => {
                    g.hud.notify(&format!("Score rejected: {}", e));
                }
                Err(e) => {
                    g.hud.notify(&format!("Could not save score: {}", e));
                }
            }
            if g.app.submission_finished(pending.round_id, &result) {
                g.return_to_ready();
            }
        }

        if result.is_ok() {
            refresh_leaderboard(game, true).await;
        }
    }

    async fn refresh_leaderboard(game: Rc<RefCell<Game>>, reload_on_failure: bool) {
        let (backend, limit) = {
            let g = game.borrow();
            (g.settings.backend.clone(), g.settings.leaderboard_limit)
        };

        match fetch(&backend, limit).await {
            Ok(board) => game.borrow().hud.render_leaderboard(&board),
            Err(e) => {
                log::warn!("Leaderboard refresh failed: {}", e);
                if reload_on_failure {
                    ui::reload_page();
                }
            }
        }
    }

    async fn submit(backend: &ScoreBackend, submission: &Submission) -> Result<(), ScoreError> {
        let score = i64::try_from(submission.score).unwrap_or(i64::MAX);
        match backend {
            ScoreBackend::Remote {
                submit_url,
                leaderboard_url,
            } => {
                RemoteScoreStore::new(submit_url.as_str(), leaderboard_url.as_str())
                    .submit_score(&submission.player_name, score)
                    .await
            }
            ScoreBackend::Local => LocalScoreStore::load().submit_score(&submission.player_name, score),
        }
    }

    async fn fetch(backend: &ScoreBackend, limit: usize) -> Result<Leaderboard, ScoreError> {
        match backend {
            ScoreBackend::Remote {
                submit_url,
                leaderboard_url,
            } => {
                RemoteScoreStore::new(submit_url.as_str(), leaderboard_url.as_str())
                    .fetch_leaderboard(limit)
                    .await
            }
            ScoreBackend::Local => LocalScoreStore::load().fetch_leaderboard(limit),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use sky_hop::persistence::{MemoryScoreStore, ScoreStore};
    use sky_hop::sim::{RoundState, TickInput, tick};

    const DT: f32 = 1.0 / 60.0;
    /// Five minutes of frames
    const MAX_TICKS: u64 = 60 * 60 * 5;
    /// Horizontal slack before steering
    const DEADZONE: f32 = 6.0;

    /// Hold jump and steer toward the lowest platform still above our feet
    fn autopilot(state: &RoundState) -> TickInput {
        let player = &state.player;
        let center = player.pos.x + player.size.x / 2.0;

        let target = state
            .platforms
            .iter()
            .filter(|p| p.pos.y < player.bottom())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let mut input = TickInput {
            jump: true,
            ..Default::default()
        };
        if let Some(p) = target {
            let dx = p.pos.x + p.size.x / 2.0 - center;
            input.left = dx < -DEADZONE;
            input.right = dx > DEADZONE;
        }
        input
    }

    pub fn play_round(seed: u64) -> RoundState {
        let mut state = RoundState::new(seed);
        while !state.over && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, DT);
        }
        let events = state.drain_events();
        log::info!(
            "Seed {}: score {} after {} ticks ({} events)",
            seed,
            state.score,
            state.time_ticks,
            events.len()
        );
        state
    }

    pub fn run(rounds: u64) {
        let mut store = MemoryScoreStore::new();
        for seed in 1..=rounds {
            let state = play_round(seed);
            let score = i64::try_from(state.score).unwrap_or(i64::MAX);
            if let Err(e) = store.submit_score(&format!("autopilot-{}", seed), score) {
                log::warn!("Score not recorded: {}", e);
            }
        }

        match store.fetch_leaderboard(sky_hop::consts::DEFAULT_LEADERBOARD_LIMIT) {
            Ok(board) => {
                println!("\nLeaderboard:");
                for row in board.rows() {
                    println!("  {}", row);
                }
            }
            Err(e) => log::error!("Leaderboard unavailable: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Hop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo::run(5);
}
