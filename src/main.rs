//! Sky Hero Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Element, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
        PointerEvent,
    };

    use sky_hero_dash::Tuning;
    use sky_hero_dash::audio::AudioManager;
    use sky_hero_dash::platform::web::{BrowserStorage, CanvasRenderer};
    use sky_hero_dash::platform::{GameHost, key_command, primary_action};
    use sky_hero_dash::renderer::{background_color, scene};
    use sky_hero_dash::settings::{
        Background, Body, ColorSlot, Head, MusicTrack, SfxPack, Trail,
    };
    use sky_hero_dash::sim::{Command, GameEvent, GamePhase};

    const TOAST_MS: f64 = 1800.0;

    /// Game instance holding all state
    struct Game {
        host: GameHost<BrowserStorage>,
        audio: AudioManager,
        renderer: CanvasRenderer,
        last_time: f64,
        last_phase: GamePhase,
        /// `Date.now()` after which the toast clears
        toast_until: f64,
    }

    fn new_seed() -> u64 {
        js_sys::Date::now() as u64
    }

    impl Game {
        fn push(&mut self, command: Command) {
            self.audio.resume();
            self.host.push(command);
        }

        fn toast(&mut self, message: &str) {
            set_text("toast", message);
            self.toast_until = js_sys::Date::now() + TOAST_MS;
        }

        /// Run one simulation tick and route its events
        fn update(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time).min(100.0)
            } else {
                0.0
            };
            self.last_time = time;

            let settings = self.host.profile.settings.clone();
            for event in self.host.frame() {
                match event {
                    GameEvent::Cue(cue) => self.audio.play_cue(cue, &settings),
                    GameEvent::SessionEnded { final_score, cause } => {
                        log::info!("Session over: {} points ({:?})", final_score, cause);
                    }
                    _ => {}
                }
            }

            let in_game = self.host.phase() == GamePhase::Running;
            self.audio.apply_settings(&settings);
            self.audio.update_music(dt_ms, in_game, &settings);

            if self.toast_until > 0.0 && js_sys::Date::now() > self.toast_until {
                set_text("toast", "");
                self.toast_until = 0.0;
            }

            let phase = self.host.phase();
            if phase != self.last_phase {
                set_hidden("menu", !matches!(phase, GamePhase::Idle));
                set_hidden("game-over", phase != GamePhase::Ended);
                set_text(
                    "pause-btn",
                    if phase == GamePhase::Paused { "Resume" } else { "Pause" },
                );
                if phase == GamePhase::Ended {
                    let lines = self.host.profile.leaderboard.lines().join("\n");
                    set_text("local-leaderboard", &lines);
                }
                self.last_phase = phase;
            }
        }

        fn render(&self) {
            let snapshot = self.host.state.snapshot();
            let vertices = scene(&snapshot, &self.host.profile.cosmetics);
            let bg = background_color(self.host.profile.settings.background);
            self.renderer.draw(&vertices, bg);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let session = &self.host.state.session;
            set_text("score", &session.score.to_string());
            set_text("best", &self.host.profile.best.to_string());
            set_text("coins", &self.host.profile.wallet.coins().to_string());

            let mut status = Vec::new();
            if self.host.state.shield_active() {
                status.push("Shield");
            }
            if self.host.state.slow_motion_active() {
                status.push("Slow-mo");
            }
            set_text("status", &status.join(" · "));
            set_text("player-name", &self.host.profile.name);
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn toggle_hidden(id: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle("hidden");
        }
    }

    /// Current value of an `<input>` or `<select>`
    fn control_value(el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_control_value(id: &str, value: &str) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn is_checked(el: &Element) -> bool {
        el.dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn set_checked(id: &str, checked: bool) {
        if let Some(input) = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(checked);
        }
    }

    /// Attach `handler` to `event` on `#id`; the handler gets the element
    fn listen(id: &str, event: &str, mut handler: impl FnMut(&Element) + 'static) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let target = el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            handler(&target);
        });
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Show the stored profile in the menu controls
    fn sync_controls(game: &Game) {
        let profile = &game.host.profile;
        set_checked("sound-toggle", profile.settings.sound_on);
        set_checked("music-toggle", profile.settings.music_on);
        set_control_value("bg-select", profile.settings.background.as_str());
        set_control_value("music-select", profile.settings.music.as_str());
        set_control_value("sfx-select", profile.settings.sfx_pack.as_str());
        set_control_value("body-select", profile.cosmetics.body.as_str());
        set_control_value("head-select", profile.cosmetics.head.as_str());
        set_control_value("suit-color", &profile.cosmetics.suit);
        set_control_value("cape-color", &profile.cosmetics.cape);
        set_control_value("mask-color", &profile.cosmetics.mask);
        set_control_value("trail-select", profile.cosmetics.trail.as_str());
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Hero Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.screen_width as u32);
        canvas.set_height(tuning.screen_height as u32);
        let renderer = CanvasRenderer::new(&canvas, tuning.screen_width, tuning.screen_height)?;

        let seed = new_seed();
        let host = GameHost::new(seed, tuning, BrowserStorage::open());
        let audio = AudioManager::new(&host.profile.settings);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            host,
            audio,
            renderer,
            last_time: 0.0,
            last_phase: GamePhase::Ended,
            toast_until: 0.0,
        }));

        sync_controls(&game.borrow());
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_settings(game.clone());
        setup_shop(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);
        log::info!("Sky Hero Dash running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let command = primary_action(g.host.phase(), new_seed());
                g.push(command);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(document) = document() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(command) = key_command(&event.code(), g.host.phase(), new_seed()) {
                    event.prevent_default();
                    g.push(command);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let bindings: [(&str, fn() -> Command); 3] = [
            ("play-btn", || Command::Start),
            ("pause-btn", || Command::TogglePause),
            ("reset-btn", || Command::Reset { seed: new_seed() }),
        ];
        for (id, command) in bindings {
            let game = game.clone();
            listen(id, "click", move |_| game.borrow_mut().push(command()));
        }

        listen("settings-btn", "click", |_| {
            toggle_hidden("settings-panel");
            set_hidden("shop-panel", true);
        });
        listen("shop-btn", "click", |_| toggle_hidden("shop-panel"));
    }

    /// Settings panel: every change is applied and saved right away
    fn setup_settings(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            listen("sound-toggle", "change", move |el| {
                let on = is_checked(el);
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.update_settings(&mut g.host.storage, |s| s.sound_on = on);
                g.toast(if on { "Sound ON" } else { "Sound OFF" });
            });
        }
        {
            let game = game.clone();
            listen("music-toggle", "change", move |el| {
                let on = is_checked(el);
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.update_settings(&mut g.host.storage, |s| s.music_on = on);
                g.toast(if on { "Music ON" } else { "Music OFF" });
            });
        }
        {
            let game = game.clone();
            listen("bg-select", "change", move |el| {
                let background = Background::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.update_settings(&mut g.host.storage, |s| s.background = background);
            });
        }
        {
            let game = game.clone();
            listen("music-select", "change", move |el| {
                let track = MusicTrack::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.update_settings(&mut g.host.storage, |s| s.music = track);
                g.toast(&format!("Track: {}", track));
            });
        }
        {
            let game = game.clone();
            listen("sfx-select", "change", move |el| {
                let pack = SfxPack::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.update_settings(&mut g.host.storage, |s| s.sfx_pack = pack);
            });
        }
        {
            let game = game.clone();
            listen("body-select", "change", move |el| {
                let body = Body::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.set_body(body, &mut g.host.storage);
            });
        }
        {
            let game = game.clone();
            listen("head-select", "change", move |el| {
                let head = Head::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.host.profile.set_head(head, &mut g.host.storage);
            });
        }
        for (id, slot) in [
            ("suit-color", ColorSlot::Suit),
            ("cape-color", ColorSlot::Cape),
            ("mask-color", ColorSlot::Mask),
        ] {
            let game = game.clone();
            listen(id, "input", move |el| {
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                if let Err(e) = g.host.profile.set_color(slot, &control_value(el), &mut g.host.storage)
                {
                    log::warn!("{}", e);
                }
            });
        }
        {
            let game = game.clone();
            listen("trail-select", "change", move |el| {
                let trail = Trail::parse_or_default(&control_value(el));
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                if let Err(e) = g.host.profile.select_trail(trail, &mut g.host.storage) {
                    g.toast(&e.to_string());
                    set_control_value("trail-select", g.host.profile.cosmetics.trail.as_str());
                }
            });
        }
        listen("change-name-btn", "click", move |_| {
            let Some(window) = web_sys::window() else { return };
            let current = game.borrow().host.profile.name.clone();
            let entered = match window
                .prompt_with_message_and_default("Pick a nickname (max 16 chars):", &current)
            {
                Ok(Some(name)) => name,
                _ => return,
            };
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            if let Err(e) = g.host.profile.set_name(&entered, &mut g.host.storage) {
                let _ = window.alert_with_message(&e.to_string());
            }
        });
    }

    fn setup_shop(game: Rc<RefCell<Game>>) {
        for (id, trail) in [("buy-spark", Trail::Spark), ("buy-neon", Trail::Neon)] {
            let game = game.clone();
            listen(id, "click", move |_| {
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                match g.host.profile.buy_trail(trail, &mut g.host.storage) {
                    Ok(()) => g.toast(&format!("{} unlocked!", trail)),
                    Err(e) => g.toast(&e.to_string()),
                }
            });
        }
    }

    /// Pause when the tab goes to the background
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(doc) = document() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document().map(|d| d.hidden()).unwrap_or(false) {
                game.borrow_mut().host.push(Command::Pause);
            }
        });
        let _ = doc
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot flies one session for the given seed
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_hero_dash::Tuning;
    use sky_hero_dash::persistence::MemoryStorage;
    use sky_hero_dash::platform::GameHost;
    use sky_hero_dash::sim::{Command, GameEvent, GamePhase};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let tuning = match std::env::var("SKY_HERO_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(2);
            }
        },
        Err(_) => Tuning::default(),
    };

    log::info!("Sky Hero Dash (native) autopilot, seed {}", seed);
    let mut host = GameHost::new(seed, tuning, MemoryStorage::new());
    host.input.idle_mode = true;
    host.push(Command::Start);

    for _ in 0..max_ticks {
        for event in host.frame() {
            match event {
                GameEvent::Cue(_) => {}
                GameEvent::Passed { score } => log::debug!("Passed, score {}", score),
                other => log::info!("{:?}", other),
            }
        }
        if host.phase() == GamePhase::Ended {
            break;
        }
    }

    let state = &host.state;
    println!(
        "seed {}: score {} after {} ticks ({:?}), {} coins",
        seed,
        state.session.score,
        state.frame,
        state.phase,
        host.profile.wallet.coins()
    );
}
