//! Phosphor Pit Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, PointerEvent};

    use phosphor_pit::audio::{AudioManager, SoundEffect};
    use phosphor_pit::input::{self, Action};
    use phosphor_pit::renderer::CanvasRenderer;
    use phosphor_pit::sim::{GameEvent, GamePhase, GameState};
    use phosphor_pit::timing::StepClock;
    use phosphor_pit::{Settings, highscore};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: StepClock,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        events: Vec<GameEvent>,
        // Overlay text is rewritten only on phase changes
        last_phase: Option<GamePhase>,
    }

    impl Game {
        /// Apply one mapped input action
        fn apply(&mut self, action: Action) {
            match action {
                Action::Steer(dir) => {
                    self.audio.resume();
                    let was_over = self.state.phase == GamePhase::GameOver;
                    input::steer(&mut self.state, dir);
                    if was_over {
                        // Restart-on-move: drop time banked while dead
                        self.clock.reset();
                    }
                }
                Action::Start => {
                    if self.state.phase != GamePhase::Running {
                        self.audio.resume();
                        input::start(&mut self.state);
                        self.clock.reset();
                    }
                }
                Action::ToggleSound => self.toggle_sound(),
            }
        }

        fn toggle_sound(&mut self) {
            self.settings.sound = !self.settings.sound;
            self.settings.save();
            self.audio.set_muted(!self.settings.sound);
            if self.settings.sound {
                self.audio.play(SoundEffect::SoundOn);
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                sync_sound_button(&document, self.settings.sound);
            }
        }

        /// Run one animation frame: drain logic steps, dispatch events to
        /// the adapters, draw, and re-project the HUD.
        fn frame(&mut self, time: f64) {
            self.clock.on_frame(time, &mut self.state, &mut self.events);

            for event in self.events.drain(..) {
                match event {
                    GameEvent::FruitEaten { .. } => self.audio.play(SoundEffect::FruitEaten),
                    GameEvent::HighScore { score } => highscore::save(score),
                    GameEvent::Collided { .. } => self.audio.play(SoundEffect::GameOver),
                }
            }

            self.renderer.render(&self.state, time);
            self.update_hud();
        }

        /// Project phase + score + high score + level into the DOM. The
        /// simulation core never formats strings; all presentation lives
        /// here.
        fn update_hud(&mut self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&self.state.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&self.state.level().to_string()));
            }

            if self.last_phase != Some(self.state.phase) {
                self.last_phase = Some(self.state.phase);
                if let Some(overlay) = document.get_element_by_id("overlay") {
                    let hidden = match self.state.phase {
                        GamePhase::Idle => {
                            overlay.set_inner_html(
                                "<span class=\"overlay-label\">INSERT CREDIT</span>\
                                 <strong>PHOSPHOR PIT SNAKE</strong>\
                                 <p>Press START to begin.</p>",
                            );
                            false
                        }
                        GamePhase::GameOver => {
                            overlay.set_inner_html(&format!(
                                "<span class=\"overlay-label\">SYSTEM FAIL</span>\
                                 <strong>{} PTS</strong>\
                                 <p>Press START or SPACE to run it back.</p>",
                                self.state.score
                            ));
                            false
                        }
                        GamePhase::Running => true,
                    };
                    let _ = overlay.class_list().toggle_with_force("hidden", hidden);
                }
            }
        }
    }

    fn sync_sound_button(document: &Document, sound_on: bool) {
        if let Some(btn) = document.get_element_by_id("sound-btn") {
            btn.set_text_content(Some(if sound_on { "SOUND: ON" } else { "SOUND: OFF" }));
            let _ = btn.set_attribute("aria-pressed", if sound_on { "true" } else { "false" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Phosphor Pit Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no game canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = CanvasRenderer::new(&canvas).expect("canvas 2d context");

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_muted(!settings.sound);
        sync_sound_button(&document, settings.sound);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, highscore::load()),
            clock: StepClock::new(),
            renderer,
            audio,
            settings,
            events: Vec::new(),
            last_phase: None,
        }));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Phosphor Pit Snake running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = input::action_for_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().apply(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(Action::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound button
        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(Action::ToggleSound);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the board starts a stopped game
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Running {
                    g.apply(Action::Start);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch d-pad
        let dpad = document.query_selector_all("[data-dir]").unwrap();
        for i in 0..dpad.length() {
            let Some(button) = dpad.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let Some(dir) = button
                .get_attribute("data-dir")
                .as_deref()
                .and_then(input::direction_for_name)
            else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().apply(Action::Steer(dir));
            });
            let _ = button
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
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
    log::info!("Phosphor Pit Snake (native) starting...");
    log::info!("This is a browser game - run with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
