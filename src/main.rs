//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use breakout::audio::AudioManager;
    use breakout::consts::MAX_SUBSTEPS;
    use breakout::platform::{Clock, InputEvent, Key, MouseAction, QueuedInput};
    use breakout::renderer::{Frame, RenderState, VertexCanvas};
    use breakout::shell::LoopSettings;
    use breakout::sim::Autopilot;
    use breakout::{Breakout, Config, Shell};

    /// Milliseconds clock from `performance.now()`; the browser paces frames
    struct BrowserClock {
        start: f64,
    }

    impl BrowserClock {
        fn now_ms() -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }

        fn new() -> Self {
            Self {
                start: Self::now_ms(),
            }
        }
    }

    impl Clock for BrowserClock {
        fn elapsed(&self) -> f64 {
            (Self::now_ms() - self.start) / 1000.0
        }

        fn sleep(&mut self, _secs: f64) {}
    }

    type GameShell = Shell<Breakout, VertexCanvas, QueuedInput, AudioManager, BrowserClock>;

    /// Game instance holding all state
    struct Game {
        shell: GameShell,
        /// Producer side of the shell's input queue
        input: QueuedInput,
        autopilot: Option<Autopilot>,
        render_state: Option<RenderState>,
        overlay: Option<Element>,
        accumulator: f64,
        last_time: f64,
        tick: f64,
        screen: (f32, f32),
        running: bool,
    }

    impl Game {
        fn new(config: Config, seed: u64) -> Result<Self, JsValue> {
            let settings = LoopSettings::from_config(&config);
            let screen = (config.screen_width, config.screen_height);
            let volume = config.sound_volume;
            let breakout =
                Breakout::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
            let input = QueuedInput::new();
            let tick = settings.tick_duration();
            let shell = Shell::new(
                breakout,
                VertexCanvas::new(),
                input.clone(),
                AudioManager::new(volume),
                BrowserClock::new(),
                settings,
            );
            Ok(Self {
                shell,
                input,
                autopilot: None,
                render_state: None,
                overlay: None,
                accumulator: 0.0,
                last_time: 0.0,
                tick,
                screen,
                running: true,
            })
        }

        fn toggle_autopilot(&mut self) {
            match self.autopilot.take() {
                Some(mut pilot) => self.input.extend(pilot.release()),
                None => self.autopilot = Some(Autopilot::new()),
            }
            log::info!("Idle mode: {}", self.autopilot.is_some());
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f64) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.running && self.accumulator >= self.tick && substeps < MAX_SUBSTEPS {
                if let Some(pilot) = self.autopilot.as_mut() {
                    self.input.extend(pilot.steer(self.shell.scene()));
                }
                self.running = self.shell.frame();
                self.accumulator -= self.tick;
                substeps += 1;
            }
            if !self.running {
                log::info!(
                    "Game finished: {:?}, score {}",
                    self.shell.scene().phase(),
                    self.shell.scene().score()
                );
            }
        }

        /// Render the latest presented frame, if any
        fn render(&mut self) {
            let Some(frame) = self.shell.canvas_mut().take_presented() else {
                return;
            };
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.update_overlay(&frame);
        }

        /// Mirror the frame's text into DOM elements over the canvas
        fn update_overlay(&self, frame: &Frame) {
            let Some(overlay) = &self.overlay else { return };
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            overlay.set_inner_html("");
            let (w, h) = self.screen;
            for item in &frame.texts {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let [r, g, b, a] = item.style.color;
                let anchor = if item.style.centered {
                    "transform: translate(-50%, -50%);"
                } else {
                    ""
                };
                let style = format!(
                    "position: absolute; left: {:.3}%; top: {:.3}%; {} \
                     font-family: {}; font-size: {}px; white-space: nowrap; \
                     color: rgba({}, {}, {}, {});",
                    item.pos.x / w * 100.0,
                    item.pos.y / h * 100.0,
                    anchor,
                    item.style.font,
                    item.style.size,
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                    a
                );
                let _ = el.set_attribute("style", &style);
                el.set_text_content(Some(&item.text));
                let _ = overlay.append_child(&el);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = Config::load();
        let screen = (config.screen_width, config.screen_height);

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (screen.0 as f64 * dpr) as u32;
        let height = (screen.1 as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(config, seed)?;
        game.overlay = document.get_element_by_id("overlay");
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, screen)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.render_state = Some(render_state);

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(&window, &canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Breakout running!");
        Ok(())
    }

    fn arrow_key(event: &KeyboardEvent) -> Option<Key> {
        match event.key().as_str() {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.shell.audio().resume();
                if event.repeat() {
                    return;
                }
                if let Some(key) = arrow_key(&event) {
                    event.prevent_default();
                    g.input.push(InputEvent::KeyDown(key));
                    return;
                }
                match event.key().as_str() {
                    "Escape" => g.input.push(InputEvent::Quit),
                    "i" | "I" => g.toggle_autopilot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = arrow_key(&event) {
                    game.borrow().input.push(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse, scaled from CSS pixels to game coordinates
        for (name, action) in [
            ("mousemove", MouseAction::Move),
            ("mousedown", MouseAction::Down),
            ("mouseup", MouseAction::Up),
        ] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let g = game.borrow();
                if action == MouseAction::Down {
                    g.shell.audio().resume();
                }
                let w = canvas_clone.client_width().max(1) as f32;
                let h = canvas_clone.client_height().max(1) as f32;
                let pos = Vec2::new(
                    event.offset_x() as f32 * g.screen.0 / w,
                    event.offset_y() as f32 * g.screen.1 / h,
                );
                g.input.push(InputEvent::Mouse { action, pos });
            });
            let _ =
                canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
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
        let running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                g.tick
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.running
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use breakout::platform::{Canvas, InputEvent, ManualClock, NullAudio, QueuedInput, RecordingCanvas};
    use breakout::shell::LoopSettings;
    use breakout::sim::{Autopilot, GameEvent};
    use breakout::{Breakout, Color, Config, Scene, Shell};

    /// Safety cap on a headless session (ten minutes at 60 Hz)
    const MAX_FRAMES: u64 = 36_000;

    /// Breakout driven by the autopilot, quitting after a frame budget
    pub struct Autoplay {
        pub game: Breakout,
        pilot: Autopilot,
        frames: u64,
        max_frames: u64,
    }

    impl Scene for Autoplay {
        fn handle_event(&mut self, event: &InputEvent) {
            self.game.handle_event(event);
        }

        fn update(&mut self, now: f64) {
            for event in self.pilot.steer(&self.game) {
                self.game.handle_event(&event);
            }
            self.frames += 1;
            if self.frames >= self.max_frames {
                log::warn!("Frame budget of {} exhausted", self.max_frames);
                self.game.quit();
            }
            self.game.tick(now);
        }

        fn draw(&self, canvas: &mut dyn Canvas) {
            self.game.draw(canvas);
        }

        fn drain_events(&mut self) -> Vec<GameEvent> {
            self.game.drain_events()
        }

        fn is_finished(&self) -> bool {
            self.game.is_finished()
        }

        fn background(&self) -> Color {
            self.game.config().background
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let path = args.next().map(std::path::PathBuf::from);
        let seed = match args.next() {
            Some(seed) => seed.parse()?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_secs(),
        };

        let config = Config::load(path.as_deref())?;
        let settings = LoopSettings::from_config(&config);
        let mut game = Breakout::new(config, seed)?;
        game.start();

        let scene = Autoplay {
            game,
            pilot: Autopilot::new(),
            frames: 0,
            max_frames: MAX_FRAMES,
        };
        // Simulated clock: the session runs as fast as it can
        let mut shell = Shell::new(
            scene,
            RecordingCanvas::new(),
            QueuedInput::new(),
            NullAudio,
            ManualClock::new(),
            settings,
        );
        shell.run();

        let frames = shell.frames();
        let game = shell.into_scene().game;
        log::info!(
            "Headless session (seed {}): {:?} after {} frames, score {}, lives {}",
            seed,
            game.phase(),
            frames,
            game.score(),
            game.lives()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("Native mode plays a headless autopilot session - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
