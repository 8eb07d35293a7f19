//! Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use jump::Settings;
    use jump::consts::*;
    use jump::platform::{FrameClock, key_to_input};
    use jump::renderer::{DrawList, RenderState, SpriteSheet, TextAlign, TextRun};
    use jump::sim::{GameEvent, GameState, TickInput, builtin_levels, frame};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        clock: FrameClock,
        /// Input collected since the last frame
        input: TickInput,
        draw_list: DrawList,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            Self {
                state,
                settings,
                render_state: None,
                clock: FrameClock::new(),
                input: TickInput::default(),
                draw_list: DrawList::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one frame of the simulation into the draw list
        fn update(&mut self, time: f64) {
            let dt = self.clock.tick(time);
            let input = std::mem::take(&mut self.input);
            self.draw_list.clear();
            frame(&mut self.state, &input, dt, &mut self.draw_list);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameRestarted => log::info!("Game over, starting again"),
                    GameEvent::LevelCompleted { award } => log::info!("Level cleared (+{})", award),
                    other => log::debug!("{:?}", other),
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Draw the recorded frame; returns the text runs for the overlay
        fn render(&mut self) -> Vec<TextRun> {
            let Some(render_state) = self.render_state.as_mut() else {
                return Vec::new();
            };
            match render_state.render(&self.draw_list) {
                Ok(texts) => texts,
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                    Vec::new()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    Vec::new()
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    Vec::new()
                }
            }
        }

        /// Update the DOM text overlay and HUD
        fn update_hud(&self, texts: &[TextRun]) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("text-overlay") {
                el.set_inner_html(&overlay_html(texts));
            }

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }
        }
    }

    /// Absolutely positioned spans, in canvas pixels
    fn overlay_html(texts: &[TextRun]) -> String {
        let mut html = String::new();
        for run in texts {
            let [r, g, b, a] = run.style.color;
            let translate = match run.style.align {
                TextAlign::Left => "0",
                TextAlign::Center => "-50%",
                TextAlign::Right => "-100%",
            };
            let _ = write!(
                html,
                "<span style=\"position:absolute;left:{:.1}px;top:{:.1}px;\
                 transform:translate({},-100%);font-size:{}px;font-weight:{};\
                 color:rgba({},{},{},{:.3})\">{}</span>",
                run.pos.x,
                run.pos.y,
                translate,
                run.style.size,
                if run.style.bold { "bold" } else { "normal" },
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8,
                a * run.alpha,
                run.text,
            );
        }
        html
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = CANVAS_WIDTH as u32;
        let height = CANVAS_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let levels = builtin_levels().expect("built-in levels are valid");
        let state = GameState::new(seed, levels, settings.start_lives).expect("level table is empty");
        let game = Rc::new(RefCell::new(Game::new(state, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let sheet = SpriteSheet::builtin();
        if !sheet.is_ready() {
            log::warn!("Sprites missing: {:?}", sheet.missing());
        }
        let render_state = RenderState::new(surface, &adapter, width, height, sheet)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        if !game.borrow().settings.show_fps {
            if let Some(el) = document.get_element_by_id("hud-fps") {
                let _ = el.set_attribute("class", "hidden");
            }
        }

        setup_input_handlers(game.clone());
        setup_visibility_handler(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Jump running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let Some(input) = key_to_input(&event.key(), g.settings.debug) else {
                return;
            };
            event.prevent_default();
            if input.step.is_some() {
                g.input.step = input.step;
            }
            g.input.advance_level |= input.advance_level;
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Don't hand the simulation one huge delta after the tab comes back
    fn setup_visibility_handler(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                game.borrow_mut().clock.reset();
                log::info!("Tab visible again, clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            let texts = g.render();
            g.update_hud(&texts);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Command line for the native headless run
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "jump", version)]
#[command(about = "Grid crossing game, headless scripted run", long_about = None)]
struct Cli {
    /// Settings JSON file
    settings: Option<std::path::PathBuf>,

    /// RNG seed, overrides the settings file
    #[arg(short, long)]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let cli = Cli::parse();
    log::info!("Jump (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let mut settings = match jump::Settings::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    if let Err(e) = headless_demo(&settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a short scripted run with a recording canvas and log what happens
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(settings: &jump::Settings) -> Result<(), jump::sim::LevelError> {
    use jump::renderer::{DrawList, SpriteSheet, tessellate};
    use jump::sim::{GameState, Move, TickInput, builtin_levels, frame};

    const DT: f32 = 1.0 / 60.0;

    let seed = settings.seed.unwrap_or(1);
    let mut state = GameState::new(seed, builtin_levels()?, settings.start_lives)?;
    let sheet = SpriteSheet::builtin();
    let mut canvas = DrawList::new();

    // Walk straight down, stepping every half second
    let script = [Move::Down, Move::Down, Move::Down, Move::Down, Move::Down];
    let mut steps = script.iter().copied();
    for n in 0..1200u32 {
        let step = if n % 30 == 0 && state.player.is_playable() {
            steps.next()
        } else {
            None
        };
        let input = TickInput {
            step,
            ..Default::default()
        };
        canvas.clear();
        frame(&mut state, &input, DT, &mut canvas);

        for event in state.drain_events() {
            println!("frame {:4}: {:?}", state.frame, event);
        }
    }

    let out = tessellate(&canvas, &sheet);
    println!(
        "Final frame: {} triangles, text {:?}",
        out.vertices.len() / 3,
        out.texts.iter().map(|t| t.text.as_str()).collect::<Vec<_>>()
    );
    println!(
        "Level {}, score {}, lives {}",
        state.level_index + 1,
        state.score.target(),
        state.lives.count()
    );
    Ok(())
}
