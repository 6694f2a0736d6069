use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use landing_fx::cli::Cli;
use landing_fx::config::EffectsConfig;
use landing_fx::core::gpu_context::probe_gpu;
use landing_fx::core::input_adapter::{InputAdapter, PageInput};
use landing_fx::effects::interaction::ReducedMotion;
use landing_fx::frame::{spawn_headless, FpsCounter};
use landing_fx::page::LandingPage;
use landing_fx::renderer::{withholds_from_page, Renderer};
use landing_fx::scene::{Background, CanvasHandle};

const INITIAL_WINDOW_WIDTH: f64 = 1280.0;
const INITIAL_WINDOW_HEIGHT: f64 = 800.0;
const HEADLESS_FPS: u32 = 60;
/// Points the headless visitor scrolls per frame
const HEADLESS_SCROLL_STEP: f32 = 6.0;

// === Application ===

struct App {
    cli: Cli,
    config: EffectsConfig,
    motion: ReducedMotion,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    background: Background,
    page: Option<LandingPage>,
    input: InputAdapter,
    fps: FpsCounter,
    started: Instant,
}

impl App {
    fn new(cli: Cli, config: EffectsConfig, motion: ReducedMotion) -> Self {
        Self {
            cli,
            config,
            motion,
            window: None,
            renderer: None,
            background: Background::Absent,
            page: None,
            input: InputAdapter::new(1.0),
            fps: FpsCounter::new(),
            started: Instant::now(),
        }
    }

    fn now(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    fn init(&mut self, window: Arc<Window>) -> Result<()> {
        let size = window.inner_size();
        self.input.set_scale_factor(window.scale_factor() as f32);
        let logical = self.input.logical_size(size.width, size.height);

        let mut renderer = pollster::block_on(Renderer::new(window.clone()))
            .context("failed to initialize renderer")?;

        let gpu_available = !self.cli.force_fallback;
        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let canvas = CanvasHandle::new(self.config.scene.canvas_id.clone());
        self.background = Background::select(
            Some(&canvas),
            gpu_available,
            logical,
            &self.config.scene,
            &mut rng,
        );

        let attached = match &self.background {
            Background::Wireframe(driver) => renderer.attach_wireframe(driver),
            _ => Ok(()),
        };
        if let Err(err) = attached {
            self.background.fall_back(&err);
        }
        log::info!("Background: {}", self.background.name());

        if !self.cli.no_ui {
            let viewport = Vec2::new(logical.0 as f32, logical.1 as f32);
            self.page = Some(LandingPage::new(&self.config, self.motion, viewport, self.cli.seed));
        }

        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn handle_input(&mut self, input: PageInput, event_loop: &ActiveEventLoop) {
        let now = self.now();
        if let PageInput::PointerMoved { logical, .. } = input {
            self.background.on_pointer_move(logical.x, logical.y);
        }
        if input == PageInput::Quit {
            event_loop.exit();
            return;
        }

        let Some(page) = &mut self.page else {
            return;
        };
        match input {
            PageInput::PointerMoved { logical, .. } => page.on_pointer_move(logical),
            PageInput::PointerLeft => page.on_pointer_leave(),
            PageInput::Click(at) => {
                let target = page.click(at, now);
                log::debug!("Click at {at:?} hit {target:?}");
            }
            PageInput::Scroll(delta) => page.on_scroll_delta(delta),
            PageInput::Navigate(key) => page.navigate(key),
            PageInput::TogglePause => page.toggle_pause(),
            PageInput::PlayHighlight => {
                if !page.play("cta-button-pulse") {
                    log::debug!("Highlight animation skipped");
                }
            }
            PageInput::Quit => {}
        }
    }

    fn redraw(&mut self) {
        let now = self.now();
        if let Some(fps) = self.fps.record(now) {
            log::debug!("{fps:.0} fps");
        }

        self.background.update(now);
        if let Some(page) = &mut self.page {
            page.update(now);
        }

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if let Err(err) = renderer.render(window, &self.background, self.page.as_ref()) {
                log::error!("Render error: {err}");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("landing-fx")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init(window) {
            log::error!("{e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let consumed = renderer.handle_event(window, &event);
            if withholds_from_page(&event, consumed) {
                return; // egui has keyboard focus
            }
        }

        if let Some(input) = self.input.process_event(&event) {
            self.handle_input(input, event_loop);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let now = self.now();
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                let (width, height) = self.input.logical_size(size.width, size.height);
                if width == 0 || height == 0 {
                    return;
                }
                self.background.on_resize(width, height);
                if let Some(page) = &mut self.page {
                    page.on_resize(Vec2::new(width as f32, height as f32), now);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Drive the background and page on a worker thread with no window,
/// scrolling steadily down the page
fn run_headless(cli: &Cli, config: &EffectsConfig, motion: ReducedMotion) -> Result<()> {
    let viewport = (INITIAL_WINDOW_WIDTH as u32, INITIAL_WINDOW_HEIGHT as u32);
    let gpu_available = !cli.force_fallback && probe_gpu();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let canvas = CanvasHandle::new(config.scene.canvas_id.clone());
    let mut background = Background::select(Some(&canvas), gpu_available, viewport, &config.scene, &mut rng);
    let mut page = LandingPage::new(
        config,
        motion,
        Vec2::new(viewport.0 as f32, viewport.1 as f32),
        cli.seed,
    );
    log::info!("Headless run: {} frames, background {}", cli.frames, background.name());

    let frames = cli.frames.max(1);
    let worker = spawn_headless(HEADLESS_FPS, move |frame| {
        background.update(frame.time);
        page.on_scroll_delta(HEADLESS_SCROLL_STEP);
        page.update(frame.time);

        if frame.number + 1 >= frames {
            let counted: Vec<i64> = page.stats().iter().map(|s| s.counter.value()).collect();
            log::info!(
                "Finished at {:.2}s, scroll {:.0}/{:.0}, counters {:?}",
                frame.time,
                page.scroll_y(),
                page.layout().max_scroll(),
                counted
            );
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });

    let ran = worker
        .join()
        .map_err(|_| anyhow::anyhow!("headless worker panicked"))?;
    log::info!("Headless loop ran {ran} frames");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EffectsConfig::load(cli.config.as_deref()).context("failed to load effects config")?;
    let motion = ReducedMotion::detect(cli.reduced_motion || config.reduced_motion);

    if cli.headless {
        return run_headless(&cli, &config, motion);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config, motion);

    log::info!("landing-fx - scroll, click, P to pause, H to highlight, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
