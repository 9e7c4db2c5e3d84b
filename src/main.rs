//! Meteor Storm entry point
//!
//! Native winit/wgpu frontend: owns the window, feeds input snapshots to the
//! simulation, renders the tessellated scene, and plays sound cues.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use meteor_storm::assets::SpriteCatalog;
use meteor_storm::audio::{AudioManager, SoundEffect};
use meteor_storm::consts::*;
use meteor_storm::input::InputState;
use meteor_storm::renderer::{RenderState, scene};
use meteor_storm::settings::Settings;
use meteor_storm::sim::{GameEvent, GameSession, tick};

/// Window plus everything bound to its surface.
struct Gfx {
    window: Arc<Window>,
    render: RenderState,
}

struct App {
    session: GameSession,
    input: InputState,
    audio: AudioManager,
    settings: Settings,
    gfx: Option<Gfx>,
    last_frame: Instant,
    frame_count: u32,
    fps_window: Instant,
}

impl App {
    fn new(session: GameSession, settings: Settings) -> Self {
        let audio = AudioManager::new(settings.master_volume, settings.muted);
        Self {
            session,
            input: InputState::new(),
            audio,
            settings,
            gfx: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps_window: Instant::now(),
        }
    }

    /// One paced frame: tick, react to events, render, throttle to 60 Hz.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let frame_start = Instant::now();
        // Real elapsed time, clamped so a stall can't teleport entities
        let dt = frame_start
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(0.1);
        self.last_frame = frame_start;

        let frame_input = self.input.frame_input();
        let events = tick(&mut self.session, &frame_input, dt);
        self.input.end_frame();

        for event in events {
            match event {
                GameEvent::LaserFired => self.audio.play(SoundEffect::LaserShot),
                GameEvent::MeteorExploded => self.audio.play(SoundEffect::Explosion),
                GameEvent::PlayerHit => self.audio.play(SoundEffect::GameOver),
                GameEvent::ExitRequested => {
                    log::info!("exit confirmed, final score {}", self.session.score());
                    event_loop.exit();
                    return;
                }
            }
        }

        if let Some(gfx) = self.gfx.as_mut() {
            let vertices = scene::build(&self.session);
            match gfx.render.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = gfx.render.size;
                    gfx.render.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("render surface out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("render error: {e:?}"),
            }
        }

        if self.settings.show_fps {
            self.frame_count += 1;
            if self.fps_window.elapsed() >= Duration::from_secs(1) {
                log::info!("fps: {}", self.frame_count);
                self.frame_count = 0;
                self.fps_window = Instant::now();
            }
        }

        // Throttle to the target rate
        let budget = Duration::from_secs_f32(1.0 / TARGET_FPS as f32);
        let spent = frame_start.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Meteor Storm")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );
        let size = window.inner_size();
        log::info!("window created: {}x{}", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let render = pollster::block_on(async {
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .expect("Failed to get adapter");
            log::info!("using adapter: {:?}", adapter.get_info().name);
            RenderState::new(surface, &adapter, size.width, size.height).await
        });

        self.gfx = Some(Gfx { window, render });
        self.last_frame = Instant::now();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.gfx {
            gfx.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.input.key_down(key_code),
                        ElementState::Released => self.input.key_up(key_code),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                // Map physical surface pixels into the fixed logical space
                if let Some(gfx) = &self.gfx {
                    let (w, h) = gfx.render.size;
                    self.input.cursor = Vec2::new(
                        position.x as f32 * WINDOW_WIDTH / w as f32,
                        position.y as f32 * WINDOW_HEIGHT / h as f32,
                    );
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.input.mouse_down();
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meteor Storm starting...");

    let settings = Settings::load();

    let sprites = match SpriteCatalog::load(Path::new("assets/images")) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("asset load failed: {err}");
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("session seed: {seed}");

    let session = GameSession::new(seed, sprites);
    let mut app = App::new(session, settings);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
