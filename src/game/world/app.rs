use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::engine::context::EngineContext;
use crate::engine::error::SetupError;
use crate::engine::scene::SceneHost;
use crate::engine::tilemap::LevelData;
use crate::game::player::ArcadePlayer;
use crate::game::world::scene::PlatformerScene;

const VIEWPORT: Vec2 = Vec2::new(640.0, 384.0);
const MAX_FRAME: Duration = Duration::from_millis(50);

pub struct App {
    window: Option<Window>,
    host: SceneHost<PlatformerScene<ArcadePlayer>>,
    last_frame: Instant,
    status: String,
}

impl App {
    pub fn new(level: Arc<LevelData>) -> Result<Self, SetupError> {
        let ctx = EngineContext::new(level, VIEWPORT);
        let host = SceneHost::new(ctx, PlatformerScene::<ArcadePlayer>::new)?;
        Ok(Self {
            window: None,
            host,
            last_frame: Instant::now(),
            status: String::new(),
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).min(MAX_FRAME);
        self.last_frame = now;

        if let Err(e) = self.host.frame(elapsed) {
            error!("Scene setup failed on restart: {}", e);
            event_loop.exit();
            return;
        }

        let status = self.status_line();
        if let Some(window) = &self.window {
            if status != self.status {
                window.set_title(&status);
                self.status = status;
            }
            window.request_redraw();
        }
    }

    fn status_line(&self) -> String {
        let scene = self.host.scene();
        let life = if scene.is_player_dead() { "dead" } else { "alive" };
        format!(
            "platformer | {} | attempt {} | platforms {}",
            life,
            self.host.restarts() + 1,
            if scene.platform_collider().is_attached() { "solid" } else { "open" }
        )
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("platformer")
            .with_inner_size(winit::dpi::LogicalSize::new(VIEWPORT.x, VIEWPORT.y));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.host
                    .context_mut()
                    .set_viewport(Vec2::new(size.width as f32, size.height as f32));
                window.request_redraw();
                self.window = Some(window);
                self.last_frame = Instant::now();
                info!("Window created");
            }
            Err(e) => {
                error!("Failed to create window: {:?}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.host
                        .context_mut()
                        .set_viewport(Vec2::new(size.width as f32, size.height as f32));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.host
                        .context_mut()
                        .input
                        .handle_keyboard_input_event(keycode, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.host.context_mut().input.handle_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.host.context_mut().input.handle_mouse_button(button, state);
            }
            WindowEvent::Focused(false) => self.host.context_mut().input.release_all(),
            _ => (),
        }
    }
}
