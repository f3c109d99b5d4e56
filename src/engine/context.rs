//! Engine services handed to a scene on every callback.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;

use crate::engine::camera::Camera2d;
use crate::engine::input::InputHandler;
use crate::engine::physics::PhysicsWorld;
use crate::engine::tilemap::{LevelData, Tilemap};

/// Notifications raised by engine subsystems and dispatched to the scene
/// between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    CameraShakeComplete,
    CameraFadeOutComplete,
}

/// Requests a scene makes of whatever is hosting it.
#[derive(Debug, Default)]
pub struct SceneControl {
    restart_requested: bool,
}

impl SceneControl {
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    pub fn is_restart_requested(&self) -> bool {
        self.restart_requested
    }

    pub(crate) fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }
}

pub struct EngineContext {
    pub tilemap: Tilemap,
    pub physics: PhysicsWorld,
    pub camera: Camera2d,
    pub input: InputHandler,
    pub scene: SceneControl,
    level: Arc<LevelData>,
    viewport: Vec2,
    sender: Sender<EngineEvent>,
    events: Receiver<EngineEvent>,
}

impl EngineContext {
    pub fn new(level: Arc<LevelData>, viewport: Vec2) -> Self {
        let (sender, events) = unbounded();
        Self {
            tilemap: Tilemap::new(Arc::clone(&level)),
            physics: PhysicsWorld::default(),
            camera: Camera2d::new(viewport, sender.clone()),
            input: InputHandler::new(),
            scene: SceneControl::default(),
            level,
            viewport,
            sender,
            events,
        }
    }

    pub fn level(&self) -> &Arc<LevelData> {
        &self.level
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera.viewport = viewport;
    }

    /// Rebuilds every per-scene service from scratch. Input is kept since it
    /// mirrors the physical device, and undelivered events are dropped.
    pub fn reset(&mut self) {
        let gravity = self.physics.gravity;
        self.tilemap = Tilemap::new(Arc::clone(&self.level));
        self.physics = PhysicsWorld::new(gravity);
        self.camera = Camera2d::new(self.viewport, self.sender.clone());
        self.scene = SceneControl::default();
        self.events.try_iter().for_each(drop);
    }

    pub fn drain_events(&self) -> Vec<EngineEvent> {
        self.events.try_iter().collect()
    }
}
