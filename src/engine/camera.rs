//! 2D scrolling camera with follow, world bounds and timed effects.

use std::time::Duration;

use crossbeam_channel::Sender;
use glam::Vec2;
use log::debug;

use crate::engine::context::EngineEvent;
use crate::engine::physics::{Aabb, BodyId, PhysicsWorld};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shake {
    duration: Duration,
    intensity: f32,
    elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    duration: Duration,
    color: [u8; 3],
    elapsed: Duration,
}

pub struct Camera2d {
    /// World position of the viewport's top-left corner.
    pub scroll: Vec2,
    pub viewport: Vec2,
    bounds: Option<Aabb>,
    follow: Option<BodyId>,
    shake: Option<Shake>,
    fade: Option<Fade>,
    fade_color: [u8; 3],
    fade_alpha: f32,
    subscriptions: Vec<EngineEvent>,
    events: Sender<EngineEvent>,
}

impl Camera2d {
    pub fn new(viewport: Vec2, events: Sender<EngineEvent>) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport,
            bounds: None,
            follow: None,
            shake: None,
            fade: None,
            fade_color: [0, 0, 0],
            fade_alpha: 0.0,
            subscriptions: Vec::new(),
            events,
        }
    }

    pub fn start_follow(&mut self, body: BodyId) {
        self.follow = Some(body);
    }

    pub fn stop_follow(&mut self) {
        self.follow = None;
    }

    pub fn following(&self) -> Option<BodyId> {
        self.follow
    }

    pub fn set_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.bounds = Some(Aabb::new(Vec2::new(x, y), Vec2::new(width, height)));
        self.clamp_scroll();
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.scroll
    }

    /// Starts a shake unless one is already running.
    pub fn shake(&mut self, duration: Duration, intensity: f32) {
        if self.shake.is_some() {
            return;
        }
        self.shake = Some(Shake {
            duration,
            intensity,
            elapsed: Duration::ZERO,
        });
    }

    /// Starts fading out to `color` unless a fade is already running.
    pub fn fade(&mut self, duration: Duration, color: [u8; 3]) {
        if self.fade.is_some() {
            return;
        }
        self.fade_color = color;
        self.fade = Some(Fade {
            duration,
            color,
            elapsed: Duration::ZERO,
        });
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Opacity of the fade overlay, 0 (clear) to 1 (fully faded).
    pub fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    pub fn fade_color(&self) -> [u8; 3] {
        self.fade_color
    }

    pub fn shake_offset(&self) -> Vec2 {
        match self.shake {
            Some(shake) => {
                let t = shake.elapsed.as_secs_f32() * 60.0;
                Vec2::new(t.sin(), (t * 1.3).cos()) * self.viewport * shake.intensity
            }
            None => Vec2::ZERO,
        }
    }

    /// Delivers `event` once, the next time this camera raises it.
    pub fn once(&mut self, event: EngineEvent) {
        self.subscriptions.push(event);
    }

    pub fn update(&mut self, elapsed: Duration, physics: &PhysicsWorld) {
        if let Some(center) = self.follow.and_then(|id| physics.body(id)).map(|b| b.center()) {
            self.scroll = center - self.viewport * 0.5;
        }
        self.clamp_scroll();

        if let Some(shake) = self.shake.as_mut() {
            shake.elapsed += elapsed;
            if shake.elapsed >= shake.duration {
                self.shake = None;
                self.raise(EngineEvent::CameraShakeComplete);
            }
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += elapsed;
            let progress = if fade.duration.is_zero() {
                1.0
            } else {
                fade.elapsed.as_secs_f32() / fade.duration.as_secs_f32()
            };
            self.fade_alpha = progress.min(1.0);
            if fade.elapsed >= fade.duration {
                debug!("Fade to {:?} complete", fade.color);
                self.fade = None;
                self.raise(EngineEvent::CameraFadeOutComplete);
            }
        }
    }

    fn raise(&mut self, event: EngineEvent) {
        if let Some(pos) = self.subscriptions.iter().position(|e| *e == event) {
            self.subscriptions.remove(pos);
            self.events.send(event).ok();
        }
    }

    fn clamp_scroll(&mut self) {
        if let Some(bounds) = self.bounds {
            let max = (bounds.max() - self.viewport).max(bounds.min);
            self.scroll = self.scroll.clamp(bounds.min, max);
        }
    }
}
