//! Player implementation.

use std::time::Duration;

use glam::Vec2;
use log::debug;
use winit::keyboard::KeyCode;

use crate::engine::context::EngineContext;
use crate::engine::physics::{Body, BodyId};

/// What a level scene needs from the actor it spawns.
pub trait Player {
    fn spawn(ctx: &mut EngineContext, at: Vec2) -> Self
    where
        Self: Sized;

    fn update(&mut self, ctx: &mut EngineContext, elapsed: Duration);

    /// True while the player is moving upward after a jump.
    fn is_jumping(&self) -> bool;

    fn body(&self) -> BodyId;

    fn destroy(&mut self, ctx: &mut EngineContext);
}

const LEFT: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const JUMP: [KeyCode; 3] = [KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW];

/// Keyboard-driven player with run and jump.
pub struct ArcadePlayer {
    body: BodyId,
    pub run_speed: f32,
    pub jump_speed: f32,
    is_jumping: bool,
    destroyed: bool,
}

impl ArcadePlayer {
    pub const BODY_SIZE: Vec2 = Vec2::new(18.0, 24.0);

    pub fn set_run_speed(&mut self, speed: f32) {
        self.run_speed = speed;
    }

    pub fn set_jump_speed(&mut self, speed: f32) {
        self.jump_speed = speed;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Player for ArcadePlayer {
    fn spawn(ctx: &mut EngineContext, at: Vec2) -> Self {
        let body = ctx.physics.add_body(Body::new(at, Self::BODY_SIZE));
        debug!("Player spawned at {:?}", at);
        Self {
            body,
            run_speed: 300.0,
            jump_speed: 500.0,
            is_jumping: false,
            destroyed: false,
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, _elapsed: Duration) {
        let left = ctx.input.any_pressed(&LEFT);
        let right = ctx.input.any_pressed(&RIGHT);
        let jump = ctx.input.any_pressed(&JUMP);
        let Some(body) = ctx.physics.body_mut(self.body) else {
            return;
        };

        body.velocity.x = match (left, right) {
            (true, false) => -self.run_speed,
            (false, true) => self.run_speed,
            _ => 0.0,
        };
        if jump && body.blocked_down {
            body.velocity.y = -self.jump_speed;
        }
        self.is_jumping = body.velocity.y < 0.0;
    }

    fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    fn body(&self) -> BodyId {
        self.body
    }

    fn destroy(&mut self, ctx: &mut EngineContext) {
        if self.destroyed {
            return;
        }
        ctx.physics.remove_body(self.body);
        self.destroyed = true;
        debug!("Player destroyed");
    }
}
