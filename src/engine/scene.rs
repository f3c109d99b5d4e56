//! Scene lifecycle: a scene is a handler object the host drives once per
//! frame, and restarting it means building a fresh one.

use std::time::Duration;

use log::info;

use crate::engine::context::{EngineContext, EngineEvent};
use crate::engine::error::SetupError;

pub trait Scene {
    fn on_setup(&mut self, ctx: &mut EngineContext) -> Result<(), SetupError>;

    fn on_update(&mut self, ctx: &mut EngineContext, elapsed: Duration);

    fn on_event(&mut self, _ctx: &mut EngineContext, _event: EngineEvent) {}
}

pub struct SceneHost<S: Scene> {
    ctx: EngineContext,
    factory: Box<dyn FnMut() -> S>,
    scene: S,
    restarts: u32,
}

impl<S: Scene> SceneHost<S> {
    pub fn new(
        mut ctx: EngineContext,
        mut factory: impl FnMut() -> S + 'static,
    ) -> Result<Self, SetupError> {
        let mut scene = factory();
        scene.on_setup(&mut ctx)?;
        Ok(Self {
            ctx,
            factory: Box::new(factory),
            scene,
            restarts: 0,
        })
    }

    /// Runs one frame: physics, scene update, camera, then any engine events
    /// raised along the way. A restart requested during the frame happens
    /// before it returns.
    pub fn frame(&mut self, elapsed: Duration) -> Result<(), SetupError> {
        self.ctx.physics.step(elapsed, &self.ctx.tilemap);
        self.scene.on_update(&mut self.ctx, elapsed);
        self.ctx.camera.update(elapsed, &self.ctx.physics);
        self.dispatch_events();
        if self.ctx.scene.take_restart() {
            self.restart()?;
        }
        Ok(())
    }

    pub fn dispatch_events(&mut self) {
        for event in self.ctx.drain_events() {
            self.scene.on_event(&mut self.ctx, event);
        }
    }

    pub fn restart(&mut self) -> Result<(), SetupError> {
        self.ctx.reset();
        let mut scene = (self.factory)();
        scene.on_setup(&mut self.ctx)?;
        self.scene = scene;
        self.restarts += 1;
        info!("Scene restarted ({} so far)", self.restarts);
        Ok(())
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
