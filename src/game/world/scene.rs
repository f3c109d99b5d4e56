//! The platformer level: tile layers, a player, spikes and one-way platforms.

use std::time::Duration;

use log::{debug, info};

use crate::engine::context::{EngineContext, EngineEvent};
use crate::engine::error::SetupError;
use crate::engine::physics::{ColliderId, StaticGroup};
use crate::engine::scene::Scene;
use crate::engine::tilemap::LayerId;
use crate::game::config::SceneConfig;
use crate::game::player::Player;
use crate::game::state::{GameState, PlatformCollider};
use crate::game::world::hazard::extract_hazards;

/// Everything setup creates. Only exists once `on_setup` succeeded.
struct Level<P> {
    background: LayerId,
    ground: LayerId,
    foreground: LayerId,
    platform: LayerId,
    player: P,
    ground_collider: ColliderId,
    spikes: StaticGroup,
    player_destroyed: bool,
}

pub struct PlatformerScene<P: Player> {
    config: SceneConfig,
    state: GameState,
    level: Option<Level<P>>,
}

impl<P: Player> Default for PlatformerScene<P> {
    fn default() -> Self {
        Self::with_config(SceneConfig::default())
    }
}

impl<P: Player> PlatformerScene<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            state: GameState::new(),
            level: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_player_dead(&self) -> bool {
        self.state.is_player_dead()
    }

    pub fn platform_collider(&self) -> PlatformCollider {
        self.state.platform
    }

    pub fn player(&self) -> Option<&P> {
        self.level.as_ref().map(|l| &l.player)
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.level.as_mut().map(|l| &mut l.player)
    }

    pub fn is_player_destroyed(&self) -> bool {
        self.level.as_ref().map_or(false, |l| l.player_destroyed)
    }

    pub fn hazard_count(&self) -> usize {
        self.level.as_ref().map_or(0, |l| l.spikes.len())
    }

    pub fn hazards(&self) -> Option<&StaticGroup> {
        self.level.as_ref().map(|l| &l.spikes)
    }

    pub fn ground_layer(&self) -> Option<LayerId> {
        self.level.as_ref().map(|l| l.ground)
    }

    pub fn platform_layer(&self) -> Option<LayerId> {
        self.level.as_ref().map(|l| l.platform)
    }

    /// Layers in the order they were created.
    pub fn layers(&self) -> Option<[LayerId; 4]> {
        self.level
            .as_ref()
            .map(|l| [l.background, l.ground, l.foreground, l.platform])
    }

    pub fn ground_collider(&self) -> Option<ColliderId> {
        self.level.as_ref().map(|l| l.ground_collider)
    }

    /// Paints a solid tile under the pointer while it is held down.
    fn paint_tile(&self, ctx: &mut EngineContext, ground: LayerId) {
        let pointer = ctx.input.pointer();
        if !pointer.is_down {
            return;
        }
        let world = ctx.camera.screen_to_world(pointer.position);
        if let Some(tile) = ctx
            .tilemap
            .layer_mut(ground)
            .put_tile_at_world_xy(self.config.painted_tile, world)
        {
            tile.collides = true;
            debug!("Painted tile at ({}, {})", tile.x, tile.y);
        }
    }

    fn kill_player(&mut self, ctx: &mut EngineContext) {
        if !self.state.kill() {
            return;
        }
        info!("Player died");
        ctx.camera.shake(
            self.config.death_shake_duration,
            self.config.death_shake_intensity,
        );
        ctx.camera
            .fade(self.config.death_fade_duration, self.config.death_fade_color);
        ctx.camera.once(EngineEvent::CameraFadeOutComplete);
    }
}

impl<P: Player> Scene for PlatformerScene<P> {
    fn on_setup(&mut self, ctx: &mut EngineContext) -> Result<(), SetupError> {
        self.state = GameState::new();

        let map = &mut ctx.tilemap;
        let background = map.create_layer(&self.config.background_layer)?;
        let ground = map.create_layer(&self.config.ground_layer)?;
        let foreground = map.create_layer(&self.config.foreground_layer)?;
        let platform = map.create_layer(&self.config.platform_layer)?;
        map.layer_mut(foreground)
            .set_depth(self.config.foreground_depth);

        let spawn = map.find_object(&self.config.object_layer, &self.config.spawn_object)?;
        let player = P::spawn(ctx, spawn);

        ctx.tilemap.layer_mut(ground).set_collision_by_property();
        ctx.tilemap.layer_mut(platform).set_collision_by_property();
        let ground_collider = ctx.physics.add_collider(player.body(), ground);

        let mut spikes = StaticGroup::new();
        extract_hazards(ctx.tilemap.layer_mut(ground), &mut spikes);

        ctx.camera.start_follow(player.body());
        ctx.camera.set_bounds(
            0.0,
            0.0,
            ctx.tilemap.width_in_pixels(),
            ctx.tilemap.height_in_pixels(),
        );

        info!(
            "Level ready: spawn at {:?}, {} spikes, {}x{} px",
            spawn,
            spikes.len(),
            ctx.tilemap.width_in_pixels(),
            ctx.tilemap.height_in_pixels()
        );

        self.level = Some(Level {
            background,
            ground,
            foreground,
            platform,
            player,
            ground_collider,
            spikes,
            player_destroyed: false,
        });
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut EngineContext, elapsed: Duration) {
        if self.state.is_player_dead() {
            return;
        }
        let Some(level) = self.level.as_mut() else {
            return;
        };

        level.player.update(ctx, elapsed);

        let jumping = level.player.is_jumping();
        self.state.platform = self.state.platform.transition(
            jumping,
            &mut ctx.physics,
            level.player.body(),
            level.platform,
        );

        let ground = level.ground;
        let body = level.player.body();
        self.paint_tile(ctx, ground);

        let Some(level) = self.level.as_ref() else {
            return;
        };
        let fell = ctx
            .physics
            .body(body)
            .map_or(false, |b| b.center().y > ctx.tilemap.layer(ground).height_in_pixels());
        let spiked = ctx.physics.overlap(body, &level.spikes);
        if fell || spiked {
            debug!("Death: fell={} spiked={}", fell, spiked);
            self.kill_player(ctx);
        }
    }

    fn on_event(&mut self, ctx: &mut EngineContext, event: EngineEvent) {
        if event != EngineEvent::CameraFadeOutComplete || !self.state.is_player_dead() {
            return;
        }
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.player_destroyed {
            return;
        }
        level.player.destroy(ctx);
        level.player_destroyed = true;
        ctx.scene.request_restart();
    }
}
