use std::cell::Cell;
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use platformer::engine::{
    Body, BodyId, EngineContext, LevelData, PointerState, SceneHost, SetupError, TileData,
};
use platformer::game::world::demo_level;
use platformer::game::{ArcadePlayer, LifeState, PlatformerScene, Player, SceneConfig};
use winit::keyboard::KeyCode;

const FRAME: Duration = Duration::from_millis(16);

thread_local! {
    static UPDATES: Cell<u32> = Cell::new(0);
    static DESTROYED: Cell<u32> = Cell::new(0);
}

/// Player whose position and jump flag are set directly by the test.
struct ScriptedPlayer {
    body: BodyId,
    jumping: bool,
}

impl Player for ScriptedPlayer {
    fn spawn(ctx: &mut EngineContext, at: Vec2) -> Self {
        let mut body = Body::new(at, Vec2::splat(16.0));
        body.allow_gravity = false;
        Self {
            body: ctx.physics.add_body(body),
            jumping: false,
        }
    }

    fn update(&mut self, _ctx: &mut EngineContext, _elapsed: Duration) {
        UPDATES.with(|u| u.set(u.get() + 1));
    }

    fn is_jumping(&self) -> bool {
        self.jumping
    }

    fn body(&self) -> BodyId {
        self.body
    }

    fn destroy(&mut self, ctx: &mut EngineContext) {
        ctx.physics.remove_body(self.body);
        DESTROYED.with(|d| d.set(d.get() + 1));
    }
}

type Host = SceneHost<PlatformerScene<ScriptedPlayer>>;

/// 10x6 tiles: floor on the last row, three spikes on the row above it and a
/// one-way platform in the middle.
fn test_level() -> LevelData {
    let mut level = LevelData::new(10, 6, 32, 32);
    for name in ["Background", "Ground", "Foreground", "Platform"] {
        level.add_layer(name);
    }
    for x in 0..10 {
        level.set_tile("Ground", x, 5, TileData::solid(1));
        level.set_tile("Background", x, 0, TileData::new(20));
    }
    level.set_tile("Ground", 2, 4, TileData::spike(77, 0.0));
    level.set_tile("Ground", 5, 4, TileData::spike(77, -FRAC_PI_2));
    level.set_tile("Ground", 7, 4, TileData::spike(77, FRAC_PI_2));
    for x in 3..7 {
        level.set_tile("Platform", x, 2, TileData::solid(3));
    }
    level.add_object("Objects", "Spawn Point", 48.0, 48.0);
    level
}

fn host_with(level: LevelData, config: SceneConfig) -> Result<Host, SetupError> {
    let ctx = EngineContext::new(Arc::new(level), Vec2::new(320.0, 192.0));
    SceneHost::new(ctx, move || PlatformerScene::with_config(config.clone()))
}

fn host() -> Host {
    host_with(test_level(), SceneConfig::default()).unwrap()
}

fn move_player(host: &mut Host, center: Vec2) {
    let body = host.scene().player().unwrap().body();
    host.context_mut()
        .physics
        .body_mut(body)
        .unwrap()
        .set_center(center);
}

fn set_jumping(host: &mut Host, jumping: bool) {
    host.scene_mut().player_mut().unwrap().jumping = jumping;
}

fn platform_colliders(host: &Host) -> usize {
    let platform = host.scene().platform_layer().unwrap();
    host.context().physics.colliders_with(platform)
}

#[test]
fn setup_builds_layers_spikes_and_camera() {
    let host = host();
    let scene = host.scene();
    let ctx = host.context();

    let [background, ground, foreground, platform] = scene.layers().unwrap();
    let map = &ctx.tilemap;
    assert_eq!(map.layer(background).name(), "Background");
    assert_eq!(map.layer(foreground).depth(), 10);
    assert_eq!(map.draw_order(), vec![background, ground, platform, foreground]);

    assert_eq!(scene.hazard_count(), 3);
    let ground_layer = map.layer(ground);
    assert!(ground_layer.tiles().all(|t| !t.properties.is_spike));
    for x in [2, 5, 7] {
        assert!(ground_layer.tile_at(x, 4).is_none());
    }
    assert_eq!(ground_layer.tiles().count(), 10);
    assert!(ground_layer.is_solid_at(0, 5));
    assert!(ctx.tilemap.layer(platform).is_solid_at(4, 2));

    // only the permanent ground collider until the first frame runs
    assert_eq!(ctx.physics.collider_count(), 1);
    assert!(ctx.physics.has_collider(scene.ground_collider().unwrap()));

    let body = scene.player().unwrap().body();
    assert_eq!(ctx.camera.following(), Some(body));
    let bounds = ctx.camera.bounds().unwrap();
    assert_eq!(bounds.min, Vec2::ZERO);
    assert_eq!(bounds.size, Vec2::new(320.0, 192.0));
    assert_eq!(scene.state().life(), LifeState::Alive);
}

#[test]
fn spike_hitboxes_follow_rotation() {
    let host = host();
    let mut bodies = host.scene().hazards().unwrap().bodies();
    bodies.sort_by(|a, b| a.center.x.total_cmp(&b.center.x));

    let shapes: Vec<(Vec2, Vec2)> = bodies.iter().map(|b| (b.size, b.offset)).collect();
    assert_eq!(
        shapes,
        vec![
            (Vec2::new(32.0, 6.0), Vec2::new(0.0, 26.0)),
            (Vec2::new(6.0, 32.0), Vec2::new(26.0, 0.0)),
            (Vec2::new(6.0, 32.0), Vec2::new(0.0, 0.0)),
        ]
    );
    assert_eq!(bodies[0].center, Vec2::new(80.0, 144.0));
}

#[test]
fn missing_spawn_point_aborts_setup() {
    let mut level = test_level();
    level.object_layers.clear();
    assert_eq!(
        host_with(level, SceneConfig::default()).err(),
        Some(SetupError::MissingObjectLayer("Objects".into()))
    );

    let mut level = test_level();
    level.object_layers[0].objects[0].name = "Exit".into();
    assert_eq!(
        host_with(level, SceneConfig::default()).err(),
        Some(SetupError::MissingObject {
            layer: "Objects".into(),
            name: "Spawn Point".into()
        })
    );
}

#[test]
fn missing_layer_aborts_setup() {
    let mut level = test_level();
    level.layers.retain(|l| l.name != "Platform");
    assert_eq!(
        host_with(level, SceneConfig::default()).err(),
        Some(SetupError::MissingLayer("Platform".into()))
    );
}

#[test]
fn platform_collider_is_present_iff_not_jumping() {
    let mut host = host();
    let sequence = [false, false, true, true, false, true, false, false, true, false];

    for jumping in sequence {
        set_jumping(&mut host, jumping);
        host.frame(FRAME).unwrap();

        let attached = host.scene().platform_collider().is_attached();
        assert_eq!(attached, !jumping);
        assert_eq!(platform_colliders(&host), usize::from(!jumping));
        assert_eq!(host.context().physics.collider_count(), 1 + usize::from(!jumping));
    }
}

#[test]
fn platform_collider_is_not_recreated_while_grounded() {
    let mut host = host();
    host.frame(FRAME).unwrap();
    let first = host.scene().platform_collider();
    for _ in 0..5 {
        host.frame(FRAME).unwrap();
    }
    assert_eq!(host.scene().platform_collider(), first);
}

#[test]
fn pointer_paints_solid_ground_tile() {
    let mut host = host();
    host.context_mut().input.set_pointer(PointerState {
        position: Vec2::new(100.0, 40.0),
        is_down: true,
    });
    host.frame(FRAME).unwrap();

    let ground = host.scene().ground_layer().unwrap();
    let layer = host.context().tilemap.layer(ground);
    let tile = layer.tile_at(3, 1).unwrap();
    assert_eq!(tile.index, 6);
    assert!(tile.collides);

    host.context_mut().input.set_pointer(PointerState {
        position: Vec2::new(200.0, 40.0),
        is_down: false,
    });
    host.frame(FRAME).unwrap();
    let layer = host.context().tilemap.layer(ground);
    assert!(layer.tile_at(6, 1).is_none());
}

#[test]
fn painted_tile_is_solid_by_the_end_of_the_frame() {
    let mut host = host();
    host.context_mut().input.set_pointer(PointerState {
        position: Vec2::new(80.0, 112.0),
        is_down: true,
    });
    host.frame(FRAME).unwrap();
    let ground = host.scene().ground_layer().unwrap();
    assert!(host.context().tilemap.layer(ground).is_solid_at(2, 3));
    assert!(!host.scene().is_player_dead());
}

#[test]
fn falling_below_the_level_kills_and_restarts_once() {
    let mut config = SceneConfig::default();
    config.set_death_fade(Duration::ZERO, [0, 0, 0]);
    let mut host = host_with(test_level(), config).unwrap();
    let destroyed_before = DESTROYED.with(Cell::get);

    move_player(&mut host, Vec2::new(48.0, 250.0));
    host.frame(FRAME).unwrap();

    assert_eq!(DESTROYED.with(Cell::get), destroyed_before + 1);
    assert_eq!(host.restarts(), 1);

    // the fresh instance is alive and unaffected by the previous death
    assert!(!host.scene().is_player_dead());
    assert!(!host.scene().is_player_destroyed());
    assert_eq!(host.scene().hazard_count(), 3);
    for _ in 0..10 {
        host.frame(FRAME).unwrap();
    }
    assert_eq!(host.restarts(), 1);
    assert_eq!(DESTROYED.with(Cell::get), destroyed_before + 1);
}

#[test]
fn death_starts_shake_and_fade_then_restarts_after_fade() {
    let mut host = host();
    move_player(&mut host, Vec2::new(80.0, 150.0));
    host.frame(FRAME).unwrap();

    assert!(host.scene().is_player_dead());
    assert!(host.context().camera.is_fading());
    assert!(host.context().camera.is_shaking());
    assert_eq!(host.restarts(), 0);

    let mut frames = 1;
    while host.restarts() == 0 && frames < 40 {
        host.frame(FRAME).unwrap();
        frames += 1;
    }
    assert_eq!(host.restarts(), 1);
    // 250ms fade at 16ms per frame
    assert_eq!(frames, 16);
}

#[test]
fn dead_scene_skips_all_gameplay() {
    let mut host = host();
    host.frame(FRAME).unwrap();
    move_player(&mut host, Vec2::new(80.0, 150.0));
    host.frame(FRAME).unwrap();
    assert!(host.scene().is_player_dead());

    let updates = UPDATES.with(Cell::get);
    let colliders = host.context().physics.collider_count();
    let platform = host.scene().platform_collider();

    set_jumping(&mut host, true);
    host.context_mut().input.set_pointer(PointerState {
        position: Vec2::new(100.0, 40.0),
        is_down: true,
    });
    host.frame(FRAME).unwrap();
    host.frame(FRAME).unwrap();

    assert_eq!(UPDATES.with(Cell::get), updates);
    assert_eq!(host.context().physics.collider_count(), colliders);
    assert_eq!(host.scene().platform_collider(), platform);
    let ground = host.scene().ground_layer().unwrap();
    assert!(host.context().tilemap.layer(ground).tile_at(3, 1).is_none());
    assert_eq!(host.restarts(), 0);
}

#[test]
fn both_death_conditions_in_one_frame_die_once() {
    let mut level = test_level();
    level.set_tile("Ground", 8, 5, TileData::spike(77, 0.0));
    let mut host = host_with(level, SceneConfig::default()).unwrap();
    let destroyed_before = DESTROYED.with(Cell::get);

    // below the level and inside the bottom-row spike's hitbox
    move_player(&mut host, Vec2::new(272.0, 193.0));
    host.frame(FRAME).unwrap();
    assert!(host.scene().is_player_dead());

    for _ in 0..40 {
        host.frame(FRAME).unwrap();
    }
    assert_eq!(host.restarts(), 1);
    assert_eq!(DESTROYED.with(Cell::get), destroyed_before + 1);
}

#[test]
fn restart_discards_level_edits() {
    let mut config = SceneConfig::default();
    config.set_death_fade(Duration::ZERO, [0, 0, 0]);
    let mut host = host_with(test_level(), config).unwrap();

    host.context_mut().input.set_pointer(PointerState {
        position: Vec2::new(100.0, 40.0),
        is_down: true,
    });
    host.frame(FRAME).unwrap();
    host.context_mut().input.set_pointer(PointerState::default());

    move_player(&mut host, Vec2::new(48.0, 400.0));
    host.frame(FRAME).unwrap();
    assert_eq!(host.restarts(), 1);

    let ground = host.scene().ground_layer().unwrap();
    assert!(host.context().tilemap.layer(ground).tile_at(3, 1).is_none());
    assert_eq!(host.context().physics.body_count(), 1);
    assert_eq!(host.context().physics.collider_count(), 1);
    let spawn = host.scene().player().unwrap().body();
    assert_eq!(
        host.context().physics.body(spawn).unwrap().center(),
        Vec2::new(48.0, 48.0)
    );
}

#[test]
fn arcade_player_runs_into_the_pit_and_respawns() {
    let ctx = EngineContext::new(Arc::new(demo_level()), Vec2::new(640.0, 384.0));
    let mut host = SceneHost::new(ctx, PlatformerScene::<ArcadePlayer>::new).unwrap();

    for _ in 0..60 {
        host.frame(FRAME).unwrap();
    }
    assert!(!host.scene().is_player_dead());
    assert!(host.scene().platform_collider().is_attached());
    let body = host.scene().player().unwrap().body();
    assert!(host.context().physics.body(body).unwrap().blocked_down);

    host.context_mut()
        .input
        .handle_keyboard_input_event(KeyCode::ArrowRight, true);
    for _ in 0..300 {
        host.frame(FRAME).unwrap();
        if host.restarts() > 0 {
            break;
        }
    }
    assert_eq!(host.restarts(), 1);
}
