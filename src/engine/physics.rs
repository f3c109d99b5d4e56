//! Arcade-style collision surface the scene talks to.
//!
//! Dynamic bodies are plain axis-aligned boxes integrated with gravity. A body
//! only collides with a tile layer while a collider pairing the two is
//! registered, which is what lets a scene switch platform collision on and off.
//! Static bodies live in [`StaticGroup`]s backed by a legion world and are only
//! ever queried for overlap.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;
use legion::{Entity, IntoQuery, World};
use log::debug;

use crate::engine::tilemap::{LayerId, Tilemap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left corner in world pixels.
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub allow_gravity: bool,
    /// Set by [`PhysicsWorld::step`] when the body landed on something.
    pub blocked_down: bool,
}

impl Body {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
            velocity: Vec2::ZERO,
            allow_gravity: true,
            blocked_down: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.position = center - self.size * 0.5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub body: BodyId,
    pub layer: LayerId,
}

pub struct PhysicsWorld {
    pub gravity: Vec2,
    bodies: BTreeMap<BodyId, Body>,
    colliders: BTreeMap<ColliderId, Collider>,
    next_body: u32,
    next_collider: u32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, 1000.0))
    }
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: BTreeMap::new(),
            colliders: BTreeMap::new(),
            next_body: 0,
            next_collider: 0,
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Removes a body along with every collider that references it.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.colliders.retain(|_, c| c.body != id);
        self.bodies.remove(&id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn add_collider(&mut self, body: BodyId, layer: LayerId) -> ColliderId {
        let id = ColliderId(self.next_collider);
        self.next_collider += 1;
        self.colliders.insert(id, Collider { body, layer });
        debug!("Collider {:?} added: {:?} <-> {:?}", id, body, layer);
        id
    }

    pub fn remove_collider(&mut self, id: ColliderId) -> bool {
        let removed = self.colliders.remove(&id).is_some();
        if removed {
            debug!("Collider {:?} removed", id);
        }
        removed
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn colliders_with(&self, layer: LayerId) -> usize {
        self.colliders.values().filter(|c| c.layer == layer).count()
    }

    pub fn has_collider(&self, id: ColliderId) -> bool {
        self.colliders.contains_key(&id)
    }

    /// Advances every body and resolves it against the solid tiles of each
    /// layer it currently has a collider with, one axis at a time.
    pub fn step(&mut self, elapsed: Duration, map: &Tilemap) {
        let dt = elapsed.as_secs_f32();
        for (id, body) in self.bodies.iter_mut() {
            let layers: Vec<LayerId> = self
                .colliders
                .values()
                .filter(|c| c.body == *id)
                .map(|c| c.layer)
                .collect();

            if body.allow_gravity {
                body.velocity += self.gravity * dt;
            }
            body.blocked_down = false;

            body.position.x += body.velocity.x * dt;
            for layer in &layers {
                for tile in map.layer(*layer).colliding_tiles_in(&body.bounds()) {
                    if !tile.intersects(&body.bounds()) {
                        continue;
                    }
                    if body.velocity.x > 0.0 {
                        body.position.x = tile.min.x - body.size.x;
                    } else if body.velocity.x < 0.0 {
                        body.position.x = tile.max().x;
                    }
                    body.velocity.x = 0.0;
                }
            }

            body.position.y += body.velocity.y * dt;
            for layer in &layers {
                for tile in map.layer(*layer).colliding_tiles_in(&body.bounds()) {
                    if !tile.intersects(&body.bounds()) {
                        continue;
                    }
                    if body.velocity.y > 0.0 {
                        body.position.y = tile.min.y - body.size.y;
                        body.blocked_down = true;
                    } else if body.velocity.y < 0.0 {
                        body.position.y = tile.max().y;
                    }
                    body.velocity.y = 0.0;
                }
            }
        }
    }

    /// Whether a dynamic body overlaps any member of a static group.
    pub fn overlap(&self, body: BodyId, group: &StaticGroup) -> bool {
        self.body(body)
            .map_or(false, |b| group.overlaps(&b.bounds()))
    }
}

/// A non-moving body owned by a [`StaticGroup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    /// Centre of the game object the body belongs to.
    pub center: Vec2,
    /// Size of the game object's frame; the body offset is measured from its
    /// top-left corner.
    pub frame: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    pub rotation: f32,
}

impl StaticBody {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.center - self.frame * 0.5 + self.offset, self.size)
    }
}

#[derive(Default)]
pub struct StaticGroup {
    world: World,
}

impl StaticGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a member whose body covers its whole frame.
    pub fn create(&mut self, center: Vec2, frame: Vec2, rotation: f32) -> Entity {
        self.world.push((StaticBody {
            center,
            frame,
            size: frame,
            offset: Vec2::ZERO,
            rotation,
        },))
    }

    pub fn set_hitbox(&mut self, entity: Entity, size: Vec2, offset: Vec2) -> bool {
        let Some(mut entry) = self.world.entry(entity) else {
            return false;
        };
        match entry.get_component_mut::<StaticBody>() {
            Ok(body) => {
                body.size = size;
                body.offset = offset;
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bodies(&self) -> Vec<StaticBody> {
        let mut query = <&StaticBody>::query();
        query.iter(&self.world).copied().collect()
    }

    pub fn overlaps(&self, area: &Aabb) -> bool {
        let mut query = <&StaticBody>::query();
        query.iter(&self.world).any(|b| b.bounds().intersects(area))
    }
}
