//! Per-scene gameplay state.

use crate::engine::physics::{BodyId, ColliderId, PhysicsWorld};
use crate::engine::tilemap::LayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// The player's collision pairing with the one-way platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformCollider {
    #[default]
    Detached,
    Attached(ColliderId),
}

impl PlatformCollider {
    /// Attached while grounded or falling, detached while jumping. Physics is
    /// only touched when the state actually changes.
    pub fn transition(
        self,
        jumping: bool,
        physics: &mut PhysicsWorld,
        body: BodyId,
        platform: LayerId,
    ) -> Self {
        match (self, jumping) {
            (PlatformCollider::Attached(id), true) => {
                physics.remove_collider(id);
                PlatformCollider::Detached
            }
            (PlatformCollider::Detached, false) => {
                PlatformCollider::Attached(physics.add_collider(body, platform))
            }
            (state, _) => state,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, PlatformCollider::Attached(_))
    }
}

#[derive(Debug, Default)]
pub struct GameState {
    life: LifeState,
    pub platform: PlatformCollider,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_player_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    /// Marks the player dead. Returns false if they already were.
    pub fn kill(&mut self) -> bool {
        if self.is_player_dead() {
            return false;
        }
        self.life = LifeState::Dead;
        true
    }
}
