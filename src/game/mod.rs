//! Game-specific logic: the platformer level scene and its player.

pub mod config;
pub mod player;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use config::SceneConfig;
pub use player::{ArcadePlayer, Player};
pub use state::{GameState, LifeState, PlatformCollider};
pub use world::{app::App, scene::PlatformerScene};
