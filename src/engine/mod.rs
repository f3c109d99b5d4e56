//! Engine module containing the tilemap, physics, camera, input and scene
//! services a level scene is configured against.

pub mod camera;
pub mod context;
pub mod error;
pub mod input;
pub mod physics;
pub mod scene;
pub mod tilemap;

// Re-export commonly used types
pub use camera::Camera2d;
pub use context::{EngineContext, EngineEvent, SceneControl};
pub use error::SetupError;
pub use input::{InputHandler, PointerState};
pub use physics::{Aabb, Body, BodyId, ColliderId, PhysicsWorld, StaticBody, StaticGroup};
pub use scene::{Scene, SceneHost};
pub use tilemap::{LayerId, LevelData, Tile, TileData, TileLayer, Tilemap};
