//! Library entry point for the platformer level scene.

pub mod engine;
pub mod game;

// Re-export main types for convenience
pub use game::App;
