pub mod player;

pub use player::{ArcadePlayer, Player};
