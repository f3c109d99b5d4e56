//! Input handling module
//! This module tracks keyboard and pointer state fed in from window events.

pub mod handler;

pub use handler::{InputHandler, PointerState};
