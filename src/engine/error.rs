//! Errors raised while a scene sets itself up.

use thiserror::Error;

/// Fatal setup failures. A scene that hits one of these must not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The level data has no tile layer with this name.
    #[error("tile layer `{0}` not found in level data")]
    MissingLayer(String),

    /// The level data has no object layer with this name.
    #[error("object layer `{0}` not found in level data")]
    MissingObjectLayer(String),

    /// The object layer exists but holds no object with this name.
    #[error("object `{name}` not found in object layer `{layer}`")]
    MissingObject { layer: String, name: String },
}
