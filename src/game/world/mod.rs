pub mod app;
pub mod hazard;
pub mod level;
pub mod scene;

pub use app::App;
pub use hazard::{extract_hazards, HazardOrientation};
pub use level::demo_level;
pub use scene::PlatformerScene;
