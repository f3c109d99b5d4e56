//! Application entry point.

use std::sync::Arc;

use log::{error, info};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Logger initialized");

    let level = Arc::new(platformer::game::world::demo_level());
    let mut app = platformer::App::new(level).map_err(|e| {
        error!("Failed to set up level: {}", e);
        e
    })?;

    let event_loop = EventLoop::new().map_err(|e| {
        error!("Failed to create event loop: {:?}", e);
        e
    })?;
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Application error: {:?}", e);
        return Err(Box::new(e));
    }

    Ok(())
}
