//! Spike hazards carved out of the ground layer.
//!
//! A spike only fills a sliver of its tile, so letting the tile itself collide
//! would kill a player hovering above it. Each spike tile is swapped for a
//! static body whose hitbox hugs the spike, picked from the tile's rotation.

use glam::Vec2;
use log::{debug, warn};

use crate::engine::physics::StaticGroup;
use crate::engine::tilemap::{Tile, TileLayer};

/// Spike orientations the level art uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardOrientation {
    /// 0°, spike on the floor of its tile.
    Upright,
    /// -90°, spike along the right edge.
    RotatedLeft,
    /// +90°, spike along the left edge.
    RotatedRight,
}

impl HazardOrientation {
    /// Maps a tile rotation in radians onto a known orientation. Angles are
    /// wrapped into [-180°, 180°) and rounded to whole degrees first.
    pub fn from_rotation(radians: f32) -> Option<Self> {
        let degrees = (radians.to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
        match degrees.round() as i32 {
            0 => Some(HazardOrientation::Upright),
            -90 => Some(HazardOrientation::RotatedLeft),
            90 => Some(HazardOrientation::RotatedRight),
            _ => None,
        }
    }

    /// Hitbox size and offset from the top-left of a 32px tile.
    pub fn hitbox(self) -> (Vec2, Vec2) {
        match self {
            HazardOrientation::Upright => (Vec2::new(32.0, 6.0), Vec2::new(0.0, 26.0)),
            HazardOrientation::RotatedLeft => (Vec2::new(6.0, 32.0), Vec2::new(26.0, 0.0)),
            HazardOrientation::RotatedRight => (Vec2::new(6.0, 32.0), Vec2::new(0.0, 0.0)),
        }
    }
}

/// Moves every spike tile of `layer` into `group`. Returns how many hazards
/// were created.
pub fn extract_hazards(layer: &mut TileLayer, group: &mut StaticGroup) -> usize {
    let spikes: Vec<Tile> = layer
        .tiles()
        .filter(|t| t.properties.is_spike)
        .copied()
        .collect();

    for tile in &spikes {
        let frame = Vec2::new(tile.width, tile.height);
        let entity = group.create(tile.center(), frame, tile.rotation);
        match HazardOrientation::from_rotation(tile.rotation) {
            Some(orientation) => {
                let (size, offset) = orientation.hitbox();
                group.set_hitbox(entity, size, offset);
            }
            None => warn!(
                "Spike at ({}, {}) has unsupported rotation {:.1}°, keeping full-tile hitbox",
                tile.x,
                tile.y,
                tile.rotation.to_degrees()
            ),
        }
        layer.remove_tile_at(tile.x, tile.y);
    }

    debug!("Extracted {} hazards from {}", spikes.len(), layer.name());
    spikes.len()
}
