//! Level data and the live tile layers instantiated from it.
//!
//! [`LevelData`] is what a level loader hands over: tile grids per named layer,
//! per-tile authored properties and named point objects. A [`Tilemap`] turns
//! named layers of that data into [`TileLayer`]s the scene can edit at runtime
//! without touching the shared source.

use std::sync::Arc;

use glam::Vec2;
use log::debug;

use crate::engine::error::SetupError;
use crate::engine::physics::Aabb;

/// Properties authored on a tile in the level editor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileProperties {
    pub collides: bool,
    pub is_spike: bool,
}

/// One authored cell of a tile layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileData {
    pub index: u32,
    pub properties: TileProperties,
    /// Rotation in radians, as written by the level editor.
    pub rotation: f32,
}

impl TileData {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            properties: TileProperties::default(),
            rotation: 0.0,
        }
    }

    pub fn solid(index: u32) -> Self {
        let mut tile = Self::new(index);
        tile.properties.collides = true;
        tile
    }

    pub fn spike(index: u32, rotation: f32) -> Self {
        let mut tile = Self::solid(index);
        tile.properties.is_spike = true;
        tile.rotation = rotation;
        tile
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    pub name: String,
    /// Row-major, `width * height` cells.
    pub tiles: Vec<Option<TileData>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLayerData {
    pub name: String,
    pub objects: Vec<MapObject>,
}

/// Read-only level description, shared between scene instances.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: Vec<LayerData>,
    pub object_layers: Vec<ObjectLayerData>,
}

impl LevelData {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            layers: Vec::new(),
            object_layers: Vec::new(),
        }
    }

    /// Adds an empty tile layer and returns its cells for authoring.
    pub fn add_layer(&mut self, name: &str) -> &mut Vec<Option<TileData>> {
        let cells = (self.width * self.height) as usize;
        self.layers.push(LayerData {
            name: name.to_string(),
            tiles: vec![None; cells],
        });
        let last = self.layers.len() - 1;
        &mut self.layers[last].tiles
    }

    pub fn set_tile(&mut self, layer: &str, x: u32, y: u32, tile: TileData) {
        if x >= self.width || y >= self.height {
            return;
        }
        let width = self.width;
        if let Some(data) = self.layers.iter_mut().find(|l| l.name == layer) {
            data.tiles[(y * width + x) as usize] = Some(tile);
        }
    }

    pub fn add_object(&mut self, layer: &str, name: &str, x: f32, y: f32) {
        let object = MapObject {
            name: name.to_string(),
            x,
            y,
        };
        match self.object_layers.iter_mut().find(|l| l.name == layer) {
            Some(objects) => objects.objects.push(object),
            None => self.object_layers.push(ObjectLayerData {
                name: layer.to_string(),
                objects: vec![object],
            }),
        }
    }

    pub fn width_in_pixels(&self) -> f32 {
        (self.width * self.tile_width) as f32
    }

    pub fn height_in_pixels(&self) -> f32 {
        (self.height * self.tile_height) as f32
    }
}

/// A live tile in a [`TileLayer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub index: u32,
    /// Column and row in the layer.
    pub x: u32,
    pub y: u32,
    pub width: f32,
    pub height: f32,
    pub properties: TileProperties,
    pub rotation: f32,
    /// Whether physics treats this tile as solid.
    pub collides: bool,
}

impl Tile {
    pub fn pixel_x(&self) -> f32 {
        self.x as f32 * self.width
    }

    pub fn pixel_y(&self) -> f32 {
        self.y as f32 * self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.pixel_x() + self.width * 0.5,
            self.pixel_y() + self.height * 0.5,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pixel_x(), self.pixel_y()),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Index of a layer inside its [`Tilemap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub usize);

pub struct TileLayer {
    name: String,
    width: u32,
    height: u32,
    tile_width: f32,
    tile_height: f32,
    depth: i32,
    tiles: Vec<Option<Tile>>,
}

impl TileLayer {
    fn from_data(level: &LevelData, data: &LayerData, depth: i32) -> Self {
        let tile_width = level.tile_width as f32;
        let tile_height = level.tile_height as f32;
        let tiles = data
            .tiles
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.map(|t| Tile {
                    index: t.index,
                    x: i as u32 % level.width,
                    y: i as u32 / level.width,
                    width: tile_width,
                    height: tile_height,
                    properties: t.properties,
                    rotation: t.rotation,
                    collides: false,
                })
            })
            .collect();
        Self {
            name: data.name.clone(),
            width: level.width,
            height: level.height,
            tile_width,
            tile_height,
            depth,
            tiles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_in_pixels(&self) -> f32 {
        self.width as f32 * self.tile_width
    }

    pub fn height_in_pixels(&self) -> f32 {
        self.height as f32 * self.tile_height
    }

    fn cell(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        self.cell(x, y).and_then(|i| self.tiles[i].as_ref())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Marks every tile whose authored `collides` property is set as solid.
    pub fn set_collision_by_property(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.collides = tile.properties.collides;
        }
    }

    pub fn remove_tile_at(&mut self, x: u32, y: u32) -> Option<Tile> {
        let i = self.cell(x, y)?;
        self.tiles[i].take()
    }

    /// Places a fresh tile at a cell, replacing whatever was there.
    pub fn put_tile_at(&mut self, index: u32, x: u32, y: u32) -> Option<&mut Tile> {
        let i = self.cell(x, y)?;
        self.tiles[i] = Some(Tile {
            index,
            x,
            y,
            width: self.tile_width,
            height: self.tile_height,
            properties: TileProperties::default(),
            rotation: 0.0,
            collides: false,
        });
        self.tiles[i].as_mut()
    }

    pub fn put_tile_at_world_xy(&mut self, index: u32, world: Vec2) -> Option<&mut Tile> {
        let (x, y) = self.world_to_tile_xy(world)?;
        self.put_tile_at(index, x, y)
    }

    pub fn world_to_tile_xy(&self, world: Vec2) -> Option<(u32, u32)> {
        if world.x < 0.0 || world.y < 0.0 {
            return None;
        }
        let x = (world.x / self.tile_width).floor() as u32;
        let y = (world.y / self.tile_height).floor() as u32;
        self.cell(x, y).map(|_| (x, y))
    }

    pub fn is_solid_at(&self, x: u32, y: u32) -> bool {
        self.tile_at(x, y).map_or(false, |t| t.collides)
    }

    /// Solid tiles whose bounds intersect `area`.
    pub fn colliding_tiles_in(&self, area: &Aabb) -> Vec<Aabb> {
        let max = area.max();
        if max.x <= 0.0 || max.y <= 0.0 {
            return Vec::new();
        }
        let x0 = (area.min.x.max(0.0) / self.tile_width).floor() as u32;
        let y0 = (area.min.y.max(0.0) / self.tile_height).floor() as u32;
        let x1 = ((max.x / self.tile_width).ceil() as u32).min(self.width);
        let y1 = ((max.y / self.tile_height).ceil() as u32).min(self.height);
        let mut hits = Vec::new();
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(tile) = self.tile_at(x, y).filter(|t| t.collides) {
                    let bounds = tile.bounds();
                    if bounds.intersects(area) {
                        hits.push(bounds);
                    }
                }
            }
        }
        hits
    }
}

/// Runtime map: the layers a scene has instantiated from shared level data.
pub struct Tilemap {
    level: Arc<LevelData>,
    layers: Vec<TileLayer>,
}

impl Tilemap {
    pub fn new(level: Arc<LevelData>) -> Self {
        Self {
            level,
            layers: Vec::new(),
        }
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    /// Instantiates a named layer. Layers draw in creation order unless
    /// their depth is changed.
    pub fn create_layer(&mut self, name: &str) -> Result<LayerId, SetupError> {
        let data = self
            .level
            .layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| SetupError::MissingLayer(name.to_string()))?;
        let id = LayerId(self.layers.len());
        self.layers
            .push(TileLayer::from_data(&self.level, data, id.0 as i32));
        debug!("Created layer {} ({:?})", name, id);
        Ok(id)
    }

    pub fn layer(&self, id: LayerId) -> &TileLayer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut TileLayer {
        &mut self.layers[id.0]
    }

    pub fn layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter()
    }

    /// Layer ids sorted back to front.
    pub fn draw_order(&self) -> Vec<LayerId> {
        let mut ids: Vec<LayerId> = (0..self.layers.len()).map(LayerId).collect();
        ids.sort_by_key(|id| self.layers[id.0].depth);
        ids
    }

    pub fn find_object(&self, layer: &str, name: &str) -> Result<Vec2, SetupError> {
        let objects = self
            .level
            .object_layers
            .iter()
            .find(|l| l.name == layer)
            .ok_or_else(|| SetupError::MissingObjectLayer(layer.to_string()))?;
        objects
            .objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| Vec2::new(o.x, o.y))
            .ok_or_else(|| SetupError::MissingObject {
                layer: layer.to_string(),
                name: name.to_string(),
            })
    }

    pub fn width_in_pixels(&self) -> f32 {
        self.level.width_in_pixels()
    }

    pub fn height_in_pixels(&self) -> f32 {
        self.level.height_in_pixels()
    }
}
