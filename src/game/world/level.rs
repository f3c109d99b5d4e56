//! Built-in level so the binary runs without external map files.

use std::f32::consts::FRAC_PI_2;

use crate::engine::tilemap::{LevelData, TileData};

const TILE: u32 = 32;

// `#` ground, `=` platform, `^` floor spike, `>` spike against a wall to its
// right (rotated -90°), `<` spike against a wall to its left (rotated +90°),
// `~` foreground decoration, `S` spawn point.
const ROWS: [&str; 12] = [
    "####################",
    "#..................#",
    "#..................#",
    "#..S...............#",
    "#.........====.....#",
    "#..................#",
    "#....===.......#...#",
    "#.............>#...#",
    "#..~~..........#<..#",
    "#..........^^^.....#",
    "#######...##########",
    "#######...##########",
];

pub fn demo_level() -> LevelData {
    let width = ROWS[0].len() as u32;
    let height = ROWS.len() as u32;
    let mut level = LevelData::new(width, height, TILE, TILE);
    for name in ["Background", "Ground", "Foreground", "Platform"] {
        level.add_layer(name);
    }

    for (y, row) in ROWS.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            let (x, y) = (x as u32, y as u32);
            level.set_tile("Background", x, y, TileData::new(20));
            match cell {
                '#' => level.set_tile("Ground", x, y, TileData::solid(1)),
                '=' => level.set_tile("Platform", x, y, TileData::solid(3)),
                '^' => level.set_tile("Ground", x, y, TileData::spike(77, 0.0)),
                '>' => level.set_tile("Ground", x, y, TileData::spike(77, -FRAC_PI_2)),
                '<' => level.set_tile("Ground", x, y, TileData::spike(77, FRAC_PI_2)),
                '~' => level.set_tile("Foreground", x, y, TileData::new(40)),
                'S' => level.add_object(
                    "Objects",
                    "Spawn Point",
                    ((x * TILE) + TILE / 2) as f32,
                    ((y * TILE) + TILE / 2) as f32,
                ),
                _ => {}
            }
        }
    }
    level
}
