//! Hitbox placement on the tile grid.

use jabs_core::enums::HitboxShape;
use jabs_core::types::{Facing, TilePos};

use crate::grid::TileMap;

/// Tiles covered by a hitbox placed at `origin` facing `facing`.
pub fn hitbox_tiles(origin: TilePos, facing: Facing, shape: HitboxShape, map: &TileMap) -> Vec<TilePos> {
    let front = origin.step(facing);
    match shape {
        HitboxShape::Adjacent => vec![front],
        HitboxShape::Arc => {
            let side = facing.perpendicular();
            vec![front.offset(-side), front, front.offset(side)]
        }
        HitboxShape::Line { length } => {
            let mut tiles = Vec::with_capacity(length as usize);
            let mut tile = origin;
            for _ in 0..length {
                tile = tile.step(facing);
                if !map.is_passable(&tile) {
                    break;
                }
                tiles.push(tile);
            }
            tiles
        }
        HitboxShape::Burst { radius } => {
            let r = radius as i32;
            let mut tiles = Vec::new();
            for y in origin.y - r..=origin.y + r {
                for x in origin.x - r..=origin.x + r {
                    let tile = TilePos::new(x, y);
                    if tile != origin && map.in_bounds(&tile) {
                        tiles.push(tile);
                    }
                }
            }
            tiles
        }
    }
}

/// Whether a hitbox swung from `origin` while turned toward `target` would
/// contain the target's tile.
pub fn can_reach(origin: TilePos, target: TilePos, shape: HitboxShape, map: &TileMap) -> bool {
    let Some(facing) = origin.facing_toward(&target) else {
        return false;
    };
    hitbox_tiles(origin, facing, shape, map).contains(&target)
}
