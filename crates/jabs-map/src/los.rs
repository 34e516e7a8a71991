//! Line-of-sight on the tile grid.
//!
//! Walks a Bresenham line between tile centers and fails on the first
//! impassable tile strictly between the endpoints. The endpoints themselves
//! are occupied by battlers and never block.

use jabs_core::types::TilePos;

use crate::grid::TileMap;

/// Tiles on the Bresenham line from `from` to `to`, both ends included.
pub fn line_tiles(from: TilePos, to: TilePos) -> Vec<TilePos> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut cur = from;
    let mut tiles = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        tiles.push(cur);
        if cur == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cur.x += sx;
        }
        if e2 <= dx {
            err += dx;
            cur.y += sy;
        }
    }
    tiles
}

/// Check line-of-sight between two tiles.
///
/// Returns true if no wall lies strictly between `from` and `to`.
/// Neighbouring tiles always see each other.
pub fn has_line_of_sight(map: &TileMap, from: &TilePos, to: &TilePos) -> bool {
    if from.chebyshev_to(to) <= 1 {
        return true;
    }

    let tiles = line_tiles(*from, *to);
    tiles[1..tiles.len() - 1]
        .iter()
        .all(|tile| map.is_passable(tile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_map() -> TileMap {
        TileMap::from_ascii(
            "
            .......
            ...#...
            ...#...
            ...#...
            .......
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_line_tiles_straight_and_diagonal() {
        let line = line_tiles(TilePos::new(0, 0), TilePos::new(3, 0));
        assert_eq!(
            line,
            vec![
                TilePos::new(0, 0),
                TilePos::new(1, 0),
                TilePos::new(2, 0),
                TilePos::new(3, 0)
            ]
        );

        let diag = line_tiles(TilePos::new(2, 2), TilePos::new(0, 0));
        assert_eq!(diag.len(), 3);
        assert_eq!(diag[1], TilePos::new(1, 1));
    }

    #[test]
    fn test_los_open_floor() {
        let map = TileMap::open(10, 10);
        assert!(has_line_of_sight(&map, &TilePos::new(0, 0), &TilePos::new(9, 6)));
    }

    #[test]
    fn test_los_blocked_by_wall() {
        let map = walled_map();
        assert!(!has_line_of_sight(&map, &TilePos::new(0, 2), &TilePos::new(6, 2)));
    }

    #[test]
    fn test_los_around_wall() {
        let map = walled_map();
        // Row 0 has no wall between the endpoints.
        assert!(has_line_of_sight(&map, &TilePos::new(0, 0), &TilePos::new(6, 0)));
    }

    #[test]
    fn test_los_adjacent_always_clear() {
        let map = walled_map();
        assert!(has_line_of_sight(&map, &TilePos::new(2, 2), &TilePos::new(3, 2)));
    }
}
