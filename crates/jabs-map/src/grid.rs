//! TileMap: passability grid with bounds queries.

use serde::{Deserialize, Serialize};

use jabs_core::error::DataError;
use jabs_core::types::TilePos;

/// Character for an impassable tile in ASCII maps.
const WALL: char = '#';
/// Character for a walkable tile in ASCII maps.
const FLOOR: char = '.';

/// Loaded tile map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    /// Row-major passability, `true` = walkable.
    passable: Vec<bool>,
}

impl TileMap {
    /// An open map with no walls.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            passable: vec![true; (width * height) as usize],
        }
    }

    /// Parse an ASCII map: `#` is a wall, `.` is floor, one line per row.
    /// Blank leading/trailing lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, DataError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let width = rows
            .first()
            .map(|r| r.chars().count())
            .ok_or_else(|| DataError::InvalidMap("map has no rows".into()))?;

        let mut passable = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(DataError::InvalidMap(format!(
                    "row {y} has {} tiles, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    FLOOR => passable.push(true),
                    WALL => passable.push(false),
                    other => {
                        return Err(DataError::InvalidMap(format!(
                            "unknown tile '{other}' at ({x}, {y})"
                        )))
                    }
                }
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            passable,
        })
    }

    /// Parse a JSON-serialized map, checking the grid size.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let map: TileMap = serde_json::from_str(json)?;
        if map.passable.len() != (map.width * map.height) as usize {
            return Err(DataError::InvalidMap(format!(
                "expected {} tiles for {}x{}, found {}",
                map.width * map.height,
                map.width,
                map.height,
                map.passable.len()
            )));
        }
        Ok(map)
    }

    pub fn in_bounds(&self, pos: &TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: &TilePos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Walkable and inside the map. Tiles outside the map are never passable.
    pub fn is_passable(&self, pos: &TilePos) -> bool {
        self.index(pos).is_some_and(|i| self.passable[i])
    }

    /// Change a tile (doors, destructible walls, map events).
    pub fn set_passable(&mut self, pos: &TilePos, passable: bool) {
        if let Some(i) = self.index(pos) {
            self.passable[i] = passable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii() {
        let map = TileMap::from_ascii(
            "
            ....
            .##.
            ....
            ",
        )
        .unwrap();
        assert_eq!((map.width, map.height), (4, 3));
        assert!(map.is_passable(&TilePos::new(0, 0)));
        assert!(!map.is_passable(&TilePos::new(1, 1)));
        assert!(!map.is_passable(&TilePos::new(4, 0)));
        assert!(!map.is_passable(&TilePos::new(-1, 0)));
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows() {
        let err = TileMap::from_ascii("...\n..\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidMap(_)));
    }

    #[test]
    fn test_from_ascii_rejects_unknown_tiles() {
        assert!(TileMap::from_ascii("..x.").is_err());
        assert!(TileMap::from_ascii("\n\n").is_err());
    }

    #[test]
    fn test_from_json_checks_size() {
        let good = serde_json::to_string(&TileMap::open(2, 2)).unwrap();
        assert!(TileMap::from_json(&good).is_ok());

        let bad = r#"{ "width": 3, "height": 3, "passable": [true, true] }"#;
        assert!(matches!(
            TileMap::from_json(bad),
            Err(DataError::InvalidMap(_))
        ));
    }

    #[test]
    fn test_set_passable() {
        let mut map = TileMap::open(3, 3);
        let door = TilePos::new(1, 1);
        map.set_passable(&door, false);
        assert!(!map.is_passable(&door));
        map.set_passable(&door, true);
        assert!(map.is_passable(&door));
    }
}
