//! Fundamental identifiers, grid geometry and simulation time.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Map-entity id of a battler. Unique for the lifetime of the engine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BattlerId(pub u32);

impl fmt::Display for BattlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battler#{}", self.0)
    }
}

/// Identifier of an action in the static action table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Tile coordinate on the map grid.
/// x = column (grows east), y = row (grows south).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

/// Direction a battler is facing. Hitboxes are laid out relative to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn from_ivec2(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance in tiles. Used for aggro, disengage and action range.
    pub fn distance_to(&self, other: &TilePos) -> f64 {
        (other.as_ivec2() - self.as_ivec2()).as_dvec2().length()
    }

    /// Chebyshev (king-move) distance in tiles.
    pub fn chebyshev_to(&self, other: &TilePos) -> i32 {
        let d = (other.as_ivec2() - self.as_ivec2()).abs();
        d.x.max(d.y)
    }

    pub fn offset(self, delta: IVec2) -> Self {
        Self::from_ivec2(self.as_ivec2() + delta)
    }

    /// The adjacent tile in `facing` direction.
    pub fn step(self, facing: Facing) -> Self {
        self.offset(facing.delta())
    }

    /// Facing that points from `self` toward `other` along the dominant axis.
    /// Horizontal wins ties. `None` when both tiles are the same.
    pub fn facing_toward(&self, other: &TilePos) -> Option<Facing> {
        let d = other.as_ivec2() - self.as_ivec2();
        if d == IVec2::ZERO {
            return None;
        }
        let facing = if d.x.abs() >= d.y.abs() {
            if d.x > 0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if d.y > 0 {
            Facing::Down
        } else {
            Facing::Up
        };
        Some(facing)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit grid offset for one step in this direction.
    pub fn delta(self) -> IVec2 {
        match self {
            Facing::Up => IVec2::new(0, -1),
            Facing::Down => IVec2::new(0, 1),
            Facing::Left => IVec2::new(-1, 0),
            Facing::Right => IVec2::new(1, 0),
        }
    }

    /// Offset perpendicular to the facing axis (used for arc hitboxes).
    pub fn perpendicular(self) -> IVec2 {
        match self {
            Facing::Up | Facing::Down => IVec2::new(1, 0),
            Facing::Left | Facing::Right => IVec2::new(0, 1),
        }
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
