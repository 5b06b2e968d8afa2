//! Compass directions on the isometric grid.
//!
//! The map x axis runs towards the bottom-right of the screen and the map y
//! axis towards the bottom-left, so the four tile neighbours sit on the
//! screen diagonals.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MapPosition;

/// One of the four diagonal screen directions a tile neighbour lies in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top-right of the screen (map y - 1).
    NorthEast,
    /// Towards the top-left of the screen (map x - 1).
    NorthWest,
    /// Towards the bottom-right of the screen (map x + 1).
    SouthEast,
    /// Towards the bottom-left of the screen (map y + 1).
    SouthWest,
}

impl Direction {
    /// All directions, clockwise from north-east.
    pub const ALL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Map-grid offset of one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthEast => (0, -1),
            Direction::NorthWest => (-1, 0),
            Direction::SouthEast => (1, 0),
            Direction::SouthWest => (0, 1),
        }
    }

    /// The position one tile away from `pos` in this direction.
    ///
    /// No bounds check is applied; see [`crate::is_on_map`].
    pub const fn step(self, pos: MapPosition) -> MapPosition {
        let (dx, dy) = self.offset();
        MapPosition::new(pos.x + dx, pos.y + dy)
    }

    /// Short lowercase compass code (`"ne"`, `"nw"`, `"se"`, `"sw"`).
    pub const fn code(self) -> &'static str {
        match self {
            Direction::NorthEast => "ne",
            Direction::NorthWest => "nw",
            Direction::SouthEast => "se",
            Direction::SouthWest => "sw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
