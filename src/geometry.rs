//! L-piece geometry.
//!
//! An L-piece is described by its anchor (the corner cell of the L) and the
//! orientation of its foot. From the anchor, the foot extends one cell and the
//! arm extends two cells perpendicular to it. When the arm would run off the
//! far edge of the board it is mirrored about the anchor, so the same
//! `(anchor, orientation)` pair always names exactly one shape:
//!
//! ```text
//! North, x < 3:  (x,y) (x,y-1) (x+1,y) (x+2,y)
//! North, x >= 3: (x,y) (x,y-1) (x-1,y) (x-2,y)
//! ```
//!
//! and analogously for South, East and West. Cells produced here may lie off
//! the board; the board validator rejects those.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    EAST_MIRROR_UPTO, N, NORTH_MIRROR_FROM, ORIENTATION_COUNT, SOUTH_MIRROR_UPTO,
    WEST_MIRROR_FROM,
};
use crate::error::GameError;

/// A cell `(x, y)`. On-board cells satisfy `1 <= x, y <= 4`; `(1, 1)` is the
/// top-left corner.
pub type Cell = (i8, i8);

/// Direction in which the foot of an L extends from its anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// All orientations, in move-generation order.
    pub const ALL: [Orientation; ORIENTATION_COUNT] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Single-letter notation (`N`, `S`, `E`, `W`).
    pub fn letter(self) -> char {
        match self {
            Orientation::North => 'N',
            Orientation::South => 'S',
            Orientation::East => 'E',
            Orientation::West => 'W',
        }
    }
}

impl TryFrom<char> for Orientation {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Orientation::North),
            'S' => Ok(Orientation::South),
            'E' => Ok(Orientation::East),
            'W' => Ok(Orientation::West),
            _ => Err(GameError::InvalidOrientation(c.to_string())),
        }
    }
}

impl FromStr for Orientation {
    type Err = GameError;

    /// Accepts the single letter or the full name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::try_from(c),
            _ => match s.to_ascii_lowercase().as_str() {
                "north" => Ok(Orientation::North),
                "south" => Ok(Orientation::South),
                "east" => Ok(Orientation::East),
                "west" => Ok(Orientation::West),
                _ => Err(GameError::InvalidOrientation(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An anchor cell together with an orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub anchor: Cell,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(anchor: Cell, orientation: Orientation) -> Self {
        Self {
            anchor,
            orientation,
        }
    }

    /// The 4 cells covered by this placement.
    #[inline]
    pub fn cells(&self) -> [Cell; 4] {
        placements(self.anchor, self.orientation)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.anchor;
        write!(f, "{x} {y} {}", self.orientation)
    }
}

/// Compute the 4 cells of the L with the given anchor and orientation.
///
/// The anchor is always the first cell, followed by the foot and then the arm.
/// Boundedness is not checked. Coordinates saturate at the `i8` limits, which
/// keeps any anchor far off the board off the board.
pub fn placements(anchor: Cell, orientation: Orientation) -> [Cell; 4] {
    let (x, y) = anchor;
    let at = |dx: i8, dy: i8| (x.saturating_add(dx), y.saturating_add(dy));
    match orientation {
        Orientation::North => {
            if x >= NORTH_MIRROR_FROM {
                [at(0, 0), at(0, -1), at(-1, 0), at(-2, 0)]
            } else {
                [at(0, 0), at(0, -1), at(1, 0), at(2, 0)]
            }
        }
        Orientation::South => {
            if x <= SOUTH_MIRROR_UPTO {
                [at(0, 0), at(0, 1), at(1, 0), at(2, 0)]
            } else {
                [at(0, 0), at(0, 1), at(-1, 0), at(-2, 0)]
            }
        }
        Orientation::East => {
            if y <= EAST_MIRROR_UPTO {
                [at(0, 0), at(1, 0), at(0, 1), at(0, 2)]
            } else {
                [at(0, 0), at(1, 0), at(0, -1), at(0, -2)]
            }
        }
        Orientation::West => {
            if y >= WEST_MIRROR_FROM {
                [at(0, 0), at(-1, 0), at(0, -1), at(0, -2)]
            } else {
                [at(0, 0), at(0, 1), at(0, 2), at(-1, 0)]
            }
        }
    }
}

/// Whether a cell lies on the 4x4 board.
#[inline]
pub fn in_bounds((x, y): Cell) -> bool {
    (1..=N).contains(&x) && (1..=N).contains(&y)
}

/// Iterate over all board cells, `x` outer and `y` inner.
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (1..=N).flat_map(|x| (1..=N).map(move |y| (x, y)))
}

/// Whether two cells share an edge.
#[inline]
pub fn adjacent(a: Cell, b: Cell) -> bool {
    let dx = (i16::from(a.0) - i16::from(b.0)).abs();
    let dy = (i16::from(a.1) - i16::from(b.1)).abs();
    dx + dy == 1
}
