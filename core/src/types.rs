use core::fmt;
use serde::{Deserialize, Serialize};

/// Single grid axis, used for x, y and the layer index.
pub type Coord = u8;

/// Scores can go negative once the end-of-game penalty is applied.
pub type Score = i32;

/// Grid cell `(x, y, z)`. `z` is the layer, 0 being the top of the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

/// Tiles are identified by the anchor (top-left) cell of their 2×2 block.
pub type TileId = Coord3;

impl Coord3 {
    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }

    /// The four cells of the 2×2 block anchored here.
    pub const fn block(self) -> [Coord3; 4] {
        let Self { x, y, z } = self;
        [
            Self::new(x, y, z),
            Self::new(x + 1, y, z),
            Self::new(x, y + 1, z),
            Self::new(x + 1, y + 1, z),
        ]
    }

    /// The same cell one layer closer to the top, `None` on the top layer.
    pub const fn above(self) -> Option<Coord3> {
        match self.z.checked_sub(1) {
            Some(z) => Some(Self::new(self.x, self.y, z)),
            None => None,
        }
    }
}

impl From<(Coord, Coord, Coord)> for Coord3 {
    fn from((x, y, z): (Coord, Coord, Coord)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[Coord; 3]> for Coord3 {
    fn from([x, y, z]: [Coord; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Coord3> for [Coord; 3] {
    fn from(coord: Coord3) -> Self {
        [coord.x, coord.y, coord.z]
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.x, self.y, self.z)
    }
}
