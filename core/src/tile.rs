use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Point value of each letter `A..=Z`.
const LETTER_POINTS: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// Letter printed on a tile: an uppercase `A..=Z` or the wildcard `*`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    pub const WILDCARD: Letter = Letter(b'*');

    /// Accepts either case, stores uppercase.
    pub fn new(ch: char) -> Result<Self> {
        match ch.to_ascii_uppercase() {
            upper @ 'A'..='Z' => Ok(Self(upper as u8)),
            '*' => Ok(Self::WILDCARD),
            _ => Err(GameError::InvalidLetter(ch)),
        }
    }

    pub const fn is_wildcard(self) -> bool {
        self.0 == b'*'
    }

    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Fixed score of the letter, wildcards are worth nothing.
    pub const fn points(self) -> u32 {
        if self.is_wildcard() {
            0
        } else {
            LETTER_POINTS[(self.0 - b'A') as usize]
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(ch: char) -> Result<Self> {
        Self::new(ch)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.as_char()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One 2×2 letter unit on a layer of the stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    letter: Letter,
    pub(crate) selected: bool,
    pub(crate) visible: bool,
    pub(crate) selectable: bool,
}

impl Tile {
    pub(crate) fn new(id: TileId, letter: Letter) -> Self {
        Self {
            id,
            letter,
            selected: false,
            visible: false,
            selectable: false,
        }
    }

    pub(crate) fn with_flags(
        id: TileId,
        letter: Letter,
        selected: bool,
        visible: bool,
        selectable: bool,
    ) -> Self {
        Self {
            id,
            letter,
            selected,
            visible,
            selectable,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn layer(&self) -> Coord {
        self.id.z
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub(crate) fn set_letter(&mut self, letter: Letter) {
        self.letter = letter;
    }

    pub fn points(&self) -> u32 {
        self.letter.points()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_completely_covered(&self) -> bool {
        !self.visible
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Cells this tile occupies on its own layer.
    pub fn occupied_coords(&self) -> [Coord3; 4] {
        self.id.block()
    }

    /// Cells on the layer above that block this tile while occupied.
    pub fn covering_coords(&self) -> Option<[Coord3; 4]> {
        self.id.above().map(Coord3::block)
    }
}

/// How a tile presents itself to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileState {
    /// Completely covered, not shown.
    Hidden,
    /// Part of the word being built.
    Selected,
    /// Partly covered, but every covering tile is in the current word.
    TempSelectable,
    /// Visible, blocked by a covering tile that is not selected.
    Unavailable,
    /// Fully uncovered and free to pick.
    Available,
}

impl TileState {
    /// Whether activating the tile adds it to the word.
    pub const fn can_select(self) -> bool {
        matches!(self, Self::Available | Self::TempSelectable)
    }
}
