use smallvec::SmallVec;

use crate::*;

/// Tiles picked for the word in progress, in word order.
///
/// Only identities are kept here; the word itself is always read back from
/// the board so it can never drift from the tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    tiles: SmallVec<[TileId; 16]>,
}

impl Selection {
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains(&id)
    }

    pub fn position(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|&tile| tile == id)
    }

    /// Letters of the selected tiles in order, `*` kept as is.
    pub fn word(&self, board: &Board) -> String {
        self.tiles
            .iter()
            .filter_map(|&id| board.tile(id))
            .map(|tile| tile.letter().as_char())
            .collect()
    }

    pub(crate) fn push(&mut self, id: TileId) {
        self.tiles.push(id);
    }

    /// Removes `id`, keeping the order of the rest. Returns where it was.
    pub(crate) fn remove(&mut self, id: TileId) -> Option<usize> {
        let index = self.position(id)?;
        self.tiles.remove(index);
        Some(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<TileId> {
        (index < self.tiles.len()).then(|| self.tiles.remove(index))
    }

    pub(crate) fn pop(&mut self) -> Option<TileId> {
        self.tiles.pop()
    }

    /// Moves the tile at `from` so it ends up at `to`. Out of range is a no-op.
    pub(crate) fn move_tile(&mut self, from: usize, to: usize) -> bool {
        let len = self.tiles.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let id = self.tiles.remove(from);
        self.tiles.insert(to, id);
        true
    }

    pub(crate) fn take(&mut self) -> SmallVec<[TileId; 16]> {
        core::mem::take(&mut self.tiles)
    }
}
