use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Geometry of a single layer: `size`×`size` tiles starting at grid `offset`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: Coord,
    pub offset: Coord,
}

impl LayerSpec {
    pub const fn new(size: Coord, offset: Coord) -> Self {
        Self { size, offset }
    }

    pub const fn tile_count(self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Tile anchors of layer `z`, row by row.
    pub fn anchors(self, z: Coord) -> impl Iterator<Item = TileId> {
        let Self { size, offset } = self;
        (0..size).flat_map(move |row| {
            (0..size).map(move |col| Coord3::new(offset + 2 * col, offset + 2 * row, z))
        })
    }

    /// Whether `id` is one of [`LayerSpec::anchors`] of layer `z` and its
    /// block fits on the grid.
    pub fn has_anchor(self, id: TileId, z: Coord) -> bool {
        let on_axis = |v: Coord| {
            v < Coord::MAX
                && v.checked_sub(self.offset)
                    .is_some_and(|d| d % 2 == 0 && d / 2 < self.size)
        };
        id.z == z && on_axis(id.x) && on_axis(id.y)
    }
}

/// The available stack layouts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardShape {
    /// 4×4 over 3×3 over 2×2.
    #[default]
    Main,
    /// 3×3 over 2×2 over 3×3.
    Mini,
    /// 2×2 over 3×3 over 4×4, every layer shown from the start.
    Pyramid,
}

impl BoardShape {
    pub const fn layers(self) -> [LayerSpec; 3] {
        match self {
            Self::Main => [LayerSpec::new(4, 0), LayerSpec::new(3, 1), LayerSpec::new(2, 2)],
            Self::Mini => [LayerSpec::new(3, 0), LayerSpec::new(2, 1), LayerSpec::new(3, 0)],
            Self::Pyramid => [LayerSpec::new(2, 2), LayerSpec::new(3, 1), LayerSpec::new(4, 0)],
        }
    }

    pub const fn all_visible(self) -> bool {
        matches!(self, Self::Pyramid)
    }

    pub fn tile_count(self) -> usize {
        self.layers().iter().map(|spec| spec.tile_count()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    spec: LayerSpec,
    tiles: Vec<Tile>,
}

impl Layer {
    pub(crate) fn new(spec: LayerSpec, tiles: Vec<Tile>) -> Self {
        Self { spec, tiles }
    }

    pub fn spec(&self) -> LayerSpec {
        self.spec
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// All layers of the stack, top first. Owns every tile still in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData", into = "BoardData")]
pub struct Board {
    layers: Vec<Layer>,
    all_visible: bool,
    /// Which tile sits on each occupied cell.
    occupancy: HashMap<Coord3, TileId>,
}

#[derive(Clone, Serialize, Deserialize)]
struct BoardData {
    layers: Vec<Layer>,
    all_visible: bool,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        Board::validated(data.layers, data.all_visible)
    }
}

impl From<Board> for BoardData {
    fn from(board: Board) -> Self {
        BoardData {
            layers: board.layers,
            all_visible: board.all_visible,
        }
    }
}

impl Board {
    /// Builds the occupancy index and derives visibility for every tile.
    pub(crate) fn from_layers(layers: Vec<Layer>, all_visible: bool) -> Self {
        let occupancy = layers
            .iter()
            .flat_map(|layer| layer.tiles.iter())
            .flat_map(|tile| tile.occupied_coords().map(|coord| (coord, tile.id())))
            .collect();
        let mut board = Self {
            layers,
            all_visible,
            occupancy,
        };
        board.refresh();
        board
    }

    /// Like [`Board::from_layers`] for layers that did not come from the
    /// generator. Every tile must sit on its layer's anchor grid and no two
    /// tiles may share a cell.
    pub(crate) fn validated(layers: Vec<Layer>, all_visible: bool) -> Result<Self> {
        if layers.len() > usize::from(Coord::MAX) {
            let count = layers.len();
            return Err(GameError::InvalidSnapshot(format!("{} layers", count)));
        }
        let mut cells = HashSet::new();
        for (layer, z) in layers.iter().zip(0..) {
            for tile in &layer.tiles {
                let id = tile.id();
                if !layer.spec.has_anchor(id, z) {
                    return Err(GameError::InvalidSnapshot(format!(
                        "tile {} is off the grid of layer {}",
                        id, z
                    )));
                }
                let mut block = tile.occupied_coords().into_iter();
                if let Some(cell) = block.find(|&cell| !cells.insert(cell)) {
                    return Err(GameError::InvalidSnapshot(format!(
                        "tile {} overlaps cell {}",
                        id, cell
                    )));
                }
            }
        }
        Ok(Self::from_layers(layers, all_visible))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn all_visible(&self) -> bool {
        self.all_visible
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.layers.iter().flat_map(|layer| layer.tiles.iter())
    }

    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.layers
            .get(id.z as usize)?
            .tiles
            .iter()
            .find(|tile| tile.id() == id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.layers
            .get_mut(id.z as usize)?
            .tiles
            .iter_mut()
            .find(|tile| tile.id() == id)
    }

    /// Tile currently sitting on `coord`, if any.
    pub fn occupant(&self, coord: Coord3) -> Option<TileId> {
        self.occupancy.get(&coord).copied()
    }

    pub fn is_occupied(&self, coord: Coord3) -> bool {
        self.occupancy.contains_key(&coord)
    }

    /// Distinct tiles still sitting on the covering cells of `id`.
    pub fn covering_tiles(&self, id: TileId) -> SmallVec<[TileId; 4]> {
        let mut covering = SmallVec::new();
        let Some(coords) = id.above().map(Coord3::block) else {
            return covering;
        };
        for coord in coords {
            if let Some(occupant) = self.occupant(coord) {
                if !covering.contains(&occupant) {
                    covering.push(occupant);
                }
            }
        }
        covering
    }

    /// Visible but blocked, and every blocking tile is currently selected.
    pub fn is_temp_selectable(&self, id: TileId) -> bool {
        let Some(tile) = self.tile(id) else {
            return false;
        };
        if !tile.is_visible() || tile.is_selectable() {
            return false;
        }
        self.covering_tiles(id)
            .iter()
            .all(|&cover| self.tile(cover).is_some_and(Tile::is_selected))
    }

    pub fn tile_state(&self, id: TileId) -> Option<TileState> {
        let tile = self.tile(id)?;
        Some(if !tile.is_visible() {
            TileState::Hidden
        } else if tile.is_selected() {
            TileState::Selected
        } else if self.is_temp_selectable(id) {
            TileState::TempSelectable
        } else if !tile.is_selectable() {
            TileState::Unavailable
        } else {
            TileState::Available
        })
    }

    pub(crate) fn set_selected(&mut self, id: TileId, selected: bool) {
        if let Some(tile) = self.tile_mut(id) {
            tile.selected = selected;
        }
    }

    pub(crate) fn set_letter(&mut self, id: TileId, letter: Letter) -> bool {
        match self.tile_mut(id) {
            Some(tile) => {
                tile.set_letter(letter);
                true
            }
            None => false,
        }
    }

    /// Deletes a tile for good. Call [`Board::refresh`] once a batch of removals is done.
    pub(crate) fn remove_tile(&mut self, id: TileId) -> Option<Tile> {
        let layer = self.layers.get_mut(id.z as usize)?;
        let index = layer.tiles.iter().position(|tile| tile.id() == id)?;
        let tile = layer.tiles.remove(index);
        for coord in tile.occupied_coords() {
            self.occupancy.remove(&coord);
        }
        log::trace!("Removed tile {} ({})", id, tile.letter());
        Some(tile)
    }

    /// Recomputes visibility and selectability of every tile.
    ///
    /// A tile shows once any covering cell is vacated and can be picked once
    /// all of them are. Tiles never come back, so visibility only grows.
    pub fn refresh(&mut self) {
        let occupancy = &self.occupancy;
        let all_visible = self.all_visible;
        for tile in self.layers.iter_mut().flat_map(|layer| layer.tiles.iter_mut()) {
            match tile.covering_coords() {
                None => {
                    tile.visible = true;
                    tile.selectable = true;
                }
                Some(coords) => {
                    let covered = coords.iter().filter(|c| occupancy.contains_key(*c)).count();
                    let was_visible = tile.visible;
                    tile.visible = tile.visible || all_visible || covered < coords.len();
                    tile.selectable = tile.visible && covered == 0;
                    if tile.visible && !was_visible {
                        log::trace!("Tile {} uncovered", tile.id());
                    }
                }
            }
        }
    }
}
