use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of one match: mine layout, neighbor counts and player markings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flag_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Builds a board from a mine mask indexed by `(row, col)`, computing the neighbor counts.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut mine_count: CellCount = 0;
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            if mine_mask[(row, col)] {
                mine_count += 1;
                return Cell::new(CellValue::Mine);
            }
            let coords = (row as Coord, col as Coord);
            let adjacent = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            Cell::new(CellValue::Adjacent(adjacent as u8))
        });

        Self {
            cells,
            mine_count,
            revealed_count: 0,
            flag_count: 0,
            triggered_mine: None,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Every safe cell is revealed and no mine is.
    pub fn is_cleared(&self) -> bool {
        self.triggered_mine.is_none() && self.revealed_count == self.safe_cell_count()
    }

    /// Opens every mine, flagged or not. Markings on safe cells stay as they are.
    pub fn reveal_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine() {
                cell.state = CellState::Revealed;
            }
        }
    }

    pub(crate) fn set_state(&mut self, coords: Coord2, state: CellState) {
        self.cells[coords.to_nd_index()].state = state;
    }

    pub(crate) fn count_revealed(&mut self) {
        self.revealed_count += 1;
    }

    pub(crate) fn count_flag(&mut self, flagged: bool) {
        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count = self.flag_count.saturating_sub(1);
        }
    }

    pub(crate) fn trigger_mine(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
