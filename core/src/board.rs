use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Square grid of cells with a fixed mine layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Board of side `size` without any mines.
    pub(crate) fn empty(size: Coord) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let size = usize::from(size);
        Ok(Self {
            cells: Array2::default((size, size)),
            mine_count: 0,
        })
    }

    /// Builds a board with mines at exactly the given positions, duplicates collapsed.
    ///
    /// At least one cell must stay safe, otherwise the board could never be cleared.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }
        if board.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }
        board.compute_adjacency();
        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn is_in_bounds(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    pub fn size(&self) -> Coord {
        // construction only accepts a `Coord` side length
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.cell_at(coords).map(Cell::view)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        neighbors(coords, self.size())
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Positions of every mine, in row-major order.
    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Safe cells that are still unrevealed; the board is cleared when this reaches zero.
    pub fn unrevealed_safe_count(&self) -> CellCount {
        let count = self
            .cells
            .iter()
            .filter(|cell| !cell.is_revealed && !cell.is_mine)
            .count();
        // bounded by `total_cells`
        count as CellCount
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count();
        // at most 8 neighbors
        count as u8
    }

    /// Marks a mine, returning `false` when the cell already held one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.is_mine {
            return false;
        }
        cell.is_mine = true;
        self.mine_count += 1;
        true
    }

    pub(crate) fn compute_adjacency(&mut self) {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                let coords = (row, col);
                let count = if self[coords].is_mine {
                    0
                } else {
                    self.count_adjacent_mines(coords)
                };
                self[coords].adjacent_mines = count;
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
