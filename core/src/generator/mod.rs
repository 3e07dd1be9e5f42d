use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<Board>;
}

/// Places mines at a predetermined set of positions, for scripted layouts.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<Board> {
        Board::from_mine_coords(difficulty.grid_size(), &self.mines)
    }
}
