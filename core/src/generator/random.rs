use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: draw a cell, redraw if it already holds a mine.
///
/// Expected work grows without bound as the mine count approaches the cell count, so a
/// board that cannot keep at least one safe cell is refused up front.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<Board> {
        let size = difficulty.grid_size();
        let mines = difficulty.mine_count();
        if mines >= area(size) {
            log::warn!(
                "Refusing to place {} mines on a {}x{} board",
                mines,
                size,
                size
            );
            return Err(GameError::TooManyMines);
        }

        let mut board = Board::empty(size)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut draws = 0u32;
        while board.mine_count() < mines {
            let coords = (rng.random_range(0..size), rng.random_range(0..size));
            board.place_mine(coords);
            draws += 1;
        }
        board.compute_adjacency();

        log::debug!(
            "Generated {} board with seed {}: {} mines in {} draws",
            difficulty.key(),
            self.seed,
            board.mine_count(),
            draws
        );
        Ok(board)
    }
}
