use crate::Coord2;

/// Logical state of a single board cell.
///
/// A cell is never revealed and flagged at the same time: flagging is refused on revealed
/// cells and revealing skips flagged ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Number of mines among the neighbors, only meaningful for safe cells.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn view(self) -> CellView {
        match self {
            Cell {
                is_revealed: false,
                is_flagged: true,
                ..
            } => CellView::Flagged,
            Cell {
                is_revealed: false,
                ..
            } => CellView::Hidden,
            Cell { is_mine: true, .. } => CellView::RevealedMine,
            Cell {
                adjacent_mines: 0,
                ..
            } => CellView::RevealedEmpty,
            Cell { adjacent_mines, .. } => CellView::RevealedNumber(adjacent_mines),
        }
    }
}

/// Visual category handed to the render layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    RevealedEmpty,
    RevealedNumber(u8),
    RevealedMine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub coords: Coord2,
    pub view: CellView,
}
