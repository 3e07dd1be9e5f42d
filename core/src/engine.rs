use core::time::Duration;
use hashbrown::HashSet;
use std::collections::VecDeque;

use crate::*;

/// Valid transitions:
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Active,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the session has ended and the board can no longer change
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cells whose visual state changed during one reveal, plus the resulting state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealResult {
    pub changes: Vec<CellChange>,
    pub outcome: GameState,
}

impl RevealResult {
    /// Whether this result could have caused an update to the board
    pub fn has_update(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// The new flagged state, if the toggle went through.
    pub const fn flagged(self) -> Option<bool> {
        match self {
            Self::NoChange => None,
            Self::Flagged => Some(true),
            Self::Unflagged => Some(false),
        }
    }
}

/// A single game from the first click until the board is cleared or a mine goes off.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    difficulty: Difficulty,
    board: Board,
    state: GameState,
    flag_count: CellCount,
    elapsed: Duration,
    timer_running: bool,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn new(difficulty: Difficulty, board: Board) -> Self {
        Self {
            difficulty,
            board,
            state: GameState::default(),
            flag_count: 0,
            elapsed: Duration::ZERO,
            timer_running: false,
            triggered_mine: None,
        }
    }

    /// Generates a fresh board for `difficulty` and wraps it in a new session.
    pub fn generate(difficulty: Difficulty, generator: impl BoardGenerator) -> Result<Self> {
        Ok(Self::new(difficulty, generator.generate(difficulty)?))
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> CellCount {
        self.board.mine_count() - self.flag_count
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Advances the clock, only between the first activation and the end of the session.
    pub fn tick(&mut self, delta: Duration) {
        if self.timer_running {
            self.elapsed += delta;
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.state.is_finished() || !self.board.is_in_bounds(coords) {
            return FlagOutcome::NoChange;
        }

        let cell = self.board[coords];
        if cell.is_revealed {
            return FlagOutcome::NoChange;
        }

        if cell.is_flagged {
            self.board[coords].is_flagged = false;
            self.flag_count -= 1;
            log::debug!("Unflagged {:?}, {} flags placed", coords, self.flag_count);
            FlagOutcome::Unflagged
        } else if self.flag_count >= self.board.mine_count() {
            log::debug!("Flag budget exhausted, ignoring {:?}", coords);
            FlagOutcome::NoChange
        } else {
            self.board[coords].is_flagged = true;
            self.flag_count += 1;
            log::debug!("Flagged {:?}, {} flags placed", coords, self.flag_count);
            FlagOutcome::Flagged
        }
    }

    /// Reveals a cell, flood-filling outwards from cells with no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> RevealResult {
        if self.state.is_finished() || !self.board.is_in_bounds(coords) {
            return RevealResult::default();
        }
        self.timer_running = true;

        let cell = self.board[coords];
        if cell.is_revealed || cell.is_flagged {
            return RevealResult::default();
        }

        let mut changes = vec![self.reveal_cell(coords)];

        if cell.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end(GameState::Lost);
        } else {
            log::debug!(
                "Revealed {:?}, adjacent mines: {}",
                coords,
                cell.adjacent_mines
            );
            if cell.adjacent_mines == 0 {
                self.flood_fill(coords, &mut changes);
            }
            if self.check_win() {
                self.end(GameState::Won);
            }
        }

        RevealResult {
            changes,
            outcome: self.state,
        }
    }

    /// Whether every safe cell has been revealed; flags play no part.
    pub fn check_win(&self) -> bool {
        self.board.unrevealed_safe_count() == 0
    }

    /// Every mine on the board shown as revealed, for the end-of-game display.
    pub fn revealed_mines(&self) -> Vec<CellChange> {
        self.board
            .mine_positions()
            .into_iter()
            .map(|coords| CellChange {
                coords,
                view: CellView::RevealedMine,
            })
            .collect()
    }

    fn reveal_cell(&mut self, coords: Coord2) -> CellChange {
        let cell = &mut self.board[coords];
        cell.is_revealed = true;
        CellChange {
            coords,
            view: cell.view(),
        }
    }

    fn flood_fill(&mut self, start: Coord2, changes: &mut Vec<CellChange>) {
        let mut visited: HashSet<Coord2> = HashSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(current) = to_visit.pop_front() {
            for pos in self.board.iter_neighbors(current) {
                let cell = self.board[pos];
                if cell.is_revealed || cell.is_flagged || !visited.insert(pos) {
                    continue;
                }

                changes.push(self.reveal_cell(pos));
                log::trace!(
                    "Flood opened {:?}, adjacent mines: {}",
                    pos,
                    cell.adjacent_mines
                );

                // neighbors of a zero cell are never mines
                if !cell.is_mine && cell.adjacent_mines == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    fn end(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        self.timer_running = false;
        log::debug!(
            "Session ended: {:?} after {:.1}s",
            state,
            self.elapsed_secs()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord, mines: &[Coord2]) -> Session {
        let difficulty = Difficulty::Easy;
        Session::new(difficulty, Board::from_mine_coords(size, mines).unwrap())
    }

    fn revealed(session: &Session) -> Vec<Coord2> {
        session
            .board()
            .iter_cells()
            .filter(|(_, cell)| cell.is_revealed)
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut session = session(3, &[(0, 0), (2, 2)]);

        let result = session.reveal((0, 0));

        assert_eq!(result.outcome, GameState::Lost);
        assert_eq!(
            result.changes,
            vec![CellChange {
                coords: (0, 0),
                view: CellView::RevealedMine
            }]
        );
        assert_eq!(session.triggered_mine(), Some((0, 0)));
        assert!(!session.board()[(2, 2)].is_revealed);
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut session = session(3, &[(0, 0)]);

        let result = session.reveal((1, 1));

        assert_eq!(result.outcome, GameState::Active);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].view, CellView::RevealedNumber(1));
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        let mut session = session(3, &[(2, 2)]);

        let result = session.reveal((0, 0));

        assert_eq!(result.outcome, GameState::Won);
        assert_eq!(result.changes.len(), 8);
        assert_eq!(session.board().view_at((0, 0)), Some(CellView::RevealedEmpty));
        assert_eq!(
            session.board().view_at((1, 1)),
            Some(CellView::RevealedNumber(1))
        );
        assert_eq!(session.board().view_at((2, 2)), Some(CellView::Hidden));
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut session = session(4, &[(3, 3)]);
        session.toggle_flag((0, 3));

        let result = session.reveal((0, 0));

        assert!(!result.changes.iter().any(|change| change.coords == (0, 3)));
        assert_eq!(session.board().view_at((0, 3)), Some(CellView::Flagged));
        assert_eq!(result.outcome, GameState::Active);
    }

    #[test]
    fn repeated_reveal_is_a_no_op() {
        let mut session = session(3, &[(0, 0)]);

        session.reveal((1, 1));
        let again = session.reveal((1, 1));

        assert!(!again.has_update());
        assert_eq!(again.outcome, GameState::Active);
    }

    #[test]
    fn out_of_bounds_is_a_no_op() {
        let mut session = session(3, &[(0, 0)]);

        assert_eq!(session.reveal((3, 0)), RevealResult::default());
        assert_eq!(session.toggle_flag((0, 7)), FlagOutcome::NoChange);
        assert!(!session.is_timer_running());
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut session = session(3, &[(0, 0)]);

        assert_eq!(session.toggle_flag((0, 0)), FlagOutcome::Flagged);
        assert!(!session.reveal((0, 0)).has_update());
        assert_eq!(session.state(), GameState::Active);

        assert_eq!(session.toggle_flag((0, 0)), FlagOutcome::Unflagged);
        assert_eq!(session.reveal((0, 0)).outcome, GameState::Lost);
    }

    #[test]
    fn flag_budget_is_capped_at_mine_count() {
        let mut session = session(3, &[(0, 0)]);

        assert_eq!(session.toggle_flag((2, 2)), FlagOutcome::Flagged);
        assert_eq!(session.toggle_flag((2, 1)), FlagOutcome::NoChange);
        assert_eq!(session.flag_count(), 1);
        assert_eq!(session.mines_left(), 0);

        // removing a flag is always allowed
        assert_eq!(session.toggle_flag((2, 2)).flagged(), Some(false));
        assert_eq!(session.toggle_flag((2, 1)).flagged(), Some(true));
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut session = session(3, &[(0, 0)]);

        session.reveal((1, 1));

        assert_eq!(session.toggle_flag((1, 1)), FlagOutcome::NoChange);
        assert_eq!(session.flag_count(), 0);
    }

    #[test]
    fn win_leaves_mines_hidden_and_flags_untouched() {
        let mut session = session(2, &[(0, 0)]);
        session.toggle_flag((0, 0));

        session.reveal((0, 1));
        session.reveal((1, 0));
        let result = session.reveal((1, 1));

        assert_eq!(result.outcome, GameState::Won);
        assert!(session.check_win());
        assert!(!session.board()[(0, 0)].is_revealed);
        assert!(session.board()[(0, 0)].is_flagged);
        assert_eq!(session.triggered_mine(), None);
    }

    #[test]
    fn finished_session_ignores_input() {
        let mut session = session(3, &[(0, 0)]);
        session.reveal((0, 0));
        let before = revealed(&session);

        assert!(!session.reveal((2, 2)).has_update());
        assert_eq!(session.toggle_flag((1, 1)), FlagOutcome::NoChange);
        assert_eq!(revealed(&session), before);
        assert_eq!(session.state(), GameState::Lost);
    }

    #[test]
    fn won_session_ignores_flags() {
        let mut session = session(2, &[(0, 0)]);
        session.reveal((0, 1));
        session.reveal((1, 0));
        session.reveal((1, 1));
        assert_eq!(session.state(), GameState::Won);

        assert_eq!(session.toggle_flag((0, 0)), FlagOutcome::NoChange);
        assert_eq!(session.flag_count(), 0);
        assert!(!session.board()[(0, 0)].is_flagged);
        assert!(!session.reveal((0, 0)).has_update());
        assert_eq!(session.state(), GameState::Won);
    }

    #[test]
    fn timer_runs_from_first_activation_until_the_end() {
        let mut session = session(3, &[(0, 0)]);

        session.tick(Duration::from_millis(100));
        assert_eq!(session.elapsed(), Duration::ZERO);

        session.reveal((1, 1));
        session.tick(Duration::from_millis(100));
        session.tick(Duration::from_millis(100));
        assert_eq!(session.elapsed(), Duration::from_millis(200));

        session.reveal((0, 0));
        session.tick(Duration::from_millis(100));
        assert_eq!(session.elapsed(), Duration::from_millis(200));
        assert!(!session.is_timer_running());
    }

    #[test]
    fn activating_a_flagged_cell_still_starts_the_timer() {
        let mut session = session(3, &[(0, 0)]);
        session.toggle_flag((2, 2));

        session.reveal((2, 2));

        assert!(session.is_timer_running());
    }

    #[test]
    fn revealed_mines_lists_every_mine() {
        let session = session(3, &[(0, 2), (2, 0)]);

        let mines: Vec<_> = session.revealed_mines().iter().map(|c| c.coords).collect();

        assert_eq!(mines, vec![(0, 2), (2, 0)]);
        assert!(!session.board()[(0, 2)].is_revealed);
    }
}
