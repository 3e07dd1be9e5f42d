use std::io::{self, Write};
use sweeper_core::*;

/// Text renderer that mirrors the board from change sets and writes to `out`.
pub struct TerminalRenderer<W> {
    out: W,
    size: usize,
    views: Vec<CellView>,
    elapsed: f64,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, session: &Session) -> Self {
        let mut renderer = Self {
            out,
            size: 0,
            views: Vec::new(),
            elapsed: 0.0,
        };
        renderer.load(session);
        renderer
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn load(&mut self, session: &Session) {
        let board = session.board();
        self.size = board.size().into();
        self.views = board.iter_cells().map(|(_, cell)| cell.view()).collect();
        self.elapsed = session.elapsed_secs();
    }

    /// Prints the header and the mirrored board; `best` is the fastest recorded time.
    pub fn draw(&mut self, session: &Session, best: Option<&ScoreEntry>) {
        let result = self.write_board(session, best);
        self.report(result);
    }

    pub fn message(&mut self, text: impl std::fmt::Display) {
        let result = writeln!(self.out, "{}", text);
        self.report(result);
    }

    pub fn scores(&mut self, difficulty: Difficulty, scores: &[ScoreEntry]) {
        let result = self.write_scores(difficulty, scores);
        self.report(result);
    }

    fn write_board(&mut self, session: &Session, best: Option<&ScoreEntry>) -> io::Result<()> {
        write!(
            self.out,
            "{}  time: {:.1}s  mines left: {}",
            session.difficulty(),
            self.elapsed,
            session.mines_left()
        )?;
        match best {
            Some(entry) => writeln!(self.out, "  best: {:.1}s", entry.time)?,
            None => writeln!(self.out)?,
        }
        write!(self.out, "   ")?;
        for col in 0..self.size {
            write!(self.out, "{:>2}", col)?;
        }
        writeln!(self.out)?;
        for (row, views) in self.views.chunks(self.size.max(1)).enumerate() {
            write!(self.out, "{:>2} ", row)?;
            for &view in views {
                write!(self.out, " {}", glyph(view))?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    fn write_scores(&mut self, difficulty: Difficulty, scores: &[ScoreEntry]) -> io::Result<()> {
        if scores.is_empty() {
            return writeln!(self.out, "No {} times recorded yet", difficulty.key());
        }
        writeln!(self.out, "Best {} times:", difficulty.key())?;
        for (index, entry) in scores.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {:.1}s ({}) {}",
                index + 1,
                entry.time,
                entry.difficulty_label,
                entry.date
            )?;
        }
        Ok(())
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(err) = result {
            log::error!("Could not write to terminal: {}", err);
        }
    }
}

fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::RevealedEmpty => ' ',
        CellView::RevealedNumber(count) => char::from(b'0' + count),
        CellView::RevealedMine => '*',
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn board_reset(&mut self, session: &Session) {
        self.load(session);
    }

    fn cells_changed(&mut self, changes: &[CellChange]) {
        for &CellChange { coords: (row, col), view } in changes {
            let index = usize::from(row) * self.size + usize::from(col);
            if let Some(slot) = self.views.get_mut(index) {
                *slot = view;
            }
        }
    }

    fn session_ended(&mut self, end: SessionEnd) {
        match end {
            SessionEnd::Won { time, rank } => {
                self.message(format!("Cleared! Time: {:.1}s", time));
                if let Some(rank) = rank {
                    self.message(format!("New best time, rank #{}", rank));
                }
            }
            SessionEnd::Lost { triggered: (row, col) } => {
                self.message(format!("Boom! Mine at {} {}, type n to play again", row, col));
            }
        }
    }

    fn scores_changed(&mut self, difficulty: Difficulty, scores: &[ScoreEntry]) {
        self.scores(difficulty, scores);
    }

    fn timer_changed(&mut self, elapsed_secs: f64) {
        self.elapsed = elapsed_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn draws_changes_applied_to_the_mirror() {
        let board = Board::from_mine_coords(6, &[(0, 0)]).unwrap();
        let session = Session::new(Difficulty::Easy, board);
        let mut renderer = TerminalRenderer::new(Vec::new(), &session);

        renderer.cells_changed(&[
            CellChange {
                coords: (1, 1),
                view: CellView::RevealedNumber(1),
            },
            CellChange {
                coords: (0, 0),
                view: CellView::Flagged,
            },
        ]);
        renderer.draw(&session, None);

        let text = output(renderer);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "Easy  time: 0.0s  mines left: 1");
        assert_eq!(rows[2], " 0  F . . . . .");
        assert_eq!(rows[3], " 1  . 1 . . . .");
    }

    #[test]
    fn header_shows_best_time() {
        let board = Board::from_mine_coords(6, &[(0, 0)]).unwrap();
        let session = Session::new(Difficulty::Easy, board);
        let mut renderer = TerminalRenderer::new(Vec::new(), &session);
        let best = ScoreEntry {
            time: 7.3,
            difficulty_label: "Easy".into(),
            date: "2026-10-16".into(),
        };

        renderer.draw(&session, Some(&best));

        let text = output(renderer);
        assert_eq!(
            text.lines().next(),
            Some("Easy  time: 0.0s  mines left: 1  best: 7.3s")
        );
    }

    #[test]
    fn lists_scores_with_rank() {
        let board = Board::from_mine_coords(6, &[(0, 0)]).unwrap();
        let session = Session::new(Difficulty::Easy, board);
        let mut renderer = TerminalRenderer::new(Vec::new(), &session);
        let entry = ScoreEntry {
            time: 12.3,
            difficulty_label: "Easy".into(),
            date: "2026-10-16".into(),
        };

        renderer.scores_changed(Difficulty::Easy, &[entry]);
        renderer.scores_changed(Difficulty::Hard, &[]);

        assert_eq!(
            output(renderer),
            "Best easy times:\n1. 12.3s (Easy) 2026-10-16\nNo hard times recorded yet\n"
        );
    }
}
