use core::time::Duration;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// External event, processed to completion before the next one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Input {
    ActivateCell(Coord2),
    ToggleFlag(Coord2),
    Tick(Duration),
    ChangeDifficulty(Difficulty),
    NewGame,
    ClearScores,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionEnd {
    /// Board cleared; `rank` is the 1-based position in the score table, if it made the cut
    Won { time: f64, rank: Option<usize> },
    Lost { triggered: Coord2 },
}

/// Presentation layer fed by [`Game::handle`].
pub trait RenderSink {
    /// A new board replaced the previous one, every cell is hidden again.
    fn board_reset(&mut self, session: &Session);

    fn cells_changed(&mut self, changes: &[CellChange]);

    fn session_ended(&mut self, end: SessionEnd);

    fn scores_changed(&mut self, difficulty: Difficulty, scores: &[ScoreEntry]);

    fn timer_changed(&mut self, _elapsed_secs: f64) {}
}

/// Owns the running session and the score ledger and routes input between them.
pub struct Game<S> {
    session: Session,
    ledger: ScoreLedger<S>,
    seeds: SmallRng,
}

impl<S: ScoreStore> Game<S> {
    /// Starts a session on a random board; every later board is derived from `seed` too.
    pub fn new(difficulty: Difficulty, seed: u64, store: S) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let session = Session::generate(difficulty, RandomBoardGenerator::new(seeds.random()))?;
        Ok(Self {
            session,
            ledger: ScoreLedger::new(store),
            seeds,
        })
    }

    /// Starts from a prepared session, later boards are random from `seed`.
    pub fn with_session(session: Session, seed: u64, store: S) -> Self {
        Self {
            session,
            ledger: ScoreLedger::new(store),
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fastest recorded time for the current difficulty.
    pub fn best(&self) -> Option<ScoreEntry> {
        self.ledger.best(self.session.difficulty())
    }

    pub fn scores(&self) -> Vec<ScoreEntry> {
        self.ledger.list(self.session.difficulty())
    }

    pub fn handle(&mut self, input: Input, sink: &mut impl RenderSink) -> Result<()> {
        log::trace!("Handling {:?}", input);
        match input {
            Input::ActivateCell(coords) => {
                let result = self.session.reveal(coords);
                if result.has_update() {
                    sink.cells_changed(&result.changes);
                }
                match result.outcome {
                    GameState::Active => {}
                    GameState::Won => self.finish_won(sink),
                    GameState::Lost => self.finish_lost(sink),
                }
            }
            Input::ToggleFlag(coords) => {
                if let Some(flagged) = self.session.toggle_flag(coords).flagged() {
                    let view = if flagged {
                        CellView::Flagged
                    } else {
                        CellView::Hidden
                    };
                    sink.cells_changed(&[CellChange { coords, view }]);
                }
            }
            Input::Tick(delta) => {
                if self.session.is_timer_running() {
                    self.session.tick(delta);
                    sink.timer_changed(self.session.elapsed_secs());
                }
            }
            Input::ChangeDifficulty(difficulty) => self.restart(difficulty, sink)?,
            Input::NewGame => self.restart(self.session.difficulty(), sink)?,
            Input::ClearScores => {
                let difficulty = self.session.difficulty();
                self.ledger.clear(difficulty);
                sink.scores_changed(difficulty, &[]);
            }
        }
        Ok(())
    }

    fn restart(&mut self, difficulty: Difficulty, sink: &mut impl RenderSink) -> Result<()> {
        let generator = RandomBoardGenerator::new(self.seeds.random());
        self.session = Session::generate(difficulty, generator)?;
        log::info!("New {} game", difficulty.key());
        sink.board_reset(&self.session);
        sink.scores_changed(difficulty, &self.ledger.list(difficulty));
        Ok(())
    }

    fn finish_won(&mut self, sink: &mut impl RenderSink) {
        let difficulty = self.session.difficulty();
        let time = self.session.elapsed_secs();
        let Recorded { scores, rank } = self.ledger.record(difficulty, time);
        log::info!("Won {} in {:.1}s, rank {:?}", difficulty.key(), time, rank);

        sink.session_ended(SessionEnd::Won { time, rank });
        sink.scores_changed(difficulty, &scores);
    }

    fn finish_lost(&mut self, sink: &mut impl RenderSink) {
        let mines = self.session.revealed_mines();
        sink.cells_changed(&mines);
        if let Some(triggered) = self.session.triggered_mine() {
            log::info!("Lost at {:?}", triggered);
            sink.session_ended(SessionEnd::Lost { triggered });
        }
    }
}
