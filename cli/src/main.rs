use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sweeper_core::{Difficulty, Game, Input, ScoreStore};
use web_time::Instant;

use command::{Command, HELP};
use render::TerminalRenderer;
use store::JsonFileStore;

mod command;
mod render;
mod store;

/// Terminal mine sweeper with per-difficulty best times
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File holding the best times
    #[arg(long, default_value = "sweeper-scores.json")]
    scores: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);

    let store = JsonFileStore::open(&args.scores);
    log::info!("Scores kept in {}", store.path().display());
    let game = Game::new(args.difficulty, seed, store).context("Could not start a game")?;

    run(game, io::stdin().lock(), io::stdout().lock())
}

/// Reads one command per line until `q` or end of input.
fn run<S: ScoreStore>(
    mut game: Game<S>,
    input: impl BufRead,
    out: impl Write,
) -> anyhow::Result<()> {
    let mut renderer = TerminalRenderer::new(out, game.session());
    renderer.message(HELP);
    renderer.scores(game.session().difficulty(), &game.scores());
    renderer.draw(game.session(), game.best().as_ref());

    let mut last_tick = Instant::now();
    for line in input.lines() {
        let line = line.context("Could not read input")?;

        let now = Instant::now();
        game.handle(Input::Tick(now - last_tick), &mut renderer)?;
        last_tick = now;

        match line.parse::<Command>() {
            Ok(Command::Play(input)) => {
                game.handle(input, &mut renderer)?;
                renderer.draw(game.session(), game.best().as_ref());
            }
            Ok(Command::ShowScores) => {
                renderer.scores(game.session().difficulty(), &game.scores())
            }
            Ok(Command::Print) => renderer.draw(game.session(), game.best().as_ref()),
            Ok(Command::Help) => renderer.message(HELP),
            Ok(Command::Quit) => break,
            Err(err) => renderer.message(err),
        }
    }
    Ok(())
}
