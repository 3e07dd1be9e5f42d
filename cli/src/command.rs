use std::num::ParseIntError;
use std::str::FromStr;
use sweeper_core::{Coord, Difficulty, GameError, Input};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  o <row> <col>   open a cell
  f <row> <col>   toggle a flag
  n               new game
  d <difficulty>  switch to easy, medium or hard
  s               show best times
  c               clear best times for this difficulty
  p               print the board
  h               this help
  q               quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Play(Input),
    ShowScores,
    Print,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, try h for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Bad coordinate: {0}")]
    BadCoord(#[from] ParseIntError),
    #[error(transparent)]
    Difficulty(#[from] GameError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Print);
        };

        Ok(match verb {
            "o" | "open" => Command::Play(Input::ActivateCell(coords(&mut words)?)),
            "f" | "flag" => Command::Play(Input::ToggleFlag(coords(&mut words)?)),
            "n" | "new" => Command::Play(Input::NewGame),
            "d" | "difficulty" => {
                let difficulty: Difficulty = words.next().unwrap_or_default().parse()?;
                Command::Play(Input::ChangeDifficulty(difficulty))
            }
            "c" | "clear" => Command::Play(Input::ClearScores),
            "s" | "scores" => Command::ShowScores,
            "p" | "print" => Command::Print,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        })
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(Coord, Coord), CommandError> {
    let row = words.next().ok_or(CommandError::MissingCoords)?.parse()?;
    let col = words.next().ok_or(CommandError::MissingCoords)?.parse()?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!(
            "o 2 3".parse(),
            Ok(Command::Play(Input::ActivateCell((2, 3))))
        );
        assert_eq!(
            "flag 0 5".parse(),
            Ok(Command::Play(Input::ToggleFlag((0, 5))))
        );
    }

    #[test]
    fn parses_difficulty_and_meta_commands() {
        assert_eq!(
            "d hard".parse(),
            Ok(Command::Play(Input::ChangeDifficulty(Difficulty::Hard)))
        );
        assert_eq!("".parse(), Ok(Command::Print));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("o 1".parse::<Command>(), Err(CommandError::MissingCoords));
        assert!(matches!(
            "o x 1".parse::<Command>(),
            Err(CommandError::BadCoord(_))
        ));
        assert!(matches!(
            "d extreme".parse::<Command>(),
            Err(CommandError::Difficulty(GameError::UnknownDifficulty(_)))
        ));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(CommandError::Unknown("jump".into()))
        );
    }
}
