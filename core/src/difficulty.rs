use core::fmt;
use core::str::FromStr;

use crate::*;

/// One of the fixed board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Side length of the square board.
    pub const fn grid_size(self) -> Coord {
        match self {
            Self::Easy => 6,
            Self::Medium => 10,
            Self::Hard => 12,
        }
    }

    pub const fn mine_count(self) -> CellCount {
        match self {
            Self::Easy => 6,
            Self::Medium => 12,
            Self::Hard => 25,
        }
    }

    /// Stable identifier, used for persistence keys and on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Human readable name recorded alongside scores.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_leave_room_for_safe_cells() {
        for difficulty in Difficulty::ALL {
            assert!(difficulty.mine_count() < area(difficulty.grid_size()));
        }
    }

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!(" HARD ".parse(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty("expert".into()))
        );
    }
}
