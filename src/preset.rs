use std::{fmt, str::FromStr};

use crate::error::PuzzleError;
use crate::puzzle::Board;

/// Built-in 3x3 puzzles, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Peaceful,
    Easy,
    Normal,
    Hardcore,
    Extreme,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Peaceful,
        Preset::Easy,
        Preset::Normal,
        Preset::Hardcore,
        Preset::Extreme,
    ];

    pub const SIZE: usize = 3;

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Peaceful => "Peaceful",
            Preset::Easy => "Easy",
            Preset::Normal => "Normal",
            Preset::Hardcore => "Hardcore",
            Preset::Extreme => "Extreme",
        }
    }

    pub fn tiles(&self) -> [u32; 9] {
        match self {
            Preset::Peaceful => [1, 2, 3, 4, 5, 6, 7, 8, 0],
            Preset::Easy => [1, 2, 3, 4, 5, 6, 0, 7, 8],
            Preset::Normal => [1, 3, 6, 5, 0, 2, 4, 7, 8],
            Preset::Hardcore => [1, 6, 7, 5, 0, 3, 4, 8, 2],
            Preset::Extreme => [0, 7, 2, 4, 6, 1, 3, 5, 8],
        }
    }

    pub fn board(&self) -> Result<Board, PuzzleError> {
        Board::new(self.tiles().to_vec(), Self::SIZE)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(number) = wanted.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| Self::ALL.get(index).copied())
                .ok_or_else(|| PuzzleError::UnknownPreset(wanted.to_string()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PuzzleError::UnknownPreset(wanted.to_string()))
    }
}
