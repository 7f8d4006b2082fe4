use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Puzzle size must be at least 2, got {0}")]
    SizeTooSmall(usize),
    #[error("Malformed board: {0}")]
    MalformedBoard(String),
    #[error("Invalid tile value: {0:?}")]
    InvalidTile(String),
    #[error("Board is {found}x{found} but the search is configured for {expected}x{expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("Unknown heuristic: {0}")]
    UnknownHeuristic(String),
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}
