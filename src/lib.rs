//! Optimal N-puzzle solver.
//!
//! One best-first search engine drives uniform-cost search and A* with the
//! misplaced-tile or Manhattan-distance heuristic. Ties on `f` go to the node
//! created first, so results are reproducible run to run.

pub mod error;
pub mod heuristic;
pub mod preset;
pub mod puzzle;
pub mod search;

pub use error::PuzzleError;
pub use heuristic::Heuristic;
pub use preset::Preset;
pub use puzzle::{make_goal, Board, Move, PuzzleConfig};
pub use search::{
    reconstruct, search, search_with_config, PathStep, SearchNode, SearchOutcome, SearchReport,
    SearchStats,
};
