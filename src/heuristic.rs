use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::error::PuzzleError;
use crate::puzzle::{Board, PuzzleConfig};

/// Cost-to-go estimate plugged into the search. All three are admissible and
/// consistent for unit move cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Always 0; the search degrades to uniform-cost search.
    Zero,
    /// Non-blank tiles not on their goal cell.
    Misplaced,
    /// Sum of row and column distances of non-blank tiles to their goal cells.
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Zero, Heuristic::Misplaced, Heuristic::Manhattan];

    /// Estimate for `board`, which must match `config`'s size.
    pub fn evaluate(&self, board: &Board, config: &PuzzleConfig) -> Result<usize, PuzzleError> {
        if board.size() != config.size() {
            return Err(PuzzleError::SizeMismatch {
                expected: config.size(),
                found: board.size(),
            });
        }

        Ok(self.estimate(board, config))
    }

    /// Unchecked `evaluate`; callers guarantee the sizes match.
    pub(crate) fn estimate(&self, board: &Board, config: &PuzzleConfig) -> usize {
        match self {
            Heuristic::Zero => 0,
            Heuristic::Misplaced => misplaced(board, config),
            Heuristic::Manhattan => manhattan(board, config),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Misplaced => "misplaced",
            Heuristic::Manhattan => "manhattan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Heuristic::Zero => "Uniform Cost Search",
            Heuristic::Misplaced => "A* with Misplaced Tile Heuristic",
            Heuristic::Manhattan => "A* with Manhattan Distance Heuristic",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "ucs" | "uniform" => Ok(Heuristic::Zero),
            "misplaced" => Ok(Heuristic::Misplaced),
            "manhattan" => Ok(Heuristic::Manhattan),
            other => Err(PuzzleError::UnknownHeuristic(other.to_string())),
        }
    }
}

fn misplaced(board: &Board, config: &PuzzleConfig) -> usize {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(index, &value)| value != 0 && config.goal_index(value) != index)
        .count()
}

fn manhattan(board: &Board, config: &PuzzleConfig) -> usize {
    let size = board.size();
    let mut distance = 0;

    for (index, &value) in board.tiles().iter().enumerate() {
        if value != 0 {
            let goal = config.goal_index(value);
            distance += (index / size).abs_diff(goal / size);
            distance += (index % size).abs_diff(goal % size);
        }
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    fn board(config: &PuzzleConfig, tiles: &[u32]) -> Board {
        config.board(tiles.to_vec()).unwrap()
    }

    /// Exact distance to the goal for every board within `max_depth` slides of it.
    fn distances_from_goal(config: &PuzzleConfig, max_depth: usize) -> HashMap<Board, usize> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();

        distances.insert(config.goal().clone(), 0);
        queue.push_back((config.goal().clone(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth == max_depth {
                continue;
            }
            for (next, _) in current.neighbors() {
                if !distances.contains_key(&next) {
                    distances.insert(next.clone(), depth + 1);
                    queue.push_back((next, depth + 1));
                }
            }
        }
        distances
    }

    #[test]
    fn goal_scores_zero() {
        let config = PuzzleConfig::new(3).unwrap();
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.estimate(config.goal(), &config), 0);
        }
    }

    #[test]
    fn known_values() {
        let config = PuzzleConfig::new(3).unwrap();

        let easy = board(&config, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert_eq!(Heuristic::Zero.estimate(&easy, &config), 0);
        assert_eq!(Heuristic::Misplaced.estimate(&easy, &config), 2);
        assert_eq!(Heuristic::Manhattan.estimate(&easy, &config), 2);

        let rotated = board(&config, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Heuristic::Misplaced.estimate(&rotated, &config), 8);
        assert_eq!(Heuristic::Manhattan.estimate(&rotated, &config), 12);
    }

    #[test]
    fn blank_is_not_counted() {
        let config = PuzzleConfig::new(2).unwrap();
        // only the blank and 3 swapped
        let one_off = board(&config, &[1, 2, 0, 3]);
        assert_eq!(Heuristic::Misplaced.estimate(&one_off, &config), 1);
        assert_eq!(Heuristic::Manhattan.estimate(&one_off, &config), 1);
    }

    #[test]
    fn admissible_on_every_2x2_board() {
        let config = PuzzleConfig::new(2).unwrap();
        let distances = distances_from_goal(&config, usize::MAX);
        assert_eq!(distances.len(), 12);

        for (state, &distance) in &distances {
            for heuristic in Heuristic::ALL {
                assert!(heuristic.estimate(state, &config) <= distance);
            }
        }
    }

    #[test]
    fn admissible_and_consistent_near_3x3_goal() {
        let config = PuzzleConfig::new(3).unwrap();
        let distances = distances_from_goal(&config, 12);

        for (state, &distance) in &distances {
            let misplaced = Heuristic::Misplaced.estimate(state, &config);
            let manhattan = Heuristic::Manhattan.estimate(state, &config);
            assert!(misplaced <= distance, "{:?}", state);
            assert!(manhattan <= distance, "{:?}", state);
            assert!(misplaced <= manhattan);

            for (next, _) in state.neighbors() {
                for heuristic in [Heuristic::Misplaced, Heuristic::Manhattan] {
                    assert!(heuristic.estimate(state, &config) <= 1 + heuristic.estimate(&next, &config));
                }
            }
        }
    }

    #[test]
    fn evaluate_rejects_other_sizes() {
        let config = PuzzleConfig::new(3).unwrap();
        let larger = Board::goal(4).unwrap();

        assert_eq!(
            Heuristic::Manhattan.evaluate(&larger, &config),
            Err(PuzzleError::SizeMismatch {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(Heuristic::Misplaced.evaluate(config.goal(), &config), Ok(0));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!("ucs".parse::<Heuristic>(), Ok(Heuristic::Zero));
        assert_eq!("misplaced".parse::<Heuristic>(), Ok(Heuristic::Misplaced));
        assert_eq!(
            "linear".parse::<Heuristic>(),
            Err(PuzzleError::UnknownHeuristic("linear".to_string()))
        );
    }
}
