use log::{debug, info, trace};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use crate::error::PuzzleError;
use crate::heuristic::Heuristic;
use crate::puzzle::{Board, Move, PuzzleConfig};

/// Immutable node in the search tree. Children share their parent through `Rc`,
/// so a parent lives as long as any descendant that reaches it.
#[derive(Debug)]
pub struct SearchNode {
    board: Board,
    parent: Option<Rc<SearchNode>>,
    g: usize,
    h: usize,
    f: usize,
    movement: Move,
}

impl SearchNode {
    fn new(board: Board, parent: Option<Rc<SearchNode>>, g: usize, h: usize, movement: Move) -> Self {
        Self {
            board,
            parent,
            g,
            h,
            f: g + h,
            movement,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<&SearchNode> {
        self.parent.as_deref()
    }

    pub fn g(&self) -> usize {
        self.g
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn f(&self) -> usize {
        self.f
    }

    pub fn movement(&self) -> Move {
        self.movement
    }
}

/// Frontier entry ordered by `f`, then by creation order.
struct FrontierEntry {
    f: usize,
    order: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.order == other.order
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops the smallest f, earliest created first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub max_frontier_size: usize,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Solved {
        goal: Rc<SearchNode>,
        stats: SearchStats,
    },
    /// Frontier ran dry: no solution exists from the start board.
    Exhausted { stats: SearchStats },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved { .. })
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Solved { stats, .. } | SearchOutcome::Exhausted { stats } => *stats,
        }
    }

    pub fn goal(&self) -> Option<&SearchNode> {
        match self {
            SearchOutcome::Solved { goal, .. } => Some(goal.as_ref()),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// Number of moves in the solution.
    pub fn depth(&self) -> Option<usize> {
        self.goal().map(SearchNode::g)
    }

    pub fn path(&self) -> Option<Vec<PathStep>> {
        self.goal().map(reconstruct)
    }

    /// Slides from start to goal, without the leading `Start`.
    pub fn moves(&self) -> Option<Vec<Move>> {
        self.path()
            .map(|path| path.iter().skip(1).map(|step| step.movement).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub board: Board,
    pub movement: Move,
    pub g: usize,
    pub h: usize,
    pub f: usize,
}

impl From<&SearchNode> for PathStep {
    fn from(node: &SearchNode) -> Self {
        Self {
            board: node.board.clone(),
            movement: node.movement,
            g: node.g,
            h: node.h,
            f: node.f,
        }
    }
}

/// Walks parent links back to the root and returns the steps start-first.
pub fn reconstruct(goal: &SearchNode) -> Vec<PathStep> {
    let mut path = Vec::with_capacity(goal.g + 1);
    let mut current = Some(goal);

    while let Some(node) = current {
        path.push(PathStep::from(node));
        current = node.parent();
    }

    path.reverse();
    path
}

/// Best-first search from `start` to the standard goal of the same size.
pub fn search(start: &Board, heuristic: Heuristic) -> SearchOutcome {
    let config = PuzzleConfig::for_board(start);
    best_first(&config, start, heuristic)
}

/// Like [`search`] but reuses a prepared config, e.g. across heuristics.
pub fn search_with_config(
    config: &PuzzleConfig,
    start: &Board,
    heuristic: Heuristic,
) -> Result<SearchOutcome, PuzzleError> {
    if start.size() != config.size() {
        return Err(PuzzleError::SizeMismatch {
            expected: config.size(),
            found: start.size(),
        });
    }

    Ok(best_first(config, start, heuristic))
}

fn best_first(config: &PuzzleConfig, start: &Board, heuristic: Heuristic) -> SearchOutcome {
    let mut frontier = BinaryHeap::new();
    // Best g seen per board. Not a closed set: a cheaper path re-queues the board.
    let mut best_g: HashMap<Board, usize> = HashMap::new();
    let mut order: u64 = 0;
    let mut stats = SearchStats {
        nodes_expanded: 0,
        max_frontier_size: 1,
    };

    let root = SearchNode::new(
        start.clone(),
        None,
        0,
        heuristic.estimate(start, config),
        Move::Start,
    );
    debug!(
        "{} search on {}x{} board {:?}, h={}",
        heuristic.name(),
        config.size(),
        config.size(),
        start.tiles(),
        root.h
    );

    best_g.insert(start.clone(), 0);
    frontier.push(FrontierEntry {
        f: root.f,
        order,
        node: Rc::new(root),
    });

    while let Some(FrontierEntry { node: current, .. }) = frontier.pop() {
        if config.is_goal(&current.board) {
            info!(
                "{} search solved at depth {}: {} nodes expanded, max frontier {}",
                heuristic.name(),
                current.g,
                stats.nodes_expanded,
                stats.max_frontier_size
            );
            return SearchOutcome::Solved {
                goal: current,
                stats,
            };
        }

        stats.nodes_expanded += 1;
        trace!("expanding g={} h={} {:?}", current.g, current.h, current.board.tiles());

        let new_g = current.g + 1;
        for (neighbor, movement) in current.board.neighbors() {
            let improves = best_g.get(&neighbor).map_or(true, |&known| new_g < known);
            if !improves {
                continue;
            }

            let h = heuristic.estimate(&neighbor, config);
            best_g.insert(neighbor.clone(), new_g);
            order += 1;

            let child = SearchNode::new(neighbor, Some(Rc::clone(&current)), new_g, h, movement);
            frontier.push(FrontierEntry {
                f: child.f,
                order,
                node: Rc::new(child),
            });
            stats.max_frontier_size = stats.max_frontier_size.max(frontier.len());
        }
    }

    info!(
        "{} search exhausted: {} nodes expanded, max frontier {}",
        heuristic.name(),
        stats.nodes_expanded,
        stats.max_frontier_size
    );
    SearchOutcome::Exhausted { stats }
}

/// Flat summary of one search, for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub heuristic: Heuristic,
    pub solved: bool,
    pub depth: Option<usize>,
    pub moves: Vec<Move>,
    #[serde(flatten)]
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn new(heuristic: Heuristic, outcome: &SearchOutcome) -> Self {
        Self {
            heuristic,
            solved: outcome.is_solved(),
            depth: outcome.depth(),
            moves: outcome.moves().unwrap_or_default(),
            stats: outcome.stats(),
        }
    }
}
