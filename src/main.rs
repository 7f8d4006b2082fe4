use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use crossterm::style::{style, Stylize};
use log::warn;
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use std::str::FromStr;

use npuzzle_solver::{
    search_with_config, Board, Heuristic, Preset, PuzzleConfig, PuzzleError, SearchOutcome,
    SearchReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("start").required(true).args(["tiles", "preset", "shuffle"])))]
struct Args {
    /// Side length of the puzzle (N for an NxN board)
    #[arg(short = 'n', long, default_value_t = 3)]
    size: usize,

    /// Start board as N*N numbers, 0 for the blank, e.g. "1 2 3 4 5 6 7 8 0"
    #[arg(short, long)]
    tiles: Option<String>,

    /// Built-in 3x3 puzzle: peaceful, easy, normal, hardcore, extreme (or 1-5)
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Start from a random solvable board
    #[arg(short, long)]
    shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, requires = "shuffle", conflicts_with_all = ["tiles", "preset"])]
    seed: Option<u64>,

    /// Searches to run: zero, misplaced, manhattan or all (comma separated)
    #[arg(short, long, value_delimiter = ',', default_value = "manhattan")]
    algorithm: Vec<Algorithm>,

    /// Print reports as JSON instead of the step-by-step solution
    #[arg(long)]
    json: bool,

    /// Skip printing every board along the solution
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Only(Heuristic),
    All,
}

impl FromStr for Algorithm {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Algorithm::All)
        } else {
            s.parse().map(Algorithm::Only)
        }
    }
}

/// Requested heuristics in order, without repeats.
fn heuristics(algorithms: &[Algorithm]) -> Vec<Heuristic> {
    let mut selected = Vec::new();
    for algorithm in algorithms {
        let expanded = match algorithm {
            Algorithm::Only(heuristic) => vec![*heuristic],
            Algorithm::All => Heuristic::ALL.to_vec(),
        };
        for heuristic in expanded {
            if !selected.contains(&heuristic) {
                selected.push(heuristic);
            }
        }
    }
    selected
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let board = start_board(&args)?;
    let config = PuzzleConfig::new(board.size())?;
    if board.size() > 3 {
        warn!(
            "{}x{} boards can take a very long time and a lot of memory to solve optimally",
            board.size(),
            board.size()
        );
    }

    if !args.json {
        println!("{}\n{}", style("Initial Puzzle:").bold(), board);
    }

    let mut reports = Vec::new();
    for heuristic in heuristics(&args.algorithm) {
        let outcome = search_with_config(&config, &board, heuristic)?;
        if !args.json {
            print_outcome(heuristic, &outcome, args.quiet);
        }
        reports.push(SearchReport::new(heuristic, &outcome));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn start_board(args: &Args) -> Result<Board> {
    if let Some(preset) = args.preset {
        if args.size != Preset::SIZE {
            bail!("Predefined puzzles are only available for 3x3 puzzles");
        }
        return Ok(preset.board()?);
    }

    if let Some(tiles) = &args.tiles {
        return Ok(Board::parse(tiles, args.size)?);
    }

    if !args.shuffle {
        bail!("Choose a start board with --tiles, --preset or --shuffle");
    }

    let board = match args.seed {
        Some(seed) => Board::shuffled(args.size, &mut StdRng::seed_from_u64(seed))?,
        None => Board::shuffled(args.size, &mut thread_rng())?,
    };
    Ok(board)
}

fn print_outcome(heuristic: Heuristic, outcome: &SearchOutcome, quiet: bool) {
    println!(
        "\n{}",
        style(format!("=== Running {} ===", heuristic.label())).bold()
    );

    match outcome.path() {
        Some(path) => {
            println!(
                "\nSolution depth: {}\n",
                style(outcome.depth().unwrap_or_default()).green()
            );
            if !quiet {
                for step in path {
                    println!(
                        "Move: {}   g(n)={}  h(n)={}  f(n)={}",
                        step.movement, step.g, step.h, step.f
                    );
                    println!("{}", step.board);
                }
            }
        }
        None => println!("{}", style("No solution found.").red()),
    }

    let stats = outcome.stats();
    println!(
        "Nodes expanded: {}, Max queue size: {}",
        stats.nodes_expanded, stats.max_frontier_size
    );
}
