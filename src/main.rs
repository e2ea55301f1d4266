//! Pacman-Search: graph search and game-tree agents for a Pacman maze.
//!
//! ## Usage
//!
//! - `pacman-search` - Show a demo
//! - `pacman-search search -l tinyMaze -p position -a astar` - Plan a route and print it
//! - `pacman-search play -l minimaxClassic -g alphabeta -d 3` - Play a game against random ghosts

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use pacman_search::agents::{
    ClosestDotSearchAgent, HeuristicKind, ProblemKind, SearchAlgorithm, plan,
};
use pacman_search::constants::{DEFAULT_DEPTH, DEFAULT_MAX_MOVES};
use pacman_search::evaluation::{better_evaluation, score_evaluation};
use pacman_search::game::{Agent, GameState, run_game};
use pacman_search::layout::Layout;
use pacman_search::multiagent::{
    AlphaBetaAgent, EvaluationFn, ExpectimaxAgent, MinimaxAgent, RandomGhost, ReflexAgent,
};
use pacman_search::pacman::PacmanState;

/// Pacman-Search: graph search and game-tree agents for a Pacman maze
#[derive(Parser)]
#[command(name = "pacman-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route with graph search and print it
    Search {
        /// Built-in layout name or path to a layout file
        #[arg(short, long, default_value = "tinyMaze")]
        layout: String,
        #[arg(short, long, value_enum, default_value_t = ProblemKind::Position)]
        problem: ProblemKind,
        #[arg(short, long, value_enum, default_value_t = SearchAlgorithm::BreadthFirst)]
        algorithm: SearchAlgorithm,
        #[arg(long, value_enum, default_value_t = HeuristicKind::Problem)]
        heuristic: HeuristicKind,
    },
    /// Play a game of Pacman against random ghosts
    Play {
        /// Built-in layout name or path to a layout file
        #[arg(short, long, default_value = "minimaxClassic")]
        layout: String,
        #[arg(short = 'g', long, value_enum, default_value_t = PacmanKind::AlphaBeta)]
        agent: PacmanKind,
        /// Search depth in plies for the game-tree agents
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
        #[arg(short, long, value_enum, default_value_t = EvaluationKind::Score)]
        evaluation: EvaluationKind,
        /// Maximum number of ghosts taken from the layout
        #[arg(short = 'k', long)]
        ghosts: Option<usize>,
        /// Seed for the random agents
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Give up after this many agent moves
        #[arg(short, long, default_value_t = DEFAULT_MAX_MOVES)]
        max_moves: usize,
    },
    /// Run a simple demo of the agents
    Demo,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PacmanKind {
    Reflex,
    Minimax,
    #[value(name = "alphabeta")]
    AlphaBeta,
    Expectimax,
    ClosestDot,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EvaluationKind {
    /// The game score
    Score,
    /// Score adjusted for food distance and nearby ghosts
    Better,
}

impl EvaluationKind {
    fn function(self) -> EvaluationFn<PacmanState> {
        match self {
            EvaluationKind::Score => score_evaluation,
            EvaluationKind::Better => better_evaluation,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search {
            layout,
            problem,
            algorithm,
            heuristic,
        }) => run_search(&layout, problem, algorithm, heuristic),
        Some(Commands::Play {
            layout,
            agent,
            depth,
            evaluation,
            ghosts,
            seed,
            max_moves,
        }) => {
            let layout = load_layout(&layout)?;
            let state = PacmanState::with_ghost_limit(&layout, ghosts.unwrap_or(usize::MAX));
            let pacman = pacman_agent(agent, depth, evaluation.function(), seed);
            let result = play(state, pacman, seed, max_moves)?;
            println!("{result}");
            Ok(())
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn load_layout(name: &str) -> Result<Layout> {
    Layout::load(name).with_context(|| format!("failed to load layout {name:?}"))
}

fn run_search(
    layout: &str,
    problem: ProblemKind,
    algorithm: SearchAlgorithm,
    heuristic: HeuristicKind,
) -> Result<()> {
    let state = PacmanState::new(&load_layout(layout)?);
    let result = plan(&state, problem, algorithm, heuristic);
    if result.actions.is_empty() {
        bail!("no route found on {layout}");
    }

    let route: Vec<String> = result.actions.iter().map(ToString::to_string).collect();
    println!("{}", route.join(" "));
    println!("cost {}, {} nodes expanded", result.cost, result.expanded);
    Ok(())
}

fn pacman_agent(
    kind: PacmanKind,
    depth: usize,
    evaluation: EvaluationFn<PacmanState>,
    seed: u64,
) -> Box<dyn Agent<PacmanState>> {
    match kind {
        PacmanKind::Reflex => Box::new(ReflexAgent::new(seed)),
        PacmanKind::Minimax => Box::new(MinimaxAgent::new(depth, evaluation)),
        PacmanKind::AlphaBeta => Box::new(AlphaBetaAgent::new(depth, evaluation)),
        PacmanKind::Expectimax => Box::new(ExpectimaxAgent::new(depth, evaluation)),
        PacmanKind::ClosestDot => Box::new(ClosestDotSearchAgent::new()),
    }
}

/// Play `pacman` against one random ghost per ghost in `state`.
fn play(
    state: PacmanState,
    pacman: Box<dyn Agent<PacmanState>>,
    seed: u64,
    max_moves: usize,
) -> Result<PacmanState> {
    let mut agents = vec![pacman];
    for index in 1..state.num_agents() {
        agents.push(Box::new(RandomGhost::new(index, seed.wrapping_add(index as u64))));
    }

    let end = run_game(state, &mut agents, max_moves).context("game aborted")?;
    let outcome = if end.is_win() {
        "win"
    } else if end.is_lose() {
        "loss"
    } else {
        "unfinished"
    };
    info!("{outcome} with score {}", end.score());
    Ok(end)
}

fn run_demo() -> Result<()> {
    println!("Pacman-Search: graph search and game-tree agents\n");

    // Demo 1: the four graph searches on tinyMaze
    println!("=== Search Demo ===");
    let state = PacmanState::new(&load_layout("tinyMaze")?);
    println!("{state}\n");
    for algorithm in SearchAlgorithm::value_variants() {
        let result = plan(&state, ProblemKind::Position, *algorithm, HeuristicKind::Problem);
        println!(
            "{algorithm:?}: cost {}, {} nodes expanded",
            result.cost, result.expanded
        );
    }

    // Demo 2: eating every dot on tinySearch
    println!("\n=== Food Search Demo ===");
    let state = PacmanState::new(&load_layout("tinySearch")?);
    let result = plan(&state, ProblemKind::Food, SearchAlgorithm::AStar, HeuristicKind::Problem);
    println!("A*: cost {}, {} nodes expanded", result.cost, result.expanded);

    // Demo 3: alpha-beta against a random ghost
    println!("\n=== Alpha-Beta Demo ===");
    let state = PacmanState::new(&load_layout("minimaxClassic")?);
    let agent = Box::new(AlphaBetaAgent::<PacmanState>::new(3, better_evaluation));
    let end = play(state, agent, 1, DEFAULT_MAX_MOVES)?;
    println!("{end}");
    Ok(())
}
