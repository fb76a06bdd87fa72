use clap::Parser;
use gps_solver::config::SolverConfig;
use gps_solver::engine::Board;
use gps_solver::heuristics::HeuristicKind;
use gps_solver::puzzle::{describe_path, FloodItProblem};
use gps_solver::solver::SearchEngine;
use gps_solver::strategy::Strategy;
use gps_solver::utils::board_from_file;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a board file (one row of tile letters RGBYPC per line).
    /// A seeded random board is generated when omitted.
    board_file: Option<PathBuf>,

    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Search strategy
    #[clap(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Heuristic used by informed strategies
    #[clap(long, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Rows of the random board
    #[clap(long)]
    rows: Option<usize>,

    /// Columns of the random board
    #[clap(long)]
    cols: Option<usize>,

    /// Number of colors on the random board
    #[clap(long)]
    colors: Option<usize>,

    /// Seed of the random board
    #[clap(long)]
    seed: Option<u64>,

    /// Log search passes
    #[clap(short, long)]
    verbose: bool,
}

fn init_tracing(config: &SolverConfig, verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = config.log_directives(rust_log.as_deref(), verbose, "gps_solver=info");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<SolverConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(heuristic) = args.heuristic {
        config.heuristic = heuristic;
    }
    let board = &mut config.random_board;
    board.rows = args.rows.unwrap_or(board.rows);
    board.cols = args.cols.unwrap_or(board.cols);
    board.colors = args.colors.unwrap_or(board.colors);
    board.seed = args.seed.unwrap_or(board.seed);
    config.validate()?;
    Ok(config)
}

fn load_board(args: &Args, config: &SolverConfig) -> Result<Board, Box<dyn Error>> {
    match &args.board_file {
        Some(path) => {
            let board = board_from_file(path)?;
            println!("Loaded board from {}\n", path.display());
            Ok(board)
        }
        None => {
            let random = &config.random_board;
            let board = random.generate()?;
            println!(
                "Generated {}x{} board with {} colors (seed {})\n",
                random.rows, random.cols, random.colors, random.seed
            );
            Ok(board)
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args)?;
    init_tracing(&config, args.verbose);

    let board = load_board(&args, &config)?;
    println!("Initial board state:\n{}\n", board);

    let problem = FloodItProblem::new(&board, config.heuristic);
    let mut engine = SearchEngine::new(problem, config.strategy);
    println!(
        "Searching with strategy {} and heuristic {}...\n",
        engine.strategy(),
        engine.problem().heuristic_kind()
    );
    let started = Instant::now();
    engine.run();
    let elapsed = started.elapsed();

    match (engine.solution_node(), describe_path(&engine)) {
        (Some(goal), Some(paints)) => {
            println!("Solution found:\n");
            println!("Paints ({}):", paints.len());
            if paints.is_empty() {
                println!("  No paints needed.");
            }
            for (i, color) in paints.iter().enumerate() {
                println!("  Move {}: {}", i + 1, color);
            }
            println!("Cost: {}, depth: {}", goal.cost(), goal.depth());
            println!(
                "Final board state:\n{}\n",
                engine.problem().graph().board_for(goal.state())
            );
        }
        _ => println!("No solution found.\n"),
    }

    println!("Explosions: {}", engine.explosion_count());
    println!("Frontier size: {}", engine.frontier().len());
    println!("Closed size: {}", engine.closed().len());
    println!("Elapsed: {:.3?}", elapsed);
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
