use clap::Parser;
use gps_solver::config::SolverConfig;
use gps_solver::engine::{Game, Tile};
use gps_solver::heuristics::HeuristicKind;
use gps_solver::puzzle::{describe_path, FloodItProblem};
use gps_solver::solver::SearchEngine;
use gps_solver::strategy::Strategy;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file (its random_board section shapes the board)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Seed of the board; a random one is picked when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Log hint searches
    #[clap(short, long)]
    verbose: bool,
}

fn init_tracing(config: &SolverConfig, verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = config.log_directives(rust_log.as_deref(), verbose, "gps_solver=warn");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}

/// First paint of an optimal solution from the game's current board.
fn hint(game: &Game) -> Option<Tile> {
    let problem = FloodItProblem::new(game.board(), HeuristicKind::Combined);
    let mut engine = SearchEngine::new(problem, Strategy::Astar);
    engine.run();
    describe_path(&engine)?.first().copied()
}

fn play(mut game: Game) -> io::Result<()> {
    let colors: String = game.board().colors_present().iter().map(|t| t.to_char()).collect();

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.board().to_string_with_highlight(&game.board().flood_region()));

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 BOARD FLOODED! 🎉");
            println!("Total Steps: {}", game.steps());
            println!("---------------------");
            return Ok(());
        }

        print!("Enter a color ({}), or 'h' for a hint, 'u' to undo, 'q' to quit: ", colors);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(());
        }

        let trimmed_input = input.trim();

        match trimmed_input {
            "q" => {
                println!("Thanks for playing!");
                return Ok(());
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            "h" => match hint(&game) {
                Some(color) => println!("Hint: paint {}.", color),
                None => println!("No hint available."),
            },
            _ => {
                let mut chars = trimmed_input.chars();
                match (chars.next().and_then(Tile::from_char), chars.next()) {
                    (Some(color), None) => {
                        if game.process_move(color) {
                            println!("Painted {}.", color);
                        } else {
                            println!("Invalid move: the flood region is already {}.", color);
                        }
                    }
                    _ => println!(
                        "Invalid input. Use a color letter ({}), 'h', 'u', or 'q'.",
                        colors
                    ),
                }
            }
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    init_tracing(&config, args.verbose);

    config.random_board.seed = args.seed.unwrap_or_else(rand::random);
    let board = config.random_board.generate()?;

    println!("Welcome to Flood-It! (seed {})", config.random_board.seed);
    println!("Flood the whole board with one color, starting from the top-left corner.");
    play(Game::new_with_board(board))?;
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
