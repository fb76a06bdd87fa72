use clap::Parser;
use gps_solver::config::SolverConfig;
use gps_solver::engine::Board;
use gps_solver::heuristics::HeuristicKind;
use gps_solver::puzzle::FloodItProblem;
use gps_solver::solver::SearchEngine;
use gps_solver::strategy::Strategy;
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses start_seed + i
    #[clap(long)]
    start_seed: Option<u64>,

    /// TOML configuration file (its random_board section shapes the boards)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Rows of each board
    #[clap(long)]
    rows: Option<usize>,

    /// Columns of each board
    #[clap(long)]
    cols: Option<usize>,

    /// Number of colors on each board
    #[clap(long)]
    colors: Option<usize>,

    /// Log every search
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

/// One strategy/heuristic pairing and the results it collected.
struct Configuration {
    name: String,
    strategy: Strategy,
    heuristic: HeuristicKind,
    costs: Vec<u32>,
    explosions: Vec<u64>,
    elapsed: Duration,
    failures: usize,
}

impl Configuration {
    fn new(strategy: Strategy, heuristic: HeuristicKind) -> Self {
        let name = if strategy.is_informed() {
            format!("{}/{}", strategy, heuristic)
        } else {
            strategy.to_string()
        };
        Configuration {
            name,
            strategy,
            heuristic,
            costs: Vec::new(),
            explosions: Vec::new(),
            elapsed: Duration::ZERO,
            failures: 0,
        }
    }

    fn evaluate(&mut self, board: &Board) {
        let problem = FloodItProblem::new(board, self.heuristic);
        let mut engine = SearchEngine::new(problem, self.strategy);
        let started = Instant::now();
        engine.run();
        self.elapsed += started.elapsed();

        self.explosions.push(engine.explosion_count());
        match engine.solution_node() {
            Some(goal) => {
                self.costs.push(goal.cost());
                println!(
                    "  Configuration: {:<18}, Cost: {:<4}, Explosions: {}",
                    self.name,
                    goal.cost(),
                    engine.explosion_count()
                );
            }
            None => {
                self.failures += 1;
                println!("  Configuration: {:<18}, No solution found", self.name);
            }
        }
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    Some(values.sum::<f64>() / count as f64)
}

fn average_cost(configuration: &Configuration) -> Option<f64> {
    average(configuration.costs.iter().map(|&c| f64::from(c)))
}

fn average_explosions(configuration: &Configuration) -> Option<f64> {
    average(configuration.explosions.iter().map(|&e| e as f64))
}

fn configurations() -> Vec<Configuration> {
    let mut configurations = vec![Configuration::new(Strategy::Bfs, HeuristicKind::None)];
    configurations.extend(
        HeuristicKind::ALL
            .into_iter()
            .filter(|h| h.is_admissible())
            .map(|h| Configuration::new(Strategy::Astar, h)),
    );
    configurations.extend(
        HeuristicKind::ALL
            .into_iter()
            .map(|h| Configuration::new(Strategy::Greedy, h)),
    );
    configurations
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    init_tracing(&config, args.verbose);

    let shape = &mut config.random_board;
    shape.rows = args.rows.unwrap_or(shape.rows);
    shape.cols = args.cols.unwrap_or(shape.cols);
    shape.colors = args.colors.unwrap_or(shape.colors);
    shape.seed = args.start_seed.unwrap_or(shape.seed);
    config.validate()?;

    let mut configurations = configurations();
    let start_seed = config.random_board.seed;

    println!(
        "Starting heuristic evaluation for {} boards ({}x{}, {} colors)...",
        args.boards, config.random_board.rows, config.random_board.cols, config.random_board.colors
    );

    for board_idx in 0..args.boards {
        let current_seed = start_seed.wrapping_add(board_idx as u64);
        config.random_board.seed = current_seed;
        let board = config.random_board.generate()?;

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        info!(event = "evaluate_board", board = board_idx, seed = current_seed);

        for configuration in configurations.iter_mut() {
            configuration.evaluate(&board);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    configurations.sort_by(|a, b| {
        let key = |c: &Configuration| average_cost(c).unwrap_or(f64::INFINITY);
        key(a).total_cmp(&key(b))
    });

    for configuration in &configurations {
        match (average_cost(configuration), average_explosions(configuration)) {
            (Some(cost), Some(explosions)) => println!(
                "Configuration {:<18}: Average Cost = {:.2}, Average Explosions = {:.1}, Time = {:.3?}, Failures = {}",
                configuration.name, cost, explosions, configuration.elapsed, configuration.failures
            ),
            _ => println!("Configuration {}: No results recorded.", configuration.name),
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages() {
        let mut configuration = Configuration::new(Strategy::Astar, HeuristicKind::Colors);
        assert_eq!(configuration.name, "ASTAR/colors");
        assert_eq!(average_cost(&configuration), None);
        assert_eq!(average_explosions(&configuration), None);

        configuration.costs = vec![3, 4];
        configuration.explosions = vec![10, 21, u64::MAX];
        assert_eq!(average_cost(&configuration), Some(3.5));
        assert!(average_explosions(&configuration).unwrap() > 1e18);
    }

    #[test]
    fn test_configurations_cover_admissible_astar_and_every_greedy() {
        let names: Vec<String> = configurations().into_iter().map(|c| c.name).collect();
        assert_eq!(names[0], "BFS");
        assert!(names.contains(&"ASTAR/combined".to_string()));
        assert!(!names.contains(&"ASTAR/islands".to_string()));
        assert!(names.contains(&"GREEDY/islands".to_string()));
        assert_eq!(names.len(), 1 + 4 + 5);
    }
}
