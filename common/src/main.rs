use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use trapgrid::io::{output_path, read_grid, write_grid};
use trapgrid::samples::{self, RandomOptions};
use trapgrid::search::{Pruning, SelectionKind, ValueOrder};
use trapgrid::*;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search statistics and per-phase details.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a grid file with one or all strategies.
    Solve(SolveArgs),
    /// Write the reference puzzles as input_<n>.txt into a directory.
    Samples {
        dir: PathBuf,
    },
    /// Generate a random satisfiable puzzle.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Comma-separated grid: T trap, G gem, _ unknown, digits for clues.
    input: PathBuf,

    /// Where to write the result. Strategies other than `sat` append their
    /// name to the file stem. Defaults to printing only.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = StrategyChoice::All)]
    strategy: StrategyChoice,

    /// Cell visiting order of the backtracking strategy.
    #[arg(long, value_enum, default_value_t = SelectionKind::RowMajor)]
    order: SelectionKind,

    /// Try trap before gem when backtracking.
    #[arg(long)]
    trap_first: bool,

    /// Only re-check the clues next to each new assignment when backtracking.
    #[arg(long)]
    local_pruning: bool,

    /// Skip the propagation pass.
    #[arg(long)]
    no_propagate: bool,

    /// Most variables the enumeration strategy accepts.
    #[arg(long, default_value_t = search::DEFAULT_ENUMERATION_LIMIT)]
    enumeration_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StrategyChoice {
    Sat,
    Enumerate,
    Backtrack,
    ClauseSearch,
    All,
}

impl StrategyChoice {
    fn kinds(self) -> Vec<StrategyKind> {
        match self {
            StrategyChoice::Sat => vec![StrategyKind::Sat],
            StrategyChoice::Enumerate => vec![StrategyKind::Enumerate],
            StrategyChoice::Backtrack => vec![StrategyKind::Backtrack],
            StrategyChoice::ClauseSearch => vec![StrategyKind::ClauseSearch],
            StrategyChoice::All => StrategyKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long, default_value_t = 8)]
    rows: usize,

    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Probability that a non-clue cell hides a trap.
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Probability that a cell is revealed as a clue.
    #[arg(long, default_value_t = 0.35)]
    clue_ratio: f64,

    /// Seed for a reproducible puzzle.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the puzzle here instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Solve(args) => run_solve(&args),
        Command::Samples { dir } => write_samples(&dir),
        Command::Generate(args) => generate(&args),
    }
}

fn configure_logging(verbose: bool, quiet: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
}

fn run_solve(args: &SolveArgs) -> anyhow::Result<()> {
    let grid = read_grid(&args.input)?;
    info!(
        "Processing {} ({}x{}, {} unknown cells)",
        args.input.display(),
        grid.rows(),
        grid.cols(),
        grid.count_unknown()
    );

    let config = StrategyConfig {
        order: args.order,
        values: if args.trap_first {
            ValueOrder::TrapFirst
        } else {
            ValueOrder::GemFirst
        },
        pruning: if args.local_pruning {
            Pruning::Local
        } else {
            Pruning::Global
        },
        enumeration_limit: args.enumeration_limit,
    };
    let options = SolveOptions {
        propagate: !args.no_propagate,
    };

    for kind in args.strategy.kinds() {
        let mut strategy = kind.build(&config);
        let start = Instant::now();
        let result = solve(&grid, strategy.as_mut(), &options);
        let elapsed = start.elapsed();

        // On failure the unsolved grid is written, so the output always exists.
        let written = match &result {
            Ok(Outcome::Solved(solved)) => {
                println!("{}: solved in {:.4} seconds", strategy.name(), elapsed.as_secs_f64());
                print_grid(solved);
                solved
            }
            Ok(Outcome::NoSolution) => {
                println!("{}: no solution ({:.4} seconds)", strategy.name(), elapsed.as_secs_f64());
                &grid
            }
            Err(SolveError::InvalidGrid(violation)) => {
                println!("{}: grid is invalid: {violation}", strategy.name());
                &grid
            }
            Err(err) => {
                warn!("{}: {err}", strategy.name());
                &grid
            }
        };

        if let Some(path) = &args.output {
            let path = output_path(path, kind);
            write_grid(&path, written)?;
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn write_samples(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (i, grid) in samples::canned().iter().enumerate() {
        let path = dir.join(format!("input_{}.txt", i + 1));
        write_grid(&path, grid)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.rows > 0 && args.cols > 0, "grid must have at least one cell");
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.density) && (0.0..=1.0).contains(&args.clue_ratio),
        "density and clue ratio must lie in [0, 1]"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let options = RandomOptions {
        density: args.density,
        clue_ratio: args.clue_ratio,
    };
    let generated = samples::random(args.rows, args.cols, options, &mut rng);

    match &args.output {
        Some(path) => {
            write_grid(path, &generated.puzzle)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", generated.puzzle),
    }
    Ok(())
}

fn print_grid(grid: &Grid) {
    // Print header
    print!("   ");
    for x in 0..grid.cols() {
        print!("{:^3}", x);
    }
    println!("\n  +{}", "---".repeat(grid.cols()));

    for (y, row) in grid.cells().iter().enumerate() {
        print!("{:^2}|", y);
        for cell in row {
            let display = match cell {
                Cell::Trap => " T ".to_string(),
                Cell::Gem => " G ".to_string(),
                Cell::Unknown => " ■ ".to_string(),
                Cell::Clue(k) => format!(" {} ", k),
            };
            print!("{}", display);
        }
        println!();
    }
    println!();
}
