//! algotrace command-line front end.
//!
//! Provides the `algotrace` binary for generating mazes, recording algorithm
//! traces as JSON and stepping through recorded traces in the terminal.
//! Uses the same `algotrace_engine` entry points a graphical front end
//! would, so a trace recorded here plays back identically there.

mod config;
mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use algotrace_core::{AlgorithmKind, GridInstance, Payload, Step};
use algotrace_engine::oracle;
use algotrace_engine::{generate, record, AlgorithmInput, GeneratorConfig, Playback};

/// Exit code for malformed arguments or input files.
const EXIT_INVALID_INPUT: i32 = 1;
/// Exit code for generation or recording failures.
const EXIT_FAILED: i32 = 2;
/// Exit code for file read/write errors.
const EXIT_IO: i32 = 3;

/// Algorithm trace recorder and player.
#[derive(Parser, Debug)]
#[command(name = "algotrace", about = "Record and replay algorithm traces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a solvable maze.
    Generate {
        #[arg(long)]
        width: usize,

        #[arg(long)]
        height: usize,

        /// Number of treasures to place.
        #[arg(long, default_value_t = 0)]
        targets: usize,

        /// Wall probability per cell, in [0, 1).
        #[arg(long, default_value_t = 0.25)]
        density: f64,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Retry cap (default: $ALGOTRACE_MAX_ATTEMPTS or 1000).
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Print JSON instead of the ASCII layout.
        #[arg(long)]
        json: bool,
    },

    /// Record a trace and write it as JSON.
    Record {
        /// Algorithm name, e.g. `nqueens-placer`.
        algorithm: String,

        /// Algorithm input: a number, a text, or for the maze solver either
        /// `WxH[:seed]` or a path to an ASCII layout file.
        input: String,

        /// Recursion depth limit (default: $ALGOTRACE_MAX_DEPTH or 1024).
        #[arg(long)]
        max_depth: Option<usize>,

        /// Step limit (default: $ALGOTRACE_MAX_STEPS or 1000000).
        #[arg(long)]
        max_steps: Option<usize>,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Print steps of a recorded trace.
    Play {
        /// Trace JSON file.
        trace: PathBuf,

        /// First step to print.
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Number of steps to print.
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Start at the given solution (0-based) instead of `--from`.
        #[arg(long)]
        solution: Option<usize>,
    },

    /// Check an ASCII maze layout and print its shortest path.
    Solve {
        /// ASCII layout file.
        layout: PathBuf,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Generate {
            width,
            height,
            targets,
            density,
            seed,
            max_attempts,
            json,
        } => run_generate(width, height, targets, density, seed, max_attempts, json),
        Commands::Record {
            algorithm,
            input,
            max_depth,
            max_steps,
            output,
            pretty,
        } => run_record(&algorithm, &input, max_depth, max_steps, output, pretty),
        Commands::Play {
            trace,
            from,
            count,
            solution,
        } => run_play(&trace, from, count, solution),
        Commands::Solve { layout } => run_solve(&layout),
    };
    process::exit(exit_code);
}

fn run_generate(
    width: usize,
    height: usize,
    targets: usize,
    density: f64,
    seed: u64,
    max_attempts: Option<u32>,
    json: bool,
) -> i32 {
    let max_attempts = match config::max_attempts(max_attempts) {
        Ok(n) => n,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return EXIT_INVALID_INPUT;
        }
    };
    let config = GeneratorConfig::new(width, height)
        .with_targets(targets)
        .with_wall_density(density)
        .with_seed(seed)
        .with_max_attempts(max_attempts);

    let grid = match generate(&config) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILED;
        }
    };

    if json {
        match serde_json::to_string_pretty(&grid) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize grid: {}", e);
                return EXIT_FAILED;
            }
        }
    } else {
        println!("{}", grid);
        println!("id: {}  walls: {}  targets: {}", grid.id(), grid.wall_count(), grid.targets().len());
    }
    0
}

fn run_record(
    algorithm: &str,
    input: &str,
    max_depth: Option<usize>,
    max_steps: Option<usize>,
    output: Option<PathBuf>,
    pretty: bool,
) -> i32 {
    let kind = match algorithm.parse::<AlgorithmKind>() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_INVALID_INPUT;
        }
    };
    let recorder_config = match config::recorder_config(max_depth, max_steps) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return EXIT_INVALID_INPUT;
        }
    };
    let input = match parse_input(kind, input) {
        Ok(input) => input,
        Err((code, msg)) => {
            eprintln!("Error: {}", msg);
            return code;
        }
    };

    let trace = match record(kind, input, &recorder_config) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILED;
        }
    };

    let encoded = if pretty {
        serde_json::to_string_pretty(&trace)
    } else {
        serde_json::to_string(&trace)
    };
    let encoded = match encoded {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to serialize trace: {}", e);
            return EXIT_FAILED;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, encoded) {
                eprintln!("Error: failed to write '{}': {}", path.display(), e);
                return EXIT_IO;
            }
            eprintln!(
                "Recorded {} steps, {} solution(s) to {}",
                trace.len(),
                trace.solutions().len(),
                path.display()
            );
        }
        None => println!("{}", encoded),
    }
    0
}

/// Turns the raw `input` argument into the shape `kind` expects.
fn parse_input(kind: AlgorithmKind, raw: &str) -> Result<AlgorithmInput, (i32, String)> {
    let number = |raw: &str| {
        raw.trim()
            .parse::<u64>()
            .map_err(|_| (EXIT_INVALID_INPUT, format!("{kind} expects a number, got '{raw}'")))
    };

    match kind {
        AlgorithmKind::MazeBacktrackingSolver => parse_maze(raw).map(AlgorithmInput::Grid),
        AlgorithmKind::NqueensPlacer => {
            let size = number(raw)?;
            usize::try_from(size)
                .map(AlgorithmInput::BoardSize)
                .map_err(|_| (EXIT_INVALID_INPUT, format!("board size {size} is too large")))
        }
        AlgorithmKind::PermutationGenerator | AlgorithmKind::PalindromeChecker => {
            Ok(AlgorithmInput::Text(raw.to_string()))
        }
        AlgorithmKind::Factorial | AlgorithmKind::Fibonacci => number(raw).map(AlgorithmInput::Number),
    }
}

/// `WxH` or `WxH:seed` generates a maze; anything else is a layout file.
fn parse_maze(raw: &str) -> Result<GridInstance, (i32, String)> {
    if let Some((width, height, seed)) = parse_dimensions(raw) {
        let config = GeneratorConfig::new(width, height)
            .with_wall_density(0.3)
            .with_seed(seed);
        return generate(&config).map_err(|e| (EXIT_FAILED, e.to_string()));
    }
    load_layout(Path::new(raw))
}

fn parse_dimensions(raw: &str) -> Option<(usize, usize, u64)> {
    let (dims, seed) = match raw.split_once(':') {
        Some((dims, seed)) => (dims, seed.parse().ok()?),
        None => (raw, 0),
    };
    let (width, height) = dims.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?, seed))
}

fn load_layout(path: &Path) -> Result<GridInstance, (i32, String)> {
    let text = fs::read_to_string(path)
        .map_err(|e| (EXIT_IO, format!("failed to read '{}': {}", path.display(), e)))?;
    GridInstance::from_ascii(&text).map_err(|e| (EXIT_INVALID_INPUT, e.to_string()))
}

fn run_play(path: &Path, from: usize, count: usize, solution: Option<usize>) -> i32 {
    let json = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", path.display(), e);
            return EXIT_IO;
        }
    };
    let mut playback = match Playback::from_json(&json) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_INVALID_INPUT;
        }
    };

    let seeked = match solution {
        Some(n) => playback.seek_solution(n).map(|_| ()),
        None => playback.seek(from).map(|_| ()),
    };
    if let Err(e) = seeked {
        eprintln!("Error: {}", e);
        return EXIT_INVALID_INPUT;
    }

    tracing::debug!(path = %path.display(), cursor = playback.current_index(), "trace loaded");
    let trace = playback.trace();
    println!(
        "{} trace {} ({} steps, {} solution(s))",
        trace.algorithm(),
        trace.instance_id(),
        trace.len(),
        trace.solutions().len()
    );

    for printed in 0..count {
        if printed > 0 && !matches!(playback.step_forward(), algotrace_engine::Navigation::Moved { .. }) {
            break;
        }
        println!("{}", describe(playback.current_step()));
    }
    if playback.is_complete() {
        println!("-- end of trace --");
    }
    0
}

fn run_solve(path: &Path) -> i32 {
    let grid = match load_layout(path) {
        Ok(grid) => grid,
        Err((code, msg)) => {
            eprintln!("Error: {}", msg);
            return code;
        }
    };

    println!("{}", grid);
    let reachable = oracle::reachable_set(&grid);
    println!("reachable cells: {}", reachable.len());

    let missing = oracle::unreachable_targets(&grid);
    if !missing.is_empty() {
        let cells: Vec<String> = missing.iter().map(ToString::to_string).collect();
        println!("unreachable targets: {}", cells.join(", "));
    }

    match oracle::shortest_path(&grid, grid.start(), grid.exit()) {
        Some(path) => println!("shortest path to exit: {} moves", path.len() - 1),
        None => println!("exit is unreachable"),
    }

    if oracle::is_solvable(&grid) {
        println!("solvable");
        0
    } else {
        println!("not solvable");
        EXIT_FAILED
    }
}

/// One-line rendering of a step, indented by recursion depth.
fn describe(step: &Step) -> String {
    let position = step
        .position
        .map(|cell| format!(" at {}", cell))
        .unwrap_or_default();
    let detail = match &step.payload {
        Payload::None => String::new(),
        Payload::Frame { stack, value } => {
            let frame = stack.last().map(String::as_str).unwrap_or("");
            match value {
                Some(v) => format!(" {} = {}", frame, v),
                None => format!(" {}", frame),
            }
        }
        Payload::Board { queens } => format!(" queens={:?}", queens),
        Payload::Compare {
            left,
            right,
            left_index,
            right_index,
        } => format!(" '{}'[{}] vs '{}'[{}]", left, left_index, right, right_index),
        Payload::Path { cells } => format!(" path length {}", cells.len()),
        Payload::Text { value } => format!(" \"{}\"", value),
        Payload::Number { value } => format!(" {}", value),
    };
    format!(
        "{:>6}  {}{:?}{}{}",
        step.sequence_index,
        "  ".repeat(step.depth),
        step.kind,
        position,
        detail
    )
}
