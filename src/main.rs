//! `network-distance` command line interface.
//!
//! # Commands
//!
//! - `distance <X> <Y>`: network distance between two weight matrices, each
//!   given as a file path or as an inline literal such as `"1,2;3,4"` or
//!   `"[[1,2],[3,4]]"`
//! - `correspondences <R> <C>`: list the valid correspondences between two
//!   node sets
//! - `sample`: the distance between two fixed 3x3 sample matrices
//!
//! Exit codes: 0 success, 1 malformed input, 2 usage, 3 dimension error,
//! 4 numeric error, 5 resource exhaustion.

use clap::{Args, Parser, Subcommand};
use network_distance::input::{load_matrix, parse_matrix, Format, InputOptions};
use network_distance::{
    correspondences, DistanceConfig, ErrorKind, NetworkDistance, Result, WeightMatrix,
    DEFAULT_MAX_CELLS,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_PRECISION: usize = 12;

const SAMPLE_X: [[f64; 3]; 3] = [[2.0, 4.0, 8.0], [5.0, 6.0, 3.0], [10.0, 3.0, 6.0]];
const SAMPLE_Y: [[f64; 3]; 3] = [[7.0, 6.0, 3.0], [9.0, 2.0, 9.0], [10.0, 2.0, 3.0]];

/// Network distance between weighted graphs
#[derive(Parser)]
#[command(name = "network-distance")]
#[command(version)]
#[command(about = "Network distance between two weighted graphs given as weight matrices")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the network distance between two weight matrices
    Distance(DistanceArgs),
    /// List the correspondences between ROWS and COLS nodes
    Correspondences {
        rows: usize,
        cols: usize,
        /// Only print how many there are
        #[arg(long)]
        count: bool,
    },
    /// Compute the distance between the two built-in sample matrices
    Sample {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct DistanceArgs {
    /// First weight matrix: a file path or an inline literal
    #[arg(allow_hyphen_values = true)]
    first: String,

    /// Second weight matrix: a file path or an inline literal
    #[arg(allow_hyphen_values = true)]
    second: String,

    /// Input format: auto, text, json or gml
    #[arg(long, default_value_t = Format::Auto)]
    format: Format,

    /// Weight of node pairs without an edge in GML input
    #[arg(long, default_value_t = 0.0)]
    absent_weight: f64,

    #[command(flatten)]
    search: SearchArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct SearchArgs {
    /// Refuse inputs whose node counts multiply to more than this
    #[arg(long, default_value_t = DEFAULT_MAX_CELLS)]
    max_cells: usize,

    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Evaluate correspondences on all cores
    #[arg(long)]
    parallel: bool,
}

impl SearchArgs {
    fn config(&self) -> DistanceConfig {
        let config = DistanceConfig::new()
            .with_max_cells(self.max_cells)
            .with_parallel(self.parallel);
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Digits after the decimal point
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    fn print(&self, result: &NetworkDistance) -> Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(result).map_err(std::io::Error::from)?;
            println!("{}", json);
        } else {
            println!("{:.*}", self.precision, result.distance);
        }
        Ok(())
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::MalformedInput => 1,
        ErrorKind::InvalidDimension => 3,
        ErrorKind::Numeric => 4,
        ErrorKind::ResourceExhaustion => 5,
    }
}

/// Reads `arg` as a file if one exists at that path, else as a literal.
fn read_matrix(arg: &str, options: InputOptions) -> Result<WeightMatrix> {
    let path = Path::new(arg);
    if path.is_file() {
        debug!(path = %path.display(), format = %options.format, "loading weight matrix");
        load_matrix(path, options)
    } else {
        debug!(format = %options.format, "parsing inline weight matrix");
        parse_matrix(arg, options)
    }
}

fn sample_matrix(rows: &[[f64; 3]; 3]) -> Result<WeightMatrix> {
    WeightMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Distance(args) => {
            let options = InputOptions {
                format: args.format,
                absent_weight: args.absent_weight,
            };
            let x = read_matrix(&args.first, options)?;
            let y = read_matrix(&args.second, options)?;
            info!(first = x.len(), second = y.len(), "computing network distance");
            let result = args.search.config().network_distance(&x, &y)?;
            args.output.print(&result)
        }
        Commands::Correspondences { rows, cols, count } => {
            let all = correspondences(rows, cols)?;
            if count {
                println!("{}", all.count());
            } else {
                for (i, corr) in all.enumerate() {
                    if i > 0 {
                        println!();
                    }
                    println!("{}", corr);
                }
            }
            Ok(())
        }
        Commands::Sample { search, output } => {
            let x = sample_matrix(&SAMPLE_X)?;
            let y = sample_matrix(&SAMPLE_Y)?;
            let result = search.config().network_distance(&x, &y)?;
            output.print(&result)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(kind = ?err.kind(), "command failed");
            eprintln!("error: {}", err);
            ExitCode::from(exit_code(err.kind()))
        }
    }
}
