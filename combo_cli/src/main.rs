//! # combo - Point Load Combination CLI
//!
//! Command-line front end for `combo_core`. Takes the point-load table, the
//! combination table and an output path, runs the combination and reports
//! the outcome.
//!
//! ```text
//! combo run --points points.csv --combos combos.csv --output combined.csv
//! combo run --config job.json --output other.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use combo_core::{run, CalcError, RunConfig, RunSummary};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Apply load combination coefficients to structural point loads
#[derive(Parser)]
#[command(name = "combo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine every point with every combination and write the result table
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Point-load table (PointID, LoadType, Fx, Fy, Fz, Mx, My, Mz)
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Combination table (D, EX, EY, EZ, T)
    #[arg(short, long)]
    combos: Option<PathBuf>,

    /// Result table to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON run configuration; explicit flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field delimiter shared by all three tables
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Print the summary (or the error) as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn into_config(self) -> Result<RunConfig> {
        let base = match &self.config {
            Some(path) => Some(RunConfig::load(path)?),
            None => None,
        };

        let config = match base {
            Some(mut config) => {
                if let Some(points) = self.points {
                    config.point_file = points;
                }
                if let Some(combos) = self.combos {
                    config.combo_file = combos;
                }
                if let Some(output) = self.output {
                    config.output_file = output;
                }
                config
            }
            None => {
                let (Some(points), Some(combos), Some(output)) = (self.points, self.combos, self.output) else {
                    bail!("--points, --combos and --output are required unless --config is given");
                };
                RunConfig::new(points, combos, output)
            }
        };

        Ok(match self.delimiter {
            Some(delimiter) => config.with_delimiter(delimiter),
            None => config,
        })
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins when set; otherwise --verbose picks DEBUG over WARN.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn print_summary(summary: &RunSummary, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(summary) {
            println!("{}", text);
        }
        return;
    }
    println!(
        "Wrote {} rows ({} points x {} combinations) to {}",
        summary.rows, summary.points, summary.combinations, summary.output_file
    );
}

fn report_error(error: &CalcError, json: bool) {
    eprintln!("Error: {}", error);
    if json {
        if let Ok(text) = serde_json::to_string_pretty(error) {
            eprintln!("{}", text);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => {
            let json = args.json;
            let config = match args.into_config() {
                Ok(config) => config,
                Err(e) => {
                    match e.downcast_ref::<CalcError>() {
                        Some(calc) => report_error(calc, json),
                        None => eprintln!("Error: {:#}", e),
                    }
                    return ExitCode::from(2);
                }
            };

            debug!(?config, "resolved run configuration");
            match run(&config) {
                Ok(summary) => {
                    print_summary(&summary, json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report_error(&e, json);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
