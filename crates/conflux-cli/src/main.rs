mod commands;
mod output;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "conflux",
    version,
    about = "Extract class conflict schedules from a master schedule PDF"
)]
struct Cli {
    /// Path to the master schedule PDF
    input_file: PathBuf,

    /// Print calibration, conflict and grade diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Output format: json (default) or table
    #[arg(short, long, default_value = "json", value_parser = ["json", "table"])]
    output: String,

    /// Write the JSON payload to a file instead of stdout
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = commands::parse::run(cli.input_file, &cli.output, cli.out) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
