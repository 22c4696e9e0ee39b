mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::analyze::AnalyzeArgs;
use commands::ratios::RatiosArgs;
use commands::readiness::ReadinessArgs;

/// Financial ratio analysis and credit scoring
#[derive(Parser)]
#[command(
    name = "cca",
    version,
    about = "Financial ratio analysis and credit scoring",
    long_about = "Computes liquidity, leverage, profitability and solvency ratios from \
                  raw financial-statement figures, grades each ratio A-E, and derives a \
                  weighted credit score, risk category and credit decision. All \
                  arithmetic uses decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Scoring configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full credit analysis and produce a report
    Analyze(AnalyzeArgs),
    /// Calculate and grade financial ratios without a credit classification
    Ratios(RatiosArgs),
    /// Quick funding-readiness score from revenue, profit and debt
    Readiness(ReadinessArgs),
    /// Print the effective scoring configuration
    Config,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "credit_analysis_core=debug,cca=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args, config),
        Commands::Ratios(args) => commands::ratios::run_ratios(args, config),
        Commands::Readiness(args) => commands::readiness::run_readiness(args),
        Commands::Config => commands::config::run_config(config),
        Commands::Version => {
            println!("cca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
