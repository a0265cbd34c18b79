mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::cashflow::CashflowArgs;
use commands::metrics::MetricsArgs;
use commands::recommend::RecommendArgs;
use commands::scenarios::{ScenariosArgs, SensitivityArgs};

/// Clinic business-plan forecasting and decision support
#[derive(Parser)]
#[command(
    name = "optimclinic",
    version,
    about = "Clinic business-plan forecasting and decision support",
    long_about = "Turns a monthly operating snapshot into cashflow series, break-even \
                  and payback timing, NPV/IRR/ROI, funding-need analysis, scenario and \
                  sensitivity tables, and rule-based recommendations. Snapshots are read \
                  from a JSON file (--input) or piped via stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis over a financial snapshot
    Analyze(AnalyzeArgs),
    /// Derive the monthly net-cashflow series and its provenance
    Cashflow(CashflowArgs),
    /// Compute ROI, NPV, IRR, break-even, payback and funding need
    Metrics(MetricsArgs),
    /// Project base/optimistic/pessimistic aggregates
    Scenarios(ScenariosArgs),
    /// Measure margin impact of price and occupancy perturbations
    Sensitivity(SensitivityArgs),
    /// Emit only the rule-based recommendation findings
    Recommend(RecommendArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Cashflow(args) => commands::cashflow::run_cashflow(args),
        Commands::Metrics(args) => commands::metrics::run_metrics(args),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args),
        Commands::Recommend(args) => commands::recommend::run_recommend(args),
        Commands::Version => {
            println!("optimclinic {}", env!("CARGO_PKG_VERSION"));
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
