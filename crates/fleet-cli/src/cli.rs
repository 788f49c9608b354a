use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-year fleet replacement planner", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the cost-minimizing fleet plan
    Solve(SolveArgs),
    /// Check the reference data and build the model without solving
    Validate(DataArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding the reference tables
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub data: PathBuf,

    /// TOML configuration file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// First planning year (overrides the configuration)
    #[arg(long)]
    pub start_year: Option<u32>,

    /// Last planning year, inclusive (overrides the configuration)
    #[arg(long)]
    pub end_year: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output CSV file for the plan
    #[arg(long, default_value = "solution.csv", value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Also write the full plan with yearly breakdown as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub json: Option<PathBuf>,

    /// LP backend (overrides the configuration)
    #[arg(long)]
    pub solver: Option<String>,

    /// Drop the distance ≤ range · count rows
    #[arg(long)]
    pub no_utilization_limits: bool,

    /// Number of threads for model building (auto or a positive number)
    #[arg(long, default_value = "auto")]
    pub threads: String,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
