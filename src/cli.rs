use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_PORTFOLIO_PATH: &str = "portfolio.json";

#[derive(Parser, Debug)]
#[command(name = "pacta", version, about = "SLA compliance tracking and reporting CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_PORTFOLIO_PATH,
        help = "Portfolio file holding tenants, contracts, SLAs and measurements"
    )]
    pub portfolio: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Contract {
        #[command(subcommand)]
        command: ContractCommands,
    },
    Periods {
        #[command(subcommand)]
        command: PeriodCommands,
    },
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    Status,
    Validate,
}

#[derive(Subcommand, Debug)]
pub enum ContractCommands {
    List,
    Show {
        name: String,
    },
    /// Set a contract ACTIVE; derives reporting periods on first activation
    /// of a contract with an effective date.
    Activate {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PeriodCommands {
    /// One-time derivation of a contract's reporting periods.
    Generate { contract: String },
    List { contract: String },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Generate or regenerate the compliance report for one period
    /// (`contract@YYYY-MM-DD`), replacing any prior item set.
    Generate { period: String },
    /// Regenerate compliance reports for every period of a contract.
    GenerateAll { contract: String },
    /// Display a period's report; generates it first if absent.
    Show { period: String },
}
