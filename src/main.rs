use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use domain::models::*;
pub use services::output::*;
pub use services::storage::{audit, load_config, load_portfolio, save_portfolio};
pub use services::{compliance, lifecycle, periods, stats, tree, validate};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        let code = err
            .downcast_ref::<PortfolioError>()
            .map(PortfolioError::code)
            .unwrap_or("INTERNAL");
        print_err(cli.json, code, &err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config()?;
    let mut portfolio = load_portfolio(&cli.portfolio)?;

    if commands::handle_contract_commands(cli, &mut portfolio, &config)? {
        return Ok(());
    }
    if commands::handle_validate_command(cli, &portfolio)? {
        return Ok(());
    }
    commands::handle_runtime_commands(cli, &mut portfolio, &config)
}
