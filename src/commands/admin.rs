use crate::*;

pub fn handle_contract_commands(
    cli: &Cli,
    portfolio: &mut Portfolio,
    config: &ConfigFile,
) -> anyhow::Result<bool> {
    let Commands::Contract { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ContractCommands::List => {
            let summaries: Vec<ContractSummary> =
                portfolio.contracts.iter().map(stats::contract_summary).collect();
            print_out(cli.json, &summaries, |c| {
                format!(
                    "{}\t{}\t{:?}\t{:?}\t{}",
                    c.name,
                    c.tenant,
                    c.status,
                    c.reporting_frequency,
                    percentage_label(c.compliance_percentage)
                )
            })?;
        }
        ContractCommands::Show { name } => {
            let contract = portfolio.contract(name)?;
            let summary = stats::contract_summary(contract);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: summary
                    })?
                );
            } else {
                println!("name: {}", summary.name);
                println!("tenant: {}", summary.tenant);
                println!("status: {:?}", summary.status);
                println!("frequency: {:?}", summary.reporting_frequency);
                println!("periods: {}", summary.period_count);
                if let Some(period) = &summary.latest_period {
                    println!(
                        "latest reported period: {} to {}",
                        period.start_date, period.end_date
                    );
                }
                println!(
                    "compliance: {}",
                    percentage_label(summary.compliance_percentage)
                );
            }
        }
        ContractCommands::Activate { name } => {
            let horizon_days = config.generation.horizon_days;
            let contract = portfolio.contract_mut(name)?;
            let report = lifecycle::activate_contract(contract, lifecycle::today(), horizon_days);
            audit(
                "contract_activate",
                serde_json::json!({
                    "contract": report.contract,
                    "periods_created": report.periods_created
                }),
            );
            save_portfolio(&cli.portfolio, portfolio)?;
            print_one(cli.json, report, |r| {
                format!(
                    "activated {} ({} periods created)",
                    r.contract, r.periods_created
                )
            })?;
        }
    }

    Ok(true)
}

pub fn handle_validate_command(cli: &Cli, portfolio: &Portfolio) -> anyhow::Result<bool> {
    let Commands::Validate = &cli.command else {
        return Ok(false);
    };

    let issues = validate::validate_portfolio(portfolio);
    let ok = issues.is_empty();
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data: &issues })?
        );
    } else if ok {
        println!("portfolio valid");
    } else {
        for issue in &issues {
            println!(
                "{}\t{}\t{}",
                issue.code,
                issue.contract.as_deref().unwrap_or("-"),
                issue.detail
            );
        }
    }
    if !ok {
        std::process::exit(1);
    }

    Ok(true)
}
