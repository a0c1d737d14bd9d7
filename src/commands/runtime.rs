use crate::*;
use chrono::Utc;

pub fn handle_runtime_commands(
    cli: &Cli,
    portfolio: &mut Portfolio,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Periods { command } => match command {
            PeriodCommands::Generate { contract } => {
                let horizon_days = config.generation.horizon_days;
                let target = portfolio.contract_mut(contract)?;
                let out =
                    lifecycle::generate_contract_periods(target, lifecycle::today(), horizon_days)?;
                audit(
                    "periods_generate",
                    serde_json::json!({"contract": out.contract, "created": out.created}),
                );
                save_portfolio(&cli.portfolio, portfolio)?;
                print_one(cli.json, out, |o| match &o.reason {
                    Some(reason) => format!("no periods created for {} ({})", o.contract, reason),
                    None => format!("created {} periods for {}", o.created, o.contract),
                })?;
            }
            PeriodCommands::List { contract } => {
                let target = portfolio.contract(contract)?;
                print_out(cli.json, &target.periods, |p| {
                    format!("{}\t{}", p.start_date, p.end_date)
                })?;
            }
        },
        Commands::Report { command } => match command {
            ReportCommands::Generate { period } => {
                let (name, start) = lifecycle::parse_period_ref(period)?;
                let target = portfolio.contract_mut(&name)?;
                let out = lifecycle::generate_report(target, start, Utc::now())?;
                audit(
                    "report_generate",
                    serde_json::json!({
                        "contract": out.contract,
                        "period_start": out.period_start,
                        "items": out.items,
                        "checksum": out.checksum
                    }),
                );
                save_portfolio(&cli.portfolio, portfolio)?;
                print_one(cli.json, out, |o| {
                    format!(
                        "generated report {}@{} ({} items)",
                        o.contract, o.period_start, o.items
                    )
                })?;
            }
            ReportCommands::GenerateAll { contract } => {
                let target = portfolio.contract_mut(contract)?;
                let out = lifecycle::generate_all_reports(target, Utc::now())?;
                audit(
                    "report_generate_all",
                    serde_json::json!({"contract": contract, "reports": out.len()}),
                );
                save_portfolio(&cli.portfolio, portfolio)?;
                print_out(cli.json, &out, |o| {
                    format!("{}\t{}\t{}", o.period_start, o.items, o.checksum)
                })?;
            }
            ReportCommands::Show { period } => {
                let (name, start) = lifecycle::parse_period_ref(period)?;
                let target = portfolio.contract_mut(&name)?;
                let created = lifecycle::ensure_report(target, start, Utc::now())?;
                if created {
                    audit(
                        "report_generate",
                        serde_json::json!({"contract": name, "period_start": start}),
                    );
                    save_portfolio(&cli.portfolio, portfolio)?;
                }
                let view = stats::report_view(portfolio.contract(&name)?, start)?;
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonOut {
                            ok: true,
                            data: view
                        })?
                    );
                } else {
                    println!(
                        "report {}@{} ({} to {})",
                        view.contract, start, view.period.start_date, view.period.end_date
                    );
                    println!("generated_at: {}", view.generated_at.to_rfc3339());
                    println!(
                        "compliance: {} ({}/{} items)",
                        percentage_label(view.compliance_percentage),
                        view.compliant_items,
                        view.total_items
                    );
                    println!("checksum: {}", view.checksum);
                    for node in &view.tree {
                        print_tree_node(node, 0);
                    }
                }
            }
        },
        Commands::Status => {
            let report = stats::status_report(portfolio);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!(
                    "contracts: {} ({} active)",
                    report.total_contracts, report.total_active_contracts
                );
                for tenant in &report.tenants {
                    println!(
                        "tenant {}\t{} contracts\t{} active",
                        tenant.name, tenant.contract_count, tenant.active_contract_count
                    );
                }
                for contract in &report.contracts {
                    println!(
                        "{}\t{}\t{:?}\t{}",
                        contract.name,
                        contract.tenant,
                        contract.status,
                        percentage_label(contract.compliance_percentage)
                    );
                }
            }
        }
        Commands::Contract { .. } | Commands::Validate => {
            unreachable!("handled before runtime dispatch")
        }
    }

    Ok(())
}

fn print_tree_node(node: &SlaTreeNode, depth: usize) {
    let verdict = match &node.item {
        Some(item) if item.is_compliant => "compliant",
        Some(_) => "NON-COMPLIANT",
        None if node.binding.is_some() => "no measurement",
        None => "",
    };
    println!("{}{}\t{}", "  ".repeat(depth), node.name, verdict);
    for child in &node.children {
        print_tree_node(child, depth + 1);
    }
}
