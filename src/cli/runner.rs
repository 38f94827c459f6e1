use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use crate::cli::formatters::{format_settlement_json, format_settlement_table};
use crate::cli::{CalculateArgs, Cli, Commands};
use crate::config::{config_path, Config};
use crate::error::Result;
use crate::settlement::compute;
use crate::utils::format_percent;

/// Route a parsed command line to its handler
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("failed to load settlement defaults")?;

    match cli.command {
        Commands::Calculate(args) => run_calculate(&args, &config, cli.json),
        Commands::Form => run_form(&config, cli.json),
        Commands::Config => run_config(&config, cli.json),
    }
}

/// Compute and print a settlement from command line values
pub fn run_calculate(args: &CalculateArgs, config: &Config, json_output: bool) -> Result<()> {
    let mut form = args.to_form();
    config.apply_defaults(&mut form);

    let inputs = form.to_inputs();
    info!("calculating settlement");
    debug!(?inputs, "parsed settlement inputs");

    let result = compute(&inputs);
    debug!(final_amount = %result.final_amount, "settlement computed");

    if json_output {
        println!("{}", format_settlement_json(&result));
    } else {
        println!("{}", format_settlement_table(&inputs, &result));
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_form(config: &Config, json_output: bool) -> Result<()> {
    crate::ui::run_form(config, json_output)
}

#[cfg(not(feature = "tui"))]
fn run_form(_config: &Config, _json_output: bool) -> Result<()> {
    anyhow::bail!("interactive form requires the `tui` feature")
}

fn run_config(config: &Config, json_output: bool) -> Result<()> {
    let path = config_path()?;

    if json_output {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let status = if path.exists() {
        "found".green()
    } else {
        "not found, using built-in defaults".yellow()
    };
    println!("Config file: {} ({})", path.display(), status);

    let show = |value: Option<rust_decimal::Decimal>| {
        value
            .map(format_percent)
            .unwrap_or_else(|| "unset".to_string())
    };
    println!("  Declare %:            {}", show(config.defaults.declare_percentage));
    println!("  Busser tip-out %:     {}", show(config.defaults.busser_tip_out_percent));
    println!("  Bartender tip-out %:  {}", show(config.defaults.bartender_tip_out_percent));

    Ok(())
}
