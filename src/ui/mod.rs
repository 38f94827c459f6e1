//! Interactive settlement form
//!
//! Walks the server through the form one field at a time and reprints the
//! running tally after every answer. Each answer replaces the previous
//! result: the form is re-parsed and `compute` runs again from scratch.

pub mod readline;

use colored::Colorize;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::cli::formatters::{
    format_party_line, format_settlement_json, format_settlement_line, format_settlement_table,
};
use crate::config::Config;
use crate::error::Result;
use crate::settlement::{compute, FormField, SettlementForm, SettlementResult};

const YES_NO: &[&str] = &["yes", "no"];

fn is_flag(field: FormField) -> bool {
    matches!(field, FormField::SharedParty | FormField::CheckUnderMyName)
}

/// Recompute from the current form state
pub fn recompute(form: &SettlementForm) -> SettlementResult {
    compute(&form.to_inputs())
}

/// The one or two lines shown after each answer
pub fn running_tally(form: &SettlementForm) -> String {
    let result = recompute(form);
    let mut line = format_settlement_line(&result);
    if let Some(party) = &result.party {
        line.push('\n');
        line.push_str(&format_party_line(party));
    }
    line
}

/// Launch the interactive form.
pub fn run_form(config: &Config, json_output: bool) -> Result<()> {
    println!("{}", "Tipout - Shift Settlement".bold());
    println!(
        "Press {} to keep a value, {} to quit\n",
        "Enter".cyan(),
        "Ctrl+D".cyan()
    );

    let mut form = SettlementForm::default();
    config.apply_defaults(&mut form);

    let mut rl = readline::Readline::new()?;

    for field in FormField::ALL {
        // Applicability depends on earlier answers (shared party, gratuity)
        if !field.is_applicable(&form) {
            continue;
        }

        let choices: &[&str] = if is_flag(field) { YES_NO } else { &[] };
        rl.set_choices(choices);
        let prompt = format!("{}: ", field.label());
        let current = form.get(field).to_string();

        match rl.readline_with_initial(&prompt, &current) {
            Ok(line) => {
                debug!(?field, value = line.trim(), "form field updated");
                form.set(field, line.trim());
                println!("  {}", running_tally(&form).replace('\n', "\n  "));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                return Ok(());
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                return Err(err.into());
            }
        }
    }

    let inputs = form.to_inputs();
    let result = compute(&inputs);
    if json_output {
        println!("{}", format_settlement_json(&result));
    } else {
        println!("{}", format_settlement_table(&inputs, &result));
    }

    Ok(())
}
