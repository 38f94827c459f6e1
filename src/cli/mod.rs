use clap::{Args, Parser, Subcommand};

use crate::settlement::{FormField, SettlementForm};

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "tipout")]
#[command(version, about = "End-of-shift settlement calculator for restaurant servers")]
#[command(
    long_about = "Work out what a server owes the house (or is owed) at close of shift from cash and credit sales, declared tips, busser/bartender tip-outs and shared-party gratuities."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a settlement from command line values
    Calculate(CalculateArgs),

    /// Fill in the settlement form field by field, with a running tally
    Form,

    /// Show the config file location and the defaults it provides
    Config,
}

/// Raw settlement values. Every value is taken as text and goes through the
/// same parse-or-default rule as the interactive form, so an empty or
/// non-numeric value counts as zero.
#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Cash collected from guests
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub cash: String,

    /// Credit card sales
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub credit: String,

    /// Already settled with the house (positive: paid in, negative: paid out)
    #[arg(long = "cashed-out", default_value = "", allow_hyphen_values = true)]
    pub cashed_out: String,

    /// Percentage of total sales declared as tips
    #[arg(long, default_value = "")]
    pub declare: String,

    /// Busser/runner tip-out percentage
    #[arg(long, default_value = "")]
    pub busser: String,

    /// Bartender tip-out percentage
    #[arg(long, default_value = "")]
    pub bartender: String,

    /// Part of the shift was a party shared with another server
    #[arg(long = "shared-party")]
    pub shared_party: bool,

    /// Food and beverage subtotal of the shared party
    #[arg(long = "party-subtotal", default_value = "", allow_hyphen_values = true)]
    pub party_subtotal: String,

    /// Auto-gratuity collected on the shared party
    #[arg(long = "party-gratuity", default_value = "", allow_hyphen_values = true)]
    pub party_gratuity: String,

    /// Whether the party check is under your name (yes/no)
    #[arg(long = "check-under-my-name", default_value = "")]
    pub check_under_my_name: String,
}

impl CalculateArgs {
    pub fn to_form(&self) -> SettlementForm {
        let mut form = SettlementForm::default();
        form.set(FormField::CashSales, self.cash.as_str());
        form.set(FormField::CreditSales, self.credit.as_str());
        form.set(FormField::CashedOutOrIn, self.cashed_out.as_str());
        form.set(FormField::DeclarePercentage, self.declare.as_str());
        form.set(FormField::BusserTipOutPercent, self.busser.as_str());
        form.set(FormField::BartenderTipOutPercent, self.bartender.as_str());
        form.set(
            FormField::SharedParty,
            if self.shared_party { "yes" } else { "" },
        );
        form.set(FormField::PartySubtotal, self.party_subtotal.as_str());
        form.set(FormField::PartyGratuity, self.party_gratuity.as_str());
        form.set(FormField::CheckUnderMyName, self.check_under_my_name.as_str());
        form
    }
}
