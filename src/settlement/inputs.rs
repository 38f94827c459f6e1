//! Settlement inputs and the parse-or-default boundary
//!
//! A settlement is computed from whatever the server has typed so far, so
//! every raw field goes through an explicit parsing step here: empty or
//! non-numeric text becomes zero (or "unset" for fields whose presence
//! matters), never an error. [`SettlementForm`] holds the raw text and
//! [`SettlementForm::to_inputs`] is the only place text turns into numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Currency amount. Always a decimal, never a float.
pub type Money = Decimal;

/// Whole-number percentage (18 means 18%). Not range-checked.
pub type Percent = Decimal;

/// Typed inputs for a single settlement calculation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInputs {
    pub cash_sales: Money,
    pub credit_sales: Money,
    /// Positive when the server already paid the house, negative when the
    /// house already owes the server.
    pub cashed_out_or_in: Money,
    pub shared_party: bool,
    pub party_subtotal: Option<Money>,
    pub party_gratuity: Option<Money>,
    pub check_under_my_name: Option<bool>,
    pub declare_percentage: Option<Percent>,
    pub busser_tip_out_percent: Option<Percent>,
    pub bartender_tip_out_percent: Option<Percent>,
}

/// Strip currency decoration so "$1,234.50 " parses as 1234.50
fn clean_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned = clean_number(raw);
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parse a money field, treating empty or non-numeric text as zero.
pub fn parse_money(raw: &str) -> Money {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Parse a money field whose absence is meaningful (party subtotal/gratuity).
pub fn parse_optional_money(raw: &str) -> Option<Money> {
    parse_decimal(raw)
}

/// Parse a percentage field, treating empty or non-numeric text as zero.
/// A trailing `%` is accepted.
pub fn parse_percent(raw: &str) -> Percent {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Parse a percentage field that stays unset until typed. A trailing `%`
/// is accepted.
pub fn parse_optional_percent(raw: &str) -> Option<Percent> {
    parse_decimal(raw)
}

/// Parse a yes/no answer. Anything unrecognised is "unset".
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Identifies one field of the settlement form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CashSales,
    CreditSales,
    CashedOutOrIn,
    DeclarePercentage,
    BusserTipOutPercent,
    BartenderTipOutPercent,
    SharedParty,
    PartySubtotal,
    PartyGratuity,
    CheckUnderMyName,
}

impl FormField {
    /// Fields in the order a server fills them in at close of shift
    pub const ALL: [FormField; 10] = [
        FormField::CashSales,
        FormField::CreditSales,
        FormField::CashedOutOrIn,
        FormField::DeclarePercentage,
        FormField::BusserTipOutPercent,
        FormField::BartenderTipOutPercent,
        FormField::SharedParty,
        FormField::PartySubtotal,
        FormField::PartyGratuity,
        FormField::CheckUnderMyName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::CashSales => "Cash sales",
            FormField::CreditSales => "Credit sales",
            FormField::CashedOutOrIn => "Cashed out / in",
            FormField::DeclarePercentage => "Declare %",
            FormField::BusserTipOutPercent => "Busser/runner tip-out %",
            FormField::BartenderTipOutPercent => "Bartender tip-out %",
            FormField::SharedParty => "Shared a party? (y/n)",
            FormField::PartySubtotal => "Party subtotal",
            FormField::PartyGratuity => "Party gratuity",
            FormField::CheckUnderMyName => "Check under your name? (y/n)",
        }
    }

    /// Party fields only make sense once a shared party is declared, and the
    /// check owner only matters when there is a gratuity to split.
    pub fn is_applicable(&self, form: &SettlementForm) -> bool {
        let shared = parse_flag(&form.shared_party).unwrap_or(false);
        match self {
            FormField::PartySubtotal | FormField::PartyGratuity => shared,
            FormField::CheckUnderMyName => {
                shared && parse_optional_money(&form.party_gratuity).is_some()
            }
            _ => true,
        }
    }
}

/// Raw form state, one string per field, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementForm {
    pub cash_sales: String,
    pub credit_sales: String,
    pub cashed_out_or_in: String,
    pub declare_percentage: String,
    pub busser_tip_out_percent: String,
    pub bartender_tip_out_percent: String,
    pub shared_party: String,
    pub party_subtotal: String,
    pub party_gratuity: String,
    pub check_under_my_name: String,
}

impl SettlementForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::CashSales => &self.cash_sales,
            FormField::CreditSales => &self.credit_sales,
            FormField::CashedOutOrIn => &self.cashed_out_or_in,
            FormField::DeclarePercentage => &self.declare_percentage,
            FormField::BusserTipOutPercent => &self.busser_tip_out_percent,
            FormField::BartenderTipOutPercent => &self.bartender_tip_out_percent,
            FormField::SharedParty => &self.shared_party,
            FormField::PartySubtotal => &self.party_subtotal,
            FormField::PartyGratuity => &self.party_gratuity,
            FormField::CheckUnderMyName => &self.check_under_my_name,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::CashSales => self.cash_sales = value,
            FormField::CreditSales => self.credit_sales = value,
            FormField::CashedOutOrIn => self.cashed_out_or_in = value,
            FormField::DeclarePercentage => self.declare_percentage = value,
            FormField::BusserTipOutPercent => self.busser_tip_out_percent = value,
            FormField::BartenderTipOutPercent => self.bartender_tip_out_percent = value,
            FormField::SharedParty => self.shared_party = value,
            FormField::PartySubtotal => self.party_subtotal = value,
            FormField::PartyGratuity => self.party_gratuity = value,
            FormField::CheckUnderMyName => self.check_under_my_name = value,
        }
    }

    /// Apply the parse-or-default rule to every field.
    pub fn to_inputs(&self) -> SettlementInputs {
        SettlementInputs {
            cash_sales: parse_money(&self.cash_sales),
            credit_sales: parse_money(&self.credit_sales),
            cashed_out_or_in: parse_money(&self.cashed_out_or_in),
            shared_party: parse_flag(&self.shared_party).unwrap_or(false),
            party_subtotal: parse_optional_money(&self.party_subtotal),
            party_gratuity: parse_optional_money(&self.party_gratuity),
            check_under_my_name: parse_flag(&self.check_under_my_name),
            declare_percentage: parse_optional_percent(&self.declare_percentage),
            busser_tip_out_percent: parse_optional_percent(&self.busser_tip_out_percent),
            bartender_tip_out_percent: parse_optional_percent(&self.bartender_tip_out_percent),
        }
    }
}
