//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of the settlement calculation from presentation.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::settlement::{
    GratuityDirection, PartyGratuitySplit, Settlement, SettlementInputs, SettlementResult,
};
use crate::utils::{format_currency, format_percent, format_settlement_amount};

/// Format a settlement result for JSON output (amounts rounded to cents)
pub fn format_settlement_json(result: &SettlementResult) -> String {
    #[derive(Serialize)]
    struct JsonSettlement {
        #[serde(flatten)]
        result: SettlementResult,
        settlement: Settlement,
        party_gratuity_after_tip_outs: String,
        party_gratuity_split: String,
        party_gratuity_direction: GratuityDirection,
    }

    let rounded = result.rounded();
    let json = JsonSettlement {
        // Direction comes from the full-precision tally, only the amount is rounded
        settlement: result.settlement().rounded(),
        party_gratuity_after_tip_outs: rounded.party_gratuity_after_tip_outs().to_string(),
        party_gratuity_split: rounded.party_gratuity_split().to_string(),
        party_gratuity_direction: rounded.party_gratuity_direction(),
        result: rounded,
    };

    serde_json::to_string_pretty(&json)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// One-line final tally: "Server owes the house $265.00"
pub fn format_settlement_line(result: &SettlementResult) -> String {
    match result.settlement() {
        Settlement::OwesHouse(amount) => format!(
            "Server owes the house {}",
            format_settlement_amount(amount).yellow().bold()
        ),
        Settlement::OwedToServer(amount) => format!(
            "House owes the server {}",
            format_settlement_amount(amount).green().bold()
        ),
    }
}

/// Shared-party gratuity summary, including who pays whom
pub fn format_party_line(party: &PartyGratuitySplit) -> String {
    let split = format_currency(party.split);
    let who = match party.direction {
        GratuityDirection::UserOwesPeer => format!("you owe your partner {}", split),
        GratuityDirection::PeerOwesUser => format!("your partner owes you {}", split),
        GratuityDirection::Unspecified => "split 50/50 with your partner".to_string(),
    };

    format!(
        "Party gratuity after tip-outs {}, split {}: {}",
        format_currency(party.after_tip_outs),
        split,
        who
    )
}

/// Format a settlement as a table plus summary lines
pub fn format_settlement_table(inputs: &SettlementInputs, result: &SettlementResult) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Item")]
        item: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "Amount")]
        amount: String,
    }

    fn row(item: &str, rate: Option<String>, amount: rust_decimal::Decimal) -> Row {
        Row {
            item: item.to_string(),
            rate: rate.unwrap_or_default(),
            amount: format_currency(amount),
        }
    }

    let rate = |p: Option<rust_decimal::Decimal>| p.map(format_percent);

    let mut rows = vec![
        row("Cash sales", None, inputs.cash_sales),
        row("Credit sales", None, inputs.credit_sales),
        row("Total sales", None, result.total_sales),
        row("Declared tips", rate(inputs.declare_percentage), result.declared_tips),
        row("Busser tip-out", rate(inputs.busser_tip_out_percent), result.busser_tip_out),
        row(
            "Bartender tip-out",
            rate(inputs.bartender_tip_out_percent),
            result.bartender_tip_out,
        ),
        row("Net tips", None, result.net_tips),
        row("Cashed out / in", None, inputs.cashed_out_or_in),
    ];

    if let Some(party) = &result.party {
        rows.push(row(
            "Party busser tip-out",
            rate(inputs.busser_tip_out_percent),
            party.busser_tip_out,
        ));
        rows.push(row(
            "Party bartender tip-out",
            rate(inputs.bartender_tip_out_percent),
            party.bartender_tip_out,
        ));
        rows.push(row("Party gratuity after tip-outs", None, party.after_tip_outs));
        rows.push(row("Party gratuity split", None, party.split));
    }

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    let mut output = String::new();
    output.push_str(&format!("\n{} Shift settlement\n\n", "💵".cyan().bold()));
    output.push_str(&table.to_string());
    output.push_str(&format!("\n\n{}\n", format_settlement_line(result)));
    if let Some(party) = &result.party {
        output.push_str(&format!("{}\n", format_party_line(party)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::compute;
    use rust_decimal_macros::dec;

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_owes_line_uses_magnitude() {
        no_color();
        let inputs = SettlementInputs {
            cash_sales: dec!(10),
            cashed_out_or_in: dec!(45),
            ..Default::default()
        };
        let line = format_settlement_line(&compute(&inputs));
        assert_eq!(line, "House owes the server $35.00");
    }

    #[test]
    fn test_party_line_directions() {
        no_color();
        let mut party = PartyGratuitySplit {
            busser_tip_out: dec!(3),
            bartender_tip_out: dec!(2),
            after_tip_outs: dec!(15),
            split: dec!(7.5),
            direction: GratuityDirection::UserOwesPeer,
        };
        assert_eq!(
            format_party_line(&party),
            "Party gratuity after tip-outs $15.00, split $7.50: you owe your partner $7.50"
        );

        party.direction = GratuityDirection::PeerOwesUser;
        assert!(format_party_line(&party).ends_with("your partner owes you $7.50"));

        party.direction = GratuityDirection::Unspecified;
        assert!(format_party_line(&party).ends_with("split 50/50 with your partner"));
    }

    #[test]
    fn test_table_lists_party_rows_only_with_party() {
        no_color();
        let inputs = SettlementInputs {
            cash_sales: dec!(200),
            credit_sales: dec!(300),
            declare_percentage: Some(dec!(18)),
            ..Default::default()
        };
        let output = format_settlement_table(&inputs, &compute(&inputs));
        assert!(output.contains("Total sales"));
        assert!(output.contains("$500.00"));
        assert!(output.contains("18%"));
        assert!(output.contains("Server owes the house $290.00"));
        assert!(!output.contains("Party gratuity"));
    }

    #[test]
    fn test_json_includes_settlement_and_direction() {
        let inputs = SettlementInputs {
            cash_sales: dec!(200),
            credit_sales: dec!(300),
            shared_party: true,
            party_subtotal: Some(dec!(100)),
            party_gratuity: Some(dec!(20)),
            check_under_my_name: Some(false),
            ..Default::default()
        };
        let json = format_settlement_json(&compute(&inputs));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let decimal = |v: &serde_json::Value| {
            v.as_str()
                .and_then(|s| s.parse::<rust_decimal::Decimal>().ok())
                .expect("decimal string")
        };

        assert_eq!(decimal(&value["total_sales"]), dec!(500));
        assert_eq!(value["settlement"]["kind"], "owes_house");
        assert_eq!(decimal(&value["party_gratuity_split"]), dec!(10));
        assert_eq!(value["party_gratuity_direction"], "PEER_OWES_USER");
    }

    #[test]
    fn test_json_and_line_agree_on_sub_cent_tally() {
        no_color();
        let inputs = SettlementInputs {
            cash_sales: dec!(0.004),
            cashed_out_or_in: dec!(0.008),
            ..Default::default()
        };
        let result = compute(&inputs);

        let line = format_settlement_line(&result);
        assert_eq!(line, "House owes the server $0.00");

        let value: serde_json::Value =
            serde_json::from_str(&format_settlement_json(&result)).unwrap();
        assert_eq!(value["settlement"]["kind"], "owed_to_server");
        assert_eq!(value["settlement"]["amount"], "0.00");
    }
}
