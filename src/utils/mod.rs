//! Utility functions for formatting money
//!
//! Centralized formatting so every screen shows amounts the same way:
//! a `$` prefix and exactly two decimal places.

use rust_decimal::Decimal;

use crate::settlement::calculator::round_cents;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$" prefix
    Usd,
    /// No currency symbol (for table cells, calculations display)
    None,
}

/// Core formatting function with full control over output.
///
/// Rounds to cents (half away from zero) and always prints two decimals.
/// Negative values keep their sign after the symbol (`$-5.00`).
///
/// # Examples
/// ```
/// use tipout::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.5), 0, CurrencySymbol::Usd),
///     "$1234.50"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(7.5), 8, CurrencySymbol::None),
///     "    7.50"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = round_cents(value);
    let prefix = match symbol {
        CurrencySymbol::Usd => "$",
        CurrencySymbol::None => "",
    };

    // -0.001 rounds to zero; don't print "$-0.00"
    let result = if rounded.is_zero() {
        format!("{}0.00", prefix)
    } else {
        format!("{}{:.2}", prefix, rounded)
    };

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as dollars: "$265.00"
///
/// # Examples
/// ```
/// use tipout::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(265)), "$265.00");
/// assert_eq!(format_currency(dec!(-35)), "$-35.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Usd)
}

/// Format as dollars, right-aligned to specified width.
pub fn format_currency_aligned(value: Decimal, width: usize) -> String {
    format_currency_with_width(value, width, CurrencySymbol::Usd)
}

/// Format the final tally. The sign is carried by the "owes / is owed"
/// wording, so the magnitude is always shown without a minus.
///
/// # Examples
/// ```
/// use tipout::utils::format_settlement_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_settlement_amount(dec!(-35)), "$35.00");
/// ```
pub fn format_settlement_amount(value: Decimal) -> String {
    format_currency(value.abs())
}

/// Format a percentage without trailing zeros: "18%", "2.5%"
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}
