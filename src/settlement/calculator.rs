use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::inputs::{Money, Percent, SettlementInputs};

/// Who has to hand over half of a shared party's gratuity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GratuityDirection {
    /// The check is under the user's name, so the user holds the full
    /// gratuity and owes the peer their half.
    UserOwesPeer,
    PeerOwesUser,
    #[default]
    Unspecified,
}

impl From<Option<bool>> for GratuityDirection {
    fn from(check_under_my_name: Option<bool>) -> Self {
        match check_under_my_name {
            Some(true) => GratuityDirection::UserOwesPeer,
            Some(false) => GratuityDirection::PeerOwesUser,
            None => GratuityDirection::Unspecified,
        }
    }
}

/// Auto-gratuity accounting for a party shared with another server.
///
/// Computed on the party subtotal alone, independent of the declared tips
/// on the server's own sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyGratuitySplit {
    pub busser_tip_out: Money,
    pub bartender_tip_out: Money,
    pub after_tip_outs: Money,
    /// Half of `after_tip_outs`. May be zero or negative when tip-outs
    /// consume the whole gratuity.
    pub split: Money,
    pub direction: GratuityDirection,
}

/// Outcome of the final tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Settlement {
    /// Server hands this amount to the house
    OwesHouse(Money),
    /// House pays this amount to the server
    OwedToServer(Money),
}

impl Settlement {
    pub fn amount(&self) -> Money {
        match self {
            Settlement::OwesHouse(amount) | Settlement::OwedToServer(amount) => *amount,
        }
    }

    /// Round the amount to cents, keeping the direction decided at full
    /// precision.
    pub fn rounded(&self) -> Settlement {
        match self {
            Settlement::OwesHouse(amount) => Settlement::OwesHouse(round_cents(*amount)),
            Settlement::OwedToServer(amount) => Settlement::OwedToServer(round_cents(*amount)),
        }
    }
}

/// Settlement calculation result (full precision)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    pub total_sales: Money,
    pub declared_tips: Money,
    pub busser_tip_out: Money,
    pub bartender_tip_out: Money,
    pub net_tips: Money,
    /// Non-negative: server owes the house. Negative: house owes the server.
    pub final_amount: Money,
    pub party: Option<PartyGratuitySplit>,
}

impl SettlementResult {
    pub fn settlement(&self) -> Settlement {
        if self.final_amount >= Decimal::ZERO {
            Settlement::OwesHouse(self.final_amount)
        } else {
            Settlement::OwedToServer(self.final_amount.abs())
        }
    }

    pub fn party_gratuity_after_tip_outs(&self) -> Money {
        self.party
            .as_ref()
            .map(|p| p.after_tip_outs)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn party_gratuity_split(&self) -> Money {
        self.party.as_ref().map(|p| p.split).unwrap_or(Decimal::ZERO)
    }

    pub fn party_gratuity_direction(&self) -> GratuityDirection {
        self.party
            .as_ref()
            .map(|p| p.direction)
            .unwrap_or_default()
    }

    /// Copy with every amount rounded to cents for display
    pub fn rounded(&self) -> SettlementResult {
        SettlementResult {
            total_sales: round_cents(self.total_sales),
            declared_tips: round_cents(self.declared_tips),
            busser_tip_out: round_cents(self.busser_tip_out),
            bartender_tip_out: round_cents(self.bartender_tip_out),
            net_tips: round_cents(self.net_tips),
            final_amount: round_cents(self.final_amount),
            party: self.party.as_ref().map(|p| PartyGratuitySplit {
                busser_tip_out: round_cents(p.busser_tip_out),
                bartender_tip_out: round_cents(p.bartender_tip_out),
                after_tip_outs: round_cents(p.after_tip_outs),
                split: round_cents(p.split),
                direction: p.direction,
            }),
        }
    }
}

/// Round to 2 decimal places, half away from zero
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Arithmetic past Decimal's range clamps to MAX/MIN instead of panicking.
fn saturate(positive: bool) -> Money {
    if positive {
        Decimal::MAX
    } else {
        Decimal::MIN
    }
}

fn add(a: Money, b: Money) -> Money {
    a.checked_add(b)
        .unwrap_or_else(|| saturate(a.is_sign_positive()))
}

fn sub(a: Money, b: Money) -> Money {
    a.checked_sub(b)
        .unwrap_or_else(|| saturate(a.is_sign_positive()))
}

fn mul(a: Money, b: Money) -> Money {
    a.checked_mul(b)
        .unwrap_or_else(|| saturate(a.is_sign_positive() == b.is_sign_positive()))
}

fn percent_of(base: Money, percent: Option<Percent>) -> Money {
    let percent = percent.unwrap_or(Decimal::ZERO);
    // Multiply first to keep precision; fall back to the scaled rate when the
    // intermediate product is out of range.
    base.checked_mul(percent)
        .map(|product| product / Decimal::ONE_HUNDRED)
        .unwrap_or_else(|| mul(base, percent / Decimal::ONE_HUNDRED))
}

/// Compute the end-of-shift settlement.
///
/// Total over every input: unset percentages count as zero, unset party
/// fields skip the party block, and nothing is range-checked.
pub fn compute(inputs: &SettlementInputs) -> SettlementResult {
    let total_sales = add(inputs.cash_sales, inputs.credit_sales);
    let declared_tips = percent_of(total_sales, inputs.declare_percentage);

    // Tip-outs on the main tally use the party subtotal only when sharing a
    // party; the two bases are never mixed.
    let main_tip_out_base = match inputs.party_subtotal {
        Some(subtotal) if inputs.shared_party && subtotal >= Decimal::ZERO => subtotal,
        _ => total_sales,
    };

    let busser_tip_out = percent_of(main_tip_out_base, inputs.busser_tip_out_percent);
    let bartender_tip_out = percent_of(main_tip_out_base, inputs.bartender_tip_out_percent);
    let net_tips = sub(sub(declared_tips, busser_tip_out), bartender_tip_out);
    let final_amount = sub(add(inputs.cash_sales, net_tips), inputs.cashed_out_or_in);

    let party = match (inputs.shared_party, inputs.party_subtotal, inputs.party_gratuity) {
        (true, Some(party_tip_out_base), Some(gratuity)) => {
            let busser = percent_of(party_tip_out_base, inputs.busser_tip_out_percent);
            let bartender = percent_of(party_tip_out_base, inputs.bartender_tip_out_percent);
            let after_tip_outs = sub(sub(gratuity, busser), bartender);

            Some(PartyGratuitySplit {
                busser_tip_out: busser,
                bartender_tip_out: bartender,
                after_tip_outs,
                split: after_tip_outs / Decimal::TWO,
                direction: GratuityDirection::from(inputs.check_under_my_name),
            })
        }
        _ => None,
    };

    SettlementResult {
        total_sales,
        declared_tips,
        busser_tip_out,
        bartender_tip_out,
        net_tips,
        final_amount,
        party,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scenario_one() -> SettlementInputs {
        SettlementInputs {
            cash_sales: dec!(200),
            credit_sales: dec!(300),
            declare_percentage: Some(dec!(18)),
            busser_tip_out_percent: Some(dec!(3)),
            bartender_tip_out_percent: Some(dec!(2)),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_tally() {
        let result = compute(&scenario_one());

        assert_eq!(result.total_sales, dec!(500));
        assert_eq!(result.declared_tips, dec!(90));
        assert_eq!(result.busser_tip_out, dec!(15));
        assert_eq!(result.bartender_tip_out, dec!(10));
        assert_eq!(result.net_tips, dec!(65));
        assert_eq!(result.final_amount, dec!(265));
        assert_eq!(result.settlement(), Settlement::OwesHouse(dec!(265)));
        assert!(result.party.is_none());
    }

    #[test]
    fn test_cashed_out_flips_direction() {
        let inputs = SettlementInputs {
            cashed_out_or_in: dec!(300),
            ..scenario_one()
        };
        let result = compute(&inputs);

        assert_eq!(result.final_amount, dec!(-35));
        assert_eq!(result.settlement(), Settlement::OwedToServer(dec!(35)));
    }

    #[test]
    fn test_zero_final_amount_owes_house() {
        let result = compute(&SettlementInputs::default());
        assert_eq!(result.settlement(), Settlement::OwesHouse(Decimal::ZERO));
    }

    #[test]
    fn test_shared_party_switches_tip_out_base() {
        let inputs = SettlementInputs {
            shared_party: true,
            party_subtotal: Some(dec!(100)),
            ..scenario_one()
        };
        let result = compute(&inputs);

        assert_eq!(result.busser_tip_out, dec!(3));
        assert_eq!(result.bartender_tip_out, dec!(2));
        assert_eq!(result.net_tips, dec!(85));
        assert_eq!(result.final_amount, dec!(285));
        // No gratuity, no party block
        assert!(result.party.is_none());
    }

    #[test]
    fn test_negative_party_subtotal_keeps_total_sales_base() {
        let inputs = SettlementInputs {
            shared_party: true,
            party_subtotal: Some(dec!(-10)),
            ..scenario_one()
        };
        let result = compute(&inputs);
        assert_eq!(result.busser_tip_out, dec!(15));
    }

    #[test]
    fn test_party_gratuity_split() {
        let inputs = SettlementInputs {
            shared_party: true,
            party_subtotal: Some(dec!(100)),
            party_gratuity: Some(dec!(20)),
            check_under_my_name: Some(true),
            ..scenario_one()
        };
        let party = compute(&inputs).party.expect("party block");

        assert_eq!(party.busser_tip_out, dec!(3));
        assert_eq!(party.bartender_tip_out, dec!(2));
        assert_eq!(party.after_tip_outs, dec!(15));
        assert_eq!(party.split, dec!(7.5));
        assert_eq!(party.direction, GratuityDirection::UserOwesPeer);
    }

    #[test]
    fn test_party_block_requires_shared_party() {
        let inputs = SettlementInputs {
            shared_party: false,
            party_subtotal: Some(dec!(100)),
            party_gratuity: Some(dec!(20)),
            ..scenario_one()
        };
        let result = compute(&inputs);

        assert!(result.party.is_none());
        assert_eq!(result.party_gratuity_split(), Decimal::ZERO);
        assert_eq!(result.party_gratuity_direction(), GratuityDirection::Unspecified);
    }

    #[test]
    fn test_negative_split_is_not_floored() {
        let inputs = SettlementInputs {
            shared_party: true,
            party_subtotal: Some(dec!(1000)),
            party_gratuity: Some(dec!(10)),
            busser_tip_out_percent: Some(dec!(3)),
            bartender_tip_out_percent: Some(dec!(2)),
            ..Default::default()
        };
        let result = compute(&inputs);

        assert_eq!(result.party_gratuity_after_tip_outs(), dec!(-40));
        assert_eq!(result.party_gratuity_split(), dec!(-20));
    }

    #[test]
    fn test_direction_from_check_owner() {
        assert_eq!(GratuityDirection::from(Some(true)), GratuityDirection::UserOwesPeer);
        assert_eq!(GratuityDirection::from(Some(false)), GratuityDirection::PeerOwesUser);
        assert_eq!(GratuityDirection::from(None), GratuityDirection::Unspecified);
    }

    #[test]
    fn test_rounded_keeps_full_precision_in_original() {
        let inputs = SettlementInputs {
            cash_sales: dec!(33.33),
            declare_percentage: Some(dec!(15)),
            ..Default::default()
        };
        let result = compute(&inputs);
        assert_eq!(result.declared_tips, dec!(4.9995));

        let rounded = result.rounded();
        assert_eq!(rounded.declared_tips, dec!(5.00));
        assert_eq!(result.declared_tips, dec!(4.9995));
    }

    #[test]
    fn test_round_cents_midpoint() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_cents(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_saturating_helpers() {
        assert_eq!(add(Decimal::MAX, dec!(1)), Decimal::MAX);
        assert_eq!(add(Decimal::MIN, dec!(-1)), Decimal::MIN);
        assert_eq!(sub(Decimal::MIN, dec!(1)), Decimal::MIN);
        assert_eq!(sub(Decimal::MAX, dec!(-1)), Decimal::MAX);
        assert_eq!(mul(Decimal::MAX, dec!(-2)), Decimal::MIN);
        assert_eq!(mul(Decimal::MIN, dec!(-2)), Decimal::MAX);
        assert_eq!(add(dec!(1.5), dec!(2)), dec!(3.5));
    }

    #[test]
    fn test_percent_of_large_base_stays_exact() {
        // base * 100 overflows, base * 1.00 does not
        let base = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert_eq!(percent_of(base, Some(dec!(100))), base);
        assert_eq!(percent_of(Decimal::MAX, Some(dec!(200))), Decimal::MAX);
    }

    #[test]
    fn test_settlement_rounded_keeps_direction() {
        let inputs = SettlementInputs {
            cash_sales: dec!(0.004),
            cashed_out_or_in: dec!(0.008),
            ..Default::default()
        };
        let settlement = compute(&inputs).settlement();
        assert_eq!(settlement, Settlement::OwedToServer(dec!(0.004)));
        assert_eq!(settlement.rounded(), Settlement::OwedToServer(dec!(0.00)));
    }

    #[test]
    fn test_direction_serializes_screaming_case() {
        let json = serde_json::to_string(&GratuityDirection::PeerOwesUser).unwrap();
        assert_eq!(json, "\"PEER_OWES_USER\"");
    }
}
