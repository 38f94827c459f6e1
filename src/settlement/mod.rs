// Settlement module - end-of-shift tally between a server and the house

pub mod calculator;
pub mod inputs;

pub use calculator::{
    compute, GratuityDirection, PartyGratuitySplit, Settlement, SettlementResult,
};
pub use inputs::{
    parse_flag, parse_money, parse_optional_money, parse_optional_percent, parse_percent,
    FormField, Money, Percent, SettlementForm, SettlementInputs,
};
