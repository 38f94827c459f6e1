//! Tipout - end-of-shift settlement for restaurant servers
//!
//! This library computes what a server owes the house (or is owed) at close
//! of shift: declared tips, busser/bartender tip-outs, and the split of a
//! shared party's auto-gratuity.

pub mod cli;
pub mod config;
pub mod error;
pub mod settlement;
#[cfg(feature = "tui")]
pub mod ui;
pub mod utils;
