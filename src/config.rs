//! Settlement defaults loaded from a TOML file
//!
//! Servers usually tip out the same percentages every shift, so the
//! declare/busser/bartender percentages can be stored once in
//! `<config dir>/tipout/config.toml` (or the file named by `TIPOUT_CONFIG`).

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettleError;
use crate::settlement::{FormField, SettlementForm};

pub const CONFIG_ENV: &str = "TIPOUT_CONFIG";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: SettlementDefaults,
}

/// Percentages pre-filled into empty form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettlementDefaults {
    pub declare_percentage: Option<Decimal>,
    pub busser_tip_out_percent: Option<Decimal>,
    pub bartender_tip_out_percent: Option<Decimal>,
}

/// Resolve the config file location: `$TIPOUT_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> Result<PathBuf, SettleError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dir_spec::config_home()
        .ok_or_else(|| SettleError::Config("could not determine config directory".to_string()))?;

    Ok(config_dir.join("tipout").join(CONFIG_FILENAME))
}

impl Config {
    /// Load from the default location. A missing file is not an error.
    pub fn load() -> Result<Self, SettleError> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettleError> {
        if !path.exists() {
            debug!("no config at {}, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| SettleError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(text: &str) -> Result<Self, SettleError> {
        toml::from_str(text).map_err(|e| SettleError::Config(e.message().to_string()))
    }

    /// Fill empty percentage fields. Anything the user typed wins.
    pub fn apply_defaults(&self, form: &mut SettlementForm) {
        let pairs = [
            (FormField::DeclarePercentage, self.defaults.declare_percentage),
            (FormField::BusserTipOutPercent, self.defaults.busser_tip_out_percent),
            (FormField::BartenderTipOutPercent, self.defaults.bartender_tip_out_percent),
        ];

        for (field, default) in pairs {
            if let Some(value) = default {
                if form.get(field).trim().is_empty() {
                    form.set(field, value.to_string());
                }
            }
        }
    }
}
