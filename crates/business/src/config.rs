//! Service configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::error::{BusinessError, BusinessResult};
use anyhow::Context;
use ibank_core::BbanLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for account creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Field widths of the BBAN inside generated IBANs
    #[serde(default)]
    pub bban_layout: BbanLayout,

    /// How many times to regenerate identifiers after a duplicate key
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,

    // === Defaults for drafts ===
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    #[serde(default = "default_bank_identifier")]
    pub default_bank_identifier: String,

    #[serde(default = "default_branch_code")]
    pub default_branch_code: String,

    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_max_generation_attempts() -> u32 {
    5
}

fn default_country_code() -> String {
    "GB".to_string()
}

fn default_bank_identifier() -> String {
    "IBNK".to_string()
}

fn default_branch_code() -> String {
    "000001".to_string()
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bban_layout: BbanLayout::default(),
            max_generation_attempts: default_max_generation_attempts(),
            default_country_code: default_country_code(),
            default_bank_identifier: default_bank_identifier(),
            default_branch_code: default_branch_code(),
            default_currency: default_currency(),
        }
    }
}

impl ServiceConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> BusinessResult<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse service config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> BusinessResult<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_json(&json)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> BusinessResult<()> {
        if self.max_generation_attempts == 0 {
            return Err(BusinessError::InvalidConfig(
                "max_generation_attempts must be at least 1".to_string(),
            )
            .into());
        }
        self.bban_layout
            .validate()
            .map_err(|e| BusinessError::InvalidConfig(e.to_string()))?;
        Ok(())
    }
}
