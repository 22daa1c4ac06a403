//! # Projector Configuration
//!
//! YAML-backed configuration for the pocket-money projector. Every field has
//! a default, so a missing file or a partial file is always usable.
//!
//! ## YAML Format
//!
//! ```yaml
//! clamp_current_total: false
//! display:
//!   show_currency_symbol: true
//!   currency_symbol: "$"
//!   decimal_places: 2
//!   date_format: MonthDayYear
//!   amount_format: Plain
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::totals_table::TotalsDisplayConfig;
use crate::errors::ProjectorResult;

/// Projector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Floor the current total at zero, the way the projected total always is
    pub clamp_current_total: bool,
    pub display: TotalsDisplayConfig,
}

impl ProjectorConfig {
    pub fn from_yaml_str(yaml: &str) -> ProjectorResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load config from file, falling back to defaults if it doesn't exist
    pub fn load_from_file(path: impl AsRef<Path>) -> ProjectorResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("No projector config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml_content)?;
        debug!("Loaded projector config from {:?}", path);
        Ok(config)
    }

    /// Save config to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ProjectorResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!("Created config directory: {:?}", parent);
            }
        }

        let yaml_content = serde_yaml::to_string(self)?;

        // Write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved projector config to {:?}", path);
        Ok(())
    }
}
