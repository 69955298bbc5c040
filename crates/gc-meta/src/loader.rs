//! Loading settings, rules and devices from files
//!
//! Rules and devices are stored as a document with a top-level list, so
//! the same shape works in every supported format:
//!
//! ```toml
//! [[rules]]
//! id = "ntp"
//! platform = "cisco_ios"
//! match_config = ["ntp server"]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use gc_fs::{ConfigStore, NormalizedPath};

use crate::{ComplianceRule, Device, Error, GoldenConfigSettings, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default, alias = "rule")]
    pub rules: Vec<ComplianceRule>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeviceDocument {
    #[serde(default, alias = "device")]
    pub devices: Vec<Device>,
}

/// Load and validate settings.
pub fn load_settings(path: &NormalizedPath) -> Result<GoldenConfigSettings> {
    let settings: GoldenConfigSettings = ConfigStore::new().load(path)?;
    settings.validate()?;
    tracing::debug!(
        path = %path,
        backup_repositories = settings.backup_repositories.len(),
        intended_repositories = settings.intended_repositories.len(),
        "Loaded settings"
    );
    Ok(settings)
}

/// Load and validate compliance rules.
pub fn load_rules(path: &NormalizedPath) -> Result<Vec<ComplianceRule>> {
    let document: RuleDocument = ConfigStore::new().load(path)?;
    validate_rules(&document.rules)?;
    tracing::debug!(path = %path, count = document.rules.len(), "Loaded rules");
    Ok(document.rules)
}

/// Load devices.
pub fn load_devices(path: &NormalizedPath) -> Result<Vec<Device>> {
    let document: DeviceDocument = ConfigStore::new().load(path)?;
    tracing::debug!(path = %path, count = document.devices.len(), "Loaded devices");
    Ok(document.devices)
}

/// Validate each rule and reject duplicate ids within a platform.
pub fn validate_rules(rules: &[ComplianceRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        rule.validate()?;
        if !seen.insert((rule.platform.as_str(), rule.id.as_str())) {
            return Err(Error::DuplicateRule {
                rule: rule.id.clone(),
                platform: rule.platform.clone(),
            });
        }
    }
    Ok(())
}
