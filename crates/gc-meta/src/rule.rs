//! Compliance rules

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// How a rule's configuration is expressed.
///
/// Only [`ConfigType::Cli`] rules are evaluated; the others are accepted on
/// load and skipped when the rule index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    #[default]
    Cli,
    Json,
    Custom,
}

/// A per-platform compliance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRule {
    /// Rule identity, unique per platform (the feature name).
    #[serde(alias = "feature")]
    pub id: String,
    #[serde(alias = "platform_slug")]
    pub platform: String,
    #[serde(default)]
    pub config_type: ConfigType,
    #[serde(default)]
    pub ordered: bool,
    /// Section markers, one per entry. A multi-line string is split on
    /// newlines.
    #[serde(default, deserialize_with = "lines_or_list")]
    pub match_config: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComplianceRule {
    pub fn cli(
        id: impl Into<String>,
        platform: impl Into<String>,
        ordered: bool,
        markers: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            platform: platform.into(),
            config_type: ConfigType::Cli,
            ordered,
            match_config: markers.iter().map(|m| m.to_string()).collect(),
            description: None,
        }
    }

    pub fn is_cli(&self) -> bool {
        self.config_type == ConfigType::Cli
    }

    /// Markers joined back into the newline-separated form.
    pub fn match_config_text(&self) -> String {
        self.match_config.join("\n")
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::RuleInvalid {
                rule: self.id.clone(),
                message: "rule id must not be empty".into(),
            });
        }
        if self.is_cli() && self.match_config.iter().all(|m| m.trim().is_empty()) {
            return Err(Error::RuleInvalid {
                rule: self.id.clone(),
                message: "CLI configuration set, but no configuration set to match.".into(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinesOrList {
    Text(String),
    List(Vec<String>),
}

fn lines_or_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    let markers = match LinesOrList::deserialize(deserializer)? {
        LinesOrList::Text(text) => text.lines().map(str::to_string).collect::<Vec<_>>(),
        LinesOrList::List(list) => list,
    };
    Ok(markers.into_iter().filter(|m| !m.trim().is_empty()).collect())
}
