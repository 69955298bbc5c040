//! Rule sections
//!
//! A rule's `match_config` lists section markers, one per line. A marker
//! selects every top-level line starting with it, together with all lines
//! nested below such a line. Selected lines keep configuration order and
//! their original indentation.

use serde::{Deserialize, Serialize};

use crate::parser::ParsedConfig;

/// The markers of one compliance rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMarkers(Vec<String>);

impl SectionMarkers {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            markers
                .into_iter()
                .map(Into::into)
                .map(|marker: String| marker.trim().to_string())
                .filter(|marker| !marker.is_empty())
                .collect(),
        )
    }

    /// Split a multi-line `match_config` value into markers.
    pub fn from_match_config(match_config: &str) -> Self {
        Self::new(match_config.lines())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a top-level line belongs to one of the markers.
    pub fn selects(&self, top_level_line: &str) -> bool {
        self.0.iter().any(|marker| top_level_line.starts_with(marker.as_str()))
    }

    /// The selected lines of a parsed configuration, in order.
    pub fn extract<'a>(&self, parsed: &'a ParsedConfig) -> Vec<&'a str> {
        parsed
            .lines()
            .iter()
            .filter(|line| self.selects(line.root()))
            .map(|line| line.text.as_str())
            .collect()
    }
}
