//! Hierarchical configuration parsers
//!
//! Network configurations are trees: `interface Gi0/1` owns the indented
//! lines below it, `system {` owns everything up to its closing brace.
//! Parsing flattens that tree into [`ConfigLine`]s, each carrying the
//! chain of parent lines above it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One logical configuration line and its ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLine {
    /// Line text with original indentation, trailing whitespace trimmed.
    /// Banner blocks are a single entry spanning several physical lines.
    pub text: String,
    /// Parent lines from outermost to innermost.
    pub parents: Vec<String>,
}

impl ConfigLine {
    /// The parent-most line this line hangs from (itself when top-level).
    pub fn root(&self) -> &str {
        self.parents.first().map(String::as_str).unwrap_or(&self.text)
    }

    pub fn is_top_level(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A configuration flattened into lines in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    lines: Vec<ConfigLine>,
}

impl ParsedConfig {
    pub fn new(lines: Vec<ConfigLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse an indentation-structured configuration (Cisco, Arista, ...).
///
/// `banners` enables Cisco-style `banner <kind> <delim>` blocks, which are
/// kept verbatim as one top-level entry.
pub(crate) fn parse_indented(
    dialect: &str,
    text: &str,
    comment_chars: &[char],
    banners: bool,
) -> Result<ParsedConfig> {
    let mut lines = Vec::new();
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut physical = text.lines().enumerate();

    while let Some((idx, raw)) = physical.next() {
        let line = raw.trim_end();
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with(comment_chars) {
            continue;
        }

        let indent = line.len() - stripped.len();
        while stack.last().is_some_and(|(depth, _)| *depth >= indent) {
            stack.pop();
        }

        if indent > 0 && stack.is_empty() {
            return Err(Error::malformed(
                dialect,
                idx + 1,
                "indented line has no parent",
            ));
        }

        if banners
            && indent == 0
            && let Some((delimiter, closes_inline)) = banner_delimiter(stripped)
        {
            let mut block = vec![line.to_string()];
            if !closes_inline {
                let mut closed = false;
                for (_, next) in physical.by_ref() {
                    let next = next.trim_end();
                    block.push(next.to_string());
                    if next.contains(delimiter.as_str()) {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(Error::malformed(dialect, idx + 1, "unterminated banner"));
                }
            }
            lines.push(ConfigLine {
                text: block.join("\n"),
                parents: Vec::new(),
            });
            continue;
        }

        lines.push(ConfigLine {
            text: line.to_string(),
            parents: stack.iter().map(|(_, parent)| parent.clone()).collect(),
        });
        stack.push((indent, line.to_string()));
    }

    Ok(ParsedConfig::new(lines))
}

/// `banner <kind> <delim>`: the delimiter is `^C`, a literal ETX or any
/// single non-space character.
static BANNER_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^banner\s+\S+\s+(\^C|\x03|\S)").unwrap());

/// Delimiter of a banner line and whether the banner also closes on it
/// (`banner motd #hi#`).
fn banner_delimiter(line: &str) -> Option<(String, bool)> {
    let delimiter = BANNER_START.captures(line)?.get(1)?;
    let closes_inline = line[delimiter.end()..].contains(delimiter.as_str());
    Some((delimiter.as_str().to_string(), closes_inline))
}

/// Parse a brace-structured configuration (Junos, F5, PAN-OS).
pub(crate) fn parse_braced(
    dialect: &str,
    text: &str,
    comment_chars: &[char],
) -> Result<ParsedConfig> {
    let mut lines = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with(comment_chars) {
            continue;
        }

        if stripped.starts_with('}') {
            if stack.pop().is_none() {
                return Err(Error::malformed(dialect, idx + 1, "unexpected '}'"));
            }
            continue;
        }

        lines.push(ConfigLine {
            text: line.to_string(),
            parents: stack.clone(),
        });

        if stripped.ends_with('{') {
            stack.push(line.to_string());
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed(
            dialect,
            text.lines().count(),
            format!("{} unclosed block(s)", stack.len()),
        ));
    }

    Ok(ParsedConfig::new(lines))
}
