//! Parser dialects keyed by network OS
//!
//! The parser map is a fixed table: each supported network OS name maps to
//! a [`Dialect`] describing how its configuration is structured. Platforms
//! that are not in the table have no parser support.

use std::fmt;

use crate::error::{Error, Result};
use crate::parser::{self, ParsedConfig};

/// How nesting is expressed in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// Children are indented below their parent.
    Indented,
    /// Children are wrapped in `{ ... }`.
    Braced,
}

/// Parsing rules for one network OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    name: &'static str,
    structure: Structure,
    comment_chars: &'static [char],
    banners: bool,
}

const fn indented(name: &'static str, comment_chars: &'static [char], banners: bool) -> Dialect {
    Dialect {
        name,
        structure: Structure::Indented,
        comment_chars,
        banners,
    }
}

const fn braced(name: &'static str) -> Dialect {
    Dialect {
        name,
        structure: Structure::Braced,
        comment_chars: &['#'],
        banners: false,
    }
}

const BANG: &[char] = &['!'];
const HASH: &[char] = &['#'];

static DIALECTS: &[Dialect] = &[
    indented("arista_eos", BANG, false),
    indented("aruba_aoscx", BANG, false),
    indented("cisco_aireos", HASH, false),
    indented("cisco_asa", BANG, false),
    indented("cisco_ios", BANG, true),
    indented("cisco_iosxr", BANG, true),
    indented("cisco_nxos", BANG, true),
    indented("fortinet_fortios", HASH, false),
    indented("linux", HASH, false),
    indented("nokia_sros", HASH, false),
    braced("f5_bigip"),
    braced("juniper_junos"),
    braced("paloalto_panos"),
];

impl Dialect {
    /// Look up the dialect for a network OS name.
    pub fn lookup(network_os: &str) -> Result<&'static Dialect> {
        DIALECTS
            .iter()
            .find(|dialect| dialect.name == network_os)
            .ok_or_else(|| Error::UnsupportedPlatform {
                platform: network_os.to_string(),
            })
    }

    /// Whether a network OS has parser support.
    pub fn is_supported(network_os: &str) -> bool {
        Self::lookup(network_os).is_ok()
    }

    /// All supported network OS names, sorted.
    pub fn supported() -> impl Iterator<Item = &'static str> {
        let mut names: Vec<_> = DIALECTS.iter().map(|dialect| dialect.name).collect();
        names.sort_unstable();
        names.into_iter()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn structure(&self) -> Structure {
        self.structure
    }

    /// Parse configuration text into lines with their parents.
    pub fn parse(&self, text: &str) -> Result<ParsedConfig> {
        match self.structure {
            Structure::Indented => {
                parser::parse_indented(self.name, text, self.comment_chars, self.banners)
            }
            Structure::Braced => parser::parse_braced(self.name, text, self.comment_chars),
        }
    }

    /// Parse, degrading a malformed configuration to an empty one.
    ///
    /// A backup that cannot be parsed still has to be evaluated: every
    /// intended line then shows up as missing.
    pub fn parse_lossy(&self, text: &str) -> ParsedConfig {
        match self.parse(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(
                    dialect = self.name,
                    error = %err,
                    "Treating malformed configuration as empty"
                );
                ParsedConfig::default()
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cisco_ios", Structure::Indented)]
    #[case("arista_eos", Structure::Indented)]
    #[case("juniper_junos", Structure::Braced)]
    #[case("paloalto_panos", Structure::Braced)]
    fn test_lookup_known(#[case] name: &str, #[case] structure: Structure) {
        let dialect = Dialect::lookup(name).unwrap();
        assert_eq!(dialect.name(), name);
        assert_eq!(dialect.structure(), structure);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = Dialect::lookup("fake_os").unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedPlatform { ref platform } if platform == "fake_os")
        );
        assert!(!Dialect::is_supported("Cisco_IOS"));
    }

    #[test]
    fn test_supported_is_sorted() {
        let names: Vec<_> = Dialect::supported().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_parse_lossy_degrades_to_empty() {
        let dialect = Dialect::lookup("juniper_junos").unwrap();
        assert!(dialect.parse_lossy("system {\n").is_empty());
    }
}
