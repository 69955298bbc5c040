//! Golden-config settings
//!
//! One immutable value object carries every template and repository list a
//! batch needs. It is loaded once, validated, and then shared read-only by
//! the resolver and orchestrator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use gc_content::JinjaTemplateEngine;
use gc_fs::NormalizedPath;
use gc_git::RepositoryRef;

use crate::{Error, Result};

/// Default prefix rendered repository matching templates are joined onto.
pub const DEFAULT_REPOSITORY_ROOT: &str = "/opt/golden-config/git";

/// Which side of a comparison a repository serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    Backup,
    Intended,
}

impl RepositoryKind {
    pub const ALL: [RepositoryKind; 2] = [RepositoryKind::Backup, RepositoryKind::Intended];
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backup => write!(f, "backup"),
            Self::Intended => write!(f, "intended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenConfigSettings {
    /// Backup file path, relative to the backup repository root.
    pub backup_path_template: String,
    /// Intended file path, relative to the intended repository root.
    pub intended_path_template: String,
    #[serde(alias = "backup_match_rule")]
    pub backup_repository_template: String,
    #[serde(alias = "intended_match_rule")]
    pub intended_repository_template: String,
    pub repository_root: NormalizedPath,
    /// Platform slug to parser dialect name.
    pub platform_slug_map: BTreeMap<String, String>,
    pub backup_repositories: Vec<RepositoryRef>,
    pub intended_repositories: Vec<RepositoryRef>,
}

impl Default for GoldenConfigSettings {
    fn default() -> Self {
        Self {
            backup_path_template: String::new(),
            intended_path_template: String::new(),
            backup_repository_template: String::new(),
            intended_repository_template: String::new(),
            repository_root: NormalizedPath::new(DEFAULT_REPOSITORY_ROOT),
            platform_slug_map: BTreeMap::new(),
            backup_repositories: Vec::new(),
            intended_repositories: Vec::new(),
        }
    }
}

impl GoldenConfigSettings {
    pub fn repositories(&self, kind: RepositoryKind) -> &[RepositoryRef] {
        match kind {
            RepositoryKind::Backup => &self.backup_repositories,
            RepositoryKind::Intended => &self.intended_repositories,
        }
    }

    pub fn repository_template(&self, kind: RepositoryKind) -> &str {
        match kind {
            RepositoryKind::Backup => &self.backup_repository_template,
            RepositoryKind::Intended => &self.intended_repository_template,
        }
    }

    pub fn path_template(&self, kind: RepositoryKind) -> &str {
        match kind {
            RepositoryKind::Backup => &self.backup_path_template,
            RepositoryKind::Intended => &self.intended_path_template,
        }
    }

    /// Parser dialect for a platform slug. Unmapped slugs are used as is.
    pub fn dialect_for<'a>(&'a self, platform: &'a str) -> &'a str {
        self.platform_slug_map
            .get(platform)
            .map(String::as_str)
            .unwrap_or(platform)
    }

    /// Look up a template setting by field name.
    pub fn setting(&self, name: &str) -> Option<&str> {
        match name {
            "backup_path_template" => Some(&self.backup_path_template),
            "intended_path_template" => Some(&self.intended_path_template),
            "backup_repository_template" | "backup_match_rule" => {
                Some(&self.backup_repository_template)
            }
            "intended_repository_template" | "intended_match_rule" => {
                Some(&self.intended_repository_template)
            }
            _ => None,
        }
    }

    /// Check that the named settings are present and non-empty.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if self.setting(name).is_none_or(|value| value.trim().is_empty()) {
                return Err(Error::MissingSetting {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check repository counts against matching templates and that every
    /// configured template parses.
    pub fn validate(&self) -> Result<()> {
        for kind in RepositoryKind::ALL {
            let count = self.repositories(kind).len();
            let template = self.repository_template(kind).trim();

            if count > 1 && template.is_empty() {
                return Err(Error::settings(format!(
                    "If you specify more than one {kind} repository, you must provide a {kind} repository matching rule template."
                )));
            }
            if count == 1 && !template.is_empty() {
                return Err(Error::settings(format!(
                    "If you configure only one {kind} repository, there is no need to specify the {kind} repository matching rule template."
                )));
            }
        }

        let engine = JinjaTemplateEngine::strict();
        for template in [
            &self.backup_path_template,
            &self.intended_path_template,
            &self.backup_repository_template,
            &self.intended_repository_template,
        ] {
            if !template.is_empty() {
                engine.check(template).map_err(|e| Error::settings(e.to_string()))?;
            }
        }

        Ok(())
    }
}
