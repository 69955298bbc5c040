//! Validate command implementation

use colored::Colorize;

use gc_content::Dialect;
use gc_core::RuleIndex;
use gc_fs::NormalizedPath;
use gc_meta::RepositoryKind;
use gc_meta::loader::{load_rules, load_settings};

use crate::cli::Inputs;
use crate::error::Result;

/// Run the validate command
///
/// Settings and rules are validated while loading. Repositories without a
/// working directory and rules whose platform has no parser dialect are
/// reported as warnings.
pub fn run_validate(inputs: &Inputs) -> Result<()> {
    let settings = load_settings(&NormalizedPath::new(&inputs.settings))?;
    let rules = load_rules(&NormalizedPath::new(&inputs.rules))?;
    let index = RuleIndex::build(&rules);

    println!(
        "{} settings: {} backup / {} intended repositories",
        "OK".green().bold(),
        settings.backup_repositories.len(),
        settings.intended_repositories.len()
    );
    println!(
        "{} rules: {} CLI rule(s) across {} platform(s)",
        "OK".green().bold(),
        index.len(),
        index.platforms().len()
    );

    for kind in RepositoryKind::ALL {
        for repository in settings.repositories(kind) {
            if let Err(err) = repository.ensure_root() {
                println!("{} {kind}: {err}", "WARN".yellow().bold());
            }
        }
    }

    for platform in index.platforms() {
        let dialect = settings.dialect_for(platform);
        if !Dialect::is_supported(dialect) {
            println!(
                "{} platform `{}` has no parser (dialect `{}`)",
                "WARN".yellow().bold(),
                platform,
                dialect
            );
        }
    }

    Ok(())
}
