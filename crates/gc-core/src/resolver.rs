//! Repository resolution
//!
//! Each device needs exactly one backup and one intended repository. With a
//! single candidate the choice is trivial. With several, the kind's
//! matching template is rendered against the device and joined onto the
//! settings' repository root; the candidate whose root equals the result
//! wins.

use serde::Serialize;

use gc_content::TemplateEvaluator;
use gc_fs::NormalizedPath;
use gc_git::RepositoryRef;
use gc_meta::{Device, GoldenConfigSettings, RepositoryKind};

use crate::render::render_with;
use crate::{Error, Result};

/// The repository chosen for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRepository {
    pub kind: RepositoryKind,
    pub repository: RepositoryRef,
    pub root_path: NormalizedPath,
}

/// Resolves repositories and configuration file paths for devices.
pub struct RepositoryResolver<'a> {
    settings: &'a GoldenConfigSettings,
    templates: &'a dyn TemplateEvaluator,
}

impl<'a> RepositoryResolver<'a> {
    pub fn new(settings: &'a GoldenConfigSettings, templates: &'a dyn TemplateEvaluator) -> Self {
        Self {
            settings,
            templates,
        }
    }

    /// Select one repository of `kind` among `candidates` for `device`.
    ///
    /// A single candidate is returned without looking at the matching
    /// template; settings validation guarantees it is empty.
    pub fn resolve(
        &self,
        kind: RepositoryKind,
        device: &Device,
        candidates: &[RepositoryRef],
    ) -> Result<ResolvedRepository> {
        let repository = match candidates {
            [] => return Err(Error::NoRepositoryConfigured { kind }),
            [only] => only,
            many => {
                let template = self.settings.repository_template(kind);
                if template.trim().is_empty() {
                    return Err(Error::MissingMatchingTemplate {
                        kind,
                        count: many.len(),
                    });
                }
                let rendered = render_with(self.templates, template, device)?;
                let target = self.settings.repository_root.join(&rendered);
                tracing::debug!(
                    device = %device,
                    %kind,
                    target = %target,
                    "Matching repository root"
                );
                many.iter()
                    .find(|candidate| candidate.root_path == target)
                    .ok_or(Error::RepositoryResolution { kind, target })?
            }
        };

        Ok(ResolvedRepository {
            kind,
            root_path: repository.root_path.clone(),
            repository: repository.clone(),
        })
    }

    /// Full path of the device's configuration file inside a resolved
    /// repository.
    pub fn config_path(
        &self,
        resolved: &ResolvedRepository,
        device: &Device,
    ) -> Result<NormalizedPath> {
        let template = self.settings.path_template(resolved.kind);
        let relative = render_with(self.templates, template, device)?;
        Ok(resolved.root_path.join(&relative))
    }
}

/// Resolve with the strict Jinja engine.
pub fn resolve(
    kind: RepositoryKind,
    device: &Device,
    candidates: &[RepositoryRef],
    settings: &GoldenConfigSettings,
) -> Result<ResolvedRepository> {
    let engine = gc_content::JinjaTemplateEngine::strict();
    RepositoryResolver::new(settings, &engine).resolve(kind, device, candidates)
}
