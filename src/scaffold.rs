use std::path::{Path, PathBuf};

use crate::{
    config::ScaffoldConfig,
    error::Result,
    fetch::Fetcher,
    manifest::rewrite_manifest,
    project::{ProjectName, ProjectPaths, TemplateChoice},
    registry::VersionSource,
    report, trace, warn,
};

/// Resolves the `--cwd` argument against the process working directory.
///
/// # Errors
///
/// Returns an [`Err`] if the current directory is invalid.
pub fn resolve_cwd(cwd: Option<&Path>) -> std::io::Result<PathBuf> {
    let current = std::env::current_dir()?;

    Ok(match cwd {
        Some(cwd) => current.join(cwd),
        None => current,
    })
}

/// Creates a project from a template using the given collaborators.
pub struct Scaffold<'a> {
    pub config: &'a ScaffoldConfig,
    pub fetcher: &'a dyn Fetcher,
    pub versions: &'a dyn VersionSource,
}

impl Scaffold<'_> {
    /// Lays out `cwd/name`, fetches the client template and the starter kit,
    /// then rewrites the client manifest.
    ///
    /// Nothing is rolled back on failure. A failed starter fetch is reported
    /// and skipped.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: directory creation, the client fetch or
    /// the manifest rewrite.
    pub fn run(
        &self,
        cwd: &Path,
        template: &TemplateChoice,
        name: &ProjectName,
    ) -> Result<ProjectPaths> {
        let paths = ProjectPaths::new(cwd, name, self.config);
        trace!("Project root: {}", paths.root.display());

        paths.create_all()?;

        report::downloading(&template.id, self.config.client_dir());
        self.fetcher
            .fetch(&self.config.template_ref(template), &paths.client)?;

        report::downloading(self.config.starter_source(), self.config.starter_dir());
        if let Err(e) = self
            .fetcher
            .fetch(self.config.starter_source(), &paths.starter)
        {
            warn!("{e}. Continuing without the starter kit");
        }

        let rewritten =
            rewrite_manifest(&paths.client, name.as_str(), self.config, self.versions)?;
        report::pinned(name, &rewritten);

        report::finished(&paths.root, name);

        Ok(paths)
    }
}
