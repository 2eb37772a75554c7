use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    config::ScaffoldConfig,
    error::{Result, ScaffoldError},
    registry::VersionSource,
    trace,
};

pub const MANIFEST_FILE: &str = "package.json";

const NOT_AN_OBJECT: &str = "manifest is not a JSON object";
const NO_DEPENDENCIES: &str = "manifest has no \"dependencies\"";
const BAD_DEPENDENCIES: &str = "\"dependencies\" is not an object";

/// Which dependencies get pinned, and to what.
#[derive(Debug, Clone, Copy)]
pub struct Pin<'a> {
    /// Only dependency names starting with this are touched.
    pub namespace_prefix: &'a str,
    /// Only versions starting with this are replaced.
    pub workspace_marker: &'a str,
    pub version: &'a str,
}

impl Pin<'_> {
    #[must_use]
    pub fn applies_to(&self, name: &str, version: &str) -> bool {
        name.starts_with(self.namespace_prefix) && version.starts_with(self.workspace_marker)
    }
}

/// Sets `name` and pins the workspace dependencies of a parsed manifest in
/// place. Everything else is left exactly as it was.
///
/// Returns how many dependencies were pinned.
///
/// # Errors
///
/// Returns a description of the problem if the manifest is not an object or
/// has no `dependencies` object.
pub fn rewrite_value(
    manifest: &mut Value,
    name: &str,
    pin: Pin,
) -> Result<usize, &'static str> {
    let root = manifest.as_object_mut().ok_or(NOT_AN_OBJECT)?;

    let dependencies = root
        .get_mut("dependencies")
        .ok_or(NO_DEPENDENCIES)?
        .as_object_mut()
        .ok_or(BAD_DEPENDENCIES)?;

    let mut pinned = 0;
    for (dep, version) in dependencies.iter_mut() {
        if matches!(version.as_str(), Some(v) if pin.applies_to(dep, v)) {
            trace!("Pinning {dep}: {version} -> {}", pin.version);
            *version = Value::String(pin.version.to_owned());
            pinned += 1;
        }
    }

    root.insert("name".into(), Value::String(name.to_owned()));

    Ok(pinned)
}

/// The `package.json` of a fetched client template.
pub struct Manifest {
    path: PathBuf,
    value: Value,
}

impl Manifest {
    /// Reads and parses `dir/package.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Manifest`] if the file is missing, unreadable
    /// or not valid JSON.
    pub fn read(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);

        let contents =
            std::fs::read_to_string(&path).map_err(|e| ScaffoldError::manifest(&path, e))?;
        let value =
            serde_json::from_str(&contents).map_err(|e| ScaffoldError::manifest(&path, e))?;

        Ok(Self { path, value })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Checks that the manifest has the shape [`rewrite_value`] expects,
    /// without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Manifest`] describing the first problem found.
    pub fn check(&self) -> Result<()> {
        let reason = match self.value.as_object().map(|root| root.get("dependencies")) {
            None => NOT_AN_OBJECT,
            Some(None) => NO_DEPENDENCIES,
            Some(Some(deps)) if !deps.is_object() => BAD_DEPENDENCIES,
            Some(Some(_)) => return Ok(()),
        };

        Err(ScaffoldError::manifest(&self.path, reason))
    }

    /// # Errors
    ///
    /// See [`rewrite_value`].
    pub fn rewrite(&mut self, name: &str, pin: Pin) -> Result<usize> {
        rewrite_value(&mut self.value, name, pin)
            .map_err(|reason| ScaffoldError::manifest(&self.path, reason))
    }

    /// Renders the manifest with two space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value can not be serialized.
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.value)
    }

    /// Replaces the file on disk with the current contents. The file is left
    /// alone if rendering fails.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Manifest`] if the manifest can not be rendered
    /// or [`ScaffoldError::Filesystem`] if the file can not be written.
    pub fn write(&self) -> Result<()> {
        let rendered = self
            .render()
            .map_err(|e| ScaffoldError::manifest(&self.path, e))?;

        std::fs::write(&self.path, rendered).map_err(|e| ScaffoldError::filesystem(&self.path, e))
    }
}

/// Outcome of [`rewrite_manifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Number of dependencies that were pinned.
    pub pinned: usize,
    pub version: String,
}

/// Rewrites `client_dir/package.json` for `project_name`, pinning the
/// workspace dependencies under the configured namespace to the latest
/// version of the anchor package reported by `versions`.
///
/// The file is only written once every fallible step has succeeded.
///
/// # Errors
///
/// Returns [`ScaffoldError::Manifest`] for a missing or malformed manifest,
/// [`ScaffoldError::Network`] if the version lookup fails, or
/// [`ScaffoldError::Filesystem`] if the file can not be written.
pub fn rewrite_manifest(
    client_dir: &Path,
    project_name: &str,
    config: &ScaffoldConfig,
    versions: &dyn VersionSource,
) -> Result<Rewritten> {
    let mut manifest = Manifest::read(client_dir)?;
    manifest.check()?;

    let latest = versions.latest(config.anchor_package())?;
    trace!("Latest {}: {latest}", config.anchor_package());

    let pinned = manifest.rewrite(
        project_name,
        Pin {
            namespace_prefix: config.namespace_prefix(),
            workspace_marker: config.workspace_marker(),
            version: &latest,
        },
    )?;
    manifest.write()?;

    Ok(Rewritten {
        pinned,
        version: latest,
    })
}
