use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    config::ScaffoldConfig,
    error::{Result, ScaffoldError, ValidationError},
    trace,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateChoice {
    pub id: String,
    pub description: String,
}

impl TemplateChoice {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

impl Display for TemplateChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.description)
    }
}

/// A project name restricted to `[A-Za-z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validates `input` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `input` is empty or contains anything
    /// other than ASCII letters, digits, `_` or `-`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let valid = !input.is_empty()
            && input
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(Self(input.to_owned()))
        } else {
            Err(ValidationError {
                input: input.to_owned(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The directories a scaffold writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub client: PathBuf,
    pub starter: PathBuf,
}

impl ProjectPaths {
    #[must_use]
    pub fn new(cwd: &Path, name: &ProjectName, config: &ScaffoldConfig) -> Self {
        let root = cwd.join(name.as_str());

        Self {
            client: root.join(config.client_dir()),
            starter: root.join(config.starter_dir()),
            root,
        }
    }

    /// Creates the project root, then the client and starter directories.
    /// Directories that already exist are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Filesystem`] if any directory can not be created.
    pub fn create_all(&self) -> Result<()> {
        for dir in [&self.root, &self.client, &self.starter] {
            trace!("Creating directory {}", dir.display());
            fs_extra::dir::create_all(dir, false)
                .map_err(|e| ScaffoldError::filesystem(dir, e))?;
        }

        Ok(())
    }
}
