use std::path::PathBuf;

use thiserror::Error;

/// Message shown whenever a project name is rejected.
pub const INVALID_NAME_MESSAGE: &str =
    "Project name may only include letters, numbers, underscores and hashes.";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", INVALID_NAME_MESSAGE)]
pub struct ValidationError {
    pub input: String,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Failed to fetch {remote}: {detail}")]
    Fetch {
        remote: String,
        status: Option<i32>,
        detail: String,
    },

    #[error("Invalid manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Failed to fetch latest version from {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Filesystem operation failed on {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: fs_extra::error::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),
}

impl ScaffoldError {
    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(
        path: impl Into<PathBuf>,
        source: impl Into<fs_extra::error::Error>,
    ) -> Self {
        Self::Filesystem {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
