use std::{path::Path, process::Command};

use crate::{
    error::{Result, ScaffoldError},
    trace,
};

/// Materializes a remote repository reference into a local directory.
pub trait Fetcher {
    /// Fetches `remote` into `dest`, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Fetch`] if the fetch did not succeed. A failed
    /// fetch may leave `dest` partially populated.
    fn fetch(&self, remote: &str, dest: &Path) -> Result<()>;
}

/// Runs an external command (`npx degit` by default) as
/// `<program> <args..> <remote> <dest>` with the terminal inherited.
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
}

impl CommandFetcher {
    /// Builds a fetcher from a full command line, e.g. `["npx", "degit"]`.
    /// Returns `None` for an empty command.
    #[must_use]
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;

        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Fetcher for CommandFetcher {
    fn fetch(&self, remote: &str, dest: &Path) -> Result<()> {
        trace!(
            "Running {} {} {remote} {}",
            self.program,
            self.args.join(" "),
            dest.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(remote)
            .arg(dest)
            .status()
            .map_err(|e| ScaffoldError::Fetch {
                remote: remote.to_owned(),
                status: None,
                detail: format!("failed to run {}: {e}", self.program),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Fetch {
                remote: remote.to_owned(),
                status: status.code(),
                detail: status.to_string(),
            })
        }
    }
}
