use std::path::Path;

use crate::{info, manifest::Rewritten, project::ProjectName};

pub const DOCS_URL: &str = "https://book.dojoengine.org/";

pub fn downloading(what: &str, into: &str) {
    info!("Downloading {what} into {into} directory...");
}

pub fn pinned(name: &ProjectName, rewritten: &Rewritten) {
    info!(
        "Renamed client to {name}, pinned {} workspace dependencies to {}",
        rewritten.pinned, rewritten.version
    );
}

/// Closing message after a successful scaffold.
pub fn finished(root: &Path, name: &ProjectName) {
    info!("Project initialized at {}", root.display());
    println!("Congrats! Your new project has been set up successfully.\n");
    println!("Navigate into your project directory with:\n  cd {name}\n");
    println!("You can then build the starter and run the client.\n");
    println!("For detailed instructions, follow the README here:\n");
    println!("{DOCS_URL}");
}
