pub mod args;
pub mod config;
pub mod error;
pub mod fetch;
pub mod log;
pub mod manifest;
pub mod project;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod scaffold;

pub use config::ScaffoldConfig;
pub use error::{ScaffoldError, ValidationError};
pub use fetch::{CommandFetcher, Fetcher};
pub use project::{ProjectName, ProjectPaths, TemplateChoice};
pub use prompt::{collect_selections, InquirePrompter, Prompter};
pub use registry::{NpmRegistry, VersionSource};
pub use scaffold::Scaffold;
