use std::path::{Path, PathBuf};

use derive_builder::Builder;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::{
    error::{Result, ScaffoldError},
    project::TemplateChoice,
    trace,
};

/// Overrides the registry base URL.
pub const REGISTRY_ENV: &str = "CREATE_DOJO_REGISTRY";
/// Overrides the fetch command, split on whitespace.
pub const FETCHER_ENV: &str = "CREATE_DOJO_FETCHER";

const CONFIG_FILE: &str = "config.json";

/// Everything the scaffold pipeline needs to know up front. Built once and
/// never mutated afterwards.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(
    default,
    setter(into),
    build_fn(validate = "Self::validate", error = "ScaffoldError")
)]
pub struct ScaffoldConfig {
    templates: Vec<TemplateChoice>,
    template_source: String,
    client_dir: String,
    starter_source: String,
    starter_dir: String,
    fetch_command: Vec<String>,
    registry_url: String,
    anchor_package: String,
    namespace_prefix: String,
    workspace_marker: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            templates: vec![
                TemplateChoice::new("react-app", "React app using Dojo"),
                TemplateChoice::new("react-phaser-example", "React/Phaser app using Dojo"),
                TemplateChoice::new("react-pwa-app", "React Progressive Web Apps using Dojo"),
                TemplateChoice::new("react-threejs", "React Threejs using Dojo"),
            ],
            template_source: "dojoengine/dojo.js/clients/react".into(),
            client_dir: "client".into(),
            starter_source: "dojoengine/dojo-starter".into(),
            starter_dir: "dojo-starter".into(),
            fetch_command: vec!["npx".into(), "degit".into()],
            registry_url: "https://registry.npmjs.org".into(),
            anchor_package: "@dojoengine/core".into(),
            namespace_prefix: "@dojoengine".into(),
            workspace_marker: "workspace:".into(),
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for ScaffoldError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::Config(e.to_string())
    }
}

impl ScaffoldConfigBuilder {
    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(ScaffoldError::Config(reason)) };

        if matches!(self.templates, Some(ref t) if t.is_empty()) {
            return invalid("at least one template is required".into());
        }

        if matches!(self.fetch_command, Some(ref c) if c.is_empty()) {
            return invalid("the fetch command can not be empty".into());
        }

        let defaults = ScaffoldConfig::default();
        let client = self.client_dir.as_ref().unwrap_or(&defaults.client_dir);
        let starter = self.starter_dir.as_ref().unwrap_or(&defaults.starter_dir);

        if client.is_empty() || starter.is_empty() {
            return invalid("directory names can not be empty".into());
        }

        if client == starter {
            return invalid(format!(
                "client and starter directories must differ (both are '{client}')"
            ));
        }

        Ok(())
    }

    /// Applies every field present in `file` on top of the current values.
    pub fn apply_file(&mut self, file: ConfigFile) -> &mut Self {
        macro_rules! apply {
            ($builder:ident, $file:ident: $($field:ident),+) => {
                $(
                    if let Some(value) = $file.$field {
                        $builder.$field(value);
                    }
                )+
            };
        }

        let builder = self;
        apply!(
            builder,
            file: templates,
            template_source,
            client_dir,
            starter_source,
            starter_dir,
            fetch_command,
            registry_url,
            anchor_package,
            namespace_prefix,
            workspace_marker
        );

        builder
    }

    /// Applies the `CREATE_DOJO_*` overrides found through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> &mut Self {
        if let Some(url) = lookup(REGISTRY_ENV) {
            trace!("Registry overridden by {REGISTRY_ENV}: {url}");
            self.registry_url(url);
        }

        if let Some(cmd) = lookup(FETCHER_ENV) {
            trace!("Fetch command overridden by {FETCHER_ENV}: {cmd}");
            self.fetch_command(
                cmd.split_whitespace()
                    .map(str::to_owned)
                    .collect::<Vec<_>>(),
            );
        }

        self
    }
}

/// Optional user configuration. Every field left out keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub templates: Option<Vec<TemplateChoice>>,
    pub template_source: Option<String>,
    pub client_dir: Option<String>,
    pub starter_source: Option<String>,
    pub starter_dir: Option<String>,
    pub fetch_command: Option<Vec<String>>,
    pub registry_url: Option<String>,
    pub anchor_package: Option<String>,
    pub namespace_prefix: Option<String>,
    pub workspace_marker: Option<String>,
}

impl ConfigFile {
    /// Reads the file at `path`, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if the file exists but can not be read
    /// or is not a valid configuration.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| ScaffoldError::Config(format!("{}: {e}", path.display())))
    }
}

impl ScaffoldConfig {
    #[must_use]
    pub fn builder() -> ScaffoldConfigBuilder {
        ScaffoldConfigBuilder::default()
    }

    /// Where the user configuration file is looked up, if the platform has a
    /// config directory at all.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "dojoengine", "create-dojo")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Builds the configuration from the defaults, the optional config file
    /// at `file` and the environment looked up through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if the file is malformed or the
    /// resulting configuration is invalid.
    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(path) = file {
            trace!("Config file: {}", path.display());
            if let Some(overrides) = ConfigFile::read(path)? {
                builder.apply_file(overrides);
            }
        }

        builder.apply_env(env).build()
    }

    /// Loads the configuration for this process.
    ///
    /// # Errors
    ///
    /// See [`ScaffoldConfig::from_sources`].
    pub fn load() -> Result<Self> {
        Self::from_sources(Self::user_config_path().as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    #[must_use]
    pub fn templates(&self) -> &[TemplateChoice] {
        &self.templates
    }

    #[must_use]
    pub fn find_template(&self, id: &str) -> Option<&TemplateChoice> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Remote reference for `template`, e.g. `dojoengine/dojo.js/clients/react/react-app`.
    #[must_use]
    pub fn template_ref(&self, template: &TemplateChoice) -> String {
        format!("{}/{}", self.template_source.trim_end_matches('/'), template.id)
    }

    #[must_use]
    pub fn starter_source(&self) -> &str {
        &self.starter_source
    }

    #[must_use]
    pub fn client_dir(&self) -> &str {
        &self.client_dir
    }

    #[must_use]
    pub fn starter_dir(&self) -> &str {
        &self.starter_dir
    }

    #[must_use]
    pub fn fetch_command(&self) -> &[String] {
        &self.fetch_command
    }

    #[must_use]
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    #[must_use]
    pub fn anchor_package(&self) -> &str {
        &self.anchor_package
    }

    #[must_use]
    pub fn namespace_prefix(&self) -> &str {
        &self.namespace_prefix
    }

    #[must_use]
    pub fn workspace_marker(&self) -> &str {
        &self.workspace_marker
    }
}
