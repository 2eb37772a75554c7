use inquire::{validator::Validation, CustomUserError, Select, Text};

use crate::{
    config::ScaffoldConfig,
    error::{Result, ScaffoldError},
    project::{ProjectName, TemplateChoice},
};

pub const TEMPLATE_MESSAGE: &str = "Select a template";
pub const NAME_MESSAGE: &str = "Project name";

/// The interactive half of the tool. Implementations keep asking until they
/// have a valid answer or the user gives up.
pub trait Prompter {
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Prompt`] if the user aborts.
    fn select_template(
        &mut self,
        message: &str,
        choices: &[TemplateChoice],
    ) -> Result<TemplateChoice>;

    /// # Errors
    ///
    /// Returns [`ScaffoldError::Prompt`] if the user aborts.
    fn project_name(&mut self, message: &str, default: &str) -> Result<ProjectName>;
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select_template(
        &mut self,
        message: &str,
        choices: &[TemplateChoice],
    ) -> Result<TemplateChoice> {
        Ok(Select::new(message, choices.to_vec()).prompt()?)
    }

    fn project_name(&mut self, message: &str, default: &str) -> Result<ProjectName> {
        let answer = Text::new(message)
            .with_default(default)
            .with_validator(|input: &str| {
                Ok::<_, CustomUserError>(match ProjectName::parse(input) {
                    Ok(_) => Validation::Valid,
                    Err(e) => Validation::Invalid(e.to_string().into()),
                })
            })
            .prompt()?;

        Ok(ProjectName::parse(&answer)?)
    }
}

/// Settles the template and project name, asking only for what `template`
/// and `name` do not already provide.
///
/// # Errors
///
/// Returns [`ScaffoldError::Config`] for an unknown template id,
/// [`ScaffoldError::Validation`] for an invalid `name`, or whatever the
/// prompter fails with.
pub fn collect_selections(
    config: &ScaffoldConfig,
    prompter: &mut dyn Prompter,
    template: Option<&str>,
    name: Option<&str>,
) -> Result<(TemplateChoice, ProjectName)> {
    let template = match template {
        Some(id) => config.find_template(id).cloned().ok_or_else(|| {
            ScaffoldError::Config(format!(
                "unknown template '{id}', expected one of: {}",
                config
                    .templates()
                    .iter()
                    .map(|t| t.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?,
        None => prompter.select_template(TEMPLATE_MESSAGE, config.templates())?,
    };

    let name = match name {
        Some(name) => ProjectName::parse(name)?,
        None => prompter.project_name(NAME_MESSAGE, &template.id)?,
    };

    Ok((template, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers with fixed values and records what it was asked.
    #[derive(Default)]
    struct Scripted {
        template: usize,
        name: &'static str,
        asked: Vec<String>,
    }

    impl Prompter for Scripted {
        fn select_template(
            &mut self,
            message: &str,
            choices: &[TemplateChoice],
        ) -> Result<TemplateChoice> {
            self.asked.push(message.to_owned());
            Ok(choices[self.template].clone())
        }

        fn project_name(&mut self, message: &str, default: &str) -> Result<ProjectName> {
            self.asked.push(format!("{message} [{default}]"));
            let answer = if self.name.is_empty() { default } else { self.name };
            Ok(ProjectName::parse(answer)?)
        }
    }

    #[test]
    fn name_defaults_to_template_id() {
        let config = ScaffoldConfig::default();
        let mut prompter = Scripted {
            template: 2,
            ..Default::default()
        };

        let (template, name) = collect_selections(&config, &mut prompter, None, None).unwrap();

        assert_eq!(template.id, "react-pwa-app");
        assert_eq!(name.as_str(), "react-pwa-app");
        assert_eq!(
            prompter.asked,
            ["Select a template", "Project name [react-pwa-app]"]
        );
    }

    #[test]
    fn flags_skip_prompts() {
        let config = ScaffoldConfig::default();
        let mut prompter = Scripted::default();

        let (template, name) =
            collect_selections(&config, &mut prompter, Some("react-threejs"), Some("game"))
                .unwrap();

        assert_eq!(template.id, "react-threejs");
        assert_eq!(name.as_str(), "game");
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn bad_flags_are_errors() {
        let config = ScaffoldConfig::default();
        let mut prompter = Scripted::default();

        let err = collect_selections(&config, &mut prompter, Some("vue"), None).unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(ref m) if m.contains("react-app")));

        let err =
            collect_selections(&config, &mut prompter, Some("react-app"), Some("my game"))
                .unwrap_err();
        assert!(matches!(err, ScaffoldError::Validation(_)));
    }
}
