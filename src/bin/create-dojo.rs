use anyhow::{Context, Result};
use clap::Parser;
use create_dojo::{
    args::{Args, Commands},
    collect_selections, error,
    scaffold::resolve_cwd,
    trace, CommandFetcher, InquirePrompter, NpmRegistry, Scaffold, ScaffoldConfig,
};
use std::process::ExitCode;

fn app(args: &Args) -> Result<()> {
    match args.command {
        Commands::Start {
            ref cwd,
            ref template,
            ref name,
        } => {
            let config = ScaffoldConfig::load()?;
            let cwd = resolve_cwd(cwd.as_deref()).context("Failed to get current dir")?;
            trace!("Working directory: {}", cwd.display());

            let (template, name) = collect_selections(
                &config,
                &mut InquirePrompter,
                template.as_deref(),
                name.as_deref(),
            )?;

            let fetcher = CommandFetcher::from_command(config.fetch_command())
                .context("No fetch command configured")?;
            let registry = NpmRegistry::new(config.registry_url())?;

            Scaffold {
                config: &config,
                fetcher: &fetcher,
                versions: &registry,
            }
            .run(&cwd, &template, &name)?;

            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}
