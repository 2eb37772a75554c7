use std::path::PathBuf;

pub use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new project with a selected template
    Start {
        /// The working directory [default: current directory]
        #[clap(short, long)]
        cwd: Option<PathBuf>,

        /// Template to use instead of asking
        #[clap(short, long)]
        template: Option<String>,

        /// Project name to use instead of asking
        #[clap(short, long)]
        name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_defaults() {
        let args = Args::try_parse_from(["create-dojo", "start"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Start {
                cwd: None,
                template: None,
                name: None
            }
        );
    }

    #[test]
    fn start_flags() {
        let args = Args::try_parse_from([
            "create-dojo",
            "start",
            "-c",
            "../games",
            "--template",
            "react-app",
            "-n",
            "chess",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Commands::Start {
                cwd: Some(PathBuf::from("../games")),
                template: Some("react-app".into()),
                name: Some("chess".into())
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["create-dojo"]).is_err());
    }
}
