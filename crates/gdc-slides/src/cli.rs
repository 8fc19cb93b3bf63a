use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{download, fetch, labels, plan, subtypes};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "gdc-slides",
    version = env!("CARGO_PKG_VERSION"),
    about,
    long_about = None,
    propagate_version = true
)]
pub struct App {
    /// TOML config file (default: ~/.config/gdc-slides/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(
        alias = "dl",
        name = "download",
        about = "Download the slides named in an image list"
    )]
    Download(download::DownloadArg),
    #[command(alias = "f", name = "fetch", about = "Download or resume a single GDC file")]
    Fetch(fetch::FetchArg),
    #[command(name = "plan", about = "Show where a transfer into a destination would resume")]
    Plan(plan::PlanArg),

    // Labels
    #[command(
        alias = "lb",
        name = "labels",
        about = "Build a label file from a listing and subtype table"
    )]
    Labels(labels::LabelsArg),
    #[command(alias = "st", name = "subtypes", about = "Count patients per subtype")]
    Subtypes(subtypes::SubtypesArg),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use gdc_labels::Subtype;

    #[test]
    fn test_cli_is_consistent() {
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_download() {
        let app = App::parse_from([
            "gdc-slides",
            "-vv",
            "dl",
            "--list",
            "test_list.csv",
            "--retries",
            "3",
        ]);
        assert_eq!(app.verbose, 2);
        match app.cmd {
            Commands::Download(arg) => {
                assert_eq!(arg.list, PathBuf::from("test_list.csv"));
                assert_eq!(arg.retries, Some(3));
                assert_eq!(arg.out, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_subtypes_binary() {
        let app = App::parse_from([
            "gdc-slides",
            "subtypes",
            "--table",
            "stad.csv",
            "--binary",
            "MSI",
        ]);
        match app.cmd {
            Commands::Subtypes(arg) => assert_eq!(arg.binary, Some(Subtype::Msi)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
