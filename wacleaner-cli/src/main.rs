mod commands;
mod config;
mod filters;
mod runner;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::Result;

use commands::{Pick, Target};
use config::{Config, Settings};
use filters::{SortArg, ViewArg, date_range};

/// wacleaner - browse and clean WhatsApp media folders
#[derive(Parser, Debug)]
#[command(name = "wacleaner")]
#[command(about = "Browse, filter and clean WhatsApp media folders")]
#[command(version)]
struct Args {
    /// WhatsApp home directory (the folder containing `Media`)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Config file (defaults to <config dir>/wacleaner/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every media category with its size
    Categories,
    /// List the files of a category
    List(FilterArgs),
    /// Delete files of a category
    Clean(CleanArgs),
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Category name, e.g. images, "voice notes", profile-photos
    category: String,

    /// Sub-folder to show
    #[arg(long, value_enum, default_value_t = ViewArg::Received)]
    view: ViewArg,

    /// Sort key
    #[arg(short, long, value_enum)]
    sort: Option<SortArg>,

    /// Sort ascending
    #[arg(long, conflicts_with = "descending")]
    ascending: bool,

    /// Sort descending (default)
    #[arg(long)]
    descending: bool,

    /// Only files modified on or after this date (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Only files modified on or before this date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn descending(&self) -> Option<bool> {
        if self.ascending {
            Some(false)
        } else if self.descending {
            Some(true)
        } else {
            None
        }
    }

    fn target(&self) -> Result<Target> {
        Ok(Target {
            category: self.category.clone(),
            view: self.view.into(),
            range: date_range(&Local, self.from, self.to)?,
        })
    }
}

#[derive(ClapArgs, Debug)]
struct CleanArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Delete every listed file of the sub-folder
    #[arg(long, conflicts_with = "files", required_unless_present = "files")]
    all: bool,

    /// File to delete (path or file name); repeatable
    #[arg(long = "file", id = "files")]
    files: Vec<PathBuf>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    yes: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if quiet { log::LevelFilter::Error } else { level })
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let config = Config::load(args.config.as_deref())?;

    match &args.command {
        Command::Categories => {
            let settings = Settings::resolve(&config, args.home.clone(), None, None);
            commands::categories(&settings)
        }
        Command::List(filter) => {
            let settings = Settings::resolve(
                &config,
                args.home.clone(),
                filter.sort.map(Into::into),
                filter.descending(),
            );
            commands::list(&settings, &filter.target()?)
        }
        Command::Clean(clean) => {
            let filter = &clean.filter;
            let settings = Settings::resolve(
                &config,
                args.home.clone(),
                filter.sort.map(Into::into),
                filter.descending(),
            );
            let pick = if clean.all {
                Pick::All
            } else {
                Pick::Files(clean.files.clone())
            };

            if !commands::clean(&settings, &filter.target()?, &pick, clean.yes)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_files() {
        let args = Args::try_parse_from([
            "wacleaner",
            "clean",
            "images",
            "--view",
            "sent",
            "--file",
            "a.jpg",
            "--file",
            "b.jpg",
            "--ascending",
        ])
        .unwrap();
        match args.command {
            Command::Clean(clean) => {
                assert_eq!(clean.files.len(), 2);
                assert!(!clean.all);
                assert_eq!(clean.filter.view, ViewArg::Sent);
                assert_eq!(clean.filter.descending(), Some(false));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_clean_needs_a_pick() {
        assert!(Args::try_parse_from(["wacleaner", "clean", "images"]).is_err());
        assert!(
            Args::try_parse_from(["wacleaner", "clean", "images", "--all", "--file", "x"]).is_err()
        );
    }

    #[test]
    fn test_dates_come_in_pairs() {
        let half = Args::try_parse_from(["wacleaner", "list", "images", "--from", "2024-01-01"]);
        assert!(half.is_err());
        let args = Args::try_parse_from([
            "wacleaner", "list", "images", "--from", "2024-01-01", "--to", "2024-01-31",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::List(ref f) if f.from.is_some() && f.to.is_some()));
    }
}
