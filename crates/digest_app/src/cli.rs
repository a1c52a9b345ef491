use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use digest_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

use crate::config::{ReportFormat, DEFAULT_CONFIG_FILE};

/// Collects news bullets from mail digests into a categorized report.
#[derive(Debug, Parser)]
#[command(name = "news-digest", version, about)]
pub struct Cli {
    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Log file, truncated on every run.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
    /// Also log to the terminal.
    #[arg(long, global = true)]
    pub log_terminal: bool,
    /// Log to the terminal only; no log file is written.
    #[arg(long, global = true, conflicts_with = "log_file")]
    pub no_log_file: bool,
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the folders of a Maildir store.
    Folders {
        /// Root of the Maildir store.
        #[arg(long)]
        maildir: PathBuf,
    },
    /// Search a folder, preview the matches and save the digest report.
    Run(RunArgs),
    /// Write the default configuration to a new file.
    InitConfig {
        /// Target file; must not exist yet.
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Root of the Maildir store.
    #[arg(long)]
    pub maildir: PathBuf,
    /// Folder id as printed by `folders`; `.` is the store root.
    #[arg(long, default_value = ".")]
    pub folder: String,
    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,
    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    pub end: NaiveDate,
    /// Comma-separated subject keywords; any one must match.
    #[arg(long, default_value = "")]
    pub keywords: String,
    /// Existing directory for the report; overrides the configured one.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Report format; overrides the configured one.
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Only print the preview.
    #[arg(long)]
    pub no_save: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.no_log_file {
            LogDestination::Terminal
        } else if self.log_terminal {
            LogDestination::Both(self.log_file.clone())
        } else {
            LogDestination::File(self.log_file.clone())
        }
    }
}
