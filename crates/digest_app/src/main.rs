mod app;
mod cli;
mod config;
mod render;

use std::io::{self, Write};

use clap::Parser;
use digest_logging::{digest_error, digest_info};

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    digest_logging::initialize(cli.log_destination(), cli.log_level());
    digest_info!("news-digest {} starting", env!("CARGO_PKG_VERSION"));

    let result = execute(cli);
    if let Err(err) = &result {
        digest_error!("news-digest failed: {:#}", err);
    }
    result
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::InitConfig { path } => {
            let written = config::write_default_config(&path)?;
            writeln!(stdout, "Wrote {}", written.display())?;
            Ok(())
        }
        Command::Folders { maildir } => {
            let config = config::load_config(&cli.config)?;
            app::list_folders(maildir, &config, &mut stdout)
        }
        Command::Run(args) => {
            let config = config::load_config(&cli.config)?;
            app::run_digest(args, &config, &mut stdout)
        }
    }
}
