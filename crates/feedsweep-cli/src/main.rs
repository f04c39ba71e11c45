//! feedsweep.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use feedsweep_core::{FeedlyClient, SelectionParams};

mod cli;
mod config;
mod logging;
mod run;


use cli::{Cli, Command};
use config::Credentials;
use run::MarkAsReadOptions;

const DEFAULT_CONFIG_PATH: &str = "./feedsweep.ini";

/// Entry point for feedsweep.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup(&cli)?;
    println!("Starting feedsweep v{} ...", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config_path();
    tracing::debug!("Using config file {}", config_path.display());
    let credentials = match Credentials::load(&config_path)? {
        Some(credentials) => credentials,
        None => {
            Credentials::write_template(&config_path)?;
            println!(
                "ERROR: No user ID or auth token defined - please get from \
                 https://developer.feedly.com/v3/developer/ and define in \
                 file {}",
                config_path.display()
            );
            std::process::exit(-1);
        }
    };

    match cli.command {
        Command::MarkAsRead {
            category,
            engagement_less_than,
            no_confirmation,
            min_entry_age_days,
            remove_duplicates,
            blacklisted_words,
            interval_minutes,
        } => {
            let service =
                FeedlyClient::new(credentials.user_id, credentials.auth_token);
            let options = MarkAsReadOptions {
                category,
                selection: SelectionParams {
                    minimal_engagement: engagement_less_than,
                    min_age_days: min_entry_age_days,
                    remove_duplicates,
                    blacklisted_words,
                },
                auto: no_confirmation,
                interval_minutes,
            };
            let mut input = std::io::stdin().lock();
            run::mark_as_read(&service, &options, &mut input).await;
        }
    }

    Ok(())
}
