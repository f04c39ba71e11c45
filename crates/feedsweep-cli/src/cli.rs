//! CLI.

use super::*;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the credentials file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log debug information.
    #[arg(short, long, action)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the credentials file path.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Mark low-value unread entries as read.
    MarkAsRead {
        /// Category to sweep. Defaults to all categories.
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
        /// Select entries with engagement strictly below this score.
        #[arg(
            long,
            value_name = "SCORE",
            default_value_t = -1,
            allow_negative_numbers = true
        )]
        engagement_less_than: i64,
        /// Skip the confirmation prompt.
        #[arg(long, action)]
        no_confirmation: bool,
        /// Only consider entries crawled at least this many days ago.
        #[arg(long, value_name = "DAYS", default_value_t = 0)]
        min_entry_age_days: i64,
        /// Mark all but one entry of each exact-title group.
        #[arg(long, action)]
        remove_duplicates: bool,
        /// Semicolon-separated words matched case-insensitively against
        /// titles.
        #[arg(long, value_name = "WORDS")]
        blacklisted_words: Option<String>,
        /// Repeat the sweep every this many minutes (0 runs once).
        #[arg(long, value_name = "MINUTES", default_value_t = 0)]
        interval_minutes: u64,
    },
}
