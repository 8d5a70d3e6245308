use clap::Parser;
use std::path::PathBuf;
use whales_core::{calendar, Count};

/// A TUI that counts whales, one keypress at a time
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Where the count starts
    #[clap(long, default_value = "0")]
    count: Count,

    /// Base URL of a calendar server. When set, every increment also asks
    /// the server for the commit calendar.
    #[clap(long)]
    server: Option<String>,

    /// The username the calendar query asks about
    #[clap(long, default_value = "rmyers")]
    username: String,

    /// Where should we write logs?
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    /// The count the widget starts from.
    pub fn initial_count(&self) -> Count {
        self.count
    }

    /// The calendar server to talk to, if any.
    pub fn calendar_client(&self) -> Option<calendar::Client> {
        self.server.as_deref().map(calendar::Client::new)
    }

    /// Whose commits the query asks about.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get either the configured or a default log directory. If no directory
    /// can be found (e.g. because `$HOME` is unset) we will use the current
    /// directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("zone", "bytes", "whales")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
