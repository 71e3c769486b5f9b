//! Shared data-source arguments and resolution.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::Config;
use crate::domain::Book;
use crate::error::{ConfigError, Result};
use crate::feed::{read_snapshot, FeedClient};

/// Which feed schema a command consumes.
#[derive(Debug, Clone, Copy)]
pub enum FeedKind {
    Latest,
    History,
    Props,
}

impl FeedKind {
    fn config_url<'a>(&self, config: &'a Config) -> (&'static str, &'a str) {
        match self {
            Self::Latest => ("feed.latest_url", &config.feed.latest_url),
            Self::History => ("feed.history_url", &config.feed.history_url),
            Self::Props => ("feed.props_url", &config.feed.props_url),
        }
    }
}

/// Arguments shared by every snapshot-consuming command.
#[derive(Parser, Debug)]
pub struct SourceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Read the snapshot from a local CSV file instead of fetching
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Fetch the snapshot from this URL, overriding the configured feed
    #[arg(long)]
    pub url: Option<String>,

    /// Comma-separated books to include (overrides the config filter)
    #[arg(long)]
    pub books: Option<String>,

    /// Emit JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl SourceArgs {
    /// Resolve the snapshot body for this command.
    ///
    /// A local `--csv` path errors when unreadable; remote fetches follow
    /// the degrade-to-empty policy. With neither a CLI source nor a
    /// configured URL there is nothing sensible to do, so that errors.
    pub async fn load_body(&self, config: &Config, kind: FeedKind) -> Result<String> {
        if let Some(path) = &self.csv {
            info!(path = %path.display(), "reading local snapshot");
            return read_snapshot(path);
        }

        let (field, configured) = kind.config_url(config);
        let url = match &self.url {
            Some(url) => url.as_str(),
            None if !configured.is_empty() => configured,
            None => return Err(ConfigError::MissingField { field }.into()),
        };

        info!(url, "fetching snapshot");
        Ok(FeedClient::new().fetch_text(url).await)
    }

    /// Book filter: CLI flag wins over the config filter; empty means
    /// everything. Gating the display never narrows the computation
    /// beyond what the operator asked for.
    pub fn allowed_books(&self, config: &Config) -> Vec<Book> {
        match &self.books {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Book::new)
                .collect(),
            None => config.allowed_books(),
        }
    }
}
