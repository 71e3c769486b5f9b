//! Configuration loading from TOML files.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::domain::{Book, ScanThresholds};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub filter: FilterConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

/// Where the feed snapshots live. Any of these may be empty; a command
/// that needs one and finds neither a config URL nor a CLI source errors
/// up front.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeedConfig {
    /// Latest-snapshot CSV (movement-annotated rows).
    pub latest_url: String,
    /// Full odds history CSV.
    pub history_url: String,
    /// Player-props CSV.
    pub props_url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Books to include; empty means all books.
    pub books: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Tight-line ceiling on the implied-probability sum.
    pub max_implied: Decimal,
    /// Minimum arbitrage ROI percent to report.
    pub min_roi: Decimal,
    /// Maximum plausible ROI percent; above this the data is stale.
    pub max_roi: Decimal,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let defaults = ScanThresholds::default();
        Self {
            max_implied: defaults.max_implied,
            min_roi: defaults.min_roi,
            max_roi: defaults.max_roi,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path`, or fall back to defaults when the file
    /// does not exist. A present-but-broken file still errors.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("feed.latest_url", &self.feed.latest_url),
            ("feed.history_url", &self.feed.history_url),
            ("feed.props_url", &self.feed.props_url),
        ] {
            if !value.is_empty() {
                Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                })?;
            }
        }

        if self.scan.max_implied < Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_implied",
                reason: "must be at least 1.0".to_string(),
            }
            .into());
        }
        if self.scan.min_roi > self.scan.max_roi {
            return Err(ConfigError::InvalidValue {
                field: "scan.min_roi",
                reason: "must not exceed scan.max_roi".to_string(),
            }
            .into());
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("unknown format '{other}'"),
                }
                .into())
            }
        }

        Ok(())
    }

    /// Configured book filter as domain identifiers.
    pub fn allowed_books(&self) -> Vec<Book> {
        self.filter.books.iter().map(Book::new).collect()
    }

    pub fn scan_thresholds(&self) -> ScanThresholds {
        ScanThresholds {
            max_implied: self.scan.max_implied,
            min_roi: self.scan.min_roi,
            max_roi: self.scan.max_roi,
        }
    }

    /// Install the global tracing subscriber. RUST_LOG overrides the
    /// configured level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        // Logs go to stderr so --json output on stdout stays parseable.
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        if self.logging.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}
