//! Command-line interface definitions.

pub mod best;
pub mod movement;
pub mod output;
pub mod props;
pub mod rank;
pub mod scan;
mod source;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

pub use source::{FeedKind, SourceArgs};

/// Bookedge - sportsbook odds aggregation and best-price ranking.
#[derive(Parser, Debug)]
#[command(name = "bookedge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank books by how often they post the best price
    Rank(RankArgs),

    /// Show the best price per outcome for every event
    Best(BestArgs),

    /// Show the player-prop board with best over/under prices
    Props(PropsArgs),

    /// Show the biggest price and line moves in an odds history
    Movement(MovementArgs),

    /// Scan for arbitrage and tight lines across books
    Scan(ScanArgs),
}

/// Arguments for the `rank` subcommand.
#[derive(Parser, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict the ranking to one sport tag (e.g. basketball_nba)
    #[arg(long)]
    pub sport: Option<String>,

    /// Also print a per-sport breakdown
    #[arg(long)]
    pub per_sport: bool,
}

/// Arguments for the `best` subcommand.
#[derive(Parser, Debug)]
pub struct BestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict to one sport tag
    #[arg(long)]
    pub sport: Option<String>,
}

/// Arguments for the `props` subcommand.
#[derive(Parser, Debug)]
pub struct PropsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `movement` subcommand.
#[derive(Parser, Debug)]
pub struct MovementArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show only the N biggest movers (by absolute price movement)
    #[arg(long, default_value = "20")]
    pub top: usize,

    /// Write the full latest snapshot as CSV to this path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Include events that have already started
    #[arg(long)]
    pub include_started: bool,
}

/// Load config for a command, install logging, and run the handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rank(args) => {
            let config = setup(&args.source)?;
            rank::execute(&args, &config).await
        }
        Commands::Best(args) => {
            let config = setup(&args.source)?;
            best::execute(&args, &config).await
        }
        Commands::Props(args) => {
            let config = setup(&args.source)?;
            props::execute(&args, &config).await
        }
        Commands::Movement(args) => {
            let config = setup(&args.source)?;
            movement::execute(&args, &config).await
        }
        Commands::Scan(args) => {
            let config = setup(&args.source)?;
            scan::execute(&args, &config).await
        }
    }
}

fn setup(source: &SourceArgs) -> Result<Config> {
    let config = Config::load_or_default(&source.config)?;
    config.init_logging();
    Ok(config)
}
