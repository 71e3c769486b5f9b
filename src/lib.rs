//! Bookedge - sportsbook odds aggregation and best-price ranking.
//!
//! This crate ingests flat odds snapshots published by an upstream feed
//! and computes which sportsbook is actually worth opening: per-outcome
//! best prices, a book leaderboard, line-movement summaries, and a
//! cross-book arbitrage/tight-line scan.
//!
//! # Architecture
//!
//! Data flows one way through three layers:
//!
//! - **[`feed`]** - the boundary: fetch a snapshot (HTTP or local file),
//!   parse the delimited rows, and normalize them into typed events.
//!   Upstream failures degrade to empty data here, never to errors.
//! - **[`domain`]** - pure computation over one in-memory snapshot:
//!   best-price selection, book ranking, movement, market scanning.
//!   No I/O, no shared state; every run reprocesses its own snapshot.
//! - **[`cli`]** - clap commands rendering the aggregates as tables or
//!   JSON.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and logging setup
//! - [`domain`] - events, quotes, American-odds math, aggregations
//! - [`error`] - error types for the crate
//! - [`feed`] - snapshot fetching, parsing, normalization
//! - [`cli`] - command definitions and handlers
//!
//! # Example
//!
//! ```
//! use bookedge::domain::{best_quote, Book, Outcome, Quote};
//!
//! let quotes = vec![
//!     Quote { book: Book::from("fanduel"), outcome: Outcome::Home, price: -110, line: None },
//!     Quote { book: Book::from("draftkings"), outcome: Outcome::Home, price: -105, line: None },
//! ];
//! let best = best_quote(&quotes).unwrap();
//! assert_eq!(best.book, Book::from("draftkings"));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
