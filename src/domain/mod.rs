//! Feed-agnostic domain logic: odds math, quote grouping, best-price
//! selection, and the derived aggregates.

mod best;
mod event;
mod ids;
mod key;
mod leaderboard;
mod movement;
mod odds;
mod row;
mod scan;

// Core domain types
pub use event::{Event, Market, PlayerProp, PropQuote, Quote};
pub use ids::{Book, EventId};
pub use key::{OutcomeKey, PropKey, SeriesKey};
pub use odds::{
    american_to_decimal, format_american, implied_probability, is_offer, is_valid_american,
    MarketType, Outcome,
};
pub use row::{LatestRow, OddsRow, PropRow};

// Best-price selection
pub use best::{best_prices, best_quote, best_with_runner_up, BestPrice, Priced};

// Derived aggregates
pub use leaderboard::{rank_books, rank_books_by_sport, BookStats};
pub use movement::compute_latest;
pub use scan::{scan_markets, Leg, MarketScan, ScanReport, ScanThresholds};
