//! Feed boundary: fetching, parsing, and normalizing odds snapshots.

pub mod csv;
pub mod fetch;
pub mod normalize;

pub use csv::{latest_to_csv, parse_latest_rows, parse_odds_rows, parse_prop_rows, split_fields};
pub use fetch::{read_snapshot, FeedClient};
pub use normalize::{events_from_rows, filter_books, props_from_rows};
