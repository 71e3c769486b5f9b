//! Flattened feed rows.
//!
//! The upstream feed publishes flat delimited snapshots; these are the
//! typed forms of its three row schemas. Field order is fixed by the feed
//! and mirrored in `feed::csv`.

use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::{Book, EventId};
use super::odds::{MarketType, Outcome};

/// One odds observation from the history feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OddsRow {
    pub timestamp_utc: String,
    pub book: Book,
    pub sport: String,
    pub event_id: EventId,
    pub event_start_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub market_type: MarketType,
    pub outcome: Outcome,
    /// American odds; 0 means "no data".
    pub price: i32,
    pub line: Option<Decimal>,
}

/// One row of the latest snapshot, with movement computed against the
/// opening observation of the same series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestRow {
    pub book: Book,
    pub sport: String,
    pub event_id: EventId,
    pub event_start_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub market_type: MarketType,
    pub outcome: Outcome,
    pub opening_price: i32,
    pub current_price: i32,
    pub price_movement: i32,
    pub opening_line: Option<Decimal>,
    pub current_line: Option<Decimal>,
    pub line_movement: Option<Decimal>,
    pub last_updated: String,
}

impl LatestRow {
    /// Project the current side of the snapshot back into an `OddsRow`,
    /// which is what the aggregation pipeline consumes.
    pub fn to_current_row(&self) -> OddsRow {
        OddsRow {
            timestamp_utc: self.last_updated.clone(),
            book: self.book.clone(),
            sport: self.sport.clone(),
            event_id: self.event_id.clone(),
            event_start_time: self.event_start_time.clone(),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            market_type: self.market_type,
            outcome: self.outcome,
            price: self.current_price,
            line: self.current_line,
        }
    }
}

/// One player-prop observation from the props feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropRow {
    pub timestamp_utc: String,
    pub book: Book,
    pub sport: String,
    pub event_id: EventId,
    pub event_start_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub player_name: String,
    pub prop_type: String,
    pub outcome: Outcome,
    /// Degrades to 0 when the feed field is malformed.
    pub line: Decimal,
    /// American odds; 0 means "no data" or a malformed feed field.
    pub price: i32,
}
