//! Opening-versus-current movement over an odds history.
//!
//! Each (book, sport, event, market, outcome) series is reduced to its
//! first and last observation by timestamp; movement is the delta between
//! them. Line movement is only defined when both ends carry a line.

use std::collections::BTreeMap;

use super::key::SeriesKey;
use super::row::{LatestRow, OddsRow};

/// Collapse a history into one `LatestRow` per quote series.
///
/// Timestamps are compared as strings, which orders correctly for the
/// feed's ISO-8601 UTC format. Output is sorted by (sport, event, market,
/// outcome, book) so repeated runs over the same history are identical.
pub fn compute_latest(history: &[OddsRow]) -> Vec<LatestRow> {
    let mut series: BTreeMap<SeriesKey, Vec<&OddsRow>> = BTreeMap::new();

    for row in history {
        let key = SeriesKey {
            sport: row.sport.clone(),
            event_id: row.event_id.clone(),
            market_type: row.market_type,
            outcome: row.outcome,
            book: row.book.clone(),
        };
        series.entry(key).or_default().push(row);
    }

    let mut latest: Vec<LatestRow> = series
        .into_values()
        .map(|mut observations| {
            observations.sort_by(|a, b| a.timestamp_utc.cmp(&b.timestamp_utc));
            let first = observations[0];
            let last = observations[observations.len() - 1];

            let line_movement = match (first.line, last.line) {
                (Some(opening), Some(current)) => Some(current - opening),
                _ => None,
            };

            LatestRow {
                book: last.book.clone(),
                sport: last.sport.clone(),
                event_id: last.event_id.clone(),
                event_start_time: last.event_start_time.clone(),
                home_team: last.home_team.clone(),
                away_team: last.away_team.clone(),
                market_type: last.market_type,
                outcome: last.outcome,
                opening_price: first.price,
                current_price: last.price,
                price_movement: last.price - first.price,
                opening_line: first.line,
                current_line: last.line,
                line_movement,
                last_updated: last.timestamp_utc.clone(),
            }
        })
        .collect();

    latest.sort_by(|a, b| {
        (&a.sport, &a.event_id, a.market_type, a.outcome, &a.book)
            .cmp(&(&b.sport, &b.event_id, b.market_type, b.outcome, &b.book))
    });
    latest
}
