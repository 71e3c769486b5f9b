//! Row-to-domain normalization.
//!
//! Turns flat feed rows into nested `Event` / `PlayerProp` structures,
//! grouping by explicit composite keys. Grouping maps are `BTreeMap` so
//! the output order is deterministic regardless of feed row order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{
    Event, EventId, Market, MarketType, OddsRow, PlayerProp, PropKey, PropQuote, PropRow, Quote,
};

/// Group odds rows into events with nested markets and quotes.
///
/// Event metadata (teams, sport, start time) comes from the first row
/// seen for the event. Quotes keep feed order within each market, which
/// is what makes best-price tie-breaks stable.
pub fn events_from_rows(rows: &[OddsRow]) -> Vec<Event> {
    struct EventAcc {
        sport: String,
        home_team: String,
        away_team: String,
        start_time: Option<DateTime<Utc>>,
        markets: BTreeMap<MarketType, Vec<Quote>>,
    }

    let mut events: BTreeMap<EventId, EventAcc> = BTreeMap::new();

    for row in rows {
        let acc = events.entry(row.event_id.clone()).or_insert_with(|| EventAcc {
            sport: row.sport.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            start_time: parse_start_time(row.event_start_time.as_deref()),
            markets: BTreeMap::new(),
        });

        acc.markets.entry(row.market_type).or_default().push(Quote {
            book: row.book.clone(),
            outcome: row.outcome,
            price: row.price,
            line: row.line,
        });
    }

    events
        .into_iter()
        .map(|(event_id, acc)| Event {
            event_id,
            sport: acc.sport,
            home_team: acc.home_team,
            away_team: acc.away_team,
            start_time: acc.start_time,
            markets: acc
                .markets
                .into_iter()
                .map(|(market_type, quotes)| Market { market_type, quotes })
                .collect(),
        })
        .collect()
}

/// Group prop rows by (event, player, prop type).
pub fn props_from_rows(rows: &[PropRow]) -> Vec<PlayerProp> {
    struct PropAcc {
        sport: String,
        home_team: String,
        away_team: String,
        quotes: Vec<PropQuote>,
    }

    let mut props: BTreeMap<PropKey, PropAcc> = BTreeMap::new();

    for row in rows {
        let key = PropKey {
            event_id: row.event_id.clone(),
            player_name: row.player_name.clone(),
            prop_type: row.prop_type.clone(),
        };
        let acc = props.entry(key).or_insert_with(|| PropAcc {
            sport: row.sport.clone(),
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            quotes: Vec::new(),
        });
        acc.quotes.push(PropQuote {
            book: row.book.clone(),
            outcome: row.outcome,
            line: row.line,
            price: row.price,
        });
    }

    props
        .into_iter()
        .map(|(key, acc)| PlayerProp {
            event_id: key.event_id,
            sport: acc.sport,
            home_team: acc.home_team,
            away_team: acc.away_team,
            player_name: key.player_name,
            prop_type: key.prop_type,
            quotes: acc.quotes,
        })
        .collect()
}

/// Keep only rows from an allowed set of books. An empty set means no
/// filtering; display-time gating never changes what gets computed.
pub fn filter_books<R, F>(rows: Vec<R>, allowed: &[crate::domain::Book], book_of: F) -> Vec<R>
where
    F: Fn(&R) -> &crate::domain::Book,
{
    if allowed.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| allowed.contains(book_of(row)))
        .collect()
}

fn parse_start_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Outcome};
    use rust_decimal_macros::dec;

    fn odds_row(event: &str, book: &str, market: MarketType, outcome: Outcome, price: i32) -> OddsRow {
        OddsRow {
            timestamp_utc: "2024-01-01T00:00:00+00:00".to_string(),
            book: Book::from(book),
            sport: "basketball_nba".to_string(),
            event_id: EventId::from(event),
            event_start_time: Some("2024-01-02T00:30:00+00:00".to_string()),
            home_team: "Bulls".to_string(),
            away_team: "Bucks".to_string(),
            market_type: market,
            outcome,
            price,
            line: None,
        }
    }

    #[test]
    fn rows_group_into_events_and_markets() {
        let rows = vec![
            odds_row("e1", "fanduel", MarketType::Moneyline, Outcome::Home, -110),
            odds_row("e1", "fanduel", MarketType::Moneyline, Outcome::Away, -105),
            odds_row("e1", "draftkings", MarketType::Total, Outcome::Over, -108),
            odds_row("e2", "fanduel", MarketType::Moneyline, Outcome::Home, 120),
        ];

        let events = events_from_rows(&rows);
        assert_eq!(events.len(), 2);

        let e1 = &events[0];
        assert_eq!(e1.event_id, EventId::from("e1"));
        assert_eq!(e1.markets.len(), 2);
        assert!(e1.start_time.is_some());
        let moneyline = e1.market(MarketType::Moneyline).unwrap();
        assert_eq!(moneyline.quotes.len(), 2);
    }

    #[test]
    fn quotes_keep_feed_order_within_a_market() {
        let rows = vec![
            odds_row("e1", "zbook", MarketType::Moneyline, Outcome::Home, 100),
            odds_row("e1", "abook", MarketType::Moneyline, Outcome::Home, 100),
        ];

        let events = events_from_rows(&rows);
        let quotes = &events[0].markets[0].quotes;
        assert_eq!(quotes[0].book, Book::from("zbook"));
        assert_eq!(quotes[1].book, Book::from("abook"));
    }

    #[test]
    fn unparseable_start_time_is_dropped_not_fatal() {
        let mut row = odds_row("e1", "fanduel", MarketType::Moneyline, Outcome::Home, -110);
        row.event_start_time = Some("tomorrow-ish".to_string());

        let events = events_from_rows(&[row]);
        assert_eq!(events.len(), 1);
        assert!(events[0].start_time.is_none());
    }

    #[test]
    fn props_group_by_player_and_type() {
        let base = PropRow {
            timestamp_utc: "2024-01-01T00:00:00+00:00".to_string(),
            book: Book::from("fanduel"),
            sport: "basketball_nba".to_string(),
            event_id: EventId::from("e1"),
            event_start_time: None,
            home_team: "Bulls".to_string(),
            away_team: "Bucks".to_string(),
            player_name: "LeBron James".to_string(),
            prop_type: "player_points".to_string(),
            outcome: Outcome::Over,
            line: dec!(27.5),
            price: -115,
        };
        let mut under = base.clone();
        under.book = Book::from("draftkings");
        under.outcome = Outcome::Under;
        let mut other = base.clone();
        other.prop_type = "player_assists".to_string();

        let props = props_from_rows(&[base, under, other]);
        assert_eq!(props.len(), 2);

        let points = props
            .iter()
            .find(|p| p.prop_type == "player_points")
            .unwrap();
        assert_eq!(points.quotes.len(), 2);
        assert_eq!(points.outcome_quotes(Outcome::Under).len(), 1);
    }

    #[test]
    fn book_filter_empty_set_keeps_everything() {
        let rows = vec![odds_row("e1", "fanduel", MarketType::Moneyline, Outcome::Home, -110)];
        let kept = filter_books(rows.clone(), &[], |r| &r.book);
        assert_eq!(kept.len(), 1);

        let kept = filter_books(rows, &[Book::from("draftkings")], |r| &r.book);
        assert!(kept.is_empty());
    }
}
