//! Delimited-text parsing for the three feed schemas.
//!
//! The feed publishes comma-separated rows with a fixed column order and
//! a quoted-field rule: a double quote toggles "inside quotes" mode, and
//! commas inside quotes are literal content. `""` inside a quoted field
//! is an escaped quote. Column meaning is positional; header rows are
//! recognized by their first field and skipped.
//!
//! Parsing is lenient by contract: malformed numeric fields degrade to a
//! default instead of erroring (price -> 0, prop line -> 0, odds line ->
//! absent), rows that are too short or carry an unknown market/outcome
//! tag are skipped, and an empty body yields an empty list. The feed is
//! best-effort data; a bad row must never take the whole snapshot down.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Book, EventId, LatestRow, MarketType, OddsRow, Outcome, PropRow};

const ODDS_COLUMNS: usize = 11;
const LATEST_COLUMNS: usize = 15;
const PROP_COLUMNS: usize = 12;

/// Split one line on commas, honoring the quote-toggle rule.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse a history feed body: `timestamp_utc, book, sport, event_id,
/// event_start_time, home_team, away_team, market_type, outcome, price,
/// line`.
pub fn parse_odds_rows(body: &str) -> Vec<OddsRow> {
    rows_of(body, ODDS_COLUMNS, "timestamp_utc")
        .filter_map(|fields| {
            let market_type = parse_market(&fields[7])?;
            let outcome = parse_outcome(&fields[8])?;
            Some(OddsRow {
                timestamp_utc: fields[0].clone(),
                book: Book::new(&fields[1]),
                sport: fields[2].clone(),
                event_id: EventId::new(fields[3].clone()),
                event_start_time: optional(&fields[4]),
                home_team: fields[5].clone(),
                away_team: fields[6].clone(),
                market_type,
                outcome,
                price: parse_price(&fields[9]),
                line: parse_line(&fields[10]),
            })
        })
        .collect()
}

/// Parse a latest-snapshot body: `book, sport, event_id,
/// event_start_time, home_team, away_team, market_type, outcome,
/// opening_price, current_price, price_movement, opening_line,
/// current_line, line_movement, last_updated`.
pub fn parse_latest_rows(body: &str) -> Vec<LatestRow> {
    rows_of(body, LATEST_COLUMNS, "book")
        .filter_map(|fields| {
            let market_type = parse_market(&fields[6])?;
            let outcome = parse_outcome(&fields[7])?;
            Some(LatestRow {
                book: Book::new(&fields[0]),
                sport: fields[1].clone(),
                event_id: EventId::new(fields[2].clone()),
                event_start_time: optional(&fields[3]),
                home_team: fields[4].clone(),
                away_team: fields[5].clone(),
                market_type,
                outcome,
                opening_price: parse_price(&fields[8]),
                current_price: parse_price(&fields[9]),
                price_movement: parse_price(&fields[10]),
                opening_line: parse_line(&fields[11]),
                current_line: parse_line(&fields[12]),
                line_movement: parse_line(&fields[13]),
                last_updated: fields[14].clone(),
            })
        })
        .collect()
}

/// Parse a props feed body: `timestamp_utc, book, sport, event_id,
/// event_start_time, home_team, away_team, player_name, prop_type,
/// outcome, line, price`.
pub fn parse_prop_rows(body: &str) -> Vec<PropRow> {
    rows_of(body, PROP_COLUMNS, "timestamp_utc")
        .filter_map(|fields| {
            let outcome = parse_outcome(&fields[9])?;
            Some(PropRow {
                timestamp_utc: fields[0].clone(),
                book: Book::new(&fields[1]),
                sport: fields[2].clone(),
                event_id: EventId::new(fields[3].clone()),
                event_start_time: optional(&fields[4]),
                home_team: fields[5].clone(),
                away_team: fields[6].clone(),
                player_name: fields[7].clone(),
                prop_type: fields[8].clone(),
                outcome,
                line: fields[10].trim().parse().unwrap_or(Decimal::ZERO),
                price: parse_price(&fields[11]),
            })
        })
        .collect()
}

/// Render a latest snapshot back to feed CSV, header included.
pub fn latest_to_csv(rows: &[LatestRow]) -> String {
    let mut out = String::from(
        "book,sport,event_id,event_start_time,home_team,away_team,market_type,outcome,\
         opening_price,current_price,price_movement,opening_line,current_line,line_movement,\
         last_updated\n",
    );
    for row in rows {
        let fields = [
            row.book.to_string(),
            row.sport.clone(),
            row.event_id.to_string(),
            row.event_start_time.clone().unwrap_or_default(),
            row.home_team.clone(),
            row.away_team.clone(),
            row.market_type.to_string(),
            row.outcome.to_string(),
            row.opening_price.to_string(),
            row.current_price.to_string(),
            row.price_movement.to_string(),
            row.opening_line.map(|l| l.to_string()).unwrap_or_default(),
            row.current_line.map(|l| l.to_string()).unwrap_or_default(),
            row.line_movement.map(|l| l.to_string()).unwrap_or_default(),
            row.last_updated.clone(),
        ];
        let escaped: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    out
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn rows_of<'a>(
    body: &'a str,
    columns: usize,
    header_tag: &'a str,
) -> impl Iterator<Item = Vec<String>> + 'a {
    body.lines().filter_map(move |line| {
        if line.trim().is_empty() {
            return None;
        }
        let fields = split_fields(line);
        if fields[0] == header_tag {
            return None;
        }
        if fields.len() < columns {
            debug!(fields = fields.len(), expected = columns, "short feed row skipped");
            return None;
        }
        Some(fields)
    })
}

fn parse_market(tag: &str) -> Option<MarketType> {
    let parsed = MarketType::parse(tag);
    if parsed.is_none() {
        debug!(tag, "unknown market tag, row skipped");
    }
    parsed
}

fn parse_outcome(tag: &str) -> Option<Outcome> {
    let parsed = Outcome::parse(tag);
    if parsed.is_none() {
        debug!(tag, "unknown outcome tag, row skipped");
    }
    parsed
}

fn parse_price(field: &str) -> i32 {
    field.trim().parse().unwrap_or(0)
}

fn parse_line(field: &str) -> Option<Decimal> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}
