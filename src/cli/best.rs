//! Handler for the `best` command.

use crate::cli::{output, BestArgs, FeedKind};
use crate::config::Config;
use crate::domain::{best_prices, format_american, BestPrice};
use crate::error::Result;
use crate::feed::{events_from_rows, filter_books, parse_latest_rows};

pub async fn execute(args: &BestArgs, config: &Config) -> Result<()> {
    let body = args.source.load_body(config, FeedKind::Latest).await?;
    let rows = parse_latest_rows(&body);
    let rows = filter_books(rows, &args.source.allowed_books(config), |r| &r.book);
    let current: Vec<_> = rows.iter().map(|r| r.to_current_row()).collect();
    let mut events = events_from_rows(&current);

    if let Some(sport) = &args.sport {
        events.retain(|e| &e.sport == sport);
    }

    let results = best_prices(&events);

    if args.source.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        output::note("No quotes in the snapshot.");
        return Ok(());
    }

    let mut last_event = None;
    for result in &results {
        if last_event != Some(&result.key.event_id) {
            output::section(&format!(
                "{} @ {}  [{}]",
                result.away_team, result.home_team, result.sport
            ));
            last_event = Some(&result.key.event_id);
        }
        output::key_value(
            &format!("{}/{}", result.key.market_type, result.key.outcome),
            describe(result),
        );
    }

    Ok(())
}

fn describe(result: &BestPrice) -> String {
    let price = format_american(result.quote.price);
    let line = result
        .quote
        .line
        .map(|l| format!(" (line {l})"))
        .unwrap_or_default();
    match result.runner_up {
        Some(second) => format!(
            "{} @ {}{}  next best {}",
            price,
            result.quote.book,
            line,
            format_american(second)
        ),
        None => format!("{} @ {}{}  (only offer)", price, result.quote.book, line),
    }
}
