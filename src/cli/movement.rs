//! Handler for the `movement` command.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{output, FeedKind, MovementArgs};
use crate::config::Config;
use crate::domain::{compute_latest, format_american};
use crate::error::Result;
use crate::feed::{filter_books, latest_to_csv, parse_odds_rows};

#[derive(Tabled)]
struct MoveTableRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "Now")]
    now: String,
    #[tabled(rename = "Move")]
    movement: String,
    #[tabled(rename = "Line Move")]
    line_move: String,
}

pub async fn execute(args: &MovementArgs, config: &Config) -> Result<()> {
    let body = args.source.load_body(config, FeedKind::History).await?;
    let rows = parse_odds_rows(&body);
    let rows = filter_books(rows, &args.source.allowed_books(config), |r| &r.book);
    let latest = compute_latest(&rows);

    if let Some(path) = &args.out {
        std::fs::write(path, latest_to_csv(&latest))?;
        output::ok(&format!(
            "wrote {} snapshot rows to {}",
            latest.len(),
            path.display()
        ));
        return Ok(());
    }

    if args.source.json {
        println!("{}", serde_json::to_string_pretty(&latest)?);
        return Ok(());
    }

    output::section("Biggest Price Moves");

    if latest.is_empty() {
        output::note("No history in the snapshot.");
        return Ok(());
    }

    let mut movers = latest;
    movers.sort_by_key(|row| std::cmp::Reverse(row.price_movement.abs()));
    movers.truncate(args.top);

    let table_rows: Vec<MoveTableRow> = movers
        .iter()
        .map(|row| MoveTableRow {
            game: format!("{} @ {}", row.away_team, row.home_team),
            market: format!("{}/{}", row.market_type, row.outcome),
            book: row.book.to_string(),
            open: format_american(row.opening_price),
            now: format_american(row.current_price),
            movement: format!("{:+}", row.price_movement),
            line_move: row
                .line_movement
                .map(|l| l.to_string())
                .unwrap_or_else(|| "—".to_string()),
        })
        .collect();

    println!("{}", Table::new(table_rows).with(Style::sharp()));
    Ok(())
}
