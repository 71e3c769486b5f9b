//! Handler for the `rank` command.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{output, FeedKind, RankArgs};
use crate::config::Config;
use crate::domain::{rank_books, rank_books_by_sport, BookStats};
use crate::error::Result;
use crate::feed::{events_from_rows, filter_books, parse_latest_rows};

#[derive(Tabled)]
struct RankTableRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Best Price Wins")]
    wins: u32,
    #[tabled(rename = "Markets")]
    groups: u32,
    #[tabled(rename = "Win %")]
    win_pct: String,
    #[tabled(rename = "Avg Edge (pts)")]
    avg_edge: String,
}

pub async fn execute(args: &RankArgs, config: &Config) -> Result<()> {
    let body = args.source.load_body(config, FeedKind::Latest).await?;
    let rows = parse_latest_rows(&body);
    let rows = filter_books(rows, &args.source.allowed_books(config), |r| &r.book);
    let current: Vec<_> = rows.iter().map(|r| r.to_current_row()).collect();
    let events = events_from_rows(&current);

    let overall = rank_books(&events, args.sport.as_deref());

    if args.source.json {
        let payload = if args.per_sport {
            serde_json::json!({
                "overall": overall,
                "by_sport": rank_books_by_sport(&events),
            })
        } else {
            serde_json::json!({ "overall": overall })
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let title = match &args.sport {
        Some(sport) => format!("Book Leaderboard — {sport}"),
        None => "Book Leaderboard — all sports".to_string(),
    };
    output::section(&title);

    if overall.is_empty() {
        output::note("No quotes in the snapshot.");
        return Ok(());
    }

    print_table(&overall);

    if args.per_sport {
        for (sport, stats) in rank_books_by_sport(&events) {
            output::section(&sport);
            print_table(&stats);
        }
    }

    Ok(())
}

fn print_table(stats: &[BookStats]) {
    let rows: Vec<RankTableRow> = stats
        .iter()
        .enumerate()
        .map(|(idx, s)| RankTableRow {
            position: idx + 1,
            book: s.book.to_string(),
            wins: s.wins,
            groups: s.groups,
            win_pct: format!("{}%", s.win_pct),
            avg_edge: s.avg_edge.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
}
