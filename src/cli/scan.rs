//! Handler for the `scan` command.

use chrono::Utc;
use owo_colors::{OwoColorize, Stream};

use crate::cli::{output, FeedKind, ScanArgs};
use crate::config::Config;
use crate::domain::{scan_markets, MarketScan};
use crate::error::Result;
use crate::feed::{events_from_rows, filter_books, parse_latest_rows};

pub async fn execute(args: &ScanArgs, config: &Config) -> Result<()> {
    let body = args.source.load_body(config, FeedKind::Latest).await?;
    let rows = parse_latest_rows(&body);
    let rows = filter_books(rows, &args.source.allowed_books(config), |r| &r.book);
    let current: Vec<_> = rows.iter().map(|r| r.to_current_row()).collect();
    let events = events_from_rows(&current);

    let cutoff = if args.include_started {
        None
    } else {
        Some(Utc::now())
    };
    let report = scan_markets(&events, &config.scan_thresholds(), cutoff);

    if args.source.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Arbitrage");
    if report.arbitrage.is_empty() {
        output::note("No arbitrage right now. Odds shift; check back later.");
    } else {
        for scan in &report.arbitrage {
            let roi = format!("{}% ROI", scan.roi_pct());
            println!(
                "  {} {}",
                roi.if_supports_color(Stream::Stdout, |s| s.green()),
                headline(scan)
            );
            print_legs(scan);
        }
    }

    output::section("Tight Lines");
    if report.tight_lines.is_empty() {
        output::note("No tight lines right now.");
    } else {
        for scan in &report.tight_lines {
            println!("  {}% from arb  {}", scan.gap_pct(), headline(scan));
            print_legs(scan);
        }
    }

    Ok(())
}

fn headline(scan: &MarketScan) -> String {
    format!(
        "{} @ {} ({}, {})",
        scan.away_team, scan.home_team, scan.sport, scan.market_type
    )
}

fn print_legs(scan: &MarketScan) {
    for leg in &scan.legs {
        println!("      {}", leg.describe());
    }
}
