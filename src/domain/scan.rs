//! Cross-book market scanning: arbitrage and tight lines.
//!
//! Takes the best price on each side of a two-way market and sums the
//! implied probabilities. Below 1.0 the market is an arbitrage; between
//! 1.0 and a configured ceiling it is a "tight line" worth watching.
//! Moneylines pair home against away; totals pair over against under per
//! line value, since an over 46.5 does not hedge an under 47.5.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::best::best_quote;
use super::event::{Event, Quote};
use super::ids::{Book, EventId};
use super::odds::{american_to_decimal, format_american, MarketType, Outcome};

/// Thresholds for the scanner.
#[derive(Debug, Clone)]
pub struct ScanThresholds {
    /// Upper bound on implied-probability sum for a tight line (1.02 =
    /// within two points of arbitrage).
    pub max_implied: Decimal,
    /// Minimum arbitrage ROI percent worth reporting.
    pub min_roi: Decimal,
    /// Maximum plausible ROI percent; anything above is stale or broken
    /// feed data.
    pub max_roi: Decimal,
}

impl Default for ScanThresholds {
    fn default() -> Self {
        Self {
            max_implied: Decimal::new(102, 2),
            min_roi: Decimal::new(5, 1),
            max_roi: Decimal::new(150, 1),
        }
    }
}

/// One side of a two-way opportunity.
#[derive(Debug, Clone, Serialize)]
pub struct Leg {
    pub side: String,
    pub book: Book,
    pub price: i32,
}

impl Leg {
    fn from_quote(side: String, quote: &Quote) -> Self {
        Self {
            side,
            book: quote.book.clone(),
            price: quote.price,
        }
    }

    pub fn describe(&self) -> String {
        format!("{} @ {}: {}", self.side, self.book, format_american(self.price))
    }
}

/// A two-way market whose best prices sum close to (or past) fair.
#[derive(Debug, Clone, Serialize)]
pub struct MarketScan {
    pub event_id: EventId,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub market_type: MarketType,
    /// Sum of implied probabilities of the two best prices, 4 dp.
    pub implied_sum: Decimal,
    pub legs: [Leg; 2],
}

impl MarketScan {
    /// Percentage points away from a true arbitrage. Negative once the
    /// market is past fair.
    pub fn gap_pct(&self) -> Decimal {
        ((self.implied_sum - Decimal::ONE) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Guaranteed return percent when staking both legs proportionally.
    /// Only meaningful when `implied_sum < 1`.
    pub fn roi_pct(&self) -> Decimal {
        ((Decimal::ONE / self.implied_sum - Decimal::ONE) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Result of scanning one snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// implied_sum < 1, ROI within [min_roi, max_roi]; sorted ROI descending.
    pub arbitrage: Vec<MarketScan>,
    /// 1 <= implied_sum <= max_implied; sorted implied sum ascending.
    pub tight_lines: Vec<MarketScan>,
}

/// Scan every two-way market across the snapshot.
///
/// Events whose start time parses and lies before `cutoff` are skipped;
/// events with no parseable start time are kept, since the feed is
/// best-effort about that column.
pub fn scan_markets(
    events: &[Event],
    thresholds: &ScanThresholds,
    cutoff: Option<DateTime<Utc>>,
) -> ScanReport {
    let mut report = ScanReport::default();

    for event in events {
        if let (Some(start), Some(cutoff)) = (event.start_time, cutoff) {
            if start < cutoff {
                continue;
            }
        }

        for market in &event.markets {
            match market.market_type {
                MarketType::Moneyline => {
                    let home = market.outcome_quotes(Outcome::Home);
                    let away = market.outcome_quotes(Outcome::Away);
                    if let Some(scan) = pair_scan(
                        event,
                        market.market_type,
                        &home,
                        &away,
                        event.home_team.clone(),
                        event.away_team.clone(),
                    ) {
                        classify(scan, thresholds, &mut report);
                    }
                }
                MarketType::Total => {
                    for (line, overs, unders) in totals_by_line(&market.quotes) {
                        if let Some(scan) = pair_scan(
                            event,
                            market.market_type,
                            &overs,
                            &unders,
                            format!("Over {line}"),
                            format!("Under {line}"),
                        ) {
                            classify(scan, thresholds, &mut report);
                        }
                    }
                }
                // A spread's two sides hedge only at mirrored lines; the
                // feed does not guarantee mirrored pairs, so spreads are
                // not scanned.
                MarketType::Spread => {}
            }
        }
    }

    report
        .arbitrage
        .sort_by(|a, b| a.implied_sum.cmp(&b.implied_sum));
    report
        .tight_lines
        .sort_by(|a, b| a.implied_sum.cmp(&b.implied_sum));
    report
}

type TotalsGroup<'a> = (Decimal, Vec<&'a Quote>, Vec<&'a Quote>);

fn totals_by_line(quotes: &[Quote]) -> Vec<TotalsGroup<'_>> {
    let mut by_line: BTreeMap<Decimal, (Vec<&Quote>, Vec<&Quote>)> = BTreeMap::new();
    for quote in quotes {
        let Some(line) = quote.line else { continue };
        let entry = by_line.entry(line).or_default();
        match quote.outcome {
            Outcome::Over => entry.0.push(quote),
            Outcome::Under => entry.1.push(quote),
            _ => {}
        }
    }
    by_line
        .into_iter()
        .map(|(line, (overs, unders))| (line, overs, unders))
        .collect()
}

fn pair_scan(
    event: &Event,
    market_type: MarketType,
    side_one: &[&Quote],
    side_two: &[&Quote],
    label_one: String,
    label_two: String,
) -> Option<MarketScan> {
    let best_one = best_quote(side_one)?;
    let best_two = best_quote(side_two)?;

    let implied_one = Decimal::ONE / american_to_decimal(best_one.price)?;
    let implied_two = Decimal::ONE / american_to_decimal(best_two.price)?;
    let implied_sum = (implied_one + implied_two)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);

    Some(MarketScan {
        event_id: event.event_id.clone(),
        sport: event.sport.clone(),
        home_team: event.home_team.clone(),
        away_team: event.away_team.clone(),
        market_type,
        implied_sum,
        legs: [
            Leg::from_quote(label_one, best_one),
            Leg::from_quote(label_two, best_two),
        ],
    })
}

fn classify(scan: MarketScan, thresholds: &ScanThresholds, report: &mut ScanReport) {
    if scan.implied_sum < Decimal::ONE {
        let roi = scan.roi_pct();
        if roi >= thresholds.min_roi && roi <= thresholds.max_roi {
            report.arbitrage.push(scan);
        }
    } else if scan.implied_sum <= thresholds.max_implied {
        report.tight_lines.push(scan);
    }
}
