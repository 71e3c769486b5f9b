//! Book ranking: how often each sportsbook posts the best price.
//!
//! A pure batch computation over one feed snapshot. Every outcome group
//! (event x market x outcome) is scored independently: each book with a
//! real offer in the group participates, the best-priced book wins, and
//! the winner's edge is its price minus the runner-up's price in the same
//! group. The edge baseline is deliberately the second-best quote, not a
//! market average; an average would shift with however many stale books
//! happen to quote the market.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::best::best_with_runner_up;
use super::event::Event;
use super::ids::Book;

/// Aggregate standing of one book across all outcome groups it quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookStats {
    pub book: Book,
    /// Outcome groups where this book had the best price.
    pub wins: u32,
    /// Outcome groups where this book had any real offer.
    pub groups: u32,
    /// wins / groups * 100, one decimal place.
    pub win_pct: Decimal,
    /// Mean of (best - runner_up) over groups this book won, in American
    /// odds points; 0 when it never won or never had a runner-up.
    pub avg_edge: Decimal,
}

#[derive(Default)]
struct Tally {
    wins: u32,
    groups: u32,
    edge_sum: i64,
}

impl Tally {
    fn into_stats(self, book: Book) -> BookStats {
        let mut win_pct = (Decimal::from(self.wins) * Decimal::ONE_HUNDRED
            / Decimal::from(self.groups))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        // Pin the scale so 100 renders as 100.0, matching the one-decimal
        // precision of the contract.
        win_pct.rescale(1);
        let avg_edge = if self.wins == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(self.edge_sum) / Decimal::from(self.wins))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        BookStats {
            book,
            wins: self.wins,
            groups: self.groups,
            win_pct,
            avg_edge,
        }
    }
}

/// Rank every participating book across the snapshot.
///
/// `sport` restricts the ranking to events with that sport tag. Books
/// with no real offer anywhere are omitted rather than listed at 0%.
/// Order: win percentage descending, then participation descending, then
/// book ascending, which makes the ranking fully deterministic.
pub fn rank_books(events: &[Event], sport: Option<&str>) -> Vec<BookStats> {
    let mut tallies: BTreeMap<Book, Tally> = BTreeMap::new();

    for event in events {
        if let Some(wanted) = sport {
            if event.sport != wanted {
                continue;
            }
        }
        for market in &event.markets {
            for outcome in market.outcomes() {
                let group = market.outcome_quotes(outcome);
                score_group(&group, &mut tallies);
            }
        }
    }

    let mut stats: Vec<BookStats> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.groups > 0)
        .map(|(book, tally)| tally.into_stats(book))
        .collect();

    stats.sort_by(|a, b| {
        b.win_pct
            .cmp(&a.win_pct)
            .then(b.groups.cmp(&a.groups))
            .then(a.book.cmp(&b.book))
    });
    stats
}

/// Per-sport rankings, keyed by sport tag.
pub fn rank_books_by_sport(events: &[Event]) -> BTreeMap<String, Vec<BookStats>> {
    let mut sports: Vec<&str> = events.iter().map(|e| e.sport.as_str()).collect();
    sports.sort_unstable();
    sports.dedup();

    sports
        .into_iter()
        .map(|sport| (sport.to_string(), rank_books(events, Some(sport))))
        .collect()
}

fn score_group(group: &[&super::event::Quote], tallies: &mut BTreeMap<Book, Tally>) {
    let Some((winner, runner_up)) = best_with_runner_up(group) else {
        return;
    };

    // One participation per distinct book, even if it posted several
    // quotes in the group.
    let mut seen: Vec<&Book> = Vec::new();
    for quote in group.iter().filter(|q| q.price != 0) {
        if seen.contains(&&quote.book) {
            continue;
        }
        seen.push(&quote.book);
        tallies.entry(quote.book.clone()).or_default().groups += 1;
    }

    let entry = tallies.entry(winner.book.clone()).or_default();
    entry.wins += 1;
    if let Some(second) = runner_up {
        entry.edge_sum += i64::from(winner.price) - i64::from(second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, Market, MarketType, Outcome, Quote};
    use rust_decimal_macros::dec;

    fn quote(book: &str, outcome: Outcome, price: i32) -> Quote {
        Quote {
            book: Book::from(book),
            outcome,
            price,
            line: None,
        }
    }

    fn event(id: &str, sport: &str, quotes: Vec<Quote>) -> Event {
        Event {
            event_id: EventId::from(id),
            sport: sport.to_string(),
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            start_time: None,
            markets: vec![Market {
                market_type: MarketType::Moneyline,
                quotes,
            }],
        }
    }

    #[test]
    fn winner_takes_the_group() {
        let events = vec![event(
            "e1",
            "basketball_nba",
            vec![
                quote("fanduel", Outcome::Home, -110),
                quote("draftkings", Outcome::Home, -105),
            ],
        )];

        let stats = rank_books(&events, None);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].book, Book::from("draftkings"));
        assert_eq!(stats[0].wins, 1);
        assert_eq!(stats[0].groups, 1);
        assert_eq!(stats[0].win_pct, dec!(100.0));
        assert_eq!(stats[0].avg_edge, dec!(5));
        assert_eq!(stats[1].book, Book::from("fanduel"));
        assert_eq!(stats[1].wins, 0);
        assert_eq!(stats[1].win_pct, dec!(0.0));
        assert_eq!(stats[1].avg_edge, dec!(0));
    }

    #[test]
    fn outcomes_score_independently() {
        // fanduel best on home, draftkings best on away: one win each.
        let events = vec![event(
            "e1",
            "basketball_nba",
            vec![
                quote("fanduel", Outcome::Home, -105),
                quote("draftkings", Outcome::Home, -110),
                quote("fanduel", Outcome::Away, -115),
                quote("draftkings", Outcome::Away, -108),
            ],
        )];

        let stats = rank_books(&events, None);
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.wins == 1 && s.groups == 2));
        assert!(stats.iter().all(|s| s.win_pct == dec!(50.0)));
        // Tie on pct and groups breaks by book name ascending.
        assert_eq!(stats[0].book, Book::from("draftkings"));
    }

    #[test]
    fn sport_filter_restricts_events() {
        let events = vec![
            event(
                "e1",
                "basketball_nba",
                vec![quote("fanduel", Outcome::Home, -110)],
            ),
            event(
                "e2",
                "americanfootball_nfl",
                vec![quote("draftkings", Outcome::Home, -110)],
            ),
        ];

        let stats = rank_books(&events, Some("basketball_nba"));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].book, Book::from("fanduel"));
    }

    #[test]
    fn book_without_offers_is_omitted() {
        let events = vec![event(
            "e1",
            "basketball_nba",
            vec![
                quote("fanduel", Outcome::Home, -110),
                quote("ghostbook", Outcome::Home, 0),
            ],
        )];

        let stats = rank_books(&events, None);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].book, Book::from("fanduel"));
    }

    #[test]
    fn lone_winner_has_zero_edge() {
        let events = vec![event(
            "e1",
            "basketball_nba",
            vec![quote("fanduel", Outcome::Home, 150)],
        )];

        let stats = rank_books(&events, None);
        assert_eq!(stats[0].wins, 1);
        assert_eq!(stats[0].avg_edge, dec!(0));
    }

    #[test]
    fn percentages_are_deterministic_across_runs() {
        let events = vec![
            event(
                "e1",
                "basketball_nba",
                vec![
                    quote("fanduel", Outcome::Home, -110),
                    quote("draftkings", Outcome::Home, -105),
                    quote("betmgm", Outcome::Home, -112),
                ],
            ),
            event(
                "e2",
                "basketball_nba",
                vec![
                    quote("fanduel", Outcome::Home, 120),
                    quote("draftkings", Outcome::Home, 115),
                    quote("betmgm", Outcome::Home, 125),
                ],
            ),
            event(
                "e3",
                "basketball_nba",
                vec![
                    quote("fanduel", Outcome::Home, -102),
                    quote("draftkings", Outcome::Home, -107),
                ],
            ),
        ];

        let first = rank_books(&events, None);
        let second = rank_books(&events, None);
        assert_eq!(first, second);

        // Reported pct matches wins/groups to one decimal place.
        for stat in &first {
            let raw = Decimal::from(stat.wins) * Decimal::ONE_HUNDRED
                / Decimal::from(stat.groups);
            assert!((raw - stat.win_pct).abs() <= dec!(0.05));
        }
    }

    #[test]
    fn per_sport_breakdown_covers_each_sport() {
        let events = vec![
            event(
                "e1",
                "basketball_nba",
                vec![quote("fanduel", Outcome::Home, -110)],
            ),
            event(
                "e2",
                "americanfootball_nfl",
                vec![quote("draftkings", Outcome::Home, -110)],
            ),
        ];

        let by_sport = rank_books_by_sport(&events);
        assert_eq!(by_sport.len(), 2);
        assert_eq!(by_sport["basketball_nba"][0].book, Book::from("fanduel"));
        assert_eq!(
            by_sport["americanfootball_nfl"][0].book,
            Book::from("draftkings")
        );
    }
}
