//! Best-price selection within one outcome group.
//!
//! "Best" is the numerically greatest signed American price: a
//! less-negative or more-positive price always pays more per unit stake,
//! so +150 beats +120 and -105 beats -110. Comparison never crosses
//! outcome boundaries; callers pass quotes for a single outcome.

use serde::Serialize;

use super::event::{Event, Quote};
use super::key::OutcomeKey;

/// Anything with an American price can compete for best price.
pub trait Priced {
    fn price(&self) -> i32;
}

impl Priced for Quote {
    fn price(&self) -> i32 {
        self.price
    }
}

impl Priced for super::event::PropQuote {
    fn price(&self) -> i32 {
        self.price
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn price(&self) -> i32 {
        (**self).price()
    }
}

/// Select the best quote in a group sharing one outcome.
///
/// Zero-priced quotes are "no real offer" and are excluded, so a group of
/// only zeros yields `None`. Exact price ties go to the first-encountered
/// quote, which keeps the result deterministic in feed order.
pub fn best_quote<T: Priced>(quotes: &[T]) -> Option<&T> {
    let mut best: Option<&T> = None;
    for quote in quotes {
        if quote.price() == 0 {
            continue;
        }
        match best {
            Some(current) if current.price() >= quote.price() => {}
            _ => best = Some(quote),
        }
    }
    best
}

/// The winner plus the best remaining price, for edge computation.
///
/// The runner-up is the greatest non-zero price among the other quotes;
/// an equal price on another book is a legitimate runner-up (edge 0).
/// `None` in the second slot means the winner had no competition.
pub fn best_with_runner_up<T: Priced>(quotes: &[T]) -> Option<(&T, Option<i32>)> {
    let mut best_idx: Option<usize> = None;
    for (idx, quote) in quotes.iter().enumerate() {
        if quote.price() == 0 {
            continue;
        }
        match best_idx {
            Some(current) if quotes[current].price() >= quote.price() => {}
            _ => best_idx = Some(idx),
        }
    }

    let winner_idx = best_idx?;
    let runner_up = quotes
        .iter()
        .enumerate()
        .filter(|(idx, quote)| *idx != winner_idx && quote.price() != 0)
        .map(|(_, quote)| quote.price())
        .max();

    Some((&quotes[winner_idx], runner_up))
}

/// The winning quote of one outcome group, resolved across a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct BestPrice {
    #[serde(flatten)]
    pub key: OutcomeKey,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub quote: Quote,
    /// Best remaining price in the group, when any other book had a real
    /// offer.
    pub runner_up: Option<i32>,
}

/// Resolve the best price for every outcome group in a snapshot.
///
/// Groups with no real offer produce nothing; the caller renders those
/// as placeholders rather than failing. One entry per distinct
/// `OutcomeKey`, in event order.
pub fn best_prices(events: &[Event]) -> Vec<BestPrice> {
    let mut results = Vec::new();
    for event in events {
        for market in &event.markets {
            for outcome in market.outcomes() {
                let group = market.outcome_quotes(outcome);
                let Some((winner, runner_up)) = best_with_runner_up(&group) else {
                    continue;
                };
                results.push(BestPrice {
                    key: OutcomeKey {
                        event_id: event.event_id.clone(),
                        market_type: market.market_type,
                        outcome,
                    },
                    sport: event.sport.clone(),
                    home_team: event.home_team.clone(),
                    away_team: event.away_team.clone(),
                    quote: (*winner).clone(),
                    runner_up,
                });
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Outcome, Quote};

    fn quote(book: &str, price: i32) -> Quote {
        Quote {
            book: Book::from(book),
            outcome: Outcome::Home,
            price,
            line: None,
        }
    }

    #[test]
    fn positive_beats_smaller_positive() {
        let quotes = vec![quote("a", -110), quote("b", 150), quote("c", 120)];
        let best = best_quote(&quotes).unwrap();
        assert_eq!(best.book, Book::from("b"));
        assert_eq!(best.price, 150);
    }

    #[test]
    fn less_negative_beats_more_negative() {
        let quotes = vec![quote("a", -110), quote("b", -105)];
        assert_eq!(best_quote(&quotes).unwrap().price, -105);
    }

    #[test]
    fn even_money_beats_slight_favorite() {
        let quotes = vec![quote("a", -105), quote("b", 100)];
        assert_eq!(best_quote(&quotes).unwrap().price, 100);
    }

    #[test]
    fn tie_goes_to_first_encountered() {
        let quotes = vec![quote("a", 100), quote("b", 100)];
        assert_eq!(best_quote(&quotes).unwrap().book, Book::from("a"));
    }

    #[test]
    fn zero_prices_are_excluded() {
        let quotes = vec![quote("a", 0), quote("b", -120), quote("c", 0)];
        assert_eq!(best_quote(&quotes).unwrap().book, Book::from("b"));
    }

    #[test]
    fn all_zero_group_has_no_best() {
        let quotes = vec![quote("a", 0), quote("b", 0)];
        assert!(best_quote(&quotes).is_none());
    }

    #[test]
    fn empty_group_has_no_best() {
        let quotes: Vec<Quote> = Vec::new();
        assert!(best_quote(&quotes).is_none());
    }

    #[test]
    fn best_is_geq_every_nonzero_peer() {
        let quotes = vec![
            quote("a", -115),
            quote("b", 0),
            quote("c", 105),
            quote("d", -102),
            quote("e", 105),
        ];
        let best = best_quote(&quotes).unwrap();
        for q in quotes.iter().filter(|q| q.price != 0) {
            assert!(best.price >= q.price);
        }
    }

    #[test]
    fn runner_up_is_second_greatest_price() {
        let quotes = vec![quote("a", -110), quote("b", 150), quote("c", 120)];
        let (winner, runner_up) = best_with_runner_up(&quotes).unwrap();
        assert_eq!(winner.price, 150);
        assert_eq!(runner_up, Some(120));
    }

    #[test]
    fn runner_up_absent_for_lone_offer() {
        let quotes = vec![quote("a", -110), quote("b", 0)];
        let (winner, runner_up) = best_with_runner_up(&quotes).unwrap();
        assert_eq!(winner.price, -110);
        assert_eq!(runner_up, None);
    }

    #[test]
    fn equal_price_on_another_book_is_runner_up() {
        let quotes = vec![quote("a", 100), quote("b", 100)];
        let (winner, runner_up) = best_with_runner_up(&quotes).unwrap();
        assert_eq!(winner.book, Book::from("a"));
        assert_eq!(runner_up, Some(100));
    }

    #[test]
    fn snapshot_resolution_keeps_outcomes_apart() {
        use crate::domain::{EventId, Market, MarketType};

        let event = Event {
            event_id: EventId::from("e1"),
            sport: "basketball_nba".to_string(),
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            start_time: None,
            markets: vec![Market {
                market_type: MarketType::Moneyline,
                quotes: vec![
                    Quote {
                        book: Book::from("a"),
                        outcome: Outcome::Home,
                        price: -110,
                        line: None,
                    },
                    Quote {
                        book: Book::from("b"),
                        outcome: Outcome::Away,
                        price: 300,
                        line: None,
                    },
                    Quote {
                        book: Book::from("b"),
                        outcome: Outcome::Home,
                        price: -105,
                        line: None,
                    },
                ],
            }],
        };

        let results = best_prices(&[event]);
        assert_eq!(results.len(), 2);

        let home = results
            .iter()
            .find(|r| r.key.outcome == Outcome::Home)
            .unwrap();
        // +300 on the away side never competes with the home group.
        assert_eq!(home.quote.price, -105);
        assert_eq!(home.quote.book, Book::from("b"));
        assert_eq!(home.runner_up, Some(-110));

        let away = results
            .iter()
            .find(|r| r.key.outcome == Outcome::Away)
            .unwrap();
        assert_eq!(away.quote.price, 300);
        assert_eq!(away.runner_up, None);
    }
}
