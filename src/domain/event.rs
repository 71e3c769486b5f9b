//! Event, market, and quote types.
//!
//! Everything here is a plain owned snapshot: quotes are built once per
//! feed refresh and never mutated afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::{Book, EventId};
use super::odds::{MarketType, Outcome};

/// One sportsbook's price for one outcome of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub book: Book,
    pub outcome: Outcome,
    /// American odds; 0 means "no data".
    pub price: i32,
    /// Spread or total line; `None` for moneyline.
    pub line: Option<Decimal>,
}

/// One market of an event with every book's quotes.
#[derive(Debug, Clone, Serialize)]
pub struct Market {
    pub market_type: MarketType,
    pub quotes: Vec<Quote>,
}

impl Market {
    pub fn new(market_type: MarketType) -> Self {
        Self {
            market_type,
            quotes: Vec::new(),
        }
    }

    /// Quotes for one outcome, in feed order.
    pub fn outcome_quotes(&self, outcome: Outcome) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| q.outcome == outcome).collect()
    }

    /// Distinct outcomes present in this market, in feed order.
    pub fn outcomes(&self) -> Vec<Outcome> {
        let mut seen = Vec::new();
        for quote in &self.quotes {
            if !seen.contains(&quote.outcome) {
                seen.push(quote.outcome);
            }
        }
        seen
    }
}

/// A sporting contest and its markets for one refresh window.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub event_id: EventId,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: Option<DateTime<Utc>>,
    pub markets: Vec<Market>,
}

impl Event {
    pub fn market(&self, market_type: MarketType) -> Option<&Market> {
        self.markets.iter().find(|m| m.market_type == market_type)
    }
}

/// One book's price for one side of a player prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropQuote {
    pub book: Book,
    pub outcome: Outcome,
    pub line: Decimal,
    /// American odds; 0 means "no data".
    pub price: i32,
}

/// A player prop (e.g. LeBron James / player_points) with every book's
/// over and under quotes.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProp {
    pub event_id: EventId,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub player_name: String,
    pub prop_type: String,
    pub quotes: Vec<PropQuote>,
}

impl PlayerProp {
    pub fn outcome_quotes(&self, outcome: Outcome) -> Vec<&PropQuote> {
        self.quotes.iter().filter(|q| q.outcome == outcome).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(book: &str, outcome: Outcome, price: i32) -> Quote {
        Quote {
            book: Book::from(book),
            outcome,
            price,
            line: Some(dec!(47.5)),
        }
    }

    #[test]
    fn outcome_quotes_filters_by_side() {
        let market = Market {
            market_type: MarketType::Total,
            quotes: vec![
                quote("fanduel", Outcome::Over, -110),
                quote("draftkings", Outcome::Under, -105),
                quote("betmgm", Outcome::Over, -115),
            ],
        };

        let overs = market.outcome_quotes(Outcome::Over);
        assert_eq!(overs.len(), 2);
        assert!(overs.iter().all(|q| q.outcome == Outcome::Over));
    }

    #[test]
    fn outcomes_preserves_feed_order_without_duplicates() {
        let market = Market {
            market_type: MarketType::Total,
            quotes: vec![
                quote("fanduel", Outcome::Under, -105),
                quote("draftkings", Outcome::Over, -110),
                quote("betmgm", Outcome::Under, -115),
            ],
        };

        assert_eq!(market.outcomes(), vec![Outcome::Under, Outcome::Over]);
    }
}
