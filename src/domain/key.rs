//! Composite grouping keys.
//!
//! Groups are keyed by explicit tuple structs with derived equality and
//! ordering. Building keys by string concatenation invites collisions as
//! soon as an identifier contains the delimiter, so none of the grouping
//! code does that.

use serde::Serialize;

use super::ids::{Book, EventId};
use super::odds::{MarketType, Outcome};

/// Identifies one outcome group: the quotes competing for the same side
/// of the same market of the same event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OutcomeKey {
    pub event_id: EventId,
    pub market_type: MarketType,
    pub outcome: Outcome,
}

/// Identifies one player prop across books.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PropKey {
    pub event_id: EventId,
    pub player_name: String,
    pub prop_type: String,
}

/// Identifies one book's quote series in an odds history file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub sport: String,
    pub event_id: EventId,
    pub market_type: MarketType,
    pub outcome: Outcome,
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_with_delimiter_characters_stay_distinct() {
        // "a,b" + "c" and "a" + "b,c" collide under string concatenation.
        let first = PropKey {
            event_id: EventId::from("e1"),
            player_name: "a,b".to_string(),
            prop_type: "c".to_string(),
        };
        let second = PropKey {
            event_id: EventId::from("e1"),
            player_name: "a".to_string(),
            prop_type: "b,c".to_string(),
        };
        assert_ne!(first, second);
    }

    #[test]
    fn outcome_key_orders_by_event_then_market() {
        let a = OutcomeKey {
            event_id: EventId::from("e1"),
            market_type: MarketType::Moneyline,
            outcome: Outcome::Home,
        };
        let b = OutcomeKey {
            event_id: EventId::from("e2"),
            market_type: MarketType::Moneyline,
            outcome: Outcome::Home,
        };
        assert!(a < b);
    }
}
