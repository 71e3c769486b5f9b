//! American-odds arithmetic and market vocabulary.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// One side of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Away,
    Draw,
    Over,
    Under,
}

impl Outcome {
    /// Parse a feed outcome tag. Unknown tags yield `None` and the row is
    /// skipped upstream.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Self::Home),
            "away" => Some(Self::Away),
            "draw" => Some(Self::Draw),
            "over" => Some(Self::Over),
            "under" => Some(Self::Under),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
            Self::Draw => "draw",
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market class for a standard (non-prop) market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Moneyline,
    Spread,
    Total,
}

impl MarketType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "moneyline" | "h2h" => Some(Self::Moneyline),
            "spread" | "spreads" => Some(Self::Spread),
            "total" | "totals" => Some(Self::Total),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the price is a real offer. A price of exactly 0 is the feed's
/// "no data" marker and never competes for best price.
pub fn is_offer(price: i32) -> bool {
    price != 0
}

/// True for prices that are well-formed American odds (|price| >= 100).
///
/// Best-price selection tolerates anything nonzero, but implied-probability
/// math requires a convertible price.
pub fn is_valid_american(price: i32) -> bool {
    price >= 100 || price <= -100
}

/// Convert American odds to decimal odds. Returns `None` when the price is
/// not valid American notation.
pub fn american_to_decimal(price: i32) -> Option<Decimal> {
    if price >= 100 {
        Some(Decimal::ONE + Decimal::from(price) / Decimal::ONE_HUNDRED)
    } else if price <= -100 {
        Some(Decimal::ONE + Decimal::ONE_HUNDRED / Decimal::from(price.abs()))
    } else {
        None
    }
}

/// Implied win probability of an American price, as a fraction of 1.
pub fn implied_probability(price: i32) -> Option<Decimal> {
    american_to_decimal(price).map(|dec| Decimal::ONE / dec)
}

/// Render a price with its conventional sign: `+150`, `-110`.
pub fn format_american(price: i32) -> String {
    if price > 0 {
        format!("+{price}")
    } else {
        price.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn outcome_parses_known_tags() {
        assert_eq!(Outcome::parse("Over"), Some(Outcome::Over));
        assert_eq!(Outcome::parse(" home "), Some(Outcome::Home));
        assert_eq!(Outcome::parse("push"), None);
    }

    #[test]
    fn market_type_accepts_feed_aliases() {
        assert_eq!(MarketType::parse("h2h"), Some(MarketType::Moneyline));
        assert_eq!(MarketType::parse("totals"), Some(MarketType::Total));
        assert_eq!(MarketType::parse("outrights"), None);
    }

    #[test]
    fn zero_price_is_not_an_offer() {
        assert!(!is_offer(0));
        assert!(is_offer(-110));
        assert!(is_offer(150));
    }

    #[test]
    fn decimal_conversion_matches_convention() {
        assert_eq!(american_to_decimal(150), Some(dec!(2.5)));
        assert_eq!(american_to_decimal(100), Some(dec!(2)));
        assert_eq!(american_to_decimal(-200), Some(dec!(1.5)));
        assert_eq!(american_to_decimal(-50), None);
        assert_eq!(american_to_decimal(0), None);
    }

    #[test]
    fn implied_probability_of_even_money() {
        assert_eq!(implied_probability(100), Some(dec!(0.5)));
    }

    #[test]
    fn formats_sign() {
        assert_eq!(format_american(150), "+150");
        assert_eq!(format_american(-105), "-105");
    }
}
