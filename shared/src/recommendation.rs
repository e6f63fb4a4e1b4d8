//! RSI to recommendation mapping.

use serde::Serialize;

use crate::models::Direction;

/// Severity bucket used for display emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Top,
    Mid,
    Warning,
}

impl Tier {
    pub fn marker(&self) -> &'static str {
        match self {
            Tier::Top => "🟢",
            Tier::Mid => "🟡",
            Tier::Warning => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub text: &'static str,
    pub tier: Tier,
    /// Strength marker printed next to the text
    pub marker: &'static str,
}

impl Recommendation {
    const fn new(text: &'static str, tier: Tier, marker: &'static str) -> Self {
        Self { text, tier, marker }
    }
}

/// Maps an RSI reading to advice for the given side.
///
/// Brackets are strict and checked in order, so a reading sitting exactly
/// on a threshold falls into the weaker bracket.
pub fn recommend(rsi: f64, direction: Direction) -> Recommendation {
    match direction {
        Direction::Buy => {
            if rsi < 30.0 {
                Recommendation::new("strong buy", Tier::Top, "🎯")
            } else if rsi < 35.0 {
                Recommendation::new("good buy", Tier::Top, "👍")
            } else if rsi < 40.0 {
                Recommendation::new("fair buy", Tier::Mid, "📈")
            } else {
                Recommendation::new("avoid buying", Tier::Warning, "⚠️")
            }
        }
        Direction::Sell => {
            if rsi > 70.0 {
                Recommendation::new("strong sell", Tier::Top, "🎯")
            } else if rsi > 65.0 {
                Recommendation::new("good sell", Tier::Top, "👍")
            } else if rsi > 60.0 {
                Recommendation::new("fair sell", Tier::Mid, "📈")
            } else {
                Recommendation::new("avoid selling", Tier::Warning, "⚠️")
            }
        }
    }
}
