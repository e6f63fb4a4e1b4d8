use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::SignalError;
use crate::recommendation::Recommendation;

/// Side of the market a schedule slot is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }

    /// Marker shown in the report header.
    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Buy => "🟢",
            Direction::Sell => "🔴",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule match, consumed immediately by the signal cycle.
#[derive(Debug, Clone, Copy)]
pub struct TradeSignal {
    pub direction: Direction,
    pub triggered_at: DateTime<Tz>,
}

/// Chronological closing prices for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Builds a series, rejecting fewer than two closes or any close that is
    /// not a positive finite number.
    pub fn new(symbol: impl Into<String>, closes: Vec<f64>) -> Result<Self, SignalError> {
        let symbol = symbol.into();
        if closes.len() < 2 {
            return Err(SignalError::InvalidSeries {
                symbol,
                reason: format!("need at least 2 closes, got {}", closes.len()),
            });
        }
        if let Some(bad) = closes.iter().find(|c| !c.is_finite() || **c <= 0.0) {
            return Err(SignalError::InvalidSeries {
                symbol,
                reason: format!("close {} is not a positive price", bad),
            });
        }
        Ok(Self { symbol, closes })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn latest(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }

    pub fn previous(&self) -> f64 {
        self.closes[self.closes.len() - 2]
    }

    /// Percent change of the latest close against the one right before it.
    pub fn change_pct(&self) -> f64 {
        let previous = self.previous();
        (self.latest() - previous) / previous * 100.0
    }
}

/// One analysed instrument inside a triggered cycle.
#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub symbol: String,
    pub price: f64,
    pub price_change_pct: f64,
    pub rsi: f64,
    pub recommendation: Recommendation,
}
