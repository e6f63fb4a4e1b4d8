//! Technical indicators.
//!
//! Indicators are fed closing prices oldest first and are recomputed from
//! scratch on every cycle; nothing is carried between ticks.

pub mod rsi;

pub use rsi::*;

/// Streaming indicator over closing prices.
pub trait Indicator {
    /// Name of the indicator
    fn name(&self) -> &str;

    /// Feed the next closing price
    fn update(&mut self, value: f64);

    /// Current value, `None` until enough prices were seen
    fn value(&self) -> Option<f64>;

    /// Whether enough prices were seen to produce a value
    fn is_ready(&self) -> bool {
        self.value().is_some()
    }
}
