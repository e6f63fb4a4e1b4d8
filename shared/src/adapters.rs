//! Seams to the outside world: price history in, notifications out.

use async_trait::async_trait;

use crate::config::Lookback;
use crate::models::PriceSeries;

/// Longest message the notifier will dispatch before truncating.
pub const MAX_MESSAGE_CHARS: usize = 4000;

const TRUNCATION_MARK: &str = "...";

/// Source of recent daily closes.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Recent closes for `symbol`, or `None` on any transport or data
    /// problem. Failures are logged by the implementation.
    async fn fetch(&self, symbol: &str, lookback: &Lookback) -> Option<PriceSeries>;
}

/// Outbound message channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text`, returning whether the channel accepted it.
    /// Implementations must apply [`cap_message`] before sending.
    async fn send(&self, text: &str) -> bool;
}

/// Cuts `text` to [`MAX_MESSAGE_CHARS`] characters and appends an ellipsis
/// when it is longer than that.
pub fn cap_message(text: &str) -> String {
    match text.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARK),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_pass_through() {
        let text = "a".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(cap_message(&text), text);
    }

    #[test]
    fn long_messages_are_cut_and_marked() {
        let text = "b".repeat(MAX_MESSAGE_CHARS + 250);
        let capped = cap_message(&text);
        assert_eq!(capped.chars().count(), MAX_MESSAGE_CHARS + 3);
        assert!(capped.ends_with("b..."));
    }

    #[test]
    fn cut_respects_char_boundaries() {
        let text = "📈".repeat(MAX_MESSAGE_CHARS + 1);
        let capped = cap_message(&text);
        assert_eq!(capped.chars().filter(|c| *c == '📈').count(), MAX_MESSAGE_CHARS);
        assert!(capped.ends_with("..."));
    }
}
