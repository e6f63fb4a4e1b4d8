use std::str::FromStr;
use std::time::Duration;

use dotenv::dotenv;

use crate::error::SignalError;

/// Instruments analysed on every triggered cycle.
pub const ASSETS: [&str; 5] = ["BTC-USD", "ETH-USD", "BNB-USD", "ADA-USD", "XRP-USD"];

/// Wilder RSI lookback used for every report.
pub const RSI_PERIOD: usize = 14;

/// Shortest daily history the provider will hand back.
pub const MIN_HISTORY: usize = RSI_PERIOD + 1;

/// History window requested from the market data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookback {
    pub range: String,
    pub interval: String,
}

impl Default for Lookback {
    fn default() -> Self {
        Self {
            range: "1mo".to_string(),
            interval: "1d".to_string(),
        }
    }
}

/// Immutable settings injected into the signal cycle.
#[derive(Debug, Clone)]
pub struct SignalSettings {
    pub instruments: Vec<String>,
    pub rsi_period: usize,
    pub lookback: Lookback,
    pub poll_interval: Duration,
    pub error_cooldown: Duration,
    pub provider_timeout: Duration,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            instruments: ASSETS.iter().map(|s| s.to_string()).collect(),
            rsi_period: RSI_PERIOD,
            lookback: Lookback::default(),
            poll_interval: Duration::from_secs(60),
            error_cooldown: Duration::from_secs(300),
            provider_timeout: Duration::from_secs(10),
        }
    }
}

pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub port: u16,
    pub notifier_timeout: Duration,
    pub signal: SignalSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, SignalError> {
        dotenv().ok();

        let defaults = SignalSettings::default();

        Ok(Config {
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            port: parsed_or("PORT", 10000)?,
            notifier_timeout: Duration::from_secs(parsed_or("NOTIFIER_TIMEOUT_SECS", 10)?),
            signal: SignalSettings {
                poll_interval: Duration::from_secs(parsed_or("POLL_INTERVAL_SECS", 60)?),
                error_cooldown: Duration::from_secs(parsed_or("ERROR_COOLDOWN_SECS", 300)?),
                provider_timeout: Duration::from_secs(parsed_or("PROVIDER_TIMEOUT_SECS", 10)?),
                ..defaults
            },
        })
    }
}

fn required(key: &str) -> Result<String, SignalError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SignalError::Config(format!("{} must be set", key)))
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T, SignalError> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, SignalError> {
    raw.trim()
        .parse()
        .map_err(|_| SignalError::Config(format!("{} has an invalid value: {:?}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_the_fixed_tables() {
        let settings = SignalSettings::default();
        assert_eq!(settings.instruments, vec!["BTC-USD", "ETH-USD", "BNB-USD", "ADA-USD", "XRP-USD"]);
        assert_eq!(settings.rsi_period, 14);
        assert_eq!(settings.poll_interval, Duration::from_secs(60));
        assert_eq!(settings.error_cooldown, Duration::from_secs(300));
        assert_eq!(settings.lookback.range, "1mo");
        assert_eq!(MIN_HISTORY, 15);
    }

    #[test]
    fn parse_value_rejects_garbage() {
        assert_eq!(parse_value::<u16>("PORT", " 8080 ").unwrap(), 8080);
        assert!(matches!(
            parse_value::<u64>("POLL_INTERVAL_SECS", "soon"),
            Err(SignalError::Config(_))
        ));
    }
}
