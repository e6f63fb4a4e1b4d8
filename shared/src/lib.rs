pub mod adapters;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod recommendation;
pub mod report;
pub mod schedule;
pub mod yahoo;

pub use adapters::{cap_message, MarketDataProvider, Notifier, MAX_MESSAGE_CHARS};
pub use config::{Config, Lookback, SignalSettings, ASSETS, MIN_HISTORY, RSI_PERIOD};
pub use error::SignalError;
pub use indicators::{calculate_rsi, current_rsi, Indicator, Rsi, RSI_NEUTRAL};
pub use models::*;
pub use recommendation::{recommend, Recommendation, Tier};
pub use schedule::{Schedule, ScheduleSlot, MARKET_TZ, TRADING_SCHEDULE};
pub use yahoo::YahooFinanceClient;
