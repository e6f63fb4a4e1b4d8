use std::sync::Arc;

use api::StatusState;
use shared::{Config, MarketDataProvider, Notifier, Schedule, YahooFinanceClient};

use crate::services::notifier::TelegramNotifier;
use crate::services::signal_cycle::SignalCycle;

/// Process-wide collaborators, built once from the environment.
pub struct AppState {
    pub config: Config,
    pub schedule: Arc<Schedule>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;

        let provider = Arc::new(YahooFinanceClient::new(config.signal.provider_timeout)?);
        let notifier = Arc::new(TelegramNotifier::new(
            &config.telegram_bot_token,
            &config.telegram_chat_id,
            config.notifier_timeout,
        )?);
        tracing::info!(
            "Tracking {} instruments, notifying chat {}",
            config.signal.instruments.len(),
            config.telegram_chat_id
        );

        Ok(AppState {
            config,
            schedule: Arc::new(Schedule::default()),
            provider,
            notifier,
        })
    }

    pub fn signal_cycle(&self) -> SignalCycle {
        SignalCycle::new(
            self.config.signal.clone(),
            self.schedule.clone(),
            self.provider.clone(),
            self.notifier.clone(),
        )
    }

    pub fn status_state(&self) -> StatusState {
        StatusState {
            assets: Arc::new(self.config.signal.instruments.clone()),
            schedule: self.schedule.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
