//! Polling loop: schedule check, price fetch, RSI, report, notification.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::report::format_report;
use shared::{
    current_rsi, recommend, Direction, InstrumentReport, MarketDataProvider, Notifier, Schedule,
    SignalError, SignalSettings, TradeSignal,
};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// Delay between evaluations and the longer pause after a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub tick_interval: Duration,
    pub error_cooldown: Duration,
}

impl PollSchedule {
    pub fn from_settings(settings: &SignalSettings) -> Self {
        Self {
            tick_interval: settings.poll_interval,
            error_cooldown: settings.error_cooldown,
        }
    }

    pub fn next_delay<T, E>(&self, result: &Result<T, E>) -> Duration {
        match result {
            Ok(_) => self.tick_interval,
            Err(_) => self.error_cooldown,
        }
    }
}

/// What a single evaluation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No slot matched this minute
    Idle,
    /// A slot matched but no instrument could be analysed
    NoData { direction: Direction },
    Dispatched {
        direction: Direction,
        analyzed: usize,
        delivered: bool,
    },
}

pub struct SignalCycle {
    settings: SignalSettings,
    schedule: Arc<Schedule>,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
}

impl SignalCycle {
    pub fn new(
        settings: SignalSettings,
        schedule: Arc<Schedule>,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            schedule,
            provider,
            notifier,
        }
    }

    /// Start the loop in the background. It never returns on its own.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self: Arc<Self>) {
        let poll = PollSchedule::from_settings(&self.settings);
        info!(
            "🚀 Signal cycle started: every {:?}, {:?} cool-down after errors",
            poll.tick_interval, poll.error_cooldown
        );

        loop {
            let result = Arc::clone(&self).tick().await;
            match &result {
                Ok(outcome) => debug!("Cycle finished: {:?}", outcome),
                Err(e) => error!("❌ {}. Cooling down for {:?}", e, poll.error_cooldown),
            }
            sleep(poll.next_delay(&result)).await;
        }
    }

    /// One evaluation on its own task, so a panic is reported as a cycle
    /// failure instead of killing the loop.
    async fn tick(self: Arc<Self>) -> Result<CycleOutcome, SignalError> {
        match tokio::spawn(async move { self.run_cycle(Utc::now()).await }).await {
            Ok(result) => result,
            Err(e) => Err(SignalError::CycleFailure(format!("cycle task aborted: {}", e))),
        }
    }

    /// Evaluate the schedule at `now` and, if a slot matches, analyse every
    /// instrument and send at most one message.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<CycleOutcome, SignalError> {
        let Some(direction) = self.schedule.match_slot(&now) else {
            return Ok(CycleOutcome::Idle);
        };

        let signal = TradeSignal {
            direction,
            triggered_at: self.schedule.localize(&now),
        };
        info!(
            "🕒 {} slot at {}, analysing {} instruments",
            direction,
            signal.triggered_at.format("%Y-%m-%d %H:%M"),
            self.settings.instruments.len()
        );

        let mut reports = Vec::with_capacity(self.settings.instruments.len());
        for symbol in &self.settings.instruments {
            if let Some(report) = self.analyze(symbol, direction).await? {
                reports.push(report);
            }
        }

        let Some(message) = format_report(&signal, &reports) else {
            warn!("⚠️ No instrument data for the {} slot, nothing sent", direction);
            return Ok(CycleOutcome::NoData { direction });
        };

        let delivered = self.notifier.send(&message).await;
        if delivered {
            info!("✅ Sent analysis of {} assets", reports.len());
        } else {
            warn!("⚠️ Analysis of {} assets was not delivered", reports.len());
        }

        Ok(CycleOutcome::Dispatched {
            direction,
            analyzed: reports.len(),
            delivered,
        })
    }

    /// `Ok(None)` when the instrument has to be skipped this cycle.
    async fn analyze(
        &self,
        symbol: &str,
        direction: Direction,
    ) -> Result<Option<InstrumentReport>, SignalError> {
        let fetch = self.provider.fetch(symbol, &self.settings.lookback);
        let series = match timeout(self.settings.provider_timeout, fetch).await {
            Ok(Some(series)) => series,
            Ok(None) => return Ok(None),
            Err(_) => {
                warn!(
                    "⏱️ Price fetch for {} timed out after {:?}",
                    symbol, self.settings.provider_timeout
                );
                return Ok(None);
            }
        };

        let rsi = current_rsi(series.closes(), self.settings.rsi_period);
        let price_change_pct = series.change_pct();
        if !(0.0..=100.0).contains(&rsi) || !price_change_pct.is_finite() {
            return Err(SignalError::CycleFailure(format!(
                "{} produced unusable metrics (rsi {}, change {})",
                symbol, rsi, price_change_pct
            )));
        }

        debug!(
            "{}: price {:.2}, change {:+.2}%, RSI {:.1}",
            symbol,
            series.latest(),
            price_change_pct,
            rsi
        );

        Ok(Some(InstrumentReport {
            symbol: symbol.to_string(),
            price: series.latest(),
            price_change_pct,
            rsi,
            recommendation: recommend(rsi, direction),
        }))
    }
}
