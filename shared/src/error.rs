use thiserror::Error;

/// Failures that can occur while producing a trading report.
///
/// Adapters never let these escape raw: the provider collapses them into an
/// absent series and the notifier into a failed dispatch. Only
/// [`SignalError::CycleFailure`] reaches the polling loop.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("no usable history for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("transport error talking to {target}: {message}")]
    Transport { target: String, message: String },

    #[error("invalid price series for {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },

    #[error("signal cycle failed: {0}")]
    CycleFailure(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SignalError {
    pub fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        SignalError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn transport(target: &str, err: impl std::fmt::Display) -> Self {
        SignalError::Transport {
            target: target.to_string(),
            message: err.to_string(),
        }
    }
}
