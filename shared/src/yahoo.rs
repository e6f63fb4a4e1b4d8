//! Yahoo Finance chart API client used as the market data provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::adapters::MarketDataProvider;
use crate::config::{Lookback, MIN_HISTORY};
use crate::error::SignalError;
use crate::models::PriceSeries;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; rsi-signal-bot)";
const TARGET: &str = "yahoo finance";

#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    base_url: String,
    min_history: usize,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooFinanceClient {
    pub fn new(timeout: Duration) -> Result<Self, SignalError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SignalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SignalError::transport(TARGET, e))?;

        Ok(Self {
            base_url: base_url.into(),
            min_history: MIN_HISTORY,
            client,
        })
    }

    /// Daily closes for `symbol`, oldest first, with missing bars dropped.
    pub async fn fetch_series(&self, symbol: &str, lookback: &Lookback) -> Result<PriceSeries, SignalError> {
        let url = format!(
            "{}/v8/finance/chart/{}",
            self.base_url.trim_end_matches('/'),
            symbol
        );
        let response = self
            .client
            .get(&url)
            .query(&[("range", lookback.range.as_str()), ("interval", lookback.interval.as_str())])
            .send()
            .await
            .map_err(|e| SignalError::transport(TARGET, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SignalError::transport(TARGET, e))?;

        if !status.is_success() {
            return Err(SignalError::unavailable(symbol, format!("HTTP {}", status)));
        }

        let closes = parse_closes(symbol, &body)?;
        if closes.len() < self.min_history {
            return Err(SignalError::unavailable(
                symbol,
                format!("only {} closes, need {}", closes.len(), self.min_history),
            ));
        }

        PriceSeries::new(symbol, closes)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn fetch(&self, symbol: &str, lookback: &Lookback) -> Option<PriceSeries> {
        match self.fetch_series(symbol, lookback).await {
            Ok(series) => {
                debug!("Fetched {} closes for {}", series.len(), symbol);
                Some(series)
            }
            Err(e) => {
                warn!("⚠️ Skipping {}: {}", symbol, e);
                None
            }
        }
    }
}

fn parse_closes(symbol: &str, body: &str) -> Result<Vec<f64>, SignalError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| SignalError::unavailable(symbol, format!("malformed chart payload: {}", e)))?;

    if let Some(err) = response.chart.error {
        let reason = err
            .description
            .or(err.code)
            .unwrap_or_else(|| "unknown chart error".to_string());
        return Err(SignalError::unavailable(symbol, reason));
    }

    let closes: Vec<f64> = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|result| result.indicators.quote.into_iter().next())
        .map(|quote| quote.close.into_iter().flatten().collect())
        .unwrap_or_default();

    Ok(closes)
}
