//! RSI (Relative Strength Index) with Wilder smoothing

use crate::indicators::Indicator;

/// Value reported whenever there is not enough history.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Stand-in for a zero average loss. Keeps the ratio defined and pushes the
/// result towards 100 instead.
pub const ZERO_LOSS_EPSILON: f64 = 0.0001;

/// Incremental Wilder RSI.
///
/// The first `period` price changes seed the averages with their plain mean;
/// every later change is blended in with weight `1/period`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    changes: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
    last_value: Option<f64>,
}

impl Rsi {
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be positive");
        Self {
            period,
            prev_close: None,
            changes: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            last_value: None,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, close: f64) {
        let Some(prev) = self.prev_close.replace(close) else {
            return;
        };
        let delta = close - prev;
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        self.changes += 1;

        let period = self.period as f64;
        if self.changes <= self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            if self.changes < self.period {
                return;
            }
            self.avg_gain = self.gain_sum / period;
            self.avg_loss = self.loss_sum / period;
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        if self.avg_loss == 0.0 {
            self.avg_loss = ZERO_LOSS_EPSILON;
        }

        let rs = self.avg_gain / self.avg_loss;
        self.last_value = Some(100.0 - 100.0 / (1.0 + rs));
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// RSI series aligned with `closes`.
///
/// Entries before index `period` are neutral, and so is every entry when
/// there are fewer than `period + 1` closes.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if closes.len() < period + 1 {
        return vec![RSI_NEUTRAL; closes.len()];
    }

    let mut rsi = Rsi::new(period);
    closes
        .iter()
        .map(|&close| {
            rsi.update(close);
            rsi.value().unwrap_or(RSI_NEUTRAL)
        })
        .collect()
}

/// RSI of the most recent close, the value that goes into a report.
pub fn current_rsi(closes: &[f64], period: usize) -> f64 {
    calculate_rsi(closes, period)
        .last()
        .copied()
        .unwrap_or(RSI_NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_is_neutral() {
        let closes = [10.0, 30.0, 5.0, 80.0, 1.0];
        assert_eq!(calculate_rsi(&closes, 14), vec![50.0; 5]);
        assert_eq!(current_rsi(&closes, 14), 50.0);

        let fourteen: Vec<f64> = (1..=14).map(|i| i as f64).collect();
        assert_eq!(current_rsi(&fourteen, 14), 50.0);
        assert_eq!(current_rsi(&[], 14), 50.0);
    }

    #[test]
    fn warmup_entries_are_neutral() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), closes.len());
        assert!(series[..14].iter().all(|v| *v == RSI_NEUTRAL));
    }

    #[test]
    fn steady_rise_approaches_100() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let rsi = current_rsi(&closes, 14);
        assert!(rsi > 99.9 && rsi < 100.0, "rsi = {}", rsi);
    }

    #[test]
    fn steady_fall_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|i| i as f64).collect();
        assert_eq!(current_rsi(&closes, 14), 0.0);
    }

    #[test]
    fn flat_seed_uses_epsilon() {
        // Flat for the seed window, then one rise: avg loss is the epsilon
        // decayed once, so the ratio is huge but finite.
        let mut closes = vec![100.0; 15];
        closes.push(101.0);
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series[14], 0.0);
        let expected_loss = ZERO_LOSS_EPSILON * 13.0 / 14.0;
        let expected = 100.0 - 100.0 / (1.0 + (1.0 / 14.0) / expected_loss);
        assert!((series[15] - expected).abs() < 1e-9);
    }

    #[test]
    fn incremental_matches_series() {
        let closes = [
            44.0, 44.25, 44.5, 43.75, 44.5, 44.9, 45.1, 45.0, 45.5, 46.0, 46.25, 46.0, 46.0,
            46.0, 46.25, 46.5, 46.25, 46.5, 46.75,
        ];
        let mut rsi = Rsi::new(14);
        for (i, close) in closes.iter().enumerate() {
            rsi.update(*close);
            assert_eq!(rsi.is_ready(), i >= 14);
        }
        assert_eq!(rsi.value(), Some(current_rsi(&closes, 14)));
        assert_eq!(rsi.name(), "RSI");
    }
}
