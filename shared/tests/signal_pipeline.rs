//! Integration tests for the indicator, schedule and report pipeline

use chrono::TimeZone;
use shared::report::format_report;
use shared::{
    current_rsi, recommend, Direction, InstrumentReport, PriceSeries, Schedule, Tier, TradeSignal,
    MARKET_TZ,
};

/// Classic 14-period Wilder RSI worksheet closes.
const TEXTBOOK_CLOSES: [f64; 19] = [
    44.0, 44.25, 44.5, 43.75, 44.5, 44.9, 45.1, 45.0, 45.5, 46.0, 46.25, 46.0, 46.0, 46.0, 46.25,
    46.5, 46.25, 46.5, 46.75,
];

#[test]
fn textbook_series_rsi() {
    let rsi = current_rsi(&TEXTBOOK_CLOSES, 14);
    // Seed value 75.28, then 76.69, 72.25, 73.88 and finally 75.43.
    assert!((rsi - 75.4327).abs() < 1e-3, "rsi = {}", rsi);
    // Upper end of the usual 60-75 band, allowing 0.5 for the last two rising closes.
    assert!((60.0..=75.5).contains(&rsi));
}

#[test]
fn rsi_stays_in_bounds_for_noisy_series() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
        .collect();
    for period in [2, 5, 14, 30] {
        let rsi = current_rsi(&closes, period);
        assert!((0.0..=100.0).contains(&rsi), "period {} gave {}", period, rsi);
    }
}

#[test]
fn triggered_buy_cycle_produces_single_message() {
    let schedule = Schedule::default();
    // Thursday 15:00 in Damascus
    let now = MARKET_TZ.with_ymd_and_hms(2024, 1, 4, 15, 0, 0).unwrap();
    let direction = schedule.match_slot(&now).expect("slot should match");
    assert_eq!(direction, Direction::Buy);

    let series = PriceSeries::new("BTC-USD", TEXTBOOK_CLOSES.to_vec()).unwrap();
    let rsi = current_rsi(series.closes(), 14);
    let recommendation = recommend(rsi, direction);
    assert_eq!(recommendation.tier, Tier::Warning);

    let reports = vec![InstrumentReport {
        symbol: series.symbol().to_string(),
        price: series.latest(),
        price_change_pct: series.change_pct(),
        rsi,
        recommendation,
    }];
    let signal = TradeSignal {
        direction,
        triggered_at: now,
    };
    let message = format_report(&signal, &reports).unwrap();

    assert!(message.contains("BUY time"));
    assert!(message.contains("2024-01-04 15:00"));
    assert!(message.contains("$46.75 📈 +0.54%"));
    assert!(message.contains("RSI: 75.4 - ⚠️ avoid buying"));
}
