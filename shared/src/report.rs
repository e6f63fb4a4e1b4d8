//! Telegram (HTML) message formatting for triggered cycles.

use crate::models::{Direction, InstrumentReport, TradeSignal};

const HEADER_RULE: usize = 30;
const BLOCK_RULE: usize = 20;

/// Builds the single outbound message for a triggered cycle, or `None` when
/// no instrument produced a report.
pub fn format_report(signal: &TradeSignal, reports: &[InstrumentReport]) -> Option<String> {
    if reports.is_empty() {
        return None;
    }

    let action = match signal.direction {
        Direction::Buy => "BUY",
        Direction::Sell => "SELL",
    };
    let mut message = format!(
        "{} <b>Trading alert - {} time</b>\n⏰ <i>{}</i>\n{}\n\n",
        signal.direction.marker(),
        action,
        signal.triggered_at.format("%Y-%m-%d %H:%M"),
        "─".repeat(HEADER_RULE),
    );

    for report in reports {
        message.push_str(&format_instrument(report));
    }

    message.push_str(&format!("\n📋 <i>{} assets analyzed</i>", reports.len()));
    Some(message)
}

fn format_instrument(report: &InstrumentReport) -> String {
    let trend = if report.price_change_pct >= 0.0 { "📈" } else { "📉" };
    format!(
        "{} <b>{}</b>\n💰 Price: ${} {} {:+.2}%\n📊 RSI: {:.1} - {} {}\n{}\n",
        report.recommendation.tier.marker(),
        report.symbol,
        format_price(report.price),
        trend,
        report.price_change_pct,
        report.rsi,
        report.recommendation.marker,
        report.recommendation.text,
        "─".repeat(BLOCK_RULE),
    )
}

/// Two decimals with `,` thousands separators, e.g. `43,250.50`.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

pub fn startup_message() -> String {
    "🚀 <b>Trading bot started</b>\n⏰ Watching the schedule".to_string()
}

pub fn test_notification_message() -> String {
    "🔧 <b>Test notification</b>\n✅ The service is running".to_string()
}
