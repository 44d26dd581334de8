//! Fixed currency and quantity formatting

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol printed before every amount
pub const CURRENCY_SYMBOL: &str = "R$";

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `1234567.891` -> `1,234,567.89`
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", round_cents(value));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// `18000` -> `R$ 18,000.00`; negatives keep the sign after the symbol
pub fn format_currency(value: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_amount(value))
}

/// Plain two-decimal amount for CSV cells
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

pub fn format_modules(value: Decimal) -> String {
    format!("{:.1} mod.", value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
