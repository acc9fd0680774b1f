use regex::Regex;
use std::sync::LazyLock;

/// Currency marker that must follow the amount ("Baht").
pub const CURRENCY_MARKER: &str = "บาท";

// `\d` is Unicode-aware, so Thai numerals (๐-๙) are part of the digit run
static FEE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d[\d,]*)\s*{}", CURRENCY_MARKER)).expect("fee pattern is valid")
});

/// Extracts the per-semester fee from free-form catalogue text.
///
/// Finds the first run of decimal digits (thousands separators allowed) that
/// is followed by [`CURRENCY_MARKER`], optionally after whitespace. ASCII and
/// Thai digits are both accepted. Only the first such amount is used; later
/// amounts in the same text are ignored, so a text listing a per-year
/// breakdown yields the first figure only.
pub fn parse_fee(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }

    let caps = FEE_PATTERN.captures(text)?;
    let amount = &caps[1];

    let mut fee: u64 = 0;
    for c in amount.chars().filter(|c| *c != ',') {
        let Some(digit) = digit_value(c) else {
            tracing::debug!("Fee amount '{}' has unsupported digit {:?}", amount, c);
            return None;
        };
        let Some(next) = fee.checked_mul(10).and_then(|v| v.checked_add(digit)) else {
            tracing::debug!("Fee amount '{}' not representable", amount);
            return None;
        };
        fee = next;
    }

    Some(fee)
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        '\u{0E50}'..='\u{0E59}' => Some(c as u64 - 0x0E50),
        _ => None,
    }
}

pub fn parse_fee_opt(text: Option<&str>) -> Option<u64> {
    text.and_then(parse_fee)
}
