//! Display helpers for monetary amounts.

use chrono::NaiveDate;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [(u64, &str); 3] = [
    (1_000_000_000, "Billion"),
    (1_000_000, "Million"),
    (1_000, "Thousand"),
];

/// Currency name used by [`amount_to_words`].
pub const CURRENCY_WORD: &str = "Dollars";

/// Formats an amount with exactly two decimals, rounding half away from zero.
///
/// Non-finite input renders as `0.00`.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }
    let rounded = (amount * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return format!("{amount:.2}");
    }
    format!("{rounded:.2}")
}

/// Formats raw field text the same way as [`format_money`].
pub fn format_money_text(raw: &str) -> String {
    format_money(parse_number(raw).unwrap_or(0.0))
}

/// Parses a decimal the way form fields are read: trimmed, empty means zero,
/// and only finite values are accepted.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn two_digits(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{tens} {}", ONES[ones as usize]),
    }
}

fn three_digits(n: u64) -> String {
    if n > 99 {
        let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
        return match n % 100 {
            0 => hundreds,
            rest => format!("{hundreds} {}", two_digits(rest)),
        };
    }
    two_digits(n)
}

/// Spells out the integer part of an amount, e.g. `1500.0` becomes
/// `"One Thousand Five Hundred Dollars Only"`.
///
/// The fractional part is not spelled. Negative amounts get a `Minus` prefix.
pub fn amount_to_words(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("Zero {CURRENCY_WORD} Only");
    }
    if amount < 0.0 {
        return format!("Minus {}", amount_to_words(-amount));
    }

    let whole = amount.floor() as u64;
    if whole == 0 {
        return format!("Zero {CURRENCY_WORD} Only");
    }

    format!("{} {CURRENCY_WORD} Only", integer_words(whole))
}

fn integer_words(n: u64) -> String {
    if n < 1000 {
        return three_digits(n);
    }
    let mut rest = n;
    let mut parts = Vec::new();
    for (scale, name) in SCALES {
        let group = rest / scale;
        if group > 0 {
            // Groups above 999 billion recurse into their own scales.
            parts.push(format!("{} {name}", integer_words(group)));
        }
        rest %= scale;
    }
    if rest > 0 {
        parts.push(three_digits(rest));
    }
    parts.join(" ")
}

/// Renders a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
