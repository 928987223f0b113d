//! Display formatting shared by the floating bar, the wizard summary and the receipt.
//!
//! Amounts follow the `en-US` grouping the original page relied on: thousands
//! separated by commas and trailing fractional zeros dropped (`1,295.7`).

use crate::money::{MINOR_PER_MAJOR, Money};
use std::borrow::Cow;

/// Suffix appended to truncated display strings.
pub const ELLIPSIS: &str = "...";

/// Group the digits of a whole number in threes.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Localized amount without a currency label.
#[must_use]
pub fn format_amount(amount: Money) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let minor = MINOR_PER_MAJOR.unsigned_abs();
    let whole = group_thousands(abs / minor);
    let frac = abs % minor;
    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let frac = format!("{frac:02}");
        format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
    }
}

/// Amount prefixed with the currency label, e.g. `LKR 4,200`.
#[must_use]
pub fn format_currency(amount: Money, currency: &str) -> String {
    format!("{currency} {}", format_amount(amount))
}

/// Floating bar label: singular for one service, plural above that.
#[must_use]
pub fn selection_label(count: usize) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} Service{plural} Selected")
}

/// Cut `text` to `max_chars` characters and append an ellipsis when it is longer.
#[must_use]
pub fn truncate_display(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
