/// Display symbol for all amounts (Indian Rupee).
pub const CURRENCY_SYMBOL: &str = "₹";

/// Largest amount a single entry may carry: one hundred billion rupees.
///
/// Keeps every per-entry value far below `i64::MAX` so that totals over any
/// realistic number of entries stay exact.
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000_000;

/// Convert a decimal amount to integer cents, rounding half away from zero.
///
/// Values outside the `i64` range saturate; callers bound the input first.
pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Add up cent amounts without overflowing; the sum sticks at the `i64` bounds.
pub fn sum_cents<I>(amounts: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    amounts.into_iter().fold(0, i64::saturating_add)
}

pub fn cents_to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// `1234.5` style plain decimal with exactly two fraction digits.
pub fn format_cents(cents: i64) -> String {
    let is_negative = cents < 0;
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;

    if is_negative {
        format!("-{}.{:02}", units, remainder)
    } else {
        format!("{}.{:02}", units, remainder)
    }
}

/// Amount with the currency symbol, sign placed before the symbol: `-₹12.50`.
pub fn format_money(cents: i64) -> String {
    if cents < 0 {
        let abs_cents = cents.unsigned_abs();
        format!("-{}{}.{:02}", CURRENCY_SYMBOL, abs_cents / 100, abs_cents % 100)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, format_cents(cents))
    }
}
