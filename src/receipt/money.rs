//! Naira amount formatting

/// Currency marker printed before every amount
pub const CURRENCY_SYMBOL: char = '₦';

/// Format a whole amount with `,` thousands separators (1500000 → "1,500,000").
///
/// Receipts never show fractional currency.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
