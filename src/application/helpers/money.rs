use crate::domain::entities::Currency;

/// Render an amount with its currency symbol and no decimals, e.g. `₹6557`, `A$122`.
///
/// Unknown currencies render with `$`. Non-finite values render as 0.
pub fn format_money(value: f64, currency: &str) -> String {
    let symbol = Currency::from_code(currency)
        .map(|c| c.symbol())
        .unwrap_or("$");
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{}{}", symbol, value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(format_money(6557.0, "INR"), "₹6557");
        assert_eq!(format_money(73.0, "EUR"), "€73");
        assert_eq!(format_money(122.0, "AUD"), "A$122");
        assert_eq!(format_money(79.0, "USD"), "$79");
        assert_eq!(format_money(79.0, "JPY"), "$79");
    }

    #[test]
    fn test_rounds_to_whole_units() {
        assert_eq!(format_money(104.4, "USD"), "$104");
        assert_eq!(format_money(11.6, "USD"), "$12");
        assert_eq!(format_money(f64::NAN, "USD"), "$0");
    }
}
