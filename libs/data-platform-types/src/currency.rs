use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Billing currencies with a fixed from-USD multiplier. Rates are mock values
/// and are never fetched live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Inr,
    Aud,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Inr, Currency::Aud];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
        }
    }

    pub fn fx_from_usd(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 0.92,
            Currency::Inr => 83.0,
            Currency::Aud => 1.55,
        }
    }

    /// Display symbol; USD and anything unknown render as `$`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Aud => "A$",
        }
    }

    /// Case-insensitive lookup. Returns `None` for codes outside the table.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "INR" => Some(Currency::Inr),
            "AUD" => Some(Currency::Aud),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ParseError::UnknownCurrency(s.to_string()))
    }
}

/// Multiplier for a currency code. Unknown codes are treated as USD.
pub fn fx_rate(code: &str) -> f64 {
    Currency::from_code(code)
        .map(|c| c.fx_from_usd())
        .unwrap_or(1.0)
}

/// Convert a USD amount into whole units of `currency`.
///
/// Rounds half away from zero. Fractional currency units are not represented.
/// Non-finite amounts are coerced to 0.
pub fn convert_from_usd(amount_usd: f64, currency: &str) -> i64 {
    let amount = if amount_usd.is_finite() { amount_usd } else { 0.0 };
    (amount * fx_rate(currency)).round() as i64
}
