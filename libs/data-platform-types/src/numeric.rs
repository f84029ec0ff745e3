use serde::{Deserialize, Deserializer};

/// Deserialize a number the way the storefront coerces it: numbers pass through,
/// numeric strings are parsed, and anything else (null, garbage, non-finite) becomes 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        serde_json::Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    Ok(if parsed.is_finite() { parsed } else { 0.0 })
}
