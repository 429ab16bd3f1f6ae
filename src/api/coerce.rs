//! Numeric coercion for fields the service may send as text.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number or numeric string to `f64`; anything else (including NaN/inf) is 0.
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(num) => num.as_f64(),
        Value::String(val) => val.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `deserialize_with` adapter around [`coerce_f64`]. Pair with `#[serde(default)]`
/// so a missing key also lands on zero.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Identifiers arrive as strings or bare numbers; null becomes empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(val) => val,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Null decodes as the type's default, the same as a missing key.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
