use serde::Deserialize;
use serde_json::Value;

/// Numeric field from a client payload. Game clients send numbers
/// either as JSON numbers or as strings so both are accepted and
/// anything else is kept to be rejected during validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(Value),
}

impl LooseNumber {
    /// Whether the entire value represents a finite number. Text
    /// values are trimmed and must not be empty.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number(value) => value.is_finite(),
            Self::Text(value) => {
                let value = value.trim();
                !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite)
            }
            Self::Other(_) => false,
        }
    }

    /// Coerces the value to an integer. Numbers are truncated towards
    /// zero, text uses its leading integer (e.g. "42kills" -> 42).
    /// Returns [None] when no integer can be taken from the value.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Number(value) => truncate_to_i64(*value),
            Self::Text(value) => leading_integer(value),
            Self::Other(_) => None,
        }
    }
}

/// Truncates the value towards zero, values outside the i64 range
/// are [None] rather than saturated
pub fn truncate_to_i64(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63 which is itself out of range
    const MIN: f64 = i64::MIN as f64;
    const MAX: f64 = i64::MAX as f64;

    let value = value.trunc();
    if value.is_finite() && (MIN..MAX).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

/// Parses the optionally signed run of digits at the start of
/// the trimmed text
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign = match value.as_bytes().first()? {
        b'-' | b'+' => 1,
        _ => 0,
    };

    let digits = &value[sign..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Parsed with the sign so i64::MIN stays representable
    value[..sign + end].parse().ok()
}
