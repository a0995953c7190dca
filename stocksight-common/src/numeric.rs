//! Lenient numeric coercion for tabular inputs.
//!
//! Attribute files and status tables are produced by spreadsheets and
//! scripts, so a threshold can arrive as `0.5`, `"0.5"`, `"NA"` or `null`.
//! Anything that is not a finite number coerces to `None` and never errors.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinels treated as "no value".
const MISSING_SENTINELS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "-"];

/// Parse a text cell into a finite number.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if MISSING_SENTINELS
        .iter()
        .any(|s| trimmed.eq_ignore_ascii_case(s))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A raw scalar cell as found in JSON/JSON5 inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Coerce to a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) if v.is_finite() => Some(*v),
            Scalar::Number(_) => None,
            Scalar::Text(s) => parse_numeric(s),
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }

    /// Coerce to a whole number (years).
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64()
            .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
            .map(|v| v as i32)
    }

    /// Coerce to a non-empty label.
    ///
    /// Whole numbers print without a decimal point so a numeric `Year`
    /// cell reads as `"1990"`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if MISSING_SENTINELS
                    .iter()
                    .any(|m| trimmed.eq_ignore_ascii_case(m))
                {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Scalar::Number(v) if v.is_finite() && v.fract() == 0.0 => Some(format!("{:.0}", v)),
            Scalar::Number(v) if v.is_finite() => Some(v.to_string()),
            Scalar::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Serde helper: deserialize an optional number leniently.
///
/// Use with `#[serde(default, deserialize_with = "lenient_f64")]`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.as_f64()))
}

/// Serde helper: deserialize an optional whole number leniently.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.as_i32()))
}

/// Serde helper: deserialize an optional count leniently.
pub fn lenient_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.as_f64())
        .filter(|v| *v >= 1.0 && v.fract() == 0.0)
        .map(|v| v as usize))
}
