//! Status and confidence labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A status or confidence label as recorded in assessment tables.
///
/// Parsing is total: anything unrecognised becomes [`Status::Other`]
/// and keeps its original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Red,
    RedAmber,
    Amber,
    AmberGreen,
    Green,
    /// Confidence ratings.
    High,
    Moderate,
    Low,
    /// Any other label (e.g. "Data Deficient").
    Other(String),
}

impl Status {
    /// Parse a label leniently (case, spaces, `/` and `-` are ignored).
    pub fn parse(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '/' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "red" => Status::Red,
            "redamber" => Status::RedAmber,
            "amber" => Status::Amber,
            "ambergreen" => Status::AmberGreen,
            "green" => Status::Green,
            "high" => Status::High,
            "moderate" | "medium" => Status::Moderate,
            "low" => Status::Low,
            _ => Status::Other(label.trim().to_string()),
        }
    }

    /// Display name.
    pub fn label(&self) -> &str {
        match self {
            Status::Red => "Red",
            Status::RedAmber => "RedAmber",
            Status::Amber => "Amber",
            Status::AmberGreen => "AmberGreen",
            Status::Green => "Green",
            Status::High => "High",
            Status::Moderate => "Moderate",
            Status::Low => "Low",
            Status::Other(s) => s,
        }
    }

    /// Single-character code drawn inside a timeline cell.
    pub fn code(&self) -> String {
        self.label()
            .chars()
            .find(|c| !c.is_whitespace())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::parse(&value)
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::parse(value)
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(Status::parse("Red"), Status::Red);
        assert_eq!(Status::parse("red/amber"), Status::RedAmber);
        assert_eq!(Status::parse("Amber-Green"), Status::AmberGreen);
        assert_eq!(Status::parse(" GREEN "), Status::Green);
        assert_eq!(Status::parse("Moderate"), Status::Moderate);
        assert_eq!(
            Status::parse("Data Deficient"),
            Status::Other("Data Deficient".to_string())
        );
    }

    #[test]
    fn test_code() {
        assert_eq!(Status::Red.code(), "R");
        assert_eq!(Status::AmberGreen.code(), "A");
        assert_eq!(Status::parse("data deficient").code(), "D");
        assert_eq!(Status::Other(String::new()).code(), "?");
    }
}
