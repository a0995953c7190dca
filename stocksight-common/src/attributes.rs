//! Per-unit attributes and the dataset bundle handed to the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::{lenient_i32, lenient_usize};
use crate::series::{BenchmarkZones, TimeSeries};
use crate::table::StatusTable;

/// Data-quality indicator of a unit.
///
/// Only `Absolute` changes rendering: it selects the absolute-abundance panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataQuality {
    /// Abundance estimates are absolute counts.
    Absolute,
    /// Only a relative abundance index is available.
    Relative,
    #[default]
    Unknown,
    /// Any other indicator label, kept verbatim for titles.
    Other(String),
}

impl DataQuality {
    /// Parse an indicator label leniently.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.is_empty() || lower == "na" || lower == "unknown" {
            DataQuality::Unknown
        } else if lower.starts_with("abs") {
            DataQuality::Absolute
        } else if lower.starts_with("rel") {
            DataQuality::Relative
        } else {
            DataQuality::Other(trimmed.to_string())
        }
    }

    /// Whether absolute abundance should be charted.
    pub fn is_absolute(&self) -> bool {
        matches!(self, DataQuality::Absolute)
    }
}

impl From<String> for DataQuality {
    fn from(value: String) -> Self {
        DataQuality::parse(&value)
    }
}

impl From<DataQuality> for String {
    fn from(value: DataQuality) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQuality::Absolute => f.write_str("Absolute"),
            DataQuality::Relative => f.write_str("Relative"),
            DataQuality::Unknown => f.write_str("Unknown"),
            DataQuality::Other(s) => f.write_str(s),
        }
    }
}

/// Named thresholds and configuration for one monitored unit.
///
/// Absent optional fields disable the corresponding feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitAttributes {
    /// Display name.
    pub name: String,

    #[serde(default)]
    pub data_quality: DataQuality,

    /// Generation length used for the moving average.
    #[serde(default, deserialize_with = "lenient_usize")]
    pub avg_generation: Option<usize>,

    /// First year of the dominant cycle (cyclic units only).
    #[serde(default, deserialize_with = "lenient_i32")]
    pub dom_cycle_first_year: Option<i32>,

    #[serde(default)]
    pub relative_abundance: BenchmarkZones,

    #[serde(default)]
    pub absolute_abundance: BenchmarkZones,

    #[serde(default)]
    pub long_term_trend: BenchmarkZones,

    #[serde(default)]
    pub percent_change: BenchmarkZones,
}

impl UnitAttributes {
    /// Create attributes with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The metric series of one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitSeries {
    #[serde(default)]
    pub relative_abundance: TimeSeries,
    #[serde(default)]
    pub absolute_abundance: TimeSeries,
    #[serde(default)]
    pub long_term_trend: TimeSeries,
    #[serde(default)]
    pub percent_change: TimeSeries,
}

impl UnitSeries {
    /// First and last year with a value across all series.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        [
            &self.relative_abundance,
            &self.absolute_abundance,
            &self.long_term_trend,
            &self.percent_change,
        ]
        .into_iter()
        .filter_map(TimeSeries::year_span)
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
    }
}

/// Everything needed to draw one unit's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitDataset {
    pub attributes: UnitAttributes,
    #[serde(default)]
    pub series: UnitSeries,
    #[serde(default)]
    pub status: Option<StatusTable>,
}
