//! Time-series data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::numeric::lenient_f64;
use crate::status::Status;

/// One `{ year, value }` record as stored in dataset files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

/// Ordered mapping from year to an optional value.
///
/// Missing values are gaps, never zero. Iteration is always by ascending year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<YearValue>", into = "Vec<YearValue>")]
pub struct TimeSeries {
    points: BTreeMap<i32, Option<f64>>,
}

impl TimeSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for a year. Non-finite values are stored as missing.
    pub fn insert(&mut self, year: i32, value: Option<f64>) {
        self.points.insert(year, value.filter(|v| v.is_finite()));
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, year: i32, value: f64) -> Self {
        self.insert(year, Some(value));
        self
    }

    /// Builder-style insert of a missing year.
    pub fn with_missing(mut self, year: i32) -> Self {
        self.insert(year, None);
        self
    }

    /// Get the value for a year.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.points.get(&year).copied().flatten()
    }

    /// Number of years (including years with missing values).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no years at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there is nothing to plot.
    pub fn is_all_missing(&self) -> bool {
        self.points.values().all(Option::is_none)
    }

    /// Iterate `(year, value)` in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Option<f64>)> + '_ {
        self.points.iter().map(|(y, v)| (*y, *v))
    }

    /// Iterate only present values.
    pub fn present(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().filter_map(|(y, v)| v.map(|v| (*y, v)))
    }

    /// Years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.points.keys().copied().collect()
    }

    /// Values in year order, with gaps.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.values().copied().collect()
    }

    /// First and last year carrying a value.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut present = self.present().map(|(y, _)| y);
        let first = present.next()?;
        let last = present.last().unwrap_or(first);
        Some((first, last))
    }
}

impl From<Vec<YearValue>> for TimeSeries {
    fn from(records: Vec<YearValue>) -> Self {
        let mut series = TimeSeries::new();
        for record in records {
            series.insert(record.year, record.value);
        }
        series
    }
}

impl From<TimeSeries> for Vec<YearValue> {
    fn from(series: TimeSeries) -> Self {
        series
            .iter()
            .map(|(year, value)| YearValue { year, value })
            .collect()
    }
}

impl FromIterator<(i32, Option<f64>)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (i32, Option<f64>)>>(iter: I) -> Self {
        let mut series = TimeSeries::new();
        for (year, value) in iter {
            series.insert(year, value);
        }
        series
    }
}

/// Lower/upper benchmark pair for one metric.
///
/// Defines three bands: below `lower` is Red, `lower..=upper` is Amber,
/// above `upper` is Green. Ordering is the caller's responsibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkZones {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lower: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub upper: Option<f64>,
}

impl BenchmarkZones {
    /// Create a zone pair.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Create a zone pair with both thresholds defined.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self::new(Some(lower), Some(upper))
    }

    /// Both thresholds, if both are defined.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.lower?, self.upper?))
    }

    /// Classify a value into its benchmark band.
    ///
    /// Returns `None` when either threshold is missing.
    pub fn classify(&self, value: f64) -> Option<Status> {
        let (lower, upper) = self.bounds()?;
        Some(if value < lower {
            Status::Red
        } else if value <= upper {
            Status::Amber
        } else {
            Status::Green
        })
    }
}

/// A labelled horizontal reference line. Undefined values are skipped when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

impl ReferenceLine {
    /// Create a reference line.
    pub fn new(label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Create a reference line at a defined value.
    pub fn at(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, Some(value))
    }
}

/// A requested axis range; each bound overrides the computed one when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl AxisRange {
    /// Both bounds fixed.
    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Apply a transform to both bounds.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            min: self.min.map(&f),
            max: self.max.map(&f),
        }
    }
}
