//! Demo dataset generator.
//!
//! Produces a plausible monitored unit: a cyclic spawner series with a slow
//! trend, noise and the odd missing survey year, the derived metrics and a
//! status table classified against benchmark zones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use stocksight_common::{
    BenchmarkZones, DataQuality, Scalar, Status, StatusTable, TimeSeries, UnitAttributes,
    UnitDataset, UnitSeries, YEAR_COLUMN,
};

use crate::render::scale::{CYCLE_LENGTH, dominant_cycle_years, running_mean};

/// Generation length used for averaging.
const GENERATION: usize = 4;
/// Chance that a survey year is missing.
const MISSING_RATE: f64 = 0.06;

const UNIT_NAMES: &[&str] = &[
    "Upper Creek",
    "Bowron Lake",
    "Middle Shuswap",
    "Early Stuart",
    "Chilko River",
    "Harrison Slough",
];

/// Seedable generator for synthetic units.
pub struct DemoGenerator {
    rng: SmallRng,
    first_year: i32,
    last_year: i32,
}

impl DemoGenerator {
    /// Generator seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            first_year: 1980,
            last_year: 2023,
        }
    }

    /// Restrict the generated years.
    pub fn with_years(mut self, first_year: i32, last_year: i32) -> Self {
        self.first_year = first_year;
        self.last_year = last_year.max(first_year);
        self
    }

    /// Generate one unit.
    pub fn generate(&mut self) -> UnitDataset {
        let name = UNIT_NAMES[self.rng.random_range(0..UNIT_NAMES.len())];
        let absolute = self.rng.random_bool(0.5);
        let dominant_offset = self.rng.random_range(0..CYCLE_LENGTH);
        let dom_cycle_first_year = self.first_year + dominant_offset;

        let years: Vec<i32> = (self.first_year..=self.last_year).collect();
        let spawners = self.spawner_series(&years, dom_cycle_first_year);

        let observed: Vec<Option<f64>> = spawners
            .iter()
            .map(|v| (!self.rng.random_bool(MISSING_RATE)).then_some(*v))
            .collect();

        let baseline = mean(observed.iter().take(GENERATION * 3).flatten().copied())
            .unwrap_or(1.0)
            .max(1.0);
        let relative: Vec<Option<f64>> =
            observed.iter().map(|v| v.map(|v| v / baseline)).collect();

        let long_term_mean = mean(observed.iter().flatten().copied()).unwrap_or(1.0);
        let generational = running_mean(&observed, GENERATION);
        let long_term: Vec<Option<f64>> = generational
            .iter()
            .map(|v| v.map(|v| 100.0 * v / long_term_mean))
            .collect();

        let lag = GENERATION * 3;
        let percent_change: Vec<Option<f64>> = (0..years.len())
            .map(|i| {
                let now = generational[i]?;
                let before = generational[i.checked_sub(lag)?]?;
                (before > 0.0).then(|| 100.0 * (now / before - 1.0))
            })
            .collect();

        let mut attributes = UnitAttributes::new(name);
        attributes.data_quality = if absolute {
            DataQuality::Absolute
        } else {
            DataQuality::Relative
        };
        attributes.avg_generation = Some(GENERATION);
        attributes.dom_cycle_first_year = Some(dom_cycle_first_year);
        attributes.relative_abundance = BenchmarkZones::between(0.5, 1.0);
        attributes.absolute_abundance = BenchmarkZones::between(baseline * 0.4, baseline * 0.9);
        attributes.long_term_trend = BenchmarkZones::between(50.0, 75.0);
        attributes.percent_change = BenchmarkZones::between(-50.0, -25.0);

        let series = UnitSeries {
            relative_abundance: zip_series(&years, &relative),
            absolute_abundance: if absolute {
                zip_series(&years, &observed)
            } else {
                TimeSeries::new()
            },
            long_term_trend: zip_series(&years, &long_term),
            percent_change: zip_series(&years, &percent_change),
        };

        let status = status_table(&attributes, &series, &years);

        tracing::debug!(unit = name, absolute, "Generated demo unit");

        UnitDataset {
            attributes,
            series,
            status: Some(status),
        }
    }

    fn spawner_series(&mut self, years: &[i32], dom_cycle_first_year: i32) -> Vec<f64> {
        let base = self.rng.random_range(2_000.0..60_000.0);
        let trend = self.rng.random_range(-0.04..0.01);
        let dominance = self.rng.random_range(2.0..8.0);
        let dominant = match (years.first(), years.last()) {
            (Some(first), Some(last)) => dominant_cycle_years(*first, *last, dom_cycle_first_year),
            _ => Vec::new(),
        };

        years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let cycle = if dominant.contains(year) {
                    dominance
                } else {
                    1.0
                };
                let noise = self.rng.random_range(0.6..1.5);
                (base * (trend * i as f64).exp() * cycle * noise).round()
            })
            .collect()
    }
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn zip_series(years: &[i32], values: &[Option<f64>]) -> TimeSeries {
    years.iter().copied().zip(values.iter().copied()).collect()
}

/// Classify each metric per year and derive the overall status as the worst of them.
fn status_table(attrs: &UnitAttributes, series: &UnitSeries, years: &[i32]) -> StatusTable {
    let metrics = [
        ("RelAbd", &series.relative_abundance, attrs.relative_abundance),
        ("AbsAbd", &series.absolute_abundance, attrs.absolute_abundance),
        ("LongTrend", &series.long_term_trend, attrs.long_term_trend),
        ("PercChange", &series.percent_change, attrs.percent_change),
    ];

    let mut table = StatusTable::new().with_column(
        YEAR_COLUMN,
        years.iter().map(|y| Scalar::Number(*y as f64)),
    );

    let mut overall: Vec<Option<Status>> = vec![None; years.len()];
    for (column, data, zones) in metrics {
        let statuses: Vec<Option<Status>> = years
            .iter()
            .map(|year| data.get(*year).and_then(|v| zones.classify(v)))
            .collect();

        for (worst, status) in overall.iter_mut().zip(&statuses) {
            if let Some(status) = status {
                *worst = Some(match worst.take() {
                    Some(current) if severity(&current) <= severity(status) => current,
                    _ => status.clone(),
                });
            }
        }

        table = table.with_column(column, statuses.into_iter().map(status_cell));
    }

    table.with_column("Status", overall.into_iter().map(status_cell))
}

fn status_cell(status: Option<Status>) -> Scalar {
    status.map_or(Scalar::Null, |s| Scalar::Text(s.label().to_string()))
}

fn severity(status: &Status) -> u8 {
    match status {
        Status::Red => 0,
        Status::RedAmber => 1,
        Status::Amber => 2,
        Status::AmberGreen => 3,
        Status::Green => 4,
        _ => 5,
    }
}
