//! Axis and scale computation.
//!
//! Pure functions turning raw data ranges into pretty, log-aware plotting
//! coordinates. Every plotted quantity (data, thresholds, reference lines)
//! goes through [`to_axis_value`] so they stay comparable on one axis.

use stocksight_common::AxisRange;
use tracing::warn;

use super::formatting::{format_power_of_ten, format_tick};
use super::surface::Tick;

/// Floor applied before taking logs. Zero and negative values plot at this
/// value (the 0.01 decade) instead of being undefined.
pub const LOG_FLOOR: f64 = 0.01;

/// Granularity of default year bounds.
pub const YEAR_GRANULARITY: f64 = 5.0;

/// Spacing of dominant-cycle years.
pub const CYCLE_LENGTH: i32 = 4;

/// Upper bound on generated ticks; keeps degenerate inputs cheap.
const MAX_TICKS: usize = 200;

/// Highest decade a finite `f64` reaches.
const MAX_DECADE: i32 = 308;

/// Range covering all finite `values`, rounded outward to multiples of `nearest`.
///
/// Bounds present in `requested` replace the computed ones. With no finite
/// values the result is a best-effort `[0, nearest]`. The result never
/// collapses to a single point.
pub fn pretty_range(requested: AxisRange, values: &[f64], nearest: f64) -> (f64, f64) {
    let step = if nearest.is_finite() && nearest > 0.0 {
        nearest
    } else {
        1.0
    };

    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let computed = finite.next().map(|first| {
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        ((min / step).floor() * step, (max / step).ceil() * step)
    });

    let (mut lo, mut hi) = computed.unwrap_or((0.0, step));
    if hi <= lo {
        hi = lo + step;
    }

    if let Some(min) = requested.min.filter(|v| v.is_finite()) {
        lo = min;
    }
    if let Some(max) = requested.max.filter(|v| v.is_finite()) {
        hi = max;
    }
    if hi <= lo {
        hi = lo + step;
    }

    (lo, hi)
}

/// Map a raw value onto the axis. Identity for linear axes, floored `log10` otherwise.
pub fn to_axis_value(raw: f64, use_log: bool) -> f64 {
    if use_log {
        raw.max(LOG_FLOOR).log10()
    } else {
        raw
    }
}

/// Display unit for a linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleUnit {
    Ones,
    Thousands,
    Millions,
    Billions,
}

impl ScaleUnit {
    /// Raw units per displayed unit.
    pub fn divisor(self) -> f64 {
        match self {
            ScaleUnit::Ones => 1.0,
            ScaleUnit::Thousands => 1e3,
            ScaleUnit::Millions => 1e6,
            ScaleUnit::Billions => 1e9,
        }
    }

    /// Label suffix.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            ScaleUnit::Ones => None,
            ScaleUnit::Thousands => Some("thousands"),
            ScaleUnit::Millions => Some("millions"),
            ScaleUnit::Billions => Some("billions"),
        }
    }

    /// Smallest unit keeping `max_value` below 1000.
    pub fn for_max(max_value: f64) -> Self {
        let magnitude = max_value.abs();
        if !magnitude.is_finite() || magnitude < 1e3 {
            ScaleUnit::Ones
        } else if magnitude < 1e6 {
            ScaleUnit::Thousands
        } else if magnitude < 1e9 {
            ScaleUnit::Millions
        } else {
            ScaleUnit::Billions
        }
    }
}

/// Axis scaling decided for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    /// Maximum in displayed units.
    pub max_value: f64,
    /// Raw units per displayed unit.
    pub scale_divisor: f64,
    /// Axis label, including the unit suffix.
    pub axis_label: String,
}

impl AxisSpec {
    /// Rescale a raw value into displayed units.
    pub fn scale(&self, raw: f64) -> f64 {
        raw / self.scale_divisor
    }
}

/// Choose the divisor and label for an axis.
///
/// Log axes always use divisor 1: their ticks already encode magnitude.
pub fn axis_specs(max_value: f64, series_name: &str, use_log: bool) -> AxisSpec {
    let unit = if use_log {
        ScaleUnit::Ones
    } else {
        ScaleUnit::for_max(max_value)
    };

    let axis_label = match unit.suffix() {
        Some(suffix) => format!("{} ({})", series_name, suffix),
        None => series_name.to_string(),
    };

    AxisSpec {
        max_value: max_value / unit.divisor(),
        scale_divisor: unit.divisor(),
        axis_label,
    }
}

/// Ticks at every power of ten from [`LOG_FLOOR`] up to the decade covering `max_value`.
///
/// Positions are in log space; labels are the raw values.
pub fn log_ticks(max_value: f64) -> Vec<Tick> {
    decade_ticks(to_axis_value(max_value, true))
}

/// Decade ticks from [`LOG_FLOOR`] up to the exponent `top`, given in log space.
///
/// `top` is clamped to the decades a finite `f64` can reach. Past
/// `MAX_TICKS` decades only every n-th one is labelled.
pub fn decade_ticks(top: f64) -> Vec<Tick> {
    let low = LOG_FLOOR.log10().round() as i32;
    let top = if top.is_nan() {
        low
    } else {
        top.ceil().clamp(f64::from(low), f64::from(MAX_DECADE)) as i32
    };

    let count = (top - low) as usize + 1;
    let stride = count.div_ceil(MAX_TICKS);

    (low..=top)
        .step_by(stride)
        .map(|exp| Tick::new(f64::from(exp), format_power_of_ten(exp)))
        .collect()
}

/// A "nice" step (1, 2 or 5 times a power of ten) giving about `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return 1.0;
    }

    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Multiples of `step` within `[lo, hi]`.
///
/// A step that would produce more than `MAX_TICKS` ticks is widened to a
/// multiple of itself so the whole range stays covered.
pub fn linear_ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && lo.is_finite() && hi.is_finite()) || hi < lo {
        return Vec::new();
    }

    let intervals = (hi - lo) / step;
    let step = if intervals >= MAX_TICKS as f64 {
        let widened = step * (intervals / (MAX_TICKS - 1) as f64).ceil();
        warn!(requested = step, widened, lo, hi, "Tick step too fine, widening");
        widened
    } else {
        step
    };
    if !step.is_finite() {
        return Vec::new();
    }

    let tolerance = step * 1e-9;
    let first = ((lo - tolerance) / step).ceil();

    (0..MAX_TICKS)
        .map(|i| (first + i as f64) * step)
        .take_while(|v| *v <= hi + tolerance)
        .collect()
}

/// Labelled linear ticks.
pub fn labelled_ticks(lo: f64, hi: f64, step: f64) -> Vec<Tick> {
    linear_ticks(lo, hi, step)
        .into_iter()
        .map(|v| Tick::new(v, format_tick(v)))
        .collect()
}

/// Trailing moving average over `window` consecutive points.
///
/// The output has the input's length. Positions before the window fills, and
/// windows containing a missing value, are `None`.
pub fn running_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|end| {
            if end + 1 < window {
                return None;
            }
            let slice = &values[end + 1 - window..=end];
            let sum = slice.iter().try_fold(0.0, |acc, v| v.map(|v| acc + v))?;
            Some(sum / window as f64)
        })
        .collect()
}

/// Whether `year` falls on the dominant cycle starting at `cycle_first_year`.
pub fn is_dominant_cycle_year(year: i32, cycle_first_year: i32) -> bool {
    (i64::from(year) - i64::from(cycle_first_year)).rem_euclid(i64::from(CYCLE_LENGTH)) == 0
}

/// Years in `first..=last` on the dominant cycle starting at `cycle_first_year`.
pub fn dominant_cycle_years(first: i32, last: i32, cycle_first_year: i32) -> Vec<i32> {
    let offset =
        (i64::from(cycle_first_year) - i64::from(first)).rem_euclid(i64::from(CYCLE_LENGTH));

    (i64::from(first) + offset..=i64::from(last))
        .step_by(CYCLE_LENGTH as usize)
        .filter_map(|year| i32::try_from(year).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_multiple(value: f64, step: f64) -> bool {
        let ratio = value / step;
        (ratio - ratio.round()).abs() < 1e-9
    }

    #[test]
    fn test_pretty_range_covers_data() {
        let datasets: [&[f64]; 5] = [
            &[3.0, 17.0, 9.0],
            &[-12.5, 4.0],
            &[1991.0, 2013.0],
            &[0.0],
            &[99.9, 100.0, 100.1],
        ];

        for data in datasets {
            for step in [1.0, 5.0, 0.5, 25.0] {
                let (lo, hi) = pretty_range(AxisRange::default(), data, step);
                let min = data.iter().copied().fold(f64::INFINITY, f64::min);
                let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                assert!(lo <= min && max <= hi, "{:?} step {}", data, step);
                assert!(is_multiple(lo, step) && is_multiple(hi, step));
                assert!(lo < hi);
            }
        }
    }

    #[test]
    fn test_pretty_range_years() {
        assert_eq!(
            pretty_range(AxisRange::default(), &[1991.0, 2013.0], 5.0),
            (1990.0, 2015.0)
        );
    }

    #[test]
    fn test_pretty_range_requested_overrides() {
        let requested = AxisRange {
            min: Some(0.0),
            max: None,
        };
        assert_eq!(pretty_range(requested, &[12.0, 38.0], 10.0), (0.0, 40.0));
        assert_eq!(
            pretty_range(AxisRange::fixed(-1.0, 2.0), &[12.0], 10.0),
            (-1.0, 2.0)
        );
    }

    #[test]
    fn test_pretty_range_empty_is_best_effort() {
        assert_eq!(pretty_range(AxisRange::default(), &[], 5.0), (0.0, 5.0));
        assert_eq!(
            pretty_range(AxisRange::default(), &[f64::NAN], 5.0),
            (0.0, 5.0)
        );
        assert_eq!(pretty_range(AxisRange::default(), &[3.0], 0.0), (3.0, 4.0));
    }

    #[test]
    fn test_to_axis_value_monotonic() {
        let inputs = [-5.0, 0.0, 0.001, 0.01, 0.5, 1.0, 10.0, 1e6];
        for use_log in [false, true] {
            for pair in inputs.windows(2) {
                assert!(
                    to_axis_value(pair[0], use_log) <= to_axis_value(pair[1], use_log),
                    "{:?} log={}",
                    pair,
                    use_log
                );
            }
        }
        assert!((to_axis_value(100.0, true) - 2.0).abs() < 1e-12);
        assert!((to_axis_value(0.0, true) + 2.0).abs() < 1e-12);
        assert!(to_axis_value(f64::NAN, true).is_finite());
        assert_eq!(to_axis_value(-3.0, false), -3.0);
    }

    #[test]
    fn test_axis_specs_units() {
        let spec = axis_specs(850.0, "Spawners", false);
        assert_eq!(spec.scale_divisor, 1.0);
        assert_eq!(spec.axis_label, "Spawners");

        let spec = axis_specs(45_000.0, "Spawners", false);
        assert_eq!(spec.scale_divisor, 1e3);
        assert_eq!(spec.max_value, 45.0);
        assert_eq!(spec.axis_label, "Spawners (thousands)");

        assert_eq!(axis_specs(2.5e6, "S", false).axis_label, "S (millions)");
        assert_eq!(axis_specs(7.0e9, "S", false).scale_divisor, 1e9);

        let spec = axis_specs(45_000.0, "Spawners", true);
        assert_eq!(spec.scale_divisor, 1.0);
        assert_eq!(spec.axis_label, "Spawners");
    }

    #[test]
    fn test_log_ticks() {
        let ticks = log_ticks(500.0);
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0.01", "0.1", "1", "10", "100", "1000"]);
        assert_eq!(ticks[2].position, 0.0);
        assert_eq!(ticks.last().map(|t| t.position), Some(3.0));

        assert_eq!(log_ticks(0.0).len(), 1);
    }

    #[test]
    fn test_log_ticks_huge_values_stay_bounded() {
        for ticks in [
            log_ticks(f64::MAX),
            log_ticks(f64::INFINITY),
            decade_ticks(309.0),
            decade_ticks(f64::INFINITY),
            decade_ticks(1e12),
        ] {
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= MAX_TICKS);
            assert_eq!(ticks[0].label, "0.01");
            assert!(ticks.iter().all(|t| t.position <= f64::from(MAX_DECADE)));
        }

        assert_eq!(decade_ticks(f64::NAN).len(), 1);
        assert_eq!(decade_ticks(f64::NEG_INFINITY).len(), 1);
        assert_eq!(decade_ticks(2.0).len(), 5);
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(100.0, 5), 20.0);
        assert_eq!(nice_step(25.0, 5), 5.0);
        assert_eq!(nice_step(1.0, 4), 0.5);
        assert_eq!(nice_step(0.0, 5), 1.0);
    }

    #[test]
    fn test_linear_ticks() {
        assert_eq!(linear_ticks(0.0, 10.0, 2.5), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(linear_ticks(1990.0, 2005.0, 5.0), vec![1990.0, 1995.0, 2000.0, 2005.0]);
        assert_eq!(linear_ticks(1.0, 4.0, 5.0), Vec::<f64>::new());
        assert!(linear_ticks(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_linear_ticks_widen_instead_of_truncating() {
        let ticks = linear_ticks(1800.0, 2020.0, 1.0);
        assert!(ticks.len() <= MAX_TICKS);
        assert_eq!(ticks.first(), Some(&1800.0));
        assert_eq!(ticks.last(), Some(&2020.0));
        assert!(ticks.windows(2).all(|w| w[1] - w[0] == 2.0));

        let ticks = linear_ticks(0.0, 1e6, 1.0);
        assert!(ticks.len() <= MAX_TICKS);
        let step = ticks[1] - ticks[0];
        let last = ticks[ticks.len() - 1];
        assert!(last <= 1e6 && 1e6 - last < step);

        assert_eq!(linear_ticks(0.0, 199.0, 1.0).len(), 200);
    }

    #[test]
    fn test_running_mean() {
        let series = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
        assert_eq!(
            running_mean(&series, 3),
            vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
        );
        assert_eq!(running_mean(&series, 1), series.to_vec());
        assert_eq!(running_mean(&series, 6), vec![None; 5]);
        assert_eq!(running_mean(&[], 3), Vec::<Option<f64>>::new());
    }

    #[test]
    fn test_running_mean_gap_breaks_window() {
        let series = [Some(1.0), None, Some(3.0), Some(5.0), Some(7.0)];
        assert_eq!(
            running_mean(&series, 2),
            vec![None, None, None, Some(4.0), Some(6.0)]
        );
    }

    #[test]
    fn test_dominant_cycle_years() {
        assert_eq!(dominant_cycle_years(1990, 2005, 1990), vec![1990, 1994, 1998, 2002]);
        assert_eq!(dominant_cycle_years(1990, 2000, 1973), vec![1993, 1997]);
        assert_eq!(dominant_cycle_years(1990, 1993, 2011), vec![1991]);
        assert!(dominant_cycle_years(2000, 1990, 1990).is_empty());
    }

    #[test]
    fn test_dominant_cycle_extreme_years() {
        assert_eq!(dominant_cycle_years(2000, 2001, i32::MIN), vec![2000]);
        assert_eq!(dominant_cycle_years(2000, 2003, i32::MAX), vec![2003]);
        assert_eq!(
            dominant_cycle_years(i32::MAX - 5, i32::MAX, i32::MAX),
            vec![i32::MAX - 4, i32::MAX]
        );
        assert!(is_dominant_cycle_year(2000, i32::MIN));
        assert!(!is_dominant_cycle_year(i32::MIN, i32::MAX));
    }
}
