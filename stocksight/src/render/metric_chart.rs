//! Time-series metric chart with benchmark zones.
//!
//! A chart is drawn as a fixed pipeline of layers, back to front:
//! frame, axes, zone shading, reference lines, the metric series, its moving
//! average, dominant-cycle markers and finally the title. Zone shading always
//! comes before any line or marker so it never hides them.

use stocksight_common::{AxisRange, BenchmarkZones, ReferenceLine, TimeSeries};
use tracing::debug;

use super::palette::fill_color;
use super::scale::{
    AxisSpec, YEAR_GRANULARITY, axis_specs, decade_ticks, is_dominant_cycle_year,
    labelled_ticks, nice_step, pretty_range, running_mean, to_axis_value,
};
use super::style::{ChartStyle, LayerStyle};
use super::surface::{DrawSurface, Point, Rect, Side, TextAnchor, Tick, TitleLevel, Window};

/// Approximate number of intervals on a linear axis.
const TARGET_TICKS: usize = 5;

/// Label of the x axis.
pub const YEAR_AXIS_LABEL: &str = "Year";

/// Drawing steps of a metric chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayer {
    Frame,
    Axes,
    Zones,
    ReferenceLines,
    Series,
    MovingAverage,
    CycleHighlight,
    Title,
}

/// Back-to-front layer order.
pub const LAYER_ORDER: [ChartLayer; 8] = [
    ChartLayer::Frame,
    ChartLayer::Axes,
    ChartLayer::Zones,
    ChartLayer::ReferenceLines,
    ChartLayer::Series,
    ChartLayer::MovingAverage,
    ChartLayer::CycleHighlight,
    ChartLayer::Title,
];

/// What a render call ended up drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutcome {
    /// All layers were drawn.
    Rendered,
    /// The series had nothing to plot; only an empty frame was drawn.
    Empty,
}

/// Coordinates computed for one chart before any drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub window: Window,
    pub axis: AxisSpec,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Zone thresholds on the axis, when both are defined.
    pub zone_bounds: Option<(f64, f64)>,
}

/// One metric chart.
///
/// Optional features (zones, moving average, cyclic highlighting, reference
/// lines, fixed ranges) are off unless set.
#[derive(Debug, Clone)]
pub struct MetricChart<'a> {
    data: &'a TimeSeries,
    title: String,
    series_label: String,
    zones: Option<BenchmarkZones>,
    moving_average: Option<usize>,
    dom_cycle_first_year: Option<i32>,
    h_ref_lines: Vec<ReferenceLine>,
    v_ref_lines: Vec<Option<f64>>,
    x_range: AxisRange,
    y_range: AxisRange,
    x_tick_step: Option<f64>,
    use_log: bool,
}

impl<'a> MetricChart<'a> {
    /// Create a chart for `data`.
    pub fn new(
        data: &'a TimeSeries,
        title: impl Into<String>,
        series_label: impl Into<String>,
    ) -> Self {
        Self {
            data,
            title: title.into(),
            series_label: series_label.into(),
            zones: None,
            moving_average: None,
            dom_cycle_first_year: None,
            h_ref_lines: Vec::new(),
            v_ref_lines: Vec::new(),
            x_range: AxisRange::default(),
            y_range: AxisRange::default(),
            x_tick_step: None,
            use_log: false,
        }
    }

    /// Shade benchmark zones.
    pub fn with_zones(mut self, zones: BenchmarkZones) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Overlay a trailing moving average. `None` disables it.
    pub fn with_moving_average(mut self, window: Option<usize>) -> Self {
        self.moving_average = window;
        self
    }

    /// Highlight dominant-cycle years. `None` disables it.
    pub fn with_dominant_cycle(mut self, first_year: Option<i32>) -> Self {
        self.dom_cycle_first_year = first_year;
        self
    }

    /// Add a labelled horizontal reference line.
    pub fn with_h_ref(mut self, line: ReferenceLine) -> Self {
        self.h_ref_lines.push(line);
        self
    }

    /// Add a vertical reference line at a year.
    pub fn with_v_ref(mut self, year: Option<f64>) -> Self {
        self.v_ref_lines.push(year);
        self
    }

    pub fn with_x_range(mut self, range: AxisRange) -> Self {
        self.x_range = range;
        self
    }

    pub fn with_y_range(mut self, range: AxisRange) -> Self {
        self.y_range = range;
        self
    }

    /// Force the spacing of year ticks.
    pub fn with_x_tick_step(mut self, step: Option<f64>) -> Self {
        self.x_tick_step = step.filter(|s| s.is_finite() && *s > 0.0);
        self
    }

    /// Plot on a log10 axis.
    pub fn with_log_scale(mut self, use_log: bool) -> Self {
        self.use_log = use_log;
        self
    }

    /// Map a raw value onto this chart's axis.
    fn transform(&self, axis: &AxisSpec, raw: f64) -> f64 {
        to_axis_value(axis.scale(raw), self.use_log)
    }

    /// Compute axes, window and zone positions. `None` if there is nothing to plot.
    pub fn geometry(&self) -> Option<ChartGeometry> {
        if self.data.is_all_missing() {
            return None;
        }

        let zone_raw = self.zones.and_then(|z| z.bounds());
        let ref_values = self.h_ref_lines.iter().filter_map(|r| r.value);

        let raw_max = std::iter::once(0.0)
            .chain(self.data.present().map(|(_, v)| v))
            .chain(zone_raw.into_iter().flat_map(|(lo, hi)| [lo, hi]))
            .chain(ref_values.clone())
            .chain(self.y_range.max)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);

        let axis = axis_specs(raw_max, &self.series_label, self.use_log);

        let candidates: Vec<f64> = std::iter::once(0.0)
            .chain(self.data.present().map(|(_, v)| v))
            .chain(zone_raw.into_iter().flat_map(|(lo, hi)| [lo, hi]))
            .chain(ref_values)
            .map(|v| self.transform(&axis, v))
            .collect();
        let requested_y = self.y_range.map(|v| self.transform(&axis, v));

        let (y_ticks, y_bounds) = if self.use_log {
            let bounds = pretty_range(requested_y, &candidates, 1.0);
            let ticks = decade_ticks(bounds.1)
                .into_iter()
                .filter(|t| t.position >= bounds.0 - 1e-9 && t.position <= bounds.1 + 1e-9)
                .collect();
            (ticks, bounds)
        } else {
            let span = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                - candidates.iter().copied().fold(f64::INFINITY, f64::min);
            let bounds = pretty_range(requested_y, &candidates, nice_step(span, TARGET_TICKS));
            let step = nice_step(bounds.1 - bounds.0, TARGET_TICKS);
            (labelled_ticks(bounds.0, bounds.1, step), bounds)
        };

        let years: Vec<f64> = self.data.present().map(|(y, _)| y as f64).collect();
        let x_bounds = pretty_range(self.x_range, &years, YEAR_GRANULARITY);
        let x_step = self
            .x_tick_step
            .unwrap_or_else(|| nice_step(x_bounds.1 - x_bounds.0, TARGET_TICKS).max(1.0));
        let x_ticks = labelled_ticks(x_bounds.0, x_bounds.1, x_step);

        let zone_bounds =
            zone_raw.map(|(lo, hi)| (self.transform(&axis, lo), self.transform(&axis, hi)));

        Some(ChartGeometry {
            window: Window::new(x_bounds, y_bounds),
            axis,
            x_ticks,
            y_ticks,
            zone_bounds,
        })
    }

    /// Draw the chart onto the surface's current panel.
    pub fn render(&self, surface: &mut dyn DrawSurface, overrides: &ChartStyle) -> ChartOutcome {
        let style = ChartStyle::resolve(overrides);

        let Some(geometry) = self.geometry() else {
            debug!(title = %self.title, "No data to plot, drawing empty frame");
            let x_bounds = pretty_range(self.x_range, &[], YEAR_GRANULARITY);
            surface.set_window(Window::new(x_bounds, (0.0, 1.0)));
            surface.draw_frame(&style.frame);
            return ChartOutcome::Empty;
        };

        debug!(
            title = %self.title,
            points = self.data.len(),
            log = self.use_log,
            "Rendering metric chart"
        );

        surface.set_window(geometry.window);
        for layer in LAYER_ORDER {
            self.draw_layer(layer, &geometry, &style, surface);
        }

        ChartOutcome::Rendered
    }

    fn draw_layer(
        &self,
        layer: ChartLayer,
        geometry: &ChartGeometry,
        style: &ChartStyle,
        surface: &mut dyn DrawSurface,
    ) {
        match layer {
            ChartLayer::Frame => surface.draw_frame(&style.frame),
            ChartLayer::Axes => {
                surface.draw_axis(Side::Bottom, &geometry.x_ticks, YEAR_AXIS_LABEL, &style.axis);
                surface.draw_axis(
                    Side::Left,
                    &geometry.y_ticks,
                    &geometry.axis.axis_label,
                    &style.axis,
                );
            }
            ChartLayer::Zones => self.draw_zones(geometry, &style.zone, surface),
            ChartLayer::ReferenceLines => self.draw_reference_lines(geometry, style, surface),
            ChartLayer::Series => {
                let points = self
                    .data
                    .iter()
                    .map(|(year, v)| (year as f64, v.map(|v| self.transform(&geometry.axis, v))));
                for segment in segments(points) {
                    surface.draw_line(&segment, &style.series_line);
                }
                let markers: Vec<Point> = self
                    .data
                    .present()
                    .map(|(year, v)| Point::new(year as f64, self.transform(&geometry.axis, v)))
                    .collect();
                surface.draw_points(&markers, &style.series_points);
            }
            ChartLayer::MovingAverage => {
                let Some(window) = self.moving_average.filter(|w| *w > 0) else {
                    return;
                };
                let means = running_mean(&self.data.values(), window);
                let points = self.data.years().into_iter().zip(means).map(|(year, mean)| {
                    (
                        year as f64,
                        mean.map(|m| self.transform(&geometry.axis, m)),
                    )
                });
                for segment in segments(points) {
                    surface.draw_line(&segment, &style.moving_average);
                }
            }
            ChartLayer::CycleHighlight => {
                let Some(cycle_first) = self.dom_cycle_first_year else {
                    return;
                };
                let markers: Vec<Point> = self
                    .data
                    .present()
                    .filter(|(year, _)| is_dominant_cycle_year(*year, cycle_first))
                    .map(|(year, v)| Point::new(year as f64, self.transform(&geometry.axis, v)))
                    .collect();
                if !markers.is_empty() {
                    surface.draw_points(&markers, &style.cycle_points);
                }
            }
            ChartLayer::Title => surface.set_title(&self.title, TitleLevel::Panel, &style.title),
        }
    }

    /// Three stacked bands spanning the full x extent: Red, Amber, Green.
    fn draw_zones(&self, geometry: &ChartGeometry, zone: &LayerStyle, surface: &mut dyn DrawSurface) {
        let Some((lower, upper)) = geometry.zone_bounds else {
            if self.zones.is_some() {
                debug!(title = %self.title, "Benchmark zones incomplete, skipping shading");
            }
            return;
        };

        let (x0, x1) = geometry.window.x;
        let (y0, y1) = geometry.window.y;
        let opacity = zone.opacity.unwrap_or(1.0);

        let bands = [
            ("Red", y0, lower),
            ("Amber", lower, upper),
            ("Green", upper, y1),
        ];

        for (status, from, to) in bands {
            let from = from.clamp(y0, y1);
            let to = to.clamp(y0, y1);
            if to <= from {
                continue;
            }
            let band_style = LayerStyle {
                fill: Some(fill_color(status).with_alpha(opacity)),
                ..*zone
            };
            surface.fill_rect(
                Rect::from_corners(Point::new(x0, from), Point::new(x1, to)),
                &band_style,
            );
        }
    }

    fn draw_reference_lines(
        &self,
        geometry: &ChartGeometry,
        style: &ChartStyle,
        surface: &mut dyn DrawSurface,
    ) {
        let (x0, x1) = geometry.window.x;
        let (y0, y1) = geometry.window.y;

        for line in &self.h_ref_lines {
            let Some(value) = line.value else {
                debug!(label = %line.label, "Reference line has no value, skipping");
                continue;
            };
            let y = self.transform(&geometry.axis, value);
            surface.draw_line(&[Point::new(x0, y), Point::new(x1, y)], &style.reference_line);
            if !line.label.is_empty() {
                surface.draw_text(
                    Point::new(x1, y),
                    &line.label,
                    TextAnchor::End,
                    &style.reference_label,
                );
            }
        }

        for x in self.v_ref_lines.iter().flatten() {
            surface.draw_line(&[Point::new(*x, y0), Point::new(*x, y1)], &style.vertical_line);
        }
    }
}

/// Split `(x, y?)` pairs into runs of consecutive present values.
///
/// Runs of a single point are dropped; markers cover them.
fn segments(points: impl Iterator<Item = (f64, Option<f64>)>) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (x, y) in points {
        match y {
            Some(y) => current.push(Point::new(x, y)),
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCall, RecordingSurface};

    fn series(points: &[(i32, f64)]) -> TimeSeries {
        points.iter().map(|(y, v)| (*y, Some(*v))).collect()
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let runs = segments(
            [
                (1.0, Some(1.0)),
                (2.0, Some(2.0)),
                (3.0, None),
                (4.0, Some(4.0)),
                (5.0, None),
                (6.0, Some(6.0)),
                (7.0, Some(7.0)),
                (8.0, Some(8.0)),
            ]
            .into_iter(),
        );
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn test_empty_series_draws_frame_only() {
        let data = TimeSeries::new();
        let mut surface = RecordingSurface::new();
        let outcome = MetricChart::new(&data, "Empty", "Value")
            .with_zones(BenchmarkZones::between(1.0, 2.0))
            .with_h_ref(ReferenceLine::at("ref", 1.5))
            .render(&mut surface, &ChartStyle::default());

        assert_eq!(outcome, ChartOutcome::Empty);
        assert_eq!(surface.kinds(), vec!["set_window", "draw_frame"]);
    }

    #[test]
    fn test_all_missing_series_is_empty() {
        let data = TimeSeries::new().with_missing(2000).with_missing(2001);
        let mut surface = RecordingSurface::new();
        let outcome =
            MetricChart::new(&data, "Gaps", "Value").render(&mut surface, &ChartStyle::default());
        assert_eq!(outcome, ChartOutcome::Empty);
    }

    #[test]
    fn test_geometry_covers_data_zones_and_refs() {
        let data = series(&[(1991, 12.0), (2003, 38.0)]);
        let geometry = MetricChart::new(&data, "t", "v")
            .with_zones(BenchmarkZones::between(10.0, 45.0))
            .with_h_ref(ReferenceLine::at("target", 60.0))
            .geometry()
            .unwrap();

        assert_eq!(geometry.window.x, (1990.0, 2005.0));
        let (y0, y1) = geometry.window.y;
        assert!(y0 <= 0.0 && y1 >= 60.0);
        assert_eq!(geometry.zone_bounds, Some((10.0, 45.0)));
        assert!(geometry.y_ticks.iter().any(|t| t.label == "0"));
    }

    #[test]
    fn test_geometry_rescales_large_values() {
        let data = series(&[(2000, 12_000.0), (2001, 48_000.0)]);
        let geometry = MetricChart::new(&data, "t", "Spawners")
            .with_zones(BenchmarkZones::between(10_000.0, 30_000.0))
            .geometry()
            .unwrap();

        assert_eq!(geometry.axis.scale_divisor, 1e3);
        assert_eq!(geometry.axis.axis_label, "Spawners (thousands)");
        assert_eq!(geometry.zone_bounds, Some((10.0, 30.0)));
        assert!(geometry.window.y.1 >= 48.0 && geometry.window.y.1 < 1000.0);
    }

    #[test]
    fn test_geometry_log_axis() {
        let data = series(&[(2000, 0.5), (2001, 40.0)]);
        let geometry = MetricChart::new(&data, "t", "Index")
            .with_log_scale(true)
            .geometry()
            .unwrap();

        assert_eq!(geometry.axis.scale_divisor, 1.0);
        assert_eq!(geometry.window.y, (-2.0, 2.0));
        let labels: Vec<_> = geometry.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0.01", "0.1", "1", "10", "100"]);
    }

    #[test]
    fn test_log_axis_transforms_zones_and_refs() {
        let data = series(&[(2000, 0.2), (2001, 40.0)]);
        let mut surface = RecordingSurface::new();
        MetricChart::new(&data, "t", "Index")
            .with_log_scale(true)
            .with_zones(BenchmarkZones::between(0.5, 5.0))
            .with_h_ref(ReferenceLine::at("target", 10.0))
            .render(&mut surface, &ChartStyle::default());

        let rects: Vec<Rect> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].y1, 0.5f64.log10());
        assert_eq!((rects[1].y0, rects[1].y1), (0.5f64.log10(), 5.0f64.log10()));
        assert_eq!(rects[2].y0, 5.0f64.log10());

        let reference = surface
            .calls()
            .iter()
            .find_map(|c| match c {
                DrawCall::DrawLine { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        assert!(reference.iter().all(|p| p.y == 1.0));
    }

    #[test]
    fn test_log_axis_huge_values_keep_ticks_bounded() {
        let data = series(&[(2000, 1.0), (2001, 1.5e308)]);
        let geometry = MetricChart::new(&data, "t", "Index")
            .with_log_scale(true)
            .geometry()
            .unwrap();

        assert!(!geometry.y_ticks.is_empty());
        assert!(geometry.y_ticks.len() <= 200);
        assert!(geometry.y_ticks.iter().all(|t| t.position.is_finite()));

        let mut surface = RecordingSurface::new();
        let outcome = MetricChart::new(&data, "t", "Index")
            .with_log_scale(true)
            .render(&mut surface, &ChartStyle::default());
        assert_eq!(outcome, ChartOutcome::Rendered);
    }

    #[test]
    fn test_forced_x_tick_step_and_range() {
        let data = series(&[(1993, 1.0), (1997, 2.0)]);
        let geometry = MetricChart::new(&data, "t", "v")
            .with_x_range(AxisRange::fixed(1980.0, 2000.0))
            .with_x_tick_step(Some(2.0))
            .geometry()
            .unwrap();

        assert_eq!(geometry.window.x, (1980.0, 2000.0));
        assert_eq!(geometry.x_ticks.len(), 11);
        assert_eq!(geometry.x_ticks[1].label, "1982");
    }

    #[test]
    fn test_zone_bands_are_contiguous() {
        let data = series(&[(2000, 5.0), (2001, 25.0)]);
        let mut surface = RecordingSurface::new();
        MetricChart::new(&data, "t", "v")
            .with_zones(BenchmarkZones::between(10.0, 20.0))
            .render(&mut surface, &ChartStyle::default());

        let rects: Vec<Rect> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();

        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].y1, 10.0);
        assert_eq!(rects[1].y0, 10.0);
        assert_eq!(rects[1].y1, 20.0);
        assert_eq!(rects[2].y0, 20.0);
        assert_eq!(rects[0].y0, surface.last_window().unwrap().y.0);
        assert_eq!(rects[2].y1, surface.last_window().unwrap().y.1);
    }

    #[test]
    fn test_single_threshold_skips_zones() {
        let data = series(&[(2000, 5.0), (2001, 25.0)]);
        let mut surface = RecordingSurface::new();
        MetricChart::new(&data, "t", "v")
            .with_zones(BenchmarkZones::new(Some(10.0), None))
            .render(&mut surface, &ChartStyle::default());

        assert_eq!(surface.count("fill_rect"), 0);
    }
}
