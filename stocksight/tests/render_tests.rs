//! Draw-sequence tests for the rendering engine.
//!
//! Every renderer draws through a `RecordingSurface`, so the exact order of
//! primitives can be asserted without a window.

use stocksight::demo::DemoGenerator;
use stocksight::render::style::ChartStyle;
use stocksight::render::surface::{Point, TitleLevel};
use stocksight::render::{
    ChartOutcome, Color, DrawCall, LayerStyle, MetricChart, PanelComposer, RecordingSurface,
};
use stocksight_common::{BenchmarkZones, ReferenceLine, TimeSeries};

fn steady_series() -> TimeSeries {
    (2000..=2007).map(|y| (y, Some((y - 1999) as f64))).collect()
}

fn full_chart(data: &TimeSeries) -> MetricChart<'_> {
    MetricChart::new(data, "Relative abundance", "Index")
        .with_zones(BenchmarkZones::between(2.0, 5.0))
        .with_h_ref(ReferenceLine::at("Target", 4.0))
        .with_v_ref(Some(2003.0))
        .with_moving_average(Some(3))
        .with_dominant_cycle(Some(2000))
}

#[test]
fn test_full_chart_layer_sequence() {
    let data = steady_series();
    let mut surface = RecordingSurface::new();

    let outcome = full_chart(&data).render(&mut surface, &ChartStyle::default());

    assert_eq!(outcome, ChartOutcome::Rendered);
    assert_eq!(
        surface.kinds(),
        vec![
            "set_window",
            "draw_frame",
            "draw_axis",
            "draw_axis",
            "fill_rect",
            "fill_rect",
            "fill_rect",
            "draw_line",
            "draw_text",
            "draw_line",
            "draw_line",
            "draw_points",
            "draw_line",
            "draw_points",
            "set_title",
        ]
    );
}

#[test]
fn test_zones_never_paint_over_lines_or_markers() {
    let data = steady_series();
    let mut surface = RecordingSurface::new();
    full_chart(&data).render(&mut surface, &ChartStyle::default());

    let kinds = surface.kinds();
    let last_fill = kinds.iter().rposition(|k| *k == "fill_rect").unwrap();
    let first_mark = kinds
        .iter()
        .position(|k| *k == "draw_line" || *k == "draw_points")
        .unwrap();
    assert!(last_fill < first_mark);
}

#[test]
fn test_zone_bands_are_red_amber_green_bottom_up() {
    let data = steady_series();
    let mut surface = RecordingSurface::new();
    full_chart(&data).render(&mut surface, &ChartStyle::default());

    let bands: Vec<(f64, f64)> = surface
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::FillRect { rect, .. } => Some((rect.y0, rect.y1)),
            _ => None,
        })
        .collect();

    assert_eq!(bands[0].1, 2.0);
    assert_eq!(bands[1], (2.0, 5.0));
    assert_eq!(bands[2].0, 5.0);
}

#[test]
fn test_moving_average_starts_after_full_window() {
    let data = steady_series();
    let mut surface = RecordingSurface::new();
    full_chart(&data).render(&mut surface, &ChartStyle::default());

    let lines: Vec<&Vec<Point>> = surface
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::DrawLine { points, .. } => Some(points),
            _ => None,
        })
        .collect();

    // reference, vertical, series, moving average
    let average = lines[3];
    assert_eq!(average.len(), 6);
    assert_eq!(average[0], Point::new(2002.0, 2.0));
}

#[test]
fn test_gap_splits_series_line() {
    let data = TimeSeries::new()
        .with(2000, 1.0)
        .with(2001, 2.0)
        .with_missing(2002)
        .with(2003, 3.0)
        .with(2004, 4.0);
    let mut surface = RecordingSurface::new();

    MetricChart::new(&data, "t", "Index").render(&mut surface, &ChartStyle::default());

    assert_eq!(surface.count("draw_line"), 2);
    let markers = surface
        .calls()
        .iter()
        .find_map(|c| match c {
            DrawCall::DrawPoints { points, .. } => Some(points.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(markers, 4);
}

#[test]
fn test_style_override_merges_per_option() {
    let data = steady_series();
    let red = Color::from_rgb(1.0, 0.0, 0.0);
    let overrides = ChartStyle {
        moving_average: LayerStyle::new().with_color(red),
        ..ChartStyle::default()
    };
    let mut surface = RecordingSurface::new();

    full_chart(&data).render(&mut surface, &overrides);

    let styles: Vec<LayerStyle> = surface
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::DrawLine { style, .. } => Some(*style),
            _ => None,
        })
        .collect();
    let average = styles[3];
    assert_eq!(average.color, Some(red));
    assert_eq!(
        average.line_width,
        ChartStyle::defaults().moving_average.line_width
    );
}

#[test]
fn test_empty_series_draws_frame_only() {
    let data = TimeSeries::new().with_missing(2000).with_missing(2001);
    let mut surface = RecordingSurface::new();

    let outcome = full_chart(&data).render(&mut surface, &ChartStyle::default());

    assert_eq!(outcome, ChartOutcome::Empty);
    assert_eq!(surface.kinds(), vec!["set_window", "draw_frame"]);
}

#[test]
fn test_composed_demo_dump_is_json() {
    let dataset = DemoGenerator::seeded(11).generate();
    let mut surface = RecordingSurface::new();

    let report = PanelComposer::new(&dataset).compose(&mut surface).unwrap();
    assert_eq!(report.charts.len(), 4);
    assert!(report.timeline.is_some());

    let json: serde_json::Value = serde_json::from_str(&surface.to_json().unwrap()).unwrap();
    let calls = json.as_array().unwrap();
    assert_eq!(calls[0]["call"], "set_layout");
    assert_eq!(calls[1]["call"], "set_title");

    let page_titles = surface
        .calls()
        .iter()
        .filter(|c| {
            matches!(
                c,
                DrawCall::SetTitle {
                    level: TitleLevel::Page,
                    ..
                }
            )
        })
        .count();
    assert_eq!(page_titles, 1);
}
