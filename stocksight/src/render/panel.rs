//! Dashboard composition: four metric charts in a 2x2 grid plus an optional
//! full-width timeline row.

use serde::{Deserialize, Serialize};
use stocksight_common::{AxisRange, ReferenceLine, Result, UnitDataset};
use tracing::{debug, info};

use super::metric_chart::{ChartOutcome, MetricChart};
use super::scale::{YEAR_GRANULARITY, pretty_range};
use super::style::{ChartStyle, FontFace, LayerStyle, TimelineStyle};
use super::surface::{DrawSurface, GridLayout, Margins, PanelRegion, TitleLevel};
use super::timeline::{GridOutcome, MetricRow, TimelineGrid};

const GRID_COLUMNS: usize = 2;

/// Layout options for the composed dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Draw the timeline row when a status table is available.
    pub show_timeline: bool,
    /// Forced spacing of year ticks on every chart.
    pub x_tick_step: Option<f64>,
    /// Timeline rows, most important first.
    pub timeline_rows: Vec<TimelineRowConfig>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            show_timeline: true,
            x_tick_step: None,
            timeline_rows: default_timeline_rows(),
        }
    }
}

/// A timeline row as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRowConfig {
    pub label: String,
    pub column: String,
    #[serde(default)]
    pub font: Option<FontFace>,
}

impl From<&TimelineRowConfig> for MetricRow {
    fn from(row: &TimelineRowConfig) -> Self {
        MetricRow {
            label: row.label.clone(),
            data_col: row.column.clone(),
            font: row.font,
        }
    }
}

fn default_timeline_rows() -> Vec<TimelineRowConfig> {
    let row = |label: &str, column: &str, font: Option<FontFace>| TimelineRowConfig {
        label: label.to_string(),
        column: column.to_string(),
        font,
    };
    vec![
        row("Overall", "Status", Some(FontFace::Bold)),
        row("Rel Abd", "RelAbd", None),
        row("Abs Abd", "AbsAbd", None),
        row("LT Trend", "LongTrend", None),
        row("% Change", "PercChange", None),
    ]
}

/// What the composer drew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelReport {
    pub charts: Vec<ChartOutcome>,
    pub timeline: Option<GridOutcome>,
}

/// Assembles one unit's dashboard on a surface.
pub struct PanelComposer<'a> {
    dataset: &'a UnitDataset,
    chart_style: ChartStyle,
    timeline_style: TimelineStyle,
    options: PanelOptions,
}

impl<'a> PanelComposer<'a> {
    pub fn new(dataset: &'a UnitDataset) -> Self {
        Self {
            dataset,
            chart_style: ChartStyle::default(),
            timeline_style: TimelineStyle::default(),
            options: PanelOptions::default(),
        }
    }

    /// Style overrides applied to every chart and the timeline.
    pub fn with_styles(mut self, chart: ChartStyle, timeline: TimelineStyle) -> Self {
        self.chart_style = chart;
        self.timeline_style = timeline;
        self
    }

    pub fn with_options(mut self, options: PanelOptions) -> Self {
        self.options = options;
        self
    }

    /// Page title: unit name and data-quality indicator.
    pub fn page_title(&self) -> String {
        let attrs = &self.dataset.attributes;
        format!("{} (data quality: {})", attrs.name, attrs.data_quality)
    }

    /// Default year bounds shared by all charts, rounded outward to multiples of five.
    pub fn year_bounds(&self) -> AxisRange {
        match self.dataset.series.year_span() {
            Some((first, last)) => {
                let (lo, hi) = pretty_range(
                    AxisRange::default(),
                    &[first as f64, last as f64],
                    YEAR_GRANULARITY,
                );
                AxisRange::fixed(lo, hi)
            }
            None => AxisRange::default(),
        }
    }

    fn timeline_enabled(&self) -> bool {
        self.options.show_timeline && self.dataset.status.is_some()
    }

    /// The four charts in grid order.
    fn charts(&self) -> Vec<(PanelRegion, MetricChart<'a>)> {
        let dataset = self.dataset;
        let attrs = &dataset.attributes;
        let series = &dataset.series;
        let x_range = self.year_bounds();

        let base = |chart: MetricChart<'a>| {
            chart
                .with_x_range(x_range)
                .with_x_tick_step(self.options.x_tick_step)
        };

        let relative = base(
            MetricChart::new(
                &series.relative_abundance,
                "Relative abundance",
                "Relative abundance",
            )
            .with_zones(attrs.relative_abundance)
            .with_moving_average(attrs.avg_generation)
            .with_dominant_cycle(attrs.dom_cycle_first_year),
        );

        let second = if attrs.data_quality.is_absolute() {
            MetricChart::new(
                &series.absolute_abundance,
                "Absolute abundance",
                "Spawners",
            )
            .with_zones(attrs.absolute_abundance)
        } else {
            MetricChart::new(
                &series.relative_abundance,
                "Log relative abundance",
                "Relative abundance",
            )
            .with_zones(attrs.relative_abundance)
            .with_log_scale(true)
        };
        let second = base(
            second
                .with_moving_average(attrs.avg_generation)
                .with_dominant_cycle(attrs.dom_cycle_first_year),
        );

        let trend = base(
            MetricChart::new(&series.long_term_trend, "Long-term trend", "% of long-term avg")
                .with_zones(attrs.long_term_trend)
                .with_h_ref(ReferenceLine::at("LT avg", 100.0)),
        );

        let change = base(
            MetricChart::new(&series.percent_change, "Percent change", "% change")
                .with_zones(attrs.percent_change)
                .with_h_ref(ReferenceLine::at("No change", 0.0)),
        );

        vec![
            (PanelRegion::cell(0, 0), relative),
            (PanelRegion::cell(0, 1), second),
            (PanelRegion::cell(1, 0), trend),
            (PanelRegion::cell(1, 1), change),
        ]
    }

    /// Draw the dashboard.
    ///
    /// A status table without a year column is rejected before anything is drawn.
    pub fn compose(&self, surface: &mut dyn DrawSurface) -> Result<PanelReport> {
        let timeline = self.timeline_enabled();
        if timeline && let Some(table) = &self.dataset.status {
            table.years()?;
        }

        info!(unit = %self.dataset.attributes.name, timeline, "Composing dashboard");

        let rows = if timeline { 3 } else { 2 };
        surface.set_layout(GridLayout {
            rows,
            cols: GRID_COLUMNS,
        });
        let page_style = ChartStyle::resolve(&self.chart_style).title;
        surface.set_title(
            &self.page_title(),
            TitleLevel::Page,
            &LayerStyle {
                text_size: page_style.text_size.map(|s| s + 3.0),
                ..page_style
            },
        );

        let mut report = PanelReport::default();
        for (region, chart) in self.charts() {
            surface.begin_panel(region, Margins::CHART);
            report.charts.push(chart.render(surface, &self.chart_style));
        }

        if let (true, Some(table)) = (timeline, &self.dataset.status) {
            let rows: Vec<MetricRow> = self
                .options
                .timeline_rows
                .iter()
                .map(MetricRow::from)
                .collect();
            let x_range = self.year_bounds();

            surface.begin_panel(PanelRegion::full_row(2, GRID_COLUMNS), Margins::TIMELINE);
            let grid = TimelineGrid::new(table, &rows, "Status timeline")
                .with_start_year(x_range.min.map(|y| y as i32))
                .with_end_year(x_range.max.map(|y| y as i32));
            report.timeline = Some(grid.render(surface, &self.timeline_style)?);
        } else {
            debug!("Timeline row disabled or no status table");
        }

        Ok(report)
    }
}
