//! Drawing-option records and their defaults tables.
//!
//! Every visual layer takes a [`LayerStyle`]: a record of optional drawing
//! options. A renderer starts from its defaults table ([`ChartStyle::defaults`],
//! [`TimelineStyle::defaults`]) and merges the caller's overrides on top,
//! option by option. The resolved record is handed to the surface as is;
//! each surface reads the options that make sense for the primitive.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Stroke pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Point marker shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
}

/// Text face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

/// Drawing options for one layer. `None` means "not specified".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    pub color: Option<Color>,
    pub fill: Option<Color>,
    pub opacity: Option<f32>,
    pub line_width: Option<f32>,
    pub line_type: Option<LineType>,
    pub marker: Option<MarkerShape>,
    pub marker_size: Option<f32>,
    pub text_size: Option<f32>,
    pub font: Option<FontFace>,
}

impl LayerStyle {
    /// An empty record.
    pub const fn new() -> Self {
        Self {
            color: None,
            fill: None,
            opacity: None,
            line_width: None,
            line_type: None,
            marker: None,
            marker_size: None,
            text_size: None,
            font: None,
        }
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub const fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub const fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = Some(line_type);
        self
    }

    pub const fn with_marker(mut self, marker: MarkerShape, size: f32) -> Self {
        self.marker = Some(marker);
        self.marker_size = Some(size);
        self
    }

    pub const fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);
        self
    }

    pub const fn with_font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }

    /// Shallow merge: every option set in `over` wins.
    pub fn merged(&self, over: &LayerStyle) -> LayerStyle {
        LayerStyle {
            color: over.color.or(self.color),
            fill: over.fill.or(self.fill),
            opacity: over.opacity.or(self.opacity),
            line_width: over.line_width.or(self.line_width),
            line_type: over.line_type.or(self.line_type),
            marker: over.marker.or(self.marker),
            marker_size: over.marker_size.or(self.marker_size),
            text_size: over.text_size.or(self.text_size),
            font: over.font.or(self.font),
        }
    }
}

const INK: Color = Color::from_rgb(0.15, 0.15, 0.15);
const MUTED: Color = Color::from_rgb(0.4, 0.4, 0.4);

/// Per-layer options for the metric chart.
///
/// `Default` is the empty override record; [`ChartStyle::defaults`] is the
/// built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub frame: LayerStyle,
    pub axis: LayerStyle,
    pub zone: LayerStyle,
    pub reference_line: LayerStyle,
    pub reference_label: LayerStyle,
    pub vertical_line: LayerStyle,
    pub series_line: LayerStyle,
    pub series_points: LayerStyle,
    pub moving_average: LayerStyle,
    pub cycle_points: LayerStyle,
    pub title: LayerStyle,
}

impl ChartStyle {
    /// Built-in defaults for metric charts.
    pub fn defaults() -> Self {
        Self {
            frame: LayerStyle::new().with_color(MUTED).with_line_width(1.0),
            axis: LayerStyle::new()
                .with_color(MUTED)
                .with_line_width(1.0)
                .with_text_size(10.0),
            zone: LayerStyle::new().with_opacity(0.6),
            reference_line: LayerStyle::new()
                .with_color(MUTED)
                .with_line_width(1.0)
                .with_line_type(LineType::Dashed),
            reference_label: LayerStyle::new()
                .with_color(MUTED)
                .with_text_size(9.0)
                .with_font(FontFace::Italic),
            vertical_line: LayerStyle::new()
                .with_color(MUTED)
                .with_line_width(1.0)
                .with_line_type(LineType::Dotted),
            series_line: LayerStyle::new().with_color(INK).with_line_width(1.5),
            series_points: LayerStyle::new()
                .with_color(INK)
                .with_fill(INK)
                .with_marker(MarkerShape::Circle, 3.0),
            moving_average: LayerStyle::new()
                .with_color(Color::from_rgb(0.2, 0.35, 0.8))
                .with_line_width(2.0)
                .with_line_type(LineType::Solid),
            cycle_points: LayerStyle::new()
                .with_color(Color::BLACK)
                .with_fill(Color::WHITE)
                .with_marker(MarkerShape::Diamond, 5.0),
            title: LayerStyle::new()
                .with_color(INK)
                .with_text_size(13.0)
                .with_font(FontFace::Bold),
        }
    }

    /// Merge an override record onto this one, layer by layer.
    pub fn merged(&self, over: &ChartStyle) -> ChartStyle {
        ChartStyle {
            frame: self.frame.merged(&over.frame),
            axis: self.axis.merged(&over.axis),
            zone: self.zone.merged(&over.zone),
            reference_line: self.reference_line.merged(&over.reference_line),
            reference_label: self.reference_label.merged(&over.reference_label),
            vertical_line: self.vertical_line.merged(&over.vertical_line),
            series_line: self.series_line.merged(&over.series_line),
            series_points: self.series_points.merged(&over.series_points),
            moving_average: self.moving_average.merged(&over.moving_average),
            cycle_points: self.cycle_points.merged(&over.cycle_points),
            title: self.title.merged(&over.title),
        }
    }

    /// Defaults with `overrides` applied.
    pub fn resolve(overrides: &ChartStyle) -> ChartStyle {
        Self::defaults().merged(overrides)
    }
}

/// Per-layer options for the timeline grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    pub row_label: LayerStyle,
    pub cell: LayerStyle,
    pub cell_text: LayerStyle,
    pub year_axis: LayerStyle,
    pub title: LayerStyle,
}

impl TimelineStyle {
    /// Built-in defaults for timeline grids.
    pub fn defaults() -> Self {
        Self {
            row_label: LayerStyle::new().with_color(INK).with_text_size(10.0),
            cell: LayerStyle::new().with_line_width(0.5),
            cell_text: LayerStyle::new()
                .with_color(INK)
                .with_text_size(9.0)
                .with_font(FontFace::Plain),
            year_axis: LayerStyle::new()
                .with_color(MUTED)
                .with_line_width(1.0)
                .with_text_size(9.0),
            title: LayerStyle::new()
                .with_color(INK)
                .with_text_size(12.0)
                .with_font(FontFace::Bold),
        }
    }

    /// Merge an override record onto this one, layer by layer.
    pub fn merged(&self, over: &TimelineStyle) -> TimelineStyle {
        TimelineStyle {
            row_label: self.row_label.merged(&over.row_label),
            cell: self.cell.merged(&over.cell),
            cell_text: self.cell_text.merged(&over.cell_text),
            year_axis: self.year_axis.merged(&over.year_axis),
            title: self.title.merged(&over.title),
        }
    }

    /// Defaults with `overrides` applied.
    pub fn resolve(overrides: &TimelineStyle) -> TimelineStyle {
        Self::defaults().merged(overrides)
    }
}
