//! The abstract drawing surface.
//!
//! Renderers decide what to draw and where, in plot coordinates, and issue
//! ordered calls against a [`DrawSurface`]. Rasterization belongs to the
//! implementation (the Iced canvas backend, or [`RecordingSurface`] in tests).
//!
//! [`RecordingSurface`]: super::recording::RecordingSurface

use serde::{Deserialize, Serialize};

use super::style::LayerStyle;

/// A point in plot coordinates (x: year, y: axis value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle from two corners, normalizing their order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// A closed plotting window: `(x_min, x_max)` by `(y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Window {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bottom,
    Left,
}

/// One labelled tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Title placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleLevel {
    /// Above the current panel.
    Panel,
    /// Above the whole page.
    Page,
}

/// Page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

/// Cell range of the page grid occupied by one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRegion {
    pub row: usize,
    pub col: usize,
    pub col_span: usize,
}

impl PanelRegion {
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            col_span: 1,
        }
    }

    pub fn full_row(row: usize, cols: usize) -> Self {
        Self {
            row,
            col: 0,
            col_span: cols.max(1),
        }
    }
}

/// Panel margins in pixels around the plotting window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// Margins for a metric chart (room for axis labels and the title).
    pub const CHART: Margins = Margins {
        top: 28.0,
        right: 16.0,
        bottom: 36.0,
        left: 56.0,
    };

    /// Margins for a timeline grid (wide left margin for row labels).
    pub const TIMELINE: Margins = Margins {
        top: 24.0,
        right: 16.0,
        bottom: 24.0,
        left: 110.0,
    };
}

/// Primitive operations a renderer may issue.
///
/// Calls are ordered: later calls paint over earlier ones. The surface is a
/// single mutable resource; one renderer drives it at a time.
pub trait DrawSurface {
    /// Divide the page into a grid of panel regions.
    fn set_layout(&mut self, layout: GridLayout);

    /// Make `region` the current panel, with the given margins.
    fn begin_panel(&mut self, region: PanelRegion, margins: Margins);

    /// Map the current panel's plotting area to `window`.
    fn set_window(&mut self, window: Window);

    /// Outline the plotting area.
    fn draw_frame(&mut self, style: &LayerStyle);

    /// Draw an axis with ticks and a label.
    fn draw_axis(&mut self, side: Side, ticks: &[Tick], label: &str, style: &LayerStyle);

    /// Draw a connected polyline.
    fn draw_line(&mut self, points: &[Point], style: &LayerStyle);

    /// Draw point markers.
    fn draw_points(&mut self, points: &[Point], style: &LayerStyle);

    /// Fill (and optionally outline) a rectangle.
    fn fill_rect(&mut self, rect: Rect, style: &LayerStyle);

    /// Draw text anchored at a plot coordinate.
    fn draw_text(&mut self, at: Point, text: &str, anchor: TextAnchor, style: &LayerStyle);

    /// Draw a panel or page title.
    fn set_title(&mut self, title: &str, level: TitleLevel, style: &LayerStyle);
}
