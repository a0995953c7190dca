//! In-memory surface that records every primitive.
//!
//! Used to assert draw sequences in tests and by the headless `--dump` mode.

use serde::Serialize;

use super::style::LayerStyle;
use super::surface::{
    DrawSurface, GridLayout, Margins, PanelRegion, Point, Rect, Side, TextAnchor, Tick,
    TitleLevel, Window,
};

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DrawCall {
    SetLayout {
        layout: GridLayout,
    },
    BeginPanel {
        region: PanelRegion,
        margins: Margins,
    },
    SetWindow {
        window: Window,
    },
    DrawFrame {
        style: LayerStyle,
    },
    DrawAxis {
        side: Side,
        ticks: Vec<Tick>,
        label: String,
        style: LayerStyle,
    },
    DrawLine {
        points: Vec<Point>,
        style: LayerStyle,
    },
    DrawPoints {
        points: Vec<Point>,
        style: LayerStyle,
    },
    FillRect {
        rect: Rect,
        style: LayerStyle,
    },
    DrawText {
        at: Point,
        text: String,
        anchor: TextAnchor,
        style: LayerStyle,
    },
    SetTitle {
        title: String,
        level: TitleLevel,
        style: LayerStyle,
    },
}

impl DrawCall {
    /// Short name of the primitive.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCall::SetLayout { .. } => "set_layout",
            DrawCall::BeginPanel { .. } => "begin_panel",
            DrawCall::SetWindow { .. } => "set_window",
            DrawCall::DrawFrame { .. } => "draw_frame",
            DrawCall::DrawAxis { .. } => "draw_axis",
            DrawCall::DrawLine { .. } => "draw_line",
            DrawCall::DrawPoints { .. } => "draw_points",
            DrawCall::FillRect { .. } => "fill_rect",
            DrawCall::DrawText { .. } => "draw_text",
            DrawCall::SetTitle { .. } => "set_title",
        }
    }
}

/// A [`DrawSurface`] that only records.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in issue order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Primitive names in issue order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.calls.iter().map(DrawCall::kind).collect()
    }

    /// Number of calls of one kind.
    pub fn count(&self, kind: &str) -> usize {
        self.calls.iter().filter(|c| c.kind() == kind).count()
    }

    /// All text drawn with `draw_text`.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recent plotting window.
    pub fn last_window(&self) -> Option<Window> {
        self.calls.iter().rev().find_map(|c| match c {
            DrawCall::SetWindow { window } => Some(*window),
            _ => None,
        })
    }

    /// Serialize the recorded sequence as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.calls)
    }
}

impl DrawSurface for RecordingSurface {
    fn set_layout(&mut self, layout: GridLayout) {
        self.calls.push(DrawCall::SetLayout { layout });
    }

    fn begin_panel(&mut self, region: PanelRegion, margins: Margins) {
        self.calls.push(DrawCall::BeginPanel { region, margins });
    }

    fn set_window(&mut self, window: Window) {
        self.calls.push(DrawCall::SetWindow { window });
    }

    fn draw_frame(&mut self, style: &LayerStyle) {
        self.calls.push(DrawCall::DrawFrame { style: *style });
    }

    fn draw_axis(&mut self, side: Side, ticks: &[Tick], label: &str, style: &LayerStyle) {
        self.calls.push(DrawCall::DrawAxis {
            side,
            ticks: ticks.to_vec(),
            label: label.to_string(),
            style: *style,
        });
    }

    fn draw_line(&mut self, points: &[Point], style: &LayerStyle) {
        self.calls.push(DrawCall::DrawLine {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn draw_points(&mut self, points: &[Point], style: &LayerStyle) {
        self.calls.push(DrawCall::DrawPoints {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn fill_rect(&mut self, rect: Rect, style: &LayerStyle) {
        self.calls.push(DrawCall::FillRect {
            rect,
            style: *style,
        });
    }

    fn draw_text(&mut self, at: Point, text: &str, anchor: TextAnchor, style: &LayerStyle) {
        self.calls.push(DrawCall::DrawText {
            at,
            text: text.to_string(),
            anchor,
            style: *style,
        });
    }

    fn set_title(&mut self, title: &str, level: TitleLevel, style: &LayerStyle) {
        self.calls.push(DrawCall::SetTitle {
            title: title.to_string(),
            level,
            style: *style,
        });
    }
}
