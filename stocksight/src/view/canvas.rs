//! [`DrawSurface`] on an iced canvas frame.

use iced::font::{Style as FontStyle, Weight};
use iced::widget::canvas::{Frame, LineDash, Path, Stroke, Text};
use iced::{Font, Point, Rectangle, Size};

use crate::render::Color;
use crate::render::style::{FontFace, LayerStyle, LineType, MarkerShape};
use crate::render::surface::{
    self, DrawSurface, GridLayout, Margins, PanelRegion, Side, TextAnchor, Tick, TitleLevel,
    Window,
};

/// Height reserved above the grid for the page title.
const PAGE_TITLE_HEIGHT: f32 = 34.0;
/// Length of axis tick marks.
const TICK_LENGTH: f32 = 4.0;
/// Approximate glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.55;

const DASHED: [f32; 2] = [6.0, 4.0];
const DOTTED: [f32; 2] = [1.5, 3.0];

/// Convert an engine color to an iced color.
pub fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgba(color.r, color.g, color.b, color.a)
}

/// Pixel rectangle of a grid region inside a page of `size`.
pub fn region_bounds(size: Size, layout: GridLayout, region: PanelRegion) -> Rectangle {
    let rows = layout.rows.max(1) as f32;
    let cols = layout.cols.max(1) as f32;
    let cell_width = size.width / cols;
    let cell_height = (size.height - PAGE_TITLE_HEIGHT).max(0.0) / rows;

    Rectangle {
        x: region.col as f32 * cell_width,
        y: PAGE_TITLE_HEIGHT + region.row as f32 * cell_height,
        width: cell_width * region.col_span.max(1) as f32,
        height: cell_height,
    }
}

/// Shrink a rectangle by margins, never below zero size.
pub fn inset(bounds: Rectangle, margins: Margins) -> Rectangle {
    Rectangle {
        x: bounds.x + margins.left,
        y: bounds.y + margins.top,
        width: (bounds.width - margins.left - margins.right).max(0.0),
        height: (bounds.height - margins.top - margins.bottom).max(0.0),
    }
}

/// Map a data point to pixels; y grows upward in data space.
pub fn project(plot: Rectangle, window: Window, at: surface::Point) -> Point {
    let span_x = window.x.1 - window.x.0;
    let span_y = window.y.1 - window.y.0;
    let fx = if span_x == 0.0 {
        0.5
    } else {
        (at.x - window.x.0) / span_x
    };
    let fy = if span_y == 0.0 {
        0.5
    } else {
        (at.y - window.y.0) / span_y
    };

    Point::new(
        plot.x + fx as f32 * plot.width,
        plot.y + plot.height - fy as f32 * plot.height,
    )
}

fn font_for(face: Option<FontFace>) -> Font {
    let (weight, style) = match face.unwrap_or_default() {
        FontFace::Plain => (Weight::Normal, FontStyle::Normal),
        FontFace::Bold => (Weight::Bold, FontStyle::Normal),
        FontFace::Italic => (Weight::Normal, FontStyle::Italic),
        FontFace::BoldItalic => (Weight::Bold, FontStyle::Italic),
    };
    Font {
        weight,
        style,
        ..Font::DEFAULT
    }
}

fn stroke_color(style: &LayerStyle) -> iced::Color {
    let color = style.color.unwrap_or(Color::BLACK);
    to_iced(color.with_alpha(color.a * style.opacity.unwrap_or(1.0)))
}

fn fill_of(style: &LayerStyle) -> iced::Color {
    let color = style.fill.or(style.color).unwrap_or(Color::BLACK);
    to_iced(color.with_alpha(color.a * style.opacity.unwrap_or(1.0)))
}

fn stroke_for(style: &LayerStyle) -> Stroke<'static> {
    let segments: &'static [f32] = match style.line_type.unwrap_or_default() {
        LineType::Solid => &[],
        LineType::Dashed => &DASHED,
        LineType::Dotted => &DOTTED,
    };
    Stroke {
        line_dash: LineDash {
            segments,
            offset: 0,
        },
        ..Stroke::default()
            .with_color(stroke_color(style))
            .with_width(style.line_width.unwrap_or(1.0))
    }
}

fn marker_path(center: Point, shape: MarkerShape, size: f32) -> Path {
    let half = size.max(1.0);
    match shape {
        MarkerShape::Circle => Path::circle(center, half),
        MarkerShape::Square => Path::rectangle(
            Point::new(center.x - half, center.y - half),
            Size::new(half * 2.0, half * 2.0),
        ),
        MarkerShape::Triangle => Path::new(|b| {
            b.move_to(Point::new(center.x, center.y - half));
            b.line_to(Point::new(center.x + half, center.y + half));
            b.line_to(Point::new(center.x - half, center.y + half));
            b.close();
        }),
        MarkerShape::Diamond => Path::new(|b| {
            b.move_to(Point::new(center.x, center.y - half));
            b.line_to(Point::new(center.x + half, center.y));
            b.line_to(Point::new(center.x, center.y + half));
            b.line_to(Point::new(center.x - half, center.y));
            b.close();
        }),
    }
}

/// Draws engine primitives onto one canvas frame.
pub struct CanvasSurface<'f> {
    frame: &'f mut Frame,
    layout: GridLayout,
    panel: Rectangle,
    plot: Rectangle,
    window: Window,
}

impl<'f> CanvasSurface<'f> {
    pub fn new(frame: &'f mut Frame) -> Self {
        let size = frame.size();
        let whole = Rectangle::new(Point::ORIGIN, size);
        Self {
            frame,
            layout: GridLayout { rows: 1, cols: 1 },
            panel: whole,
            plot: whole,
            window: Window::new((0.0, 1.0), (0.0, 1.0)),
        }
    }

    fn project(&self, at: surface::Point) -> Point {
        project(self.plot, self.window, at)
    }

    fn text(&mut self, content: &str, at: Point, anchor: TextAnchor, style: &LayerStyle) {
        let size = style.text_size.unwrap_or(10.0);
        let width = content.chars().count() as f32 * size * GLYPH_WIDTH;
        let x = match anchor {
            TextAnchor::Start => at.x,
            TextAnchor::Middle => at.x - width / 2.0,
            TextAnchor::End => at.x - width,
        };
        self.frame.fill_text(Text {
            content: content.to_string(),
            position: Point::new(x, at.y - size / 2.0),
            color: stroke_color(style),
            size: size.into(),
            font: font_for(style.font),
            ..Text::default()
        });
    }
}

impl DrawSurface for CanvasSurface<'_> {
    fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
        let background = Path::rectangle(Point::ORIGIN, self.frame.size());
        self.frame.fill(&background, iced::Color::WHITE);
    }

    fn begin_panel(&mut self, region: PanelRegion, margins: Margins) {
        self.panel = region_bounds(self.frame.size(), self.layout, region);
        self.plot = inset(self.panel, margins);
    }

    fn set_window(&mut self, window: Window) {
        self.window = window;
    }

    fn draw_frame(&mut self, style: &LayerStyle) {
        let path = Path::rectangle(self.plot.position(), self.plot.size());
        self.frame.stroke(&path, stroke_for(style));
    }

    fn draw_axis(&mut self, side: Side, ticks: &[Tick], label: &str, style: &LayerStyle) {
        let stroke = stroke_for(&LayerStyle {
            line_type: Some(LineType::Solid),
            ..*style
        });
        let size = style.text_size.unwrap_or(10.0);

        match side {
            Side::Bottom => {
                let y = self.plot.y + self.plot.height;
                for tick in ticks {
                    let x = self
                        .project(surface::Point::new(tick.position, self.window.y.0))
                        .x;
                    let mark = Path::line(Point::new(x, y), Point::new(x, y + TICK_LENGTH));
                    self.frame.stroke(&mark, stroke);
                    let at = Point::new(x, y + TICK_LENGTH + size);
                    self.text(&tick.label, at, TextAnchor::Middle, style);
                }
                if !label.is_empty() {
                    let at = Point::new(self.plot.center_x(), y + TICK_LENGTH + size * 2.4);
                    self.text(label, at, TextAnchor::Middle, style);
                }
            }
            Side::Left => {
                let x = self.plot.x;
                for tick in ticks {
                    let y = self
                        .project(surface::Point::new(self.window.x.0, tick.position))
                        .y;
                    let mark = Path::line(Point::new(x - TICK_LENGTH, y), Point::new(x, y));
                    self.frame.stroke(&mark, stroke);
                    let at = Point::new(x - TICK_LENGTH - 2.0, y);
                    self.text(&tick.label, at, TextAnchor::End, style);
                }
                if !label.is_empty() {
                    let at = Point::new(self.panel.x + 4.0, self.plot.y - size);
                    self.text(label, at, TextAnchor::Start, style);
                }
            }
        }
    }

    fn draw_line(&mut self, points: &[surface::Point], style: &LayerStyle) {
        if points.len() < 2 {
            return;
        }
        let projected: Vec<Point> = points.iter().map(|p| self.project(*p)).collect();
        let path = Path::new(|b| {
            b.move_to(projected[0]);
            for p in &projected[1..] {
                b.line_to(*p);
            }
        });
        self.frame.stroke(&path, stroke_for(style));
    }

    fn draw_points(&mut self, points: &[surface::Point], style: &LayerStyle) {
        let shape = style.marker.unwrap_or_default();
        let size = style.marker_size.unwrap_or(3.0);
        for point in points {
            let path = marker_path(self.project(*point), shape, size);
            self.frame.fill(&path, fill_of(style));
            if style.color.is_some() {
                self.frame.stroke(
                    &path,
                    Stroke::default()
                        .with_color(stroke_color(style))
                        .with_width(1.0),
                );
            }
        }
    }

    fn fill_rect(&mut self, rect: surface::Rect, style: &LayerStyle) {
        let a = self.project(surface::Point::new(rect.x0, rect.y0));
        let b = self.project(surface::Point::new(rect.x1, rect.y1));
        let top_left = Point::new(a.x.min(b.x), a.y.min(b.y));
        let size = Size::new((a.x - b.x).abs(), (a.y - b.y).abs());
        let path = Path::rectangle(top_left, size);

        self.frame.fill(&path, fill_of(style));
        if style.color.is_some() && style.line_width.is_some_and(|w| w > 0.0) {
            self.frame.stroke(&path, stroke_for(style));
        }
    }

    fn draw_text(
        &mut self,
        at: surface::Point,
        text: &str,
        anchor: TextAnchor,
        style: &LayerStyle,
    ) {
        let mut position = self.project(at);
        if anchor == TextAnchor::End {
            position.x -= 4.0;
        }
        self.text(text, position, anchor, style);
    }

    fn set_title(&mut self, title: &str, level: TitleLevel, style: &LayerStyle) {
        let size = style.text_size.unwrap_or(12.0);
        let at = match level {
            TitleLevel::Panel => Point::new(self.panel.center_x(), self.panel.y + size),
            TitleLevel::Page => Point::new(self.frame.width() / 2.0, PAGE_TITLE_HEIGHT / 2.0),
        };
        self.text(title, at, TextAnchor::Middle, style);
    }
}
