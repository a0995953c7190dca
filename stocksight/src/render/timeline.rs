//! Timeline grid: one row per tracked metric, one column per year.

use stocksight_common::{AxisRange, Result, Status, StatusTable};
use tracing::debug;

use super::palette::{status_background, status_outline};
use super::scale::{YEAR_GRANULARITY, labelled_ticks, nice_step, pretty_range};
use super::style::{FontFace, LayerStyle, TimelineStyle};
use super::surface::{DrawSurface, Point, Rect, Side, TextAnchor, TitleLevel, Window};

/// Gap between neighbouring cells, in grid units.
const CELL_GAP: f64 = 0.06;

/// One row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Label drawn left of the row.
    pub label: String,
    /// Status column read from the table.
    pub data_col: String,
    /// Font for the cell codes; falls back to the style default.
    pub font: Option<FontFace>,
}

impl MetricRow {
    pub fn new(label: impl Into<String>, data_col: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data_col: data_col.into(),
            font: None,
        }
    }

    pub fn with_font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }
}

/// The atomic unit drawn by the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCell {
    pub row_label: String,
    pub year: i32,
    pub status: Status,
    pub font: FontFace,
}

/// Summary of a grid render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOutcome {
    pub rows: usize,
    pub cells: usize,
}

/// Timeline grid renderer.
#[derive(Debug, Clone)]
pub struct TimelineGrid<'a> {
    table: &'a StatusTable,
    rows: &'a [MetricRow],
    title: String,
    start_year: Option<i32>,
    end_year: Option<i32>,
}

impl<'a> TimelineGrid<'a> {
    /// Create a grid. Rows are drawn top to bottom in `rows` order.
    pub fn new(table: &'a StatusTable, rows: &'a [MetricRow], title: impl Into<String>) -> Self {
        Self {
            table,
            rows,
            title: title.into(),
            start_year: None,
            end_year: None,
        }
    }

    pub fn with_start_year(mut self, year: Option<i32>) -> Self {
        self.start_year = year;
        self
    }

    pub fn with_end_year(mut self, year: Option<i32>) -> Self {
        self.end_year = year;
        self
    }

    /// Resolve the year span: start defaults to the first year present, end
    /// to the last year rounded up to a multiple of five.
    fn year_span(&self, years: &[Option<i32>]) -> (i32, i32) {
        let present: Vec<f64> = years.iter().flatten().map(|y| *y as f64).collect();
        let (pretty_lo, pretty_hi) =
            pretty_range(AxisRange::default(), &present, YEAR_GRANULARITY);

        let start = self
            .start_year
            .or_else(|| years.iter().flatten().min().copied())
            .unwrap_or(pretty_lo as i32);
        let end = self.end_year.unwrap_or(pretty_hi as i32);

        (start, end.max(start))
    }

    /// Resolve the cells of every row, without drawing.
    ///
    /// Fails if the table has no year column. Rows whose column is absent
    /// yield no cells.
    pub fn cells(&self, cell_font: FontFace) -> Result<Vec<Vec<StatusCell>>> {
        let years = self.table.years()?;
        let (start, end) = self.year_span(&years);
        Ok(self.collect_cells(&years, start, end, cell_font))
    }

    fn collect_cells(
        &self,
        years: &[Option<i32>],
        start: i32,
        end: i32,
        default_font: FontFace,
    ) -> Vec<Vec<StatusCell>> {
        self.rows
            .iter()
            .map(|row| {
                let Some(labels) = self.table.labels(&row.data_col) else {
                    debug!(column = %row.data_col, "Status column absent, row left empty");
                    return Vec::new();
                };
                let font = row.font.unwrap_or(default_font);
                years
                    .iter()
                    .zip(labels)
                    .filter_map(|(year, label)| Some(((*year)?, label?)))
                    .filter(|(year, _)| (start..=end).contains(year))
                    .map(|(year, label)| StatusCell {
                        row_label: row.label.clone(),
                        year,
                        status: Status::parse(&label),
                        font,
                    })
                    .collect()
            })
            .collect()
    }

    /// Draw the grid onto the surface's current panel.
    ///
    /// A missing year column is reported before anything is drawn.
    pub fn render(
        &self,
        surface: &mut dyn DrawSurface,
        overrides: &TimelineStyle,
    ) -> Result<GridOutcome> {
        let style = TimelineStyle::resolve(overrides);
        let years = self.table.years()?;
        let (start, end) = self.year_span(&years);
        let default_font = style.cell_text.font.unwrap_or_default();
        let rows = self.collect_cells(&years, start, end, default_font);

        debug!(
            title = %self.title,
            rows = rows.len(),
            start,
            end,
            "Rendering timeline grid"
        );

        let n_rows = self.rows.len().max(1) as f64;
        let window = Window::new((start as f64 - 0.5, end as f64 + 0.5), (0.0, n_rows));
        surface.set_window(window);

        let step = nice_step(f64::from(end) - f64::from(start), 8).max(1.0);
        let ticks = labelled_ticks(start as f64, end as f64, step);
        surface.draw_axis(Side::Bottom, &ticks, "", &style.year_axis);

        let mut outcome = GridOutcome {
            rows: self.rows.len(),
            cells: 0,
        };

        for (index, (row, cells)) in self.rows.iter().zip(&rows).enumerate() {
            let top = n_rows - index as f64;
            let bottom = top - 1.0;
            let middle = (top + bottom) / 2.0;

            surface.draw_text(
                Point::new(window.x.0, middle),
                &row.label,
                TextAnchor::End,
                &style.row_label,
            );

            for cell in cells {
                let x = cell.year as f64;
                let cell_style = LayerStyle {
                    fill: Some(status_background(&cell.status)),
                    color: Some(status_outline(&cell.status)),
                    ..style.cell
                };
                surface.fill_rect(
                    Rect::from_corners(
                        Point::new(x - 0.5 + CELL_GAP, bottom + CELL_GAP),
                        Point::new(x + 0.5 - CELL_GAP, top - CELL_GAP),
                    ),
                    &cell_style,
                );

                let text_style = LayerStyle {
                    font: Some(cell.font),
                    ..style.cell_text
                };
                surface.draw_text(
                    Point::new(x, middle),
                    &cell.status.code(),
                    TextAnchor::Middle,
                    &text_style,
                );
                outcome.cells += 1;
            }
        }

        surface.set_title(&self.title, TitleLevel::Panel, &style.title);
        Ok(outcome)
    }
}
