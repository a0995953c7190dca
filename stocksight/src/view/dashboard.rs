//! Dashboard view: header with unit details and the composed canvas.

use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Geometry, Text};
use iced::widget::{Column, button, column, container, row, rule, text};
use iced::{Alignment, Element, Length, Point, Rectangle, Renderer, Theme};

use stocksight_common::{Status, UnitDataset};

use crate::config::StyleConfig;
use crate::message::Message;
use crate::render::{ChartOutcome, PanelComposer, PanelOptions, PanelReport, RecordingSurface};
use crate::view::canvas::CanvasSurface;
use crate::view::theme::colors;

/// Column holding the overall status in the status table.
const OVERALL_COLUMN: &str = "Status";

/// State behind the dashboard view.
#[derive(Debug)]
pub struct DashboardState {
    /// Unit currently displayed.
    pub dataset: Option<UnitDataset>,
    /// Style overrides.
    pub style: StyleConfig,
    /// Layout options.
    pub options: PanelOptions,
    /// Outcome of the last composition.
    pub report: Option<PanelReport>,
    /// Last error message, if any.
    pub last_error: Option<String>,
    /// Whether the displayed data can be regenerated rather than reloaded.
    pub is_demo: bool,
    cache: Cache,
}

impl DashboardState {
    pub fn new(style: StyleConfig, options: PanelOptions) -> Self {
        Self {
            dataset: None,
            style,
            options,
            report: None,
            last_error: None,
            is_demo: false,
            cache: Cache::new(),
        }
    }

    fn composer<'a>(&self, dataset: &'a UnitDataset) -> PanelComposer<'a> {
        PanelComposer::new(dataset)
            .with_styles(self.style.metric_chart.clone(), self.style.timeline.clone())
            .with_options(self.options.clone())
    }

    /// Replace the displayed unit.
    ///
    /// The dashboard is composed once off-screen so that errors show up in
    /// the header instead of as a blank canvas.
    pub fn set_dataset(&mut self, dataset: UnitDataset) {
        let result = self.composer(&dataset).compose(&mut RecordingSurface::new());
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard composition failed");
                self.report = None;
                self.last_error = Some(e.to_string());
            }
        }
        self.dataset = Some(dataset);
        self.cache.clear();
    }

    /// Record a load failure, keeping whatever was displayed.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    pub fn toggle_timeline(&mut self) {
        self.options.show_timeline = !self.options.show_timeline;
        if let Some(dataset) = self.dataset.take() {
            self.set_dataset(dataset);
        }
    }

    /// Overall status of the most recent year that has one.
    pub fn latest_status(&self) -> Option<(i32, Status)> {
        let table = self.dataset.as_ref()?.status.as_ref()?;
        let years = table.years().ok()?;
        let labels = table.labels(OVERALL_COLUMN)?;

        years
            .into_iter()
            .zip(labels)
            .filter_map(|(year, label)| Some((year?, Status::parse(&label?))))
            .max_by_key(|(year, _)| *year)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(StyleConfig::default(), PanelOptions::default())
    }
}

/// Render the dashboard view.
pub fn dashboard_view(state: &DashboardState) -> Element<'_, Message> {
    let header = render_header(state);

    let body: Element<'_, Message> = match &state.dataset {
        Some(_) => Canvas::new(DashboardCanvas { state })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("No dataset loaded").size(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let content = column![header, rule::horizontal(1), body]
        .spacing(10)
        .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Render the header with unit details and controls.
fn render_header(state: &DashboardState) -> Element<'_, Message> {
    let (name, quality) = match &state.dataset {
        Some(dataset) => (
            dataset.attributes.name.clone(),
            dataset.attributes.data_quality.to_string(),
        ),
        None => ("StockSight".to_string(), "-".to_string()),
    };

    let title = text(name).size(24);
    let quality = text(format!("Data quality: {}", quality))
        .size(14)
        .style(|theme: &Theme| text::Style {
            color: Some(colors(theme).text_muted()),
        });

    let mut header_row = row![title, quality].spacing(20).align_y(Alignment::Center);

    if let Some((year, status)) = state.latest_status() {
        let label = format!("{} {}", year, status);
        let text_status = status.clone();
        let badge = container(text(label).size(13).style(move |theme: &Theme| {
            text::Style {
                color: Some(colors(theme).status_text(&text_status)),
            }
        }))
        .padding([2, 8])
        .style(move |theme: &Theme| {
            let c = colors(theme);
            container::Style {
                background: Some(iced::Background::Color(c.status_badge(&status))),
                border: iced::Border {
                    color: c.status_text(&status),
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        });
        header_row = header_row.push(badge);
    }

    if let Some(report) = &state.report {
        let drawn = report
            .charts
            .iter()
            .filter(|c| **c == ChartOutcome::Rendered)
            .count();
        header_row = header_row.push(
            text(format!("{} of {} charts", drawn, report.charts.len())).size(12),
        );
    }

    let timeline_label = if state.options.show_timeline {
        "Hide timeline"
    } else {
        "Show timeline"
    };
    let timeline_button = button(text(timeline_label).size(14))
        .on_press(Message::ToggleTimeline)
        .style(iced::widget::button::secondary);

    let reload_label = if state.is_demo { "Regenerate" } else { "Reload" };
    let reload_button = button(text(reload_label).size(14))
        .on_press(Message::Reload)
        .style(iced::widget::button::secondary);

    let theme_button = button(text("Theme").size(14))
        .on_press(Message::ToggleTheme)
        .style(iced::widget::button::secondary);

    header_row = header_row
        .push(timeline_button)
        .push(reload_button)
        .push(theme_button);

    let mut header_col = Column::new().push(header_row);

    if let Some(ref error) = state.last_error {
        let error_text = text(format!("Error: {}", error))
            .size(12)
            .style(|theme: &Theme| text::Style {
                color: Some(colors(theme).danger()),
            });
        header_col = header_col.push(error_text);
    }

    header_col.spacing(5).into()
}

/// Canvas program drawing the composed dashboard.
struct DashboardCanvas<'a> {
    state: &'a DashboardState,
}

impl canvas::Program<Message> for DashboardCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.state.cache.draw(renderer, bounds.size(), |frame| {
            let Some(dataset) = &self.state.dataset else {
                return;
            };
            let mut surface = CanvasSurface::new(frame);
            if let Err(e) = self.state.composer(dataset).compose(&mut surface) {
                frame.fill_text(Text {
                    content: e.to_string(),
                    position: Point::new(10.0, 10.0),
                    color: iced::Color::from_rgb(0.8, 0.2, 0.2),
                    size: 14.0.into(),
                    ..Text::default()
                });
            }
        });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocksight_common::{StatusTable, UnitAttributes, YEAR_COLUMN};

    fn dataset() -> UnitDataset {
        UnitDataset {
            attributes: UnitAttributes::new("Upper Creek"),
            status: Some(
                StatusTable::new()
                    .with_column(YEAR_COLUMN, [2001.0, 2003.0, 2002.0])
                    .with_column("Status", ["Red", "NA", "Amber"]),
            ),
            ..UnitDataset::default()
        }
    }

    #[test]
    fn test_latest_status_skips_missing() {
        let mut state = DashboardState::default();
        state.set_dataset(dataset());
        assert_eq!(state.latest_status(), Some((2002, Status::Amber)));
    }

    #[test]
    fn test_set_dataset_reports_errors() {
        let mut state = DashboardState::default();
        let mut data = dataset();
        data.status = Some(StatusTable::new().with_column("Status", ["Red"]));

        state.set_dataset(data);
        assert!(state.report.is_none());
        assert!(state.last_error.as_deref().unwrap().contains("Year"));

        state.toggle_timeline();
        assert!(state.last_error.is_none());
        assert_eq!(state.report.as_ref().unwrap().charts.len(), 4);
    }
}
