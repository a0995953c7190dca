//! StockSight Iced application.

use iced::{Element, Task, Theme};
use stocksight_common::{UnitDataset, load_config};

use crate::args::DataSource;
use crate::config::ViewerConfig;
use crate::demo::DemoGenerator;
use crate::message::Message;
use crate::view::dashboard::{DashboardState, dashboard_view};

/// Window chrome theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTheme {
    #[default]
    Light,
    Dark,
}

impl AppTheme {
    pub fn toggle(self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

/// Load a unit from its source.
pub fn load_dataset(
    source: &DataSource,
    demo: &mut Option<DemoGenerator>,
) -> anyhow::Result<UnitDataset> {
    match source {
        DataSource::File(path) => {
            let dataset: UnitDataset = load_config(path)?;
            tracing::info!(
                path = %path.display(),
                unit = %dataset.attributes.name,
                "Loaded dataset"
            );
            Ok(dataset)
        }
        DataSource::Demo { seed } => {
            let generator = demo.get_or_insert_with(|| match seed {
                Some(seed) => DemoGenerator::seeded(*seed),
                None => DemoGenerator::new(),
            });
            Ok(generator.generate())
        }
    }
}

/// The main StockSight application.
pub struct StockSight {
    /// Dashboard state.
    dashboard: DashboardState,
    /// Where the dataset comes from.
    source: Option<DataSource>,
    /// Demo generator, kept so that regenerating advances its sequence.
    demo: Option<DemoGenerator>,
    /// Current chrome theme.
    theme: AppTheme,
}

impl StockSight {
    /// Boot the application with a resolved configuration and data source.
    pub fn boot(config: ViewerConfig, source: Option<DataSource>) -> (Self, Task<Message>) {
        let mut dashboard = DashboardState::new(config.style, config.layout);
        dashboard.is_demo = matches!(source, Some(DataSource::Demo { .. }));

        let mut app = Self {
            dashboard,
            source,
            demo: None,
            theme: AppTheme::default(),
        };
        app.reload();

        (app, Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        match &self.dashboard.dataset {
            Some(dataset) => format!("StockSight - {}", dataset.attributes.name),
            None => "StockSight".to_string(),
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleTimeline => {
                self.dashboard.toggle_timeline();
            }

            Message::Reload => {
                self.reload();
            }

            Message::ToggleTheme => {
                self.theme = self.theme.toggle();
            }
        }

        Task::none()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        dashboard_view(&self.dashboard)
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        match self.theme {
            AppTheme::Light => Theme::Light,
            AppTheme::Dark => Theme::Dark,
        }
    }

    /// Dashboard state, for inspection.
    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    fn reload(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        match load_dataset(source, &mut self.demo) {
            Ok(dataset) => self.dashboard.set_dataset(dataset),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dataset");
                self.dashboard.set_error(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_boot_without_source() {
        let (app, _) = StockSight::boot(ViewerConfig::default(), None);
        assert!(app.dashboard().dataset.is_none());
        assert_eq!(app.title(), "StockSight");
    }

    #[test]
    fn test_demo_regenerates() {
        let source = Some(DataSource::Demo { seed: Some(3) });
        let (mut app, _) = StockSight::boot(ViewerConfig::default(), source);
        let first = app.dashboard().dataset.clone().unwrap();
        assert!(app.title().starts_with("StockSight - "));

        let _ = app.update(Message::Reload);
        let second = app.dashboard().dataset.clone().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_missing_file_reports_error() {
        let source = Some(DataSource::File(PathBuf::from("/nonexistent/unit.json5")));
        let (app, _) = StockSight::boot(ViewerConfig::default(), source);
        assert!(app.dashboard().dataset.is_none());
        assert!(app.dashboard().last_error.is_some());
    }

    #[test]
    fn test_theme_toggle() {
        let (mut app, _) = StockSight::boot(ViewerConfig::default(), None);
        assert_eq!(app.theme(), Theme::Light);
        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_timeline() {
        let source = Some(DataSource::Demo { seed: Some(1) });
        let (mut app, _) = StockSight::boot(ViewerConfig::default(), source);
        assert!(app.dashboard().report.as_ref().unwrap().timeline.is_some());

        let _ = app.update(Message::ToggleTimeline);
        assert!(app.dashboard().report.as_ref().unwrap().timeline.is_none());
    }
}
