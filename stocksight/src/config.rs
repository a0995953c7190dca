//! Viewer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stocksight_common::{LoggingConfig, Result, load_config, resolve_config_path};

use crate::render::{ChartStyle, PanelOptions, TimelineStyle};

/// Style overrides, merged onto the built-in defaults at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub metric_chart: ChartStyle,
    pub timeline: TimelineStyle,
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub logging: LoggingConfig,
    pub style: StyleConfig,
    pub layout: PanelOptions,
}

impl ViewerConfig {
    /// Load from an explicit path, or the platform default if it exists.
    ///
    /// Without any file the built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit) {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply a CLI log level override.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.logging.level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, FontFace, LineType};
    use stocksight_common::{LogFormat, parse_config};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ViewerConfig = parse_config("{}").unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(config.layout.show_timeline);
        assert_eq!(config.layout.timeline_rows.len(), 5);
        assert_eq!(config.style, StyleConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let json5 = r##"
        {
            logging: { level: "debug", format: "json" },
            style: {
                metric_chart: {
                    zone: { opacity: 0.3 },
                    moving_average: { color: "#ff0000", line_type: "dashed" },
                },
                timeline: {
                    cell_text: { font: "bold-italic" },
                },
            },
            layout: {
                show_timeline: false,
                x_tick_step: 10,
                timeline_rows: [
                    { label: "Overall", column: "Status", font: "bold" },
                ],
            },
        }
        "##;

        let config: ViewerConfig = parse_config(json5).unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.style.metric_chart.zone.opacity, Some(0.3));
        let average = config.style.metric_chart.moving_average;
        assert_eq!(average.color, Some(Color::from_rgb(1.0, 0.0, 0.0)));
        assert_eq!(average.line_type, Some(LineType::Dashed));
        assert_eq!(
            config.style.timeline.cell_text.font,
            Some(FontFace::BoldItalic)
        );
        assert!(!config.layout.show_timeline);
        assert_eq!(config.layout.x_tick_step, Some(10.0));
        assert_eq!(config.layout.timeline_rows[0].font, Some(FontFace::Bold));
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let json5 = r#"{ style: { metric_chart: { title: { color: "red" } } } }"#;
        let err = parse_config::<ViewerConfig>(json5).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_log_level_override() {
        let config = ViewerConfig::default().with_log_level(Some("trace".to_string()));
        assert_eq!(config.logging.level, "trace");

        let config = ViewerConfig::default().with_log_level(None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = ViewerConfig::load(Some(Path::new("/nonexistent/stocksight.json5"))).unwrap_err();
        assert!(err.is_config());
    }
}
