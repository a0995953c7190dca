//! Backend-independent rendering engine.
//!
//! Everything here draws through [`surface::DrawSurface`]; the iced canvas
//! and the recording surface are two implementations of it.

pub mod color;
pub mod formatting;
pub mod metric_chart;
pub mod palette;
pub mod panel;
pub mod recording;
pub mod scale;
pub mod style;
pub mod surface;
pub mod timeline;

pub use color::Color;
pub use metric_chart::{ChartLayer, ChartOutcome, LAYER_ORDER, MetricChart};
pub use palette::{background_color, fill_color, outline_color};
pub use panel::{PanelComposer, PanelOptions, PanelReport, TimelineRowConfig};
pub use recording::{DrawCall, RecordingSurface};
pub use style::{ChartStyle, FontFace, LayerStyle, LineType, MarkerShape, TimelineStyle};
pub use surface::DrawSurface;
pub use timeline::{GridOutcome, MetricRow, StatusCell, TimelineGrid};
