//! StockSight - status assessment dashboards for monitored population units.
//!
//! The [`render`] module holds the drawing engine, independent of any GUI
//! toolkit. [`view`] binds it to an iced canvas and [`app`] wraps that in a
//! desktop application.

pub mod app;
pub mod args;
pub mod config;
pub mod demo;
pub mod message;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use app::StockSight;
pub use config::{StyleConfig, ViewerConfig};
pub use message::Message;
pub use render::{DrawSurface, PanelComposer, RecordingSurface};
