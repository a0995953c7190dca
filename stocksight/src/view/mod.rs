//! View components for the StockSight application.

pub mod canvas;
pub mod dashboard;
pub mod theme;
