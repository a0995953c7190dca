//! StockSight Common Library
//!
//! This crate provides the shared data model and utilities for StockSight dashboards:
//!
//! - [`series`] - Year-indexed time series, benchmark zones, reference lines
//! - [`attributes`] - Per-unit thresholds and configuration (`UnitAttributes`, `UnitDataset`)
//! - [`table`] - Status tables for timeline grids
//! - [`status`] - Status and confidence labels
//! - [`numeric`] - Lenient numeric coercion (`"NA"` and friends become missing)
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod numeric;
pub mod series;
pub mod status;
pub mod table;

// Re-export commonly used types at the crate root
pub use attributes::{DataQuality, UnitAttributes, UnitDataset, UnitSeries};
pub use config::{
    LogFormat, LoggingConfig, default_config_path, load_config, parse_config,
    resolve_config_path,
};
pub use error::{Error, Result};
pub use numeric::{Scalar, parse_numeric};
pub use series::{AxisRange, BenchmarkZones, ReferenceLine, TimeSeries, YearValue};
pub use status::Status;
pub use table::{StatusTable, YEAR_COLUMN};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// # Example
///
/// ```ignore
/// use stocksight_common::{LoggingConfig, LogFormat, init_tracing};
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Json,
/// };
/// init_tracing(&config)?;
/// ```
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
