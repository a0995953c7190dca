use thiserror::Error;

/// Common error type for StockSight components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A structural column required by a renderer is absent from its table.
    #[error("Configuration error: table has no '{column}' column")]
    MissingColumn { column: String },
}

impl Error {
    /// Create a missing-column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Whether this error belongs to the configuration class.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::MissingColumn { .. })
    }
}

/// Result type alias using StockSight's Error.
pub type Result<T> = std::result::Result<T, Error>;
