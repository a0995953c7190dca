//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Status assessment dashboard viewer.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "stocksight", version, about = "Status assessment dashboards")]
pub struct ViewerArgs {
    /// Dataset file (JSON5) to display.
    pub dataset: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Show a generated demo unit instead of a dataset file.
    #[arg(long)]
    pub demo: bool,

    /// Seed for the demo generator.
    #[arg(long, requires = "demo")]
    pub seed: Option<u64>,

    /// Print the draw sequence as JSON instead of opening a window.
    #[arg(long)]
    pub dump: bool,
}

impl ViewerArgs {
    /// Where the dataset comes from.
    pub fn source(&self) -> Option<DataSource> {
        if self.demo {
            Some(DataSource::Demo { seed: self.seed })
        } else {
            self.dataset.clone().map(DataSource::File)
        }
    }
}

/// Origin of the displayed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Demo { seed: Option<u64> },
}
