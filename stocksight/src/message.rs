//! Messages for the StockSight application.

/// Messages for the StockSight application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Show or hide the timeline row.
    ToggleTimeline,

    /// Reload the dataset file, or generate a new demo unit.
    Reload,

    /// Switch between light and dark window chrome.
    ToggleTheme,
}
