//! Theme-aware colors for the window chrome around the dashboard canvas.
//!
//! The canvas itself uses the engine palette; these colors only style the
//! header and surrounding containers.

use iced::{Color, Theme};
use stocksight_common::Status;

use crate::render::palette::{status_background, status_outline};
use crate::view::canvas::to_iced;

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        self.palette().background.weak.text
    }

    /// Error message color.
    pub fn danger(&self) -> Color {
        self.palette().danger.base.color
    }

    // ========================================================================
    // Status badges
    // ========================================================================

    /// Badge fill for a status; same hues as the timeline cells.
    pub fn status_badge(&self, status: &Status) -> Color {
        to_iced(status_background(status))
    }

    /// Badge border and text for a status.
    pub fn status_text(&self, status: &Status) -> Color {
        to_iced(status_outline(status))
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}
