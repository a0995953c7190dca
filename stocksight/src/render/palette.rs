//! Status-to-color mapping.
//!
//! Total over every label: unknown statuses resolve to a fixed neutral gray,
//! so a stray label never stops a chart or grid from drawing.

use stocksight_common::Status;

use super::color::Color;

/// Neutral accent shared by confidence ratings.
const ACCENT: Color = Color::from_rgb(0.3, 0.45, 0.7);
/// Fallback for unrecognised labels.
const DEFAULT_GRAY: Color = Color::from_rgb(0.55, 0.55, 0.55);

/// Color family a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Red,
    Amber,
    Green,
    Accent,
    Neutral,
}

impl StatusTone {
    /// Collapse a status into its tone. Mixed zones take their outer color.
    pub fn of(status: &Status) -> Self {
        match status {
            Status::Red | Status::RedAmber => StatusTone::Red,
            Status::Amber => StatusTone::Amber,
            Status::AmberGreen | Status::Green => StatusTone::Green,
            Status::High | Status::Moderate | Status::Low => StatusTone::Accent,
            Status::Other(_) => StatusTone::Neutral,
        }
    }

    fn base(self) -> Color {
        match self {
            StatusTone::Red => Color::from_rgb(0.8, 0.15, 0.15),
            StatusTone::Amber => Color::from_rgb(0.9, 0.65, 0.1),
            StatusTone::Green => Color::from_rgb(0.15, 0.6, 0.25),
            StatusTone::Accent => ACCENT,
            StatusTone::Neutral => DEFAULT_GRAY,
        }
    }
}

/// Strong color for outlines, markers and foreground use.
pub fn outline_color(label: &str) -> Color {
    status_outline(&Status::parse(label))
}

/// Softer shade for filled areas such as benchmark zones.
pub fn fill_color(label: &str) -> Color {
    status_fill(&Status::parse(label))
}

/// Pale shade for cell and panel backgrounds.
pub fn background_color(label: &str) -> Color {
    status_background(&Status::parse(label))
}

/// [`outline_color`] for an already parsed status.
pub fn status_outline(status: &Status) -> Color {
    StatusTone::of(status).base()
}

/// [`fill_color`] for an already parsed status.
pub fn status_fill(status: &Status) -> Color {
    StatusTone::of(status).base().lighten(0.45)
}

/// [`background_color`] for an already parsed status.
pub fn status_background(status: &Status) -> Color {
    StatusTone::of(status).base().lighten(0.75)
}
