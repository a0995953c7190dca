//! UI tests using iced_test Simulator.
//!
//! These tests check the window chrome around the dashboard canvas without
//! opening a window.

use iced_test::simulator;

use stocksight::message::Message;
use stocksight::view::dashboard::{DashboardState, dashboard_view};
use stocksight_common::{DataQuality, StatusTable, UnitAttributes, UnitDataset, YEAR_COLUMN};

fn dataset() -> UnitDataset {
    let mut attributes = UnitAttributes::new("Chilko River");
    attributes.data_quality = DataQuality::Absolute;

    UnitDataset {
        attributes,
        status: Some(
            StatusTable::new()
                .with_column(YEAR_COLUMN, [2019.0, 2020.0])
                .with_column("Status", ["Amber", "Red"]),
        ),
        ..UnitDataset::default()
    }
}

/// Test that the dashboard renders a placeholder with no dataset.
#[test]
fn test_dashboard_empty() {
    let state = DashboardState::default();
    let mut ui = simulator(dashboard_view(&state));

    assert!(ui.find("No dataset loaded").is_ok());
    assert!(ui.find("StockSight").is_ok());
}

/// Test that the header shows the unit details.
#[test]
fn test_dashboard_header() {
    let mut state = DashboardState::default();
    state.set_dataset(dataset());
    let mut ui = simulator(dashboard_view(&state));

    assert!(ui.find("Chilko River").is_ok());
    assert!(ui.find("Data quality: Absolute").is_ok());
    assert!(ui.find("2020 Red").is_ok());
    assert!(ui.find("0 of 4 charts").is_ok());
}

/// Test clicking the timeline toggle.
#[test]
fn test_timeline_toggle_click() {
    let mut state = DashboardState::default();
    state.set_dataset(dataset());
    let mut ui = simulator(dashboard_view(&state));

    let _ = ui.click("Hide timeline");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::ToggleTimeline)));
}

/// Test the reload button label in demo mode.
#[test]
fn test_demo_regenerate_click() {
    let mut state = DashboardState::default();
    state.is_demo = true;
    state.set_dataset(dataset());
    let mut ui = simulator(dashboard_view(&state));

    let _ = ui.click("Regenerate");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::Reload)));
}

/// Test that composition errors are shown in the header.
#[test]
fn test_error_shown() {
    let mut state = DashboardState::default();
    let mut data = dataset();
    data.status = Some(StatusTable::new().with_column("Status", ["Red"]));
    state.set_dataset(data);

    let mut ui = simulator(dashboard_view(&state));
    assert!(
        ui.find("Error: Configuration error: table has no 'Year' column")
            .is_ok()
    );
}
