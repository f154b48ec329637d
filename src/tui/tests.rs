// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent};

use super::{demo_chart, flatten_entries, App, PanelDisplay, NARROW_TERMINAL_COLS};
use crate::model::{Chart, Entry, ExplanationResult, Layer};
use crate::panel::{FetchOutcome, PanelConfig, PanelSurface};

fn two_layer_chart() -> Chart {
    Chart::new(
        "Test Chart",
        vec![
            Layer::new("Top", vec![Entry::new("one"), Entry::new("two")]),
            Layer::new("Bottom", vec![Entry::new("three")]),
        ],
    )
}

fn test_app(width: u16) -> App {
    let config = PanelConfig::new("Test Chart")
        .with_server_url("http://backend.test")
        .with_narrow_breakpoint(NARROW_TERMINAL_COLS);
    let mut app = App::new(two_layer_chart(), config);
    app.set_viewport_width(width);
    app
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

#[test]
fn demo_chart_is_layered_and_nonempty() {
    let chart = demo_chart();
    assert!(chart.layers().len() >= 3);
    assert!(!chart.is_empty());
    // Depth ordering: the surface comes first.
    assert_eq!(chart.layers()[0].name(), "The Surface");
}

#[test]
fn flatten_walks_layers_in_order() {
    let rows = flatten_entries(&two_layer_chart());
    assert_eq!(rows, vec![(0, 0), (0, 1), (1, 0)]);
}

#[test]
fn cursor_movement_saturates_at_both_ends() {
    let mut app = test_app(200);
    assert_eq!(app.cursor, 0);
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.cursor, 0);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.cursor, 2);

    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.cursor, 1);
}

#[test]
fn enter_selects_the_entry_under_the_cursor() {
    let mut app = test_app(200);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    let request = app.take_fetch_request().expect("pending fetch");
    assert_eq!(request.entry_text, "two");
    assert_eq!(request.chart_name, "Test Chart");
    assert!(!request.force_refresh);
    assert_eq!(app.controller.surface().title.as_deref(), Some("two"));
    assert_eq!(app.controller.surface().display, PanelDisplay::Loading);
}

#[test]
fn refresh_key_forces_a_refetch_of_the_displayed_entry() {
    let mut app = test_app(200);
    app.handle_key(key(KeyCode::Enter));
    let first = app.take_fetch_request().expect("initial fetch");

    app.apply_fetch_outcome(FetchOutcome {
        request_id: first.request_id,
        entry_text: first.entry_text.clone(),
        force_refresh: false,
        result: Ok(ExplanationResult::new("<p>x</p>", None)),
    });

    app.handle_key(key(KeyCode::Char('r')));
    let refresh = app.take_fetch_request().expect("forced fetch");
    assert!(refresh.force_refresh);
    assert_eq!(refresh.entry_text, "one");
}

#[test]
fn refresh_key_does_nothing_before_any_selection() {
    let mut app = test_app(200);
    app.handle_key(key(KeyCode::Char('r')));
    assert!(app.take_fetch_request().is_none());
}

#[test]
fn narrow_terminal_opens_the_panel_on_select_and_esc_closes_it() {
    let mut app = test_app(80);
    assert!(app.is_narrow());

    app.handle_key(key(KeyCode::Enter));
    assert!(app.controller.surface().open);

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.controller.surface().open);
}

#[test]
fn wide_terminal_never_toggles_the_open_state() {
    let mut app = test_app(200);
    assert!(!app.is_narrow());
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.controller.surface().open);
}

#[test]
fn quit_key_stops_the_loop() {
    let mut app = test_app(200);
    assert!(!app.should_quit);
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn tui_panel_surface_tracks_the_controller_display() {
    let mut surface = super::TuiPanel::new();
    assert_eq!(surface.display, PanelDisplay::Idle);

    surface.set_title("The Bloop");
    surface.show_loading();
    assert_eq!(surface.display, PanelDisplay::Loading);

    surface.show_error("boom");
    assert_eq!(surface.display, PanelDisplay::Error("boom".to_owned()));
    assert_eq!(surface.viewport_width(), 0);
}

#[test]
fn empty_chart_tolerates_navigation_and_selection() {
    let config = PanelConfig::new("Empty");
    let mut app = App::new(Chart::new("Empty", Vec::new()), config);
    app.set_viewport_width(200);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert!(app.take_fetch_request().is_none());
}
