// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{
    ExplanationView, FetchOutcome, FetchRequest, ImageSource, PanelConfig, PanelController,
    PanelSurface,
};
use crate::cache::cache_key;
use crate::client::ApiError;
use crate::model::ExplanationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SurfaceCall {
    PanelOpen(bool),
    Title(String),
    Loading,
    Loaded(ExplanationView),
    Error(String),
}

#[derive(Debug, Default)]
struct RecordingSurface {
    width: u16,
    open: bool,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    fn with_width(width: u16) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    fn wide() -> Self {
        Self::with_width(1280)
    }

    fn narrow() -> Self {
        Self::with_width(640)
    }

    fn last_display(&self) -> Option<&SurfaceCall> {
        self.calls.iter().rev().find(|call| {
            matches!(
                call,
                SurfaceCall::Loading | SurfaceCall::Loaded(_) | SurfaceCall::Error(_)
            )
        })
    }

    fn last_loaded(&self) -> Option<&ExplanationView> {
        match self.last_display() {
            Some(SurfaceCall::Loaded(view)) => Some(view),
            _ => None,
        }
    }

    fn last_error(&self) -> Option<&str> {
        match self.last_display() {
            Some(SurfaceCall::Error(message)) => Some(message),
            _ => None,
        }
    }

    fn last_title(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Title(title) => Some(title.as_str()),
            _ => None,
        })
    }

    fn opened(&self) -> bool {
        self.calls.contains(&SurfaceCall::PanelOpen(true))
    }
}

impl PanelSurface for RecordingSurface {
    fn viewport_width(&self) -> u16 {
        self.width
    }

    fn set_panel_open(&mut self, open: bool) {
        self.open = open;
        self.calls.push(SurfaceCall::PanelOpen(open));
    }

    fn set_title(&mut self, title: &str) {
        self.calls.push(SurfaceCall::Title(title.to_owned()));
    }

    fn show_loading(&mut self) {
        self.calls.push(SurfaceCall::Loading);
    }

    fn show_loaded(&mut self, view: &ExplanationView) {
        self.calls.push(SurfaceCall::Loaded(view.clone()));
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(SurfaceCall::Error(message.to_owned()));
    }
}

const CHART: &str = "Deep Lore";
const SERVER: &str = "http://backend.test";

fn controller(surface: RecordingSurface) -> PanelController<RecordingSurface> {
    PanelController::new(
        PanelConfig::new(CHART).with_server_url(SERVER),
        surface,
    )
}

fn ok_outcome(request: &FetchRequest, result: ExplanationResult) -> FetchOutcome {
    FetchOutcome {
        request_id: request.request_id,
        entry_text: request.entry_text.clone(),
        force_refresh: request.force_refresh,
        result: Ok(result),
    }
}

fn err_outcome(request: &FetchRequest, status: u16, message: &str) -> FetchOutcome {
    FetchOutcome {
        request_id: request.request_id,
        entry_text: request.entry_text.clone(),
        force_refresh: request.force_refresh,
        result: Err(ApiError::Http {
            status,
            message: message.to_owned(),
        }),
    }
}

#[test]
fn fresh_selection_fetches_and_renders_verbatim_with_proxied_image() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("The Bloop").expect("fetch request");
    assert_eq!(request.chart_name, CHART);
    assert_eq!(request.entry_text, "The Bloop");
    assert!(!request.force_refresh);
    assert_eq!(panel.surface().last_title(), Some("The Bloop"));
    assert_eq!(panel.surface().last_display(), Some(&SurfaceCall::Loading));

    let body = "<p>A very <b>loud</b> sound.</p>";
    panel.apply_outcome(ok_outcome(
        &request,
        ExplanationResult::new(body, Some("https://img.example/bloop.png".into())),
    ));

    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(view.body_html(), body);
    assert_eq!(
        view.image(),
        &ImageSource::Proxied {
            url: "http://backend.test/api/image-proxy?url=https%3A%2F%2Fimg.example%2Fbloop.png"
                .to_owned()
        }
    );
    assert!(panel.cache().contains(&cache_key(CHART, "The Bloop")));
}

#[test]
fn missing_image_url_falls_back_to_placeholder() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("A858").expect("fetch request");
    panel.apply_outcome(ok_outcome(&request, ExplanationResult::new("<p>x</p>", None)));

    let view = panel.surface().last_loaded().expect("loaded view");
    assert!(view.image().is_placeholder());
    assert_eq!(view.image().url(), "https://placehold.co/480x360?text=A858");
}

#[test]
fn cached_selection_short_circuits_without_a_fetch() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("Julia").expect("fetch request");
    let result = ExplanationResult::new("<p>cached body</p>", None);
    panel.apply_outcome(ok_outcome(&request, result.clone()));

    assert_eq!(panel.select_entry("Julia"), None);
    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(view.body_html(), result.explanation());
}

#[test]
fn forced_refresh_fetches_despite_cache_and_leaves_it_untouched() {
    let mut panel = controller(RecordingSurface::wide());
    let key = cache_key(CHART, "Julia");

    let request = panel.select_entry("Julia").expect("fetch request");
    panel.apply_outcome(ok_outcome(&request, ExplanationResult::new("<p>old</p>", None)));
    let cached_before = panel.cache().raw(&key).expect("cached slot").to_owned();

    let refresh = panel.refresh_current().expect("forced fetch");
    assert!(refresh.force_refresh);
    assert_eq!(refresh.entry_text, "Julia");

    panel.apply_outcome(ok_outcome(&refresh, ExplanationResult::new("<p>new</p>", None)));

    // The display updates while the cached slot stays byte-identical, so a
    // later plain selection will serve the stale value again.
    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(view.body_html(), "<p>new</p>");
    assert_eq!(panel.cache().raw(&key), Some(cached_before.as_str()));

    assert_eq!(panel.select_entry("Julia"), None);
    let stale = panel.surface().last_loaded().expect("stale view");
    assert_eq!(stale.body_html(), "<p>old</p>");
}

#[test]
fn refresh_with_nothing_displayed_is_a_noop() {
    let mut panel = controller(RecordingSurface::wide());
    assert_eq!(panel.refresh_current(), None);
    assert!(panel.surface().calls.is_empty());
}

#[test]
fn empty_entry_label_is_rejected_without_side_effects() {
    let mut panel = controller(RecordingSurface::narrow());
    assert_eq!(panel.select_entry(""), None);
    assert!(panel.surface().calls.is_empty());
}

#[test]
fn http_error_shows_the_server_message() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("Upsweep").expect("fetch request");
    panel.apply_outcome(err_outcome(&request, 500, "boom"));

    assert_eq!(panel.surface().last_error(), Some("boom"));
    assert_eq!(panel.current_view(), None);
    // The title survives, so the user can retry with a forced refresh.
    assert_eq!(panel.current_entry(), Some("Upsweep"));
}

#[test]
fn failed_fetch_is_not_cached_and_reselecting_retries() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("Upsweep").expect("fetch request");
    panel.apply_outcome(err_outcome(&request, 500, "boom"));
    assert!(panel.cache().is_empty());

    let retry = panel.select_entry("Upsweep").expect("retry fetch");
    assert!(retry.request_id > request.request_id);
}

#[rstest]
#[case(1024, false)]
#[case(1920, false)]
#[case(1023, true)]
#[case(640, true)]
fn panel_opens_only_below_the_breakpoint(#[case] width: u16, #[case] expect_open: bool) {
    let mut panel = controller(RecordingSurface::with_width(width));
    let _ = panel.select_entry("The Bloop");
    assert_eq!(panel.surface().opened(), expect_open);
}

#[test]
fn cached_render_still_opens_the_panel_on_narrow_viewports() {
    let mut panel = controller(RecordingSurface::narrow());

    let request = panel.select_entry("Julia").expect("fetch request");
    panel.apply_outcome(ok_outcome(&request, ExplanationResult::new("x", None)));
    panel.close_panel();
    assert!(!panel.surface().open);

    assert_eq!(panel.select_entry("Julia"), None);
    assert!(panel.surface().open);
}

#[test]
fn close_panel_clears_the_open_state() {
    let mut panel = controller(RecordingSurface::narrow());
    panel.open_panel();
    assert!(panel.surface().open);
    panel.close_panel();
    assert!(!panel.surface().open);
}

#[test]
fn open_panel_is_a_noop_on_wide_viewports() {
    let mut panel = controller(RecordingSurface::wide());
    panel.open_panel();
    assert!(!panel.surface().open);
    assert!(panel.surface().calls.is_empty());
}

#[test]
fn stale_response_for_a_previous_selection_is_dropped() {
    let mut panel = controller(RecordingSurface::wide());

    let first = panel.select_entry("The Bloop").expect("first fetch");
    let second = panel.select_entry("Julia").expect("second fetch");

    // Second response resolves first; the first's arrives late and must be
    // discarded rather than clobbering the newer selection.
    panel.apply_outcome(ok_outcome(&second, ExplanationResult::new("<p>julia</p>", None)));
    panel.apply_outcome(ok_outcome(&first, ExplanationResult::new("<p>bloop</p>", None)));

    assert_eq!(panel.surface().last_title(), Some("Julia"));
    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(view.body_html(), "<p>julia</p>");
}

#[test]
fn cached_render_also_invalidates_older_in_flight_fetches() {
    let mut panel = controller(RecordingSurface::wide());

    // Prime the cache for Julia.
    let prime = panel.select_entry("Julia").expect("prime fetch");
    panel.apply_outcome(ok_outcome(&prime, ExplanationResult::new("<p>julia</p>", None)));

    // Select something uncached, then hop back to the cached entry before the
    // fetch lands. The late response must not replace the cached render.
    let slow = panel.select_entry("The Bloop").expect("slow fetch");
    assert_eq!(panel.select_entry("Julia"), None);
    panel.apply_outcome(ok_outcome(&slow, ExplanationResult::new("<p>bloop</p>", None)));

    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(view.body_html(), "<p>julia</p>");
}

#[test]
fn image_failure_swaps_proxied_source_for_the_placeholder() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("The Bloop").expect("fetch request");
    panel.apply_outcome(ok_outcome(
        &request,
        ExplanationResult::new("<p>x</p>", Some("https://img.example/b.png".into())),
    ));
    assert!(!panel.current_view().expect("view").image().is_placeholder());

    panel.image_failed();
    let view = panel.surface().last_loaded().expect("loaded view");
    assert_eq!(
        view.image().url(),
        "https://placehold.co/480x360?text=The%20Bloop"
    );
    // Body is untouched by the image swap.
    assert_eq!(view.body_html(), "<p>x</p>");
}

#[test]
fn image_failure_on_a_placeholder_is_a_noop() {
    let mut panel = controller(RecordingSurface::wide());

    let request = panel.select_entry("A858").expect("fetch request");
    panel.apply_outcome(ok_outcome(&request, ExplanationResult::new("x", None)));
    let calls_before = panel.surface().calls.len();

    panel.image_failed();
    assert_eq!(panel.surface().calls.len(), calls_before);
}

#[test]
fn image_failure_with_nothing_loaded_is_a_noop() {
    let mut panel = controller(RecordingSurface::wide());
    panel.image_failed();
    assert!(panel.surface().calls.is_empty());
}

#[test]
fn title_is_set_before_the_loading_display() {
    let mut panel = controller(RecordingSurface::wide());
    let _ = panel.select_entry("The Bloop");

    let title_at = panel
        .surface()
        .calls
        .iter()
        .position(|call| matches!(call, SurfaceCall::Title(_)))
        .expect("title call");
    let loading_at = panel
        .surface()
        .calls
        .iter()
        .position(|call| matches!(call, SurfaceCall::Loading))
        .expect("loading call");
    assert!(title_at < loading_at);
}
