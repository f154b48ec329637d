// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The explanation panel controller.
//!
//! This is the headless core of the application. It owns the session cache
//! and the panel display flow (loading / loaded / error) and touches the
//! outside world through two narrow seams: rendering goes through
//! [`PanelSurface`], and network activity is expressed as [`FetchRequest`]
//! values handed back to the caller, with completions fed in via
//! [`PanelController::apply_outcome`]. The controller itself never performs
//! I/O.
//!
//! Concurrency: every begin-flow advances a selection generation, and a
//! completion is applied only when it still matches the latest generation.
//! Rapid selections therefore resolve deterministically to the last one
//! selected, never to whichever response happened to arrive last.
//!
//! The explanation body is an HTML fragment from a trusted backend and is
//! carried verbatim; presentation layers decide how to show it.

#[cfg(test)]
mod tests;

use crate::cache::{cache_key, ExplainCache};
use crate::client::{placeholder_image_url, proxy_image_url, ApiError, DEFAULT_SERVER_URL};
use crate::model::ExplanationResult;

/// Width threshold below which the panel behaves as a closable overlay.
/// Frontends override it in their own width units.
pub const DEFAULT_NARROW_BREAKPOINT: u16 = 1024;

/// Explicit configuration for one controller; nothing is read from ambient
/// globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub chart_name: String,
    pub server_url: String,
    pub narrow_breakpoint: u16,
}

impl PanelConfig {
    pub fn new(chart_name: impl Into<String>) -> Self {
        Self {
            chart_name: chart_name.into(),
            server_url: DEFAULT_SERVER_URL.to_owned(),
            narrow_breakpoint: DEFAULT_NARROW_BREAKPOINT,
        }
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn with_narrow_breakpoint(mut self, narrow_breakpoint: u16) -> Self {
        self.narrow_breakpoint = narrow_breakpoint;
        self
    }
}

/// Where the panel's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// The backend-supplied image, routed through the image proxy.
    Proxied { url: String },
    /// Generated fallback tagged with the entry label.
    Placeholder { url: String },
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Proxied { url } | Self::Placeholder { url } => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Everything a loaded panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationView {
    entry_text: String,
    image: ImageSource,
    body_html: String,
}

impl ExplanationView {
    pub fn entry_text(&self) -> &str {
        &self.entry_text
    }

    pub fn image(&self) -> &ImageSource {
        &self.image
    }

    /// The explanation fragment exactly as the backend sent it.
    pub fn body_html(&self) -> &str {
        &self.body_html
    }
}

/// Presentation seam the controller renders through.
///
/// Loaded mode is the only one that shows the image and the refresh
/// affordance; loading and error modes hide both.
pub trait PanelSurface {
    /// Current viewport width, in whatever unit the frontend measures.
    fn viewport_width(&self) -> u16;
    fn set_panel_open(&mut self, open: bool);
    fn set_title(&mut self, title: &str);
    fn show_loading(&mut self);
    fn show_loaded(&mut self, view: &ExplanationView);
    fn show_error(&mut self, message: &str);
}

/// A fetch the frontend must run; its completion comes back through
/// [`PanelController::apply_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub request_id: u64,
    pub chart_name: String,
    pub entry_text: String,
    pub force_refresh: bool,
}

/// Completion of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub request_id: u64,
    pub entry_text: String,
    pub force_refresh: bool,
    pub result: Result<ExplanationResult, ApiError>,
}

#[derive(Debug)]
pub struct PanelController<S> {
    config: PanelConfig,
    cache: ExplainCache,
    surface: S,
    generation: u64,
    current_entry: Option<String>,
    current_view: Option<ExplanationView>,
}

impl<S: PanelSurface> PanelController<S> {
    pub fn new(config: PanelConfig, surface: S) -> Self {
        Self {
            config,
            cache: ExplainCache::new(),
            surface,
            generation: 0,
            current_entry: None,
            current_view: None,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn cache(&self) -> &ExplainCache {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The entry named by the panel title, i.e. the refresh target.
    pub fn current_entry(&self) -> Option<&str> {
        self.current_entry.as_deref()
    }

    pub fn current_view(&self) -> Option<&ExplanationView> {
        self.current_view.as_ref()
    }

    /// The user selected an entry. Returns the fetch to run, or `None` when
    /// the cache (or an empty label) short-circuits it.
    pub fn select_entry(&mut self, entry_text: &str) -> Option<FetchRequest> {
        self.begin(entry_text, false)
    }

    /// Forced re-fetch of the currently displayed entry. Bypasses the cache
    /// on read and never writes it back, so the cached value stays as it
    /// was. Returns `None` when no entry is displayed.
    pub fn refresh_current(&mut self) -> Option<FetchRequest> {
        let entry_text = self.current_entry.clone()?;
        self.begin(&entry_text, true)
    }

    fn begin(&mut self, entry_text: &str, force_refresh: bool) -> Option<FetchRequest> {
        if entry_text.is_empty() {
            return None;
        }

        if self.surface.viewport_width() < self.config.narrow_breakpoint {
            self.surface.set_panel_open(true);
        }

        // Title first: it names the refresh target even while loading.
        self.surface.set_title(entry_text);
        self.current_entry = Some(entry_text.to_owned());
        self.current_view = None;
        self.surface.show_loading();

        // Every begin advances the generation so completions for older
        // selections can be recognized and dropped.
        self.generation += 1;

        if !force_refresh {
            let key = cache_key(&self.config.chart_name, entry_text);
            if let Some(cached) = self.cache.get(&key) {
                self.render(entry_text.to_owned(), &cached);
                return None;
            }
        }

        Some(FetchRequest {
            request_id: self.generation,
            chart_name: self.config.chart_name.clone(),
            entry_text: entry_text.to_owned(),
            force_refresh,
        })
    }

    /// Applies a completed fetch. A completion that no longer matches the
    /// latest selection is dropped.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.request_id != self.generation {
            tracing::debug!(
                request_id = outcome.request_id,
                entry_text = %outcome.entry_text,
                "dropping stale explanation response"
            );
            return;
        }

        match outcome.result {
            Ok(result) => {
                if !outcome.force_refresh {
                    let key = cache_key(&self.config.chart_name, &outcome.entry_text);
                    self.cache.insert(key, &result);
                }
                self.render(outcome.entry_text, &result);
            }
            Err(err) => {
                tracing::warn!(entry_text = %outcome.entry_text, %err, "explanation fetch failed");
                self.current_view = None;
                self.surface.show_error(&err.to_string());
            }
        }
    }

    /// The image element's error fallback: swap a proxied image for the
    /// placeholder and re-render. No-op when nothing is loaded or the
    /// placeholder is already showing.
    pub fn image_failed(&mut self) {
        let Some(current) = self.current_view.as_ref() else {
            return;
        };
        if current.image.is_placeholder() {
            return;
        }

        let mut view = current.clone();
        view.image = ImageSource::Placeholder {
            url: placeholder_image_url(&view.entry_text),
        };
        self.current_view = Some(view.clone());
        self.surface.show_loaded(&view);
    }

    /// No-op at or above the breakpoint, where the panel is always visible.
    pub fn open_panel(&mut self) {
        if self.surface.viewport_width() < self.config.narrow_breakpoint {
            self.surface.set_panel_open(true);
        }
    }

    pub fn close_panel(&mut self) {
        self.surface.set_panel_open(false);
    }

    fn render(&mut self, entry_text: String, result: &ExplanationResult) {
        let image = match result.image_url() {
            Some(original) => ImageSource::Proxied {
                url: proxy_image_url(&self.config.server_url, original),
            },
            None => ImageSource::Placeholder {
                url: placeholder_image_url(&entry_text),
            },
        };
        let view = ExplanationView {
            entry_text,
            image,
            body_html: result.explanation().to_owned(),
        };
        self.current_view = Some(view.clone());
        self.surface.show_loaded(&view);
    }
}
