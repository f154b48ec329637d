// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Icefloe: terminal iceberg chart explorer.
//!
//! Renders a layered "iceberg" chart in the terminal. Selecting an entry
//! fetches its explanation from a backend API (`POST /api/explain`) and shows
//! it in a side panel, memoized per `(chart, entry)` for the session.
//!
//! The fetch/cache/render flow lives in [`panel`] and is headless: it renders
//! through the [`panel::PanelSurface`] trait and expresses network activity as
//! [`panel::FetchRequest`] values, so the whole flow is testable without a
//! terminal or a server.

pub mod cache;
pub mod client;
pub mod model;
pub mod panel;
pub mod store;
pub mod telemetry;
pub mod tui;
