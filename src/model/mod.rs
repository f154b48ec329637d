// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chart data model and API payloads.
//!
//! A chart is an ordered stack of layers, shallowest first; each layer holds
//! the entries a user can select. Layer position only drives the color
//! gradient, never data semantics.

pub mod chart;
pub mod explanation;

pub use chart::{Chart, Entry, Layer};
pub use explanation::ExplanationResult;
