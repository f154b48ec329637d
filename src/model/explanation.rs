// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// The backend's answer for one `(chart, entry)` pair.
///
/// `explanation` is an HTML fragment from a trusted backend and is carried
/// verbatim; no schema is enforced beyond these two fields, and `image_url`
/// may be absent or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResult {
    explanation: String,
    #[serde(default)]
    image_url: Option<String>,
}

impl ExplanationResult {
    pub fn new(explanation: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            explanation: explanation.into(),
            image_url,
        }
    }

    /// The explanation fragment exactly as the backend sent it.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
