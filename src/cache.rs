// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-scoped explanation cache.
//!
//! Values are kept JSON-encoded under `"<chart>-<entry>"` keys and decoded on
//! read. A slot is written only after a successful non-forced fetch; a forced
//! refresh bypasses the cache on read and never writes it back, so the stored
//! value outlives the refreshed display. Nothing is ever invalidated; the
//! cache lives exactly as long as the process.

use std::collections::BTreeMap;

use crate::model::ExplanationResult;

/// The key for one cached explanation: chart name and entry label joined
/// with `-`.
pub fn cache_key(chart_name: &str, entry_text: &str) -> String {
    format!("{chart_name}-{entry_text}")
}

#[derive(Debug, Clone, Default)]
pub struct ExplainCache {
    slots: BTreeMap<String, String>,
}

impl ExplainCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded lookup. A slot that fails to decode reads as a miss.
    pub fn get(&self, key: &str) -> Option<ExplanationResult> {
        let raw = self.slots.get(key)?;
        match serde_json::from_str(raw) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!(key, %err, "undecodable cache slot treated as miss");
                None
            }
        }
    }

    /// The stored JSON exactly as written, for callers that care about the
    /// encoded form.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: String, result: &ExplanationResult) {
        match serde_json::to_string(result) {
            Ok(raw) => {
                self.slots.insert(key, raw);
            }
            Err(err) => {
                tracing::warn!(key, %err, "failed to encode explanation for cache");
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.slots.insert(key.into(), raw.into());
    }
}
