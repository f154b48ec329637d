// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Deserialize;
use smol_str::SmolStr;

/// A named stack of layers, shallowest first.
///
/// Charts are immutable for the lifetime of a session; the only interaction
/// with their content is selecting an entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chart {
    name: String,
    layers: Vec<Layer>,
}

impl Chart {
    pub fn new(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn entry_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.entries().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

/// One visual row of the iceberg. The layer's position in [`Chart::layers`]
/// is its depth.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layer {
    #[serde(rename = "layer")]
    name: String,
    entries: Vec<Entry>,
}

impl Layer {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// A selectable item, identified by its display label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    #[serde(rename = "text")]
    text: SmolStr,
}

impl Entry {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
