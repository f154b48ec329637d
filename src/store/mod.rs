// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chart file loading.
//!
//! Charts are plain JSON files: a name plus layers of `{"text": ...}`
//! entries, shallowest layer first.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::Chart;

#[derive(Debug)]
pub enum ChartFileError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ChartFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read chart file {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "chart file {} is not valid chart JSON: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ChartFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

pub fn load_chart(path: impl AsRef<Path>) -> Result<Chart, ChartFileError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ChartFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ChartFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}
