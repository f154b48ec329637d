// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Explanation API client.
//!
//! Talks to the explanation backend: `POST /api/explain` for explanation
//! payloads, with image URLs routed through `GET /api/image-proxy` to avoid
//! cross-origin loads. No request timeout is
//! configured; the UI treats a hung request as an indefinite loading state
//! and the user can always select again.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ExplanationResult;

/// Default backend address, the explanation server's development bind.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

const PLACEHOLDER_BASE_URL: &str = "https://placehold.co/480x360";

#[derive(Debug, Serialize)]
struct ExplainRequestBody<'a> {
    chart_name: &'a str,
    entry_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server-supplied `error` field, or
    /// a generic fallback carrying the status code when the field is absent.
    Http { status: u16, message: String },
    /// The request never completed, or a body failed to decode.
    Transport(reqwest::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { message, .. } => f.write_str(message),
            Self::Transport(err) => write!(f, "request failed: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http { .. } => None,
            Self::Transport(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplainClient {
    base_url: String,
    http: reqwest::Client,
}

impl ExplainClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the explanation for one entry.
    ///
    /// On a non-2xx status the error body is itself JSON; a malformed error
    /// body surfaces as its own decode failure.
    pub async fn explain(
        &self,
        chart_name: &str,
        entry_text: &str,
    ) -> Result<ExplanationResult, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/explain", self.base_url))
            .json(&ExplainRequestBody {
                chart_name,
                entry_text,
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.map_err(ApiError::Transport)?;
            let message = body
                .error
                .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));
            tracing::warn!(status = status.as_u16(), entry_text, "explain request rejected");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(ApiError::Transport)
    }
}

/// Routes an image URL through the backend proxy.
pub fn proxy_image_url(base_url: &str, original: &str) -> String {
    format!(
        "{}/api/image-proxy?url={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(original)
    )
}

/// Generated fallback image tagged with the entry label, used when the
/// backend has no image or the proxied one fails to load.
pub fn placeholder_image_url(entry_text: &str) -> String {
    format!(
        "{PLACEHOLDER_BASE_URL}?text={}",
        urlencoding::encode(entry_text)
    )
}
