// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Colors for the iceberg and the panel.
//!
//! The per-layer gradient is the terminal counterpart of the page's layer
//! coloring: one hue, lightness interpolated from near-white at the surface
//! down to deep water at the bottom. Purely presentational.

use ratatui::style::{Color, Modifier, Style};

const LAYER_HUE: f32 = 205.0;
const LAYER_SATURATION: f32 = 0.62;
const LAYER_LIGHTNESS_TOP: f32 = 0.85;
const LAYER_LIGHTNESS_BOTTOM: f32 = 0.22;
// Below this lightness the layer label switches to a light foreground.
const DARK_TEXT_THRESHOLD: f32 = 0.55;

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub(crate) fn loading_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn hint_style(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub(crate) fn image_line_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub(crate) fn layer_style(&self, index: usize, layer_count: usize) -> Style {
        let lightness = layer_lightness(index, layer_count);
        let (r, g, b) = hsl_to_rgb(LAYER_HUE, LAYER_SATURATION, lightness);
        let fg = if lightness > DARK_TEXT_THRESHOLD {
            Color::Black
        } else {
            Color::White
        };
        Style::default().bg(Color::Rgb(r, g, b)).fg(fg)
    }
}

fn layer_lightness(index: usize, layer_count: usize) -> f32 {
    if layer_count <= 1 {
        return LAYER_LIGHTNESS_TOP;
    }
    let t = index.min(layer_count - 1) as f32 / (layer_count - 1) as f32;
    LAYER_LIGHTNESS_TOP + (LAYER_LIGHTNESS_BOTTOM - LAYER_LIGHTNESS_TOP) * t
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = (hue.rem_euclid(360.0)) / 60.0;
    let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hue_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    (to_byte(r1), to_byte(g1), to_byte(b1))
}
