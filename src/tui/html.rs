// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal presentation of explanation fragments.
//!
//! The backend emits simple HTML (paragraphs and inline bold, per its prompt
//! contract). The controller keeps that fragment verbatim; this module only
//! derives display text for the panel: tags stripped, block boundaries
//! becoming paragraph breaks, and the handful of entities such fragments
//! carry decoded. The derived text is lossy and never fed back anywhere.

/// Converts an explanation fragment into display paragraphs, separated by
/// empty strings.
pub(crate) fn fragment_to_lines(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = html;

    while let Some(idx) = rest.find('<') {
        push_text(&mut current, &rest[..idx]);
        rest = &rest[idx..];
        let Some(end) = rest.find('>') else {
            // Unterminated tag: keep it as literal text.
            push_text(&mut current, rest);
            rest = "";
            break;
        };
        if is_break_tag(&rest[1..end]) {
            flush(&mut lines, &mut current);
        }
        rest = &rest[end + 1..];
    }
    push_text(&mut current, rest);
    flush(&mut lines, &mut current);

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let paragraph = current.split_whitespace().collect::<Vec<_>>().join(" ");
    current.clear();
    if paragraph.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(paragraph);
}

fn is_break_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("");
    matches!(
        name.to_ascii_lowercase().as_str(),
        "p" | "br" | "div" | "li" | "ul" | "ol"
    )
}

fn push_text(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match entity(rest) {
            Some((decoded, len)) => {
                out.push_str(decoded);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

fn entity(s: &str) -> Option<(&'static str, usize)> {
    const TABLE: &[(&str, &str)] = &[
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
    ];
    TABLE
        .iter()
        .find(|(from, _)| s.starts_with(from))
        .map(|(from, to)| (*to, from.len()))
}
