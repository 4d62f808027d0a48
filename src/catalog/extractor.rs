// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content extraction for catalog pages
//!
//! Pure functions over raw HTML: no I/O, no shared state. Recoverable
//! parse issues degrade the fragment for that one document instead of
//! aborting the whole refresh cycle.

use scraper::{ElementRef, Html, Selector};
use std::time::Instant;

use super::config::CatalogConfig;
use super::facts::{mine_facts, render_facts};
use super::sources::SourcePage;
use super::types::{ContentFragment, ExtractError, PageKind, SourceDocument};

/// Extract the content fragments for one fetched page
///
/// Tries content selectors in order (`article`, `main`, site-specific
/// containers) and falls back to `<body>`. Overview pages additionally get
/// mined facts (director, contact email, duration, modality) rendered into
/// the fragment text so relevance ranking can see them.
pub fn extract_fragments(
    doc: &SourceDocument,
    page: &SourcePage,
    config: &CatalogConfig,
) -> Result<Vec<ContentFragment>, ExtractError> {
    if doc.html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument {
            url: doc.url.clone(),
        });
    }

    let document = Html::parse_document(&doc.html);

    let title = extract_title(&document).unwrap_or_else(|| page.program.clone());

    // Line-preserving text, needed for fact mining
    let raw_text = extract_content_text(&document);

    let mut text = clean_text(&raw_text);

    if page.kind == PageKind::Overview {
        let facts = mine_facts(&raw_text);
        let rendered = render_facts(&facts);
        if !rendered.is_empty() {
            text = format!("{} {}", rendered, text);
        }
    }

    if text.len() < config.min_content_chars {
        return Err(ExtractError::NoContent {
            url: doc.url.clone(),
        });
    }

    let text = truncate_content(&text, config.max_chars_per_page);

    Ok(vec![ContentFragment {
        id: format!("{}:{}", page.program, page.kind.label()),
        program: page.program.clone(),
        kind: page.kind,
        url: doc.url.clone(),
        title,
        text,
        extracted_at: Instant::now(),
    }])
}

/// Extract the page title: first `h1`, then `h2`, then `<title>`
fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["h1", "h2", "title"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let title = clean_text(&element.text().collect::<Vec<_>>().join(" "));
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }
    None
}

/// Extract main content text, preserving line boundaries between nodes
fn extract_content_text(document: &Html) -> String {
    // Priority order of selectors to try
    let selectors = [
        "article",
        "main",
        "[role='main']",
        "#contenido",
        ".contenido",
        "#content",
        ".content",
    ];

    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element_text_lines(&element);
                if clean_text(&text).len() > 200 {
                    return text;
                }
            }
        }
    }

    // Fallback: whole body
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            return element_text_lines(&body);
        }
    }

    String::new()
}

/// Collect an element's text nodes joined with newlines
///
/// Joining with newlines (not spaces) keeps labels like "Director:" on
/// their own line, which the fact-mining regexes rely on.
fn element_text_lines(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse all whitespace runs into single spaces
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max_chars`, preserving word boundaries
fn truncate_content(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_string();
    }

    // len is in bytes; back up to a char boundary before slicing
    let mut cut = max_chars;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }

    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
