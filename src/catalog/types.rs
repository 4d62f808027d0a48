// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the catalog content pipeline

use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// Which page of a program this content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Main program page (director, contact, modality)
    Overview,
    /// Study plan page (`_plan.php`)
    StudyPlan,
    /// Admission requirements page (`_requisitos.php`)
    Requirements,
    /// Program objectives page (`_objetivos.php`)
    Objectives,
}

impl PageKind {
    /// URL suffix appended to the program slug
    pub fn suffix(self) -> &'static str {
        match self {
            PageKind::Overview => "",
            PageKind::StudyPlan => "_plan",
            PageKind::Requirements => "_requisitos",
            PageKind::Objectives => "_objetivos",
        }
    }

    /// Short label used in fragment identifiers
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Overview => "overview",
            PageKind::StudyPlan => "plan",
            PageKind::Requirements => "requisitos",
            PageKind::Objectives => "objetivos",
        }
    }

    /// All page kinds, in the order they are scraped per program
    pub fn all() -> [PageKind; 4] {
        [
            PageKind::Overview,
            PageKind::StudyPlan,
            PageKind::Requirements,
            PageKind::Objectives,
        ]
    }
}

/// A raw fetched document, discarded after extraction
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub url: String,
    pub html: String,
    pub fetched_at: Instant,
}

/// One normalized unit of catalog content
///
/// Immutable once created. Fragments are the grounding context supplied
/// to the completion call.
#[derive(Debug, Clone)]
pub struct ContentFragment {
    /// Identifier: `<program slug>:<page label>`
    pub id: String,
    /// Program slug (e.g. `mae_der_penal`)
    pub program: String,
    /// Which page of the program this came from
    pub kind: PageKind,
    /// Source URL
    pub url: String,
    /// Page title (h1/h2, falling back to `<title>`)
    pub title: String,
    /// Cleaned, whitespace-normalized text
    pub text: String,
    pub extracted_at: Instant,
}

/// Fetch error types (per-URL, never fatal to a refresh cycle)
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {url}")]
    Timeout { url: String },

    /// HTTP transport error
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    /// HTTP non-success status
    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },

    /// URL is unsafe (bad scheme, localhost, private IP)
    #[error("Unsafe URL blocked: {url}")]
    UnsafeUrl { url: String },
}

/// Extraction error types (per-document, never fatal to a refresh cycle)
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Document body was empty or whitespace
    #[error("Empty document from: {url}")]
    EmptyDocument { url: String },

    /// Nothing substantial could be extracted
    #[error("No content extracted from: {url}")]
    NoContent { url: String },
}
