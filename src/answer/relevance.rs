// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Lexical relevance ranking over cached fragments
//!
//! Selects the grounding context for a question by keyword overlap:
//! accent-folded, stopword-filtered tokens, with title matches weighted
//! above body matches. Deterministic given the same snapshot and question,
//! with bounded output size.

use std::collections::HashSet;

use crate::catalog::ContentFragment;

/// Spanish stopwords, stored accent-folded to match normalized tokens
const STOPWORDS: &[&str] = &[
    "del", "las", "los", "una", "unas", "unos", "que", "cual", "cuales", "como", "cuando",
    "donde", "quien", "quienes", "para", "por", "con", "sin", "sobre", "entre", "este", "esta",
    "estos", "estas", "ese", "esa", "esos", "esas", "ser", "son", "estan", "hay", "sus", "les",
    "nos", "mas", "pero", "muy", "tiene", "tienen", "puede", "pueden", "desde", "hasta",
    "tambien",
];

/// Score multiplier for question tokens found in a fragment title
const TITLE_WEIGHT: usize = 3;

/// Fold Spanish accented characters to their base letter
fn fold_accent(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' | 'ü' => 'u',
        'ñ' => 'n',
        _ => c,
    }
}

/// Normalize and tokenize text: lowercase, fold accents, split on
/// non-alphanumeric, drop stopwords and tokens shorter than 3 chars
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3)
        .filter(|t| !STOPWORDS.contains(t))
        .map(String::from)
        .collect()
}

/// Rank fragments by keyword overlap with the question
///
/// Returns at most `top_k` fragments, best first. Fragments with zero
/// overlap are excluded. Ties break on snapshot order, so results are
/// deterministic for a given snapshot and question.
pub fn rank_fragments<'a>(
    fragments: &'a [ContentFragment],
    question: &str,
    top_k: usize,
) -> Vec<&'a ContentFragment> {
    let mut question_tokens = tokenize(question);
    question_tokens.sort();
    question_tokens.dedup();

    if question_tokens.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, usize)> = Vec::new();
    for (index, fragment) in fragments.iter().enumerate() {
        let title_tokens: HashSet<String> = tokenize(&fragment.title).into_iter().collect();
        let text_tokens: HashSet<String> = tokenize(&fragment.text).into_iter().collect();

        let mut score = 0usize;
        for token in &question_tokens {
            if title_tokens.contains(token) {
                score += TITLE_WEIGHT;
            } else if text_tokens.contains(token) {
                score += 1;
            }
        }

        if score > 0 {
            scored.push((score, index));
        }
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(top_k)
        .map(|(_, index)| &fragments[index])
        .collect()
}
