// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Keyword categorization with frequency weighting
//!
//! Matching is case-insensitive in both directions: scoring compares
//! lower-cased tokens against lower-cased keywords, and weight updates are
//! recorded under the lower-cased keyword. Weights are global across
//! categories.

use serde::Serialize;
use tracing::debug;

use crate::model::{Categories, KeywordWeights, OTHERS};
use crate::{NeonotateError, Result};

/// Weight of a keyword that has never driven a categorization
pub const DEFAULT_WEIGHT: u64 = 1;

/// Score of one category for a piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u64,
}

/// Split content on whitespace
pub fn tokenize(content: &str) -> Vec<&str> {
    content.split_whitespace().collect()
}

/// Score every category, in insertion order
pub fn score_categories(
    content: &str,
    categories: &Categories,
    weights: &KeywordWeights,
) -> Vec<CategoryScore> {
    let tokens: Vec<String> = tokenize(content).into_iter().map(str::to_lowercase).collect();

    categories
        .iter()
        .map(|category| {
            let score = tokens
                .iter()
                .filter(|token| category.matches(token))
                .map(|token| weights.get(token.as_str()).copied().unwrap_or(DEFAULT_WEIGHT))
                .fold(0, u64::saturating_add);
            CategoryScore {
                category: category.name.clone(),
                score,
            }
        })
        .collect()
}

/// Pick the best category for content.
///
/// The first category (by insertion order) reaching the maximum score wins.
/// Returns [`OTHERS`] when nothing scores above zero.
pub fn categorize(content: &str, categories: &Categories, weights: &KeywordWeights) -> String {
    let scores = score_categories(content, categories, weights);
    debug!("Category scores: {:?}", scores);

    let mut best: Option<&CategoryScore> = None;
    for candidate in &scores {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    match best {
        Some(b) if b.score > 0 => b.category.clone(),
        _ => OTHERS.to_string(),
    }
}

/// Bump the weight of every token matching one of the category's keywords.
///
/// Returns the number of increments applied.
pub fn update_keyword_weights(
    tokens: &[&str],
    category: &str,
    categories: &Categories,
    weights: &mut KeywordWeights,
) -> Result<usize> {
    let entry = categories
        .get(category)
        .ok_or_else(|| NeonotateError::UnknownCategory(category.to_string()))?;

    let mut applied = 0;
    for token in tokens {
        let token = token.to_lowercase();
        if entry.matches(&token) {
            let weight = weights.entry(token).or_insert(0);
            *weight = weight.saturating_add(1);
            applied += 1;
        }
    }
    Ok(applied)
}
