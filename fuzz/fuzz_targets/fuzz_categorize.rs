// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use neonotate::categorizer::{categorize, tokenize, update_keyword_weights};
use neonotate::{Categories, KeywordWeights, OTHERS};

#[derive(Arbitrary, Debug)]
struct Input {
    categories: Vec<(String, Vec<String>)>,
    notes: Vec<String>,
}

fuzz_target!(|input: Input| {
    let mut categories = Categories::new();
    for (name, keywords) in input.categories {
        categories.insert(name, keywords);
    }

    let mut weights = KeywordWeights::new();
    for note in &input.notes {
        let category = categorize(note, &categories, &weights);
        assert!(category == OTHERS || categories.contains(&category));

        let tokens = tokenize(note);
        let _ = update_keyword_weights(&tokens, &category, &categories, &mut weights);
    }
});
