// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;
use neonotate::NoteDocument;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut doc) = serde_json::from_slice::<NoteDocument>(data) {
        doc.normalize_weights();
        let out = serde_json::to_vec(&doc).unwrap();
        let again: NoteDocument = serde_json::from_slice(&out).unwrap();
        assert_eq!(again.notes, doc.notes);
        assert_eq!(again.categories, doc.categories);
    }
});
