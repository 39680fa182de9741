// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Neonotate: keyword-categorized personal notes
//!
//! Notes are assigned to user-defined categories by keyword matching,
//! weighted by how often each keyword has decided a category before.
//! All state lives in one JSON document that is rewritten on every change.

pub mod categorizer;
pub mod config;
pub mod error;
pub mod menu;
pub mod model;
pub mod store;

pub use config::{AppConfig, MenuConfig, StorageConfig};
pub use error::{ErrorKind, NeonotateError, Result};
pub use model::{Categories, Category, KeywordWeights, Note, NoteDocument, OTHERS};
pub use store::{LoadStatus, NoteStore, StoreStats};
