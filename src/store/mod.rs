// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! The note store: in-memory state mirrored to one JSON document
//!
//! Every mutating call rewrites the whole file. There is no locking; two
//! processes writing the same file race and the last writer wins. A
//! persistence error after a mutation leaves the change in memory.

use serde::Serialize;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::categorizer::{self, CategoryScore};
use crate::config::StorageConfig;
use crate::model::{Categories, KeywordWeights, Note, NoteDocument};
use crate::{NeonotateError, Result};

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The document was read
    Loaded,
    /// No file yet; the first save creates it
    NotFound,
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub note_count: usize,
    pub category_count: usize,
    pub weighted_keyword_count: usize,
    /// Notes per category name, registered categories first
    pub notes_per_category: Vec<(String, usize)>,
}

/// Notes, categories and keyword weights backed by a JSON file
pub struct NoteStore {
    path: PathBuf,
    doc: NoteDocument,
    storage: StorageConfig,
}

impl NoteStore {
    /// Create an empty store for `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>, storage: &StorageConfig) -> Self {
        Self {
            path: path.into(),
            doc: NoteDocument::default(),
            storage: storage.clone(),
        }
    }

    /// Data file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace in-memory state with the file's contents.
    ///
    /// A missing file is not an error. A malformed or unreadable file leaves
    /// the store empty and returns the error.
    pub fn load(&mut self) -> Result<LoadStatus> {
        info!("Loading data from: {:?}", self.path);

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                self.doc = NoteDocument::default();
                info!("File {:?} not found. A new file will be created upon saving.", self.path);
                return Ok(LoadStatus::NotFound);
            }
            Err(e) => {
                self.doc = NoteDocument::default();
                warn!("Failed to read {:?}: {}", self.path, e);
                return Err(NeonotateError::io(&self.path, e));
            }
        };

        match serde_json::from_str::<NoteDocument>(&content) {
            Ok(mut doc) => {
                doc.normalize_weights();
                self.doc = doc;
                info!(
                    "Loaded {} notes, {} categories",
                    self.doc.notes.len(),
                    self.doc.categories.len()
                );
                Ok(LoadStatus::Loaded)
            }
            Err(e) => {
                self.doc = NoteDocument::default();
                warn!("Invalid file format in {:?}: {}", self.path, e);
                Err(NeonotateError::Format(e))
            }
        }
    }

    /// Overwrite the data file with the current state
    pub fn save(&self) -> Result<()> {
        write_json(&self.path, &self.doc, self.storage.pretty).map_err(|e| {
            warn!("Error saving data: {}", e);
            e
        })?;
        debug!("Data saved to {:?}", self.path);
        Ok(())
    }

    /// Register a category. Name and keywords are trimmed and empty keywords
    /// dropped. Returns the stored keyword list.
    pub fn add_category<S: AsRef<str>>(&mut self, name: &str, keywords: &[S]) -> Result<Vec<String>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NeonotateError::EmptyCategoryName);
        }

        let keywords: Vec<String> = keywords
            .iter()
            .map(|kw| kw.as_ref().trim())
            .filter(|kw| !kw.is_empty())
            .map(String::from)
            .collect();
        if keywords.is_empty() {
            return Err(NeonotateError::EmptyKeywords);
        }

        if !self.doc.categories.insert(name.to_string(), keywords.clone()) {
            return Err(NeonotateError::DuplicateCategory(name.to_string()));
        }

        self.save()?;
        info!("Category '{}' added with keywords: {}", name, keywords.join(", "));
        Ok(keywords)
    }

    /// Best category for `content` under the current weights
    pub fn categorize(&self, content: &str) -> String {
        categorizer::categorize(content, &self.doc.categories, &self.doc.keyword_weights)
    }

    /// Per-category scores for `content`, in insertion order
    pub fn score(&self, content: &str) -> Vec<CategoryScore> {
        categorizer::score_categories(content, &self.doc.categories, &self.doc.keyword_weights)
    }

    /// Categorize and store a note, then reinforce the keywords that chose it
    pub fn add_note(&mut self, content: &str) -> Result<Note> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NeonotateError::EmptyNote);
        }

        let category = self.categorize(content);
        let note = Note {
            content: content.to_string(),
            category: category.clone(),
        };
        self.doc.notes.push(note.clone());

        let tokens = categorizer::tokenize(content);
        match categorizer::update_keyword_weights(
            &tokens,
            &category,
            &self.doc.categories,
            &mut self.doc.keyword_weights,
        ) {
            Ok(applied) => debug!("Applied {} weight increments for '{}'", applied, category),
            Err(e) => debug!("Weights unchanged: {}", e),
        }

        self.save()?;
        info!("Note added under category '{}'", category);
        Ok(note)
    }

    /// Increment weights for tokens matching `category`'s keywords and persist.
    ///
    /// Fails without changes when the category is not registered.
    pub fn update_keyword_weights(&mut self, tokens: &[&str], category: &str) -> Result<usize> {
        let applied = categorizer::update_keyword_weights(
            tokens,
            category,
            &self.doc.categories,
            &mut self.doc.keyword_weights,
        )?;
        self.save()?;
        Ok(applied)
    }

    /// All notes in insertion order; [`NeonotateError::NoNotes`] when there are none
    pub fn view_notes(&self) -> Result<&[Note]> {
        if self.doc.notes.is_empty() {
            return Err(NeonotateError::NoNotes);
        }
        Ok(&self.doc.notes)
    }

    /// Notes containing `keyword` as a case-insensitive substring
    pub fn search_notes(&self, keyword: &str) -> Result<Vec<&Note>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(NeonotateError::EmptySearchKeyword);
        }

        let needle = keyword.to_lowercase();
        let results: Vec<&Note> = self
            .doc
            .notes
            .iter()
            .filter(|note| note.content.to_lowercase().contains(&needle))
            .collect();

        if results.is_empty() {
            info!("No notes found containing the keyword '{}'", keyword);
        }
        Ok(results)
    }

    /// Write the notes alone, as a JSON array, to `path`. Returns the count written.
    pub fn export_notes(&self, path: &str) -> Result<usize> {
        let path = path.trim();
        if path.is_empty() {
            return Err(NeonotateError::EmptyExportPath);
        }

        write_json(Path::new(path), &self.doc.notes, self.storage.pretty).map_err(|e| {
            warn!("Error exporting notes: {}", e);
            e
        })?;
        info!("Exported {} notes to '{}'", self.doc.notes.len(), path);
        Ok(self.doc.notes.len())
    }

    pub fn notes(&self) -> &[Note] {
        &self.doc.notes
    }

    pub fn categories(&self) -> &Categories {
        &self.doc.categories
    }

    pub fn keyword_weights(&self) -> &KeywordWeights {
        &self.doc.keyword_weights
    }

    pub fn stats(&self) -> StoreStats {
        let mut per_category: Vec<(String, usize)> = self
            .doc
            .categories
            .iter()
            .map(|c| (c.name.clone(), 0))
            .collect();

        for note in &self.doc.notes {
            match per_category.iter_mut().find(|(name, _)| *name == note.category) {
                Some((_, count)) => *count += 1,
                None => per_category.push((note.category.clone(), 1)),
            }
        }

        StoreStats {
            note_count: self.doc.notes.len(),
            category_count: self.doc.categories.len(),
            weighted_keyword_count: self.doc.keyword_weights.len(),
            notes_per_category: per_category,
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let mut buf = Vec::new();
    if pretty {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
    } else {
        serde_json::to_writer(&mut buf, value)?;
    }
    fs::write(path, buf).map_err(|e| NeonotateError::io(path, e))
}
