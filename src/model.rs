// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Notes, categories and keyword weights as stored in the data document

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Category assigned when no registered category matches
pub const OTHERS: &str = "Others";

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    pub category: String,
}

/// A named bucket with its trigger keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    /// Case-insensitive keyword membership
    pub fn matches(&self, token_lower: &str) -> bool {
        self.keywords.iter().any(|kw| kw.to_lowercase() == token_lower)
    }
}

/// Categories in insertion order.
///
/// Serialized as a JSON object whose key order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    entries: Vec<Category>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.entries.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a category. Returns false and leaves the existing entry alone
    /// when the name is already taken.
    pub fn insert(&mut self, name: String, keywords: Vec<String>) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.entries.push(Category { name, keywords });
        true
    }

    /// Insert or overwrite the keywords of `name`, keeping its position
    fn upsert(&mut self, name: String, keywords: Vec<String>) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.keywords = keywords,
            None => self.entries.push(Category { name, keywords }),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for category in &self.entries {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

struct CategoriesVisitor;

impl<'de> Visitor<'de> for CategoriesVisitor {
    type Value = Categories;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping category names to keyword lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut categories = Categories::new();
        while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
            // Repeated keys: the last definition wins
            categories.upsert(name, keywords);
        }
        Ok(categories)
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// Global keyword counters, keyed by lower-cased keyword
pub type KeywordWeights = BTreeMap<String, u64>;

/// The whole persisted state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDocument {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub keyword_weights: KeywordWeights,
}

impl NoteDocument {
    /// Fold weight keys to lower case, summing counts that collide.
    /// Sums saturate at `u64::MAX`.
    pub fn normalize_weights(&mut self) {
        if self.keyword_weights.keys().all(|k| *k == k.to_lowercase()) {
            return;
        }
        let mut folded = KeywordWeights::new();
        for (keyword, count) in std::mem::take(&mut self.keyword_weights) {
            let slot = folded.entry(keyword.to_lowercase()).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        self.keyword_weights = folded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_keep_document_order() {
        let json = r#"{"Zeta": ["z"], "Alpha": ["a", "b"], "Mid": ["m"]}"#;
        let categories: Categories = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);

        let out = serde_json::to_string(&categories).unwrap();
        assert_eq!(out, r#"{"Zeta":["z"],"Alpha":["a","b"],"Mid":["m"]}"#);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut categories = Categories::new();
        assert!(categories.insert("Work".into(), vec!["meeting".into()]));
        assert!(!categories.insert("Work".into(), vec!["other".into()]));
        assert_eq!(categories.get("Work").unwrap().keywords, vec!["meeting"]);
    }

    #[test]
    fn test_repeated_key_last_definition_wins() {
        let json = r#"{"Work": ["meeting"], "Home": ["cook"], "Work": ["deadline"]}"#;
        let categories: Categories = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Home"]);
        assert_eq!(categories.get("Work").unwrap().keywords, vec!["deadline"]);
    }

    #[test]
    fn test_normalize_weights_saturates() {
        let mut doc = NoteDocument::default();
        doc.keyword_weights.insert("Meeting".into(), u64::MAX);
        doc.keyword_weights.insert("meeting".into(), 1);
        doc.normalize_weights();
        assert_eq!(doc.keyword_weights.get("meeting"), Some(&u64::MAX));
    }

    #[test]
    fn test_document_missing_keys() {
        let doc: NoteDocument = serde_json::from_str(r#"{"notes": []}"#).unwrap();
        assert!(doc.categories.is_empty());
        assert!(doc.keyword_weights.is_empty());
    }

    #[test]
    fn test_normalize_weights_sums_collisions() {
        let mut doc = NoteDocument::default();
        doc.keyword_weights.insert("Meeting".into(), 2);
        doc.keyword_weights.insert("meeting".into(), 1);
        doc.keyword_weights.insert("deadline".into(), 4);
        doc.normalize_weights();
        assert_eq!(doc.keyword_weights.get("meeting"), Some(&3));
        assert_eq!(doc.keyword_weights.get("deadline"), Some(&4));
        assert_eq!(doc.keyword_weights.len(), 2);
    }

    #[test]
    fn test_category_matches_ignores_case() {
        let category = Category {
            name: "Work".into(),
            keywords: vec!["Meeting".into()],
        };
        assert!(category.matches("meeting"));
        assert!(!category.matches("meetings"));
    }
}
