// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Neonotate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Neonotate operations
pub type Result<T> = std::result::Result<T, NeonotateError>;

/// Neonotate error types
#[derive(Error, Debug)]
pub enum NeonotateError {
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    #[error("Keywords cannot be empty")]
    EmptyKeywords,

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Note content cannot be empty")]
    EmptyNote,

    #[error("Search keyword cannot be empty")]
    EmptySearchKeyword,

    #[error("Export path cannot be empty")]
    EmptyExportPath,

    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),

    #[error("No notes available")]
    NoNotes,

    #[error("Invalid file format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("File system error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse outcome classes callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input; state was not changed
    Validation,
    /// Nothing to show
    Empty,
    /// Reading or writing a file failed
    Persistence,
    /// Configuration could not be loaded
    Config,
}

impl NeonotateError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCategoryName
            | Self::EmptyKeywords
            | Self::DuplicateCategory(_)
            | Self::EmptyNote
            | Self::EmptySearchKeyword
            | Self::EmptyExportPath
            | Self::UnknownCategory(_) => ErrorKind::Validation,
            Self::NoNotes => ErrorKind::Empty,
            Self::Format(_) | Self::Io { .. } => ErrorKind::Persistence,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(NeonotateError::EmptyNote.kind(), ErrorKind::Validation);
        assert_eq!(
            NeonotateError::DuplicateCategory("Work".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(NeonotateError::NoNotes.kind(), ErrorKind::Empty);

        let io = NeonotateError::io(
            "notes.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Persistence);
        assert!(io.to_string().contains("notes.json"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            NeonotateError::DuplicateCategory("Work".into()).to_string(),
            "Category 'Work' already exists"
        );
        assert_eq!(
            NeonotateError::UnknownCategory("Others".into()).to_string(),
            "Category 'Others' does not exist"
        );
    }
}
