// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Neonotate

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Primary data document
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Data file formatting
    #[serde(default)]
    pub storage: StorageConfig,

    /// Interactive menu settings
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub path: String,
    #[serde(default)]
    pub date_suffix: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MenuConfig {
    #[serde(default = "default_keyword_separator")]
    pub keyword_separator: char,
}

// Default value functions
fn default_data_file() -> String { "notes.json".to_string() }
fn default_export_path() -> String { "notes_export.json".to_string() }
fn default_true() -> bool { true }
fn default_keyword_separator() -> char { ',' }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export: ExportConfig::default(),
            storage: StorageConfig::default(),
            menu: MenuConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
            date_suffix: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            keyword_separator: default_keyword_separator(),
        }
    }
}

impl ExportConfig {
    /// Export path used when none is given explicitly
    pub fn default_path(&self) -> PathBuf {
        if self.date_suffix {
            dated_path(Path::new(&self.path), Local::now().date_naive())
        } else {
            PathBuf::from(&self.path)
        }
    }
}

/// Insert `_YYYY-MM-DD` before the extension
fn dated_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("notes_export");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), ext),
        None => format!("{}_{}", stem, date.format("%Y-%m-%d")),
    };
    path.with_file_name(name)
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| crate::NeonotateError::io(path, e))?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::NeonotateError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| crate::NeonotateError::io(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"data_file": "mine.json"}"#).unwrap();
        assert_eq!(config.data_file, "mine.json");
        assert_eq!(config.export.path, "notes_export.json");
        assert!(config.storage.pretty);
        assert_eq!(config.menu.keyword_separator, ',');
    }

    #[test]
    fn test_dated_path() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            dated_path(Path::new("out/notes_export.json"), date),
            PathBuf::from("out/notes_export_2026-03-14.json")
        );
        assert_eq!(
            dated_path(Path::new("dump"), date),
            PathBuf::from("dump_2026-03-14")
        );
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let config = AppConfig::load(&missing).unwrap();
        assert_eq!(config.data_file, "notes.json");

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = AppConfig::load(&broken).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neonotate.json");
        let mut config = AppConfig::default();
        config.export.date_suffix = true;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert!(loaded.export.date_suffix);
    }
}
