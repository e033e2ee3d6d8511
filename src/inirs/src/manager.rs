// inirs/src/manager.rs

//! A session over one INI file.

use crate::document::{Document, Section};
use crate::error::Result;
use crate::parser;
use crate::rewrite::{self, Edit};
use log::warn;
use std::fmt::Display;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// Owns the path of a configuration file and the last parse of it.
///
/// No file handle is kept between calls. Every mutation re-reads the file,
/// rewrites it, and parses it again, so [`document`](Self::document) always
/// matches what is on disk after a successful call.
#[derive(Debug, Clone)]
pub struct IniManager {
    path: PathBuf,
    document: Document,
}

impl IniManager {
    /// Start a session on `path` and parse it.
    ///
    /// A missing file is created empty. If the file cannot be opened the
    /// failure is logged and the session starts with an empty document.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let mut manager = Self {
            path: path.into(),
            document: Document::new(),
        };
        // Already logged by parse().
        let _ = manager.parse();
        manager
    }

    /// Like [`new`](Self::new), but fail if the file cannot be read.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let mut manager = Self {
            path: path.into(),
            document: Document::new(),
        };
        manager.parse()?;
        Ok(manager)
    }

    /// Re-read the file, replacing the in-memory document.
    ///
    /// On failure the document is left empty.
    pub fn parse(&mut self) -> Result<()> {
        self.document.clear();
        match parser::parse_file(&self.path) {
            Ok(document) => {
                self.document = document;
                Ok(())
            }
            Err(err) => {
                warn!("Failed to open the INI file for parsing: {}", err);
                Err(err)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get a section by name, or an empty section if it does not exist.
    pub fn section(&self, name: &str) -> &Section {
        self.document.section(name)
    }

    pub fn section_exists(&self, name: &str) -> bool {
        self.document.section_exists(name)
    }

    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.document.key_exists(section, key)
    }

    pub fn get_value(&self, section: &str, key: &str) -> &str {
        self.document.get_value(section, key)
    }

    /// Line of `key` in the default section, `-1` if missing.
    pub fn get_line(&self, key: &str) -> i64 {
        self.document.get_line(key)
    }

    /// Line of `key` in `section`, `-1` if missing.
    pub fn get_line_in(&self, section: &str, key: &str) -> i64 {
        self.document.get_line_in(section, key)
    }

    pub fn list_section_names(&self) -> Vec<String> {
        self.document.list_section_names()
    }

    /// Set `key=value` in `section`, writing the change to disk.
    pub fn modify(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        self.apply(Edit::new(section, key, value))
    }

    /// Set `key=value` in `section` with a comment line above it.
    ///
    /// A non-empty comment replaces a comment line directly above an existing key.
    pub fn modify_with_comment(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        comment: &str,
    ) -> Result<()> {
        self.apply(Edit::new(section, key, value).with_comment(comment))
    }

    /// Set a value of any displayable type, such as an integer or a float.
    pub fn modify_value<T: Display>(
        &mut self,
        section: &str,
        key: &str,
        value: T,
        comment: &str,
    ) -> Result<()> {
        let value = value.to_string();
        self.modify_with_comment(section, key, &value, comment)
    }

    /// Replace the comment above `key`, keeping its current value.
    ///
    /// The value is taken from the file as it is now, not from the last parse.
    pub fn modify_comment(&mut self, section: &str, key: &str, comment: &str) -> Result<()> {
        self.parse()?;
        let value = self.get_value(section, key).to_string();
        self.modify_with_comment(section, key, &value, comment)
    }

    fn apply(&mut self, edit: Edit<'_>) -> Result<()> {
        match rewrite::modify_file(&self.path, &edit) {
            Ok(document) => {
                self.document = document;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "Failed to modify [{}] {} in {}: {}",
                    edit.section,
                    edit.key,
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl Index<&str> for IniManager {
    type Output = Section;

    fn index(&self, name: &str) -> &Section {
        self.section(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        let manager = IniManager::new(&path);
        assert!(path.exists());
        assert!(manager.document().is_empty());
        assert!(manager.list_section_names().is_empty());
    }

    #[test]
    fn test_new_tolerates_unreadable_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("config.ini");

        let manager = IniManager::new(&path);
        assert!(manager.document().is_empty());
        assert!(IniManager::open(&path).is_err());
    }

    #[test]
    fn test_index_by_section() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        fs_err::write(&path, "[rtsp]\nport=554\n").unwrap();

        let manager = IniManager::open(&path).unwrap();
        assert_eq!(manager["rtsp"].get_value("port"), "554");
        assert_eq!(manager["rtsp"].to_int("port"), 554);
        assert!(manager["missing"].is_empty());
    }

    #[test]
    fn test_modify_value_formats_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        fs_err::write(&path, "[rtsp]\nport=554\n").unwrap();

        let mut manager = IniManager::open(&path).unwrap();
        manager.modify_value("rtsp", "port", 8554, "").unwrap();
        manager.modify_value("math", "PI", 3.25, "").unwrap();

        assert_eq!(manager["rtsp"].to_int("port"), 8554);
        assert_eq!(manager["math"].to_double("PI"), 3.25);
    }

    #[test]
    fn test_failed_modify_keeps_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        fs_err::write(&path, "[rtsp]\nport=554\n").unwrap();

        let mut manager = IniManager::open(&path).unwrap();
        assert!(manager.modify("rtsp", "port", "").is_err());
        assert_eq!(manager.get_value("rtsp", "port"), "554");
    }
}
