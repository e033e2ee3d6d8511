// inirs/src/document/core.rs

//! Core Document struct and basic operations.

use super::section::Section;
use crate::filter::strip_blanks;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

static EMPTY_SECTION: Section = Section::empty();

/// All sections of an INI file, keyed by name.
///
/// The default section lives under the empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    sections: BTreeMap<String, Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, merging it into an existing one with the same name.
    pub fn add_section(&mut self, section: Section) {
        if let Some(existing) = self.sections.get_mut(section.name()) {
            existing.append(section);
        } else {
            self.sections.insert(section.name().to_string(), section);
        }
    }

    /// Remove a section by name.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    /// Whether a section exists. Spaces and tabs in `name` are ignored.
    pub fn section_exists(&self, name: &str) -> bool {
        self.get_section(name).is_some()
    }

    /// Check if `key` exists in section `section`.
    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.get_section(section)
            .is_some_and(|s| s.key_exists(key))
    }

    /// Get a section by name, compared the way the parser stores it.
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&*strip_blanks(name))
    }

    /// Get a section by name, or an empty section if it does not exist.
    pub fn section(&self, name: &str) -> &Section {
        self.get_section(name).unwrap_or(&EMPTY_SECTION)
    }

    /// Get a value, or an empty string if the section or key is missing.
    pub fn get_value(&self, section: &str, key: &str) -> &str {
        self.section(section).get_value(key)
    }

    /// Line of `key` in the default section, `-1` if missing.
    pub fn get_line(&self, key: &str) -> i64 {
        self.get_line_in("", key)
    }

    /// Line of `key` in `section`, `-1` if missing.
    pub fn get_line_in(&self, section: &str, key: &str) -> i64 {
        self.section(section).get_line(key)
    }

    /// Names of all sections in order.
    ///
    /// The default section is left out while it holds no entries.
    pub fn list_section_names(&self) -> Vec<String> {
        self.sections
            .values()
            .filter(|s| !(s.is_default() && s.is_empty()))
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Get an iterator over all sections.
    pub fn sections(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.sections.iter()
    }

    /// Number of sections, including an empty default section if present.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }
}

impl Index<&str> for Document {
    type Output = Section;

    fn index(&self, name: &str) -> &Section {
        self.section(name)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, section) in &self.sections {
            if !name.is_empty() {
                writeln!(f, "[{}]", name)?;
            }
            for (key, entry) in section.entries() {
                writeln!(f, "{}={}", key, entry.value())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, line: usize, entries: &[(&str, &str, usize)]) -> Section {
        let mut section = Section::with_line(name, line);
        for (k, v, l) in entries {
            section.set_value(*k, *v, Some(*l));
        }
        section
    }

    #[test]
    fn test_add_section_merges_duplicates() {
        let mut doc = Document::new();
        doc.add_section(section("rtsp", 1, &[("port", "554", 2), ("ip", "1.1.1.1", 3)]));
        doc.add_section(section("rtsp", 8, &[("port", "555", 9)]));

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_value("rtsp", "port"), "555");
        assert_eq!(doc.get_line_in("rtsp", "port"), 9);
        assert_eq!(doc.get_value("rtsp", "ip"), "1.1.1.1");
        assert_eq!(doc.section("rtsp").line(), Some(1));
    }

    #[test]
    fn test_missing_lookups() {
        let doc = Document::new();
        assert!(!doc.section_exists("rtsp"));
        assert!(!doc.key_exists("rtsp", "port"));
        assert_eq!(doc.get_value("rtsp", "port"), "");
        assert_eq!(doc.get_line("port"), -1);
        assert_eq!(doc.get_line_in("rtsp", "port"), -1);
        assert!(doc.section("rtsp").is_empty());
    }

    #[test]
    fn test_default_section_line_lookup() {
        let mut doc = Document::new();
        let mut default = Section::new("");
        default.set_value("title", "inirs", Some(2));
        doc.add_section(default);

        assert_eq!(doc.get_line("title"), 2);
        assert_eq!(doc.get_line_in("", "title"), 2);
    }

    #[test]
    fn test_list_section_names_hides_empty_default() {
        let mut doc = Document::new();
        doc.add_section(Section::new(""));
        doc.add_section(section("rtsp", 1, &[("port", "554", 2)]));
        assert_eq!(doc.list_section_names(), vec!["rtsp".to_string()]);

        let mut default = Section::new("");
        default.set_value("key0", "x", Some(1));
        doc.add_section(default);
        assert_eq!(
            doc.list_section_names(),
            vec!["".to_string(), "rtsp".to_string()]
        );
    }

    #[test]
    fn test_lookups_ignore_blanks() {
        let mut doc = Document::new();
        doc.add_section(section("serveroptions", 1, &[("listenport", "80", 2)]));

        assert!(doc.section_exists("server options"));
        assert!(doc.key_exists("server\toptions", "listen port"));
        assert_eq!(doc.get_value("server options", "listen port"), "80");
        assert_eq!(doc.get_line_in(" server options ", "listen port"), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut doc = Document::new();
        doc.add_section(section("a", 1, &[("k", "v", 2)]));
        doc.add_section(section("b", 3, &[("k", "v", 4)]));

        assert!(doc.remove_section("a").is_some());
        assert!(doc.remove_section("a").is_none());
        assert_eq!(doc.len(), 1);

        doc.clear();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_display() {
        let mut doc = Document::new();
        doc.add_section(section("rtsp", 1, &[("port", "554", 2)]));
        assert_eq!(doc.to_string(), "[rtsp]\nport=554\n");
    }
}
