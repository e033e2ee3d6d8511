// inirs/src/document/section.rs

//! Section data structure and operations.

use super::entry::{line_number, Entry};
use crate::filter::strip_blanks;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named group of entries, ordered by key.
///
/// The implicit default section has an empty name and no header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    /// Line of the `[name]` header.
    line: Option<usize>,
    entries: BTreeMap<String, Entry>,
}

impl Section {
    /// Create an empty section with no header line.
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            line: None,
            entries: BTreeMap::new(),
        }
    }

    /// Create an empty section named `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            line: None,
            entries: BTreeMap::new(),
        }
    }

    /// Create an empty section whose header sits on `line`.
    pub fn with_line<S: Into<String>>(name: S, line: usize) -> Self {
        Self {
            name: name.into(),
            line: Some(line),
            entries: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the implicit default section.
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    /// Line of the section header, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S, line: Option<usize>) {
        self.name = name.into();
        self.line = line;
    }

    /// Set a key's value and the line it was found on, replacing any earlier assignment.
    pub fn set_value<K, V>(&mut self, key: K, value: V, line: Option<usize>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .entry(key.into())
            .or_default()
            .update(value, line);
    }

    /// Get an entry by key. Spaces and tabs in `key` are ignored.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(&*strip_blanks(key))
    }

    /// Get a value by key, or an empty string if the key is missing.
    pub fn get_value(&self, key: &str) -> &str {
        self.get(key).map_or("", Entry::value)
    }

    /// Get the line of a key, or `-1` if the key is missing.
    pub fn get_line(&self, key: &str) -> i64 {
        self.get(key).map_or(-1, Entry::line_number)
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The last line this section occupies in the file.
    ///
    /// That is the highest entry line, or the header line for a named
    /// section without entries. `None` when neither is known.
    pub fn get_end_line(&self) -> Option<usize> {
        if self.entries.is_empty() && !self.is_default() {
            return self.line;
        }
        self.entries.values().filter_map(Entry::line).max()
    }

    /// [`get_end_line`](Self::get_end_line) with `-1` for unknown.
    pub fn get_end_line_number(&self) -> i64 {
        line_number(self.get_end_line())
    }

    /// Merge another section's entries into this one; incoming keys win.
    pub fn append(&mut self, other: Section) {
        self.entries.extend(other.entries);
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.line = None;
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    /// Get all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn get_i32(&self, key: &str) -> Option<i32> {
        parse_leading_int(self.get(key)?.value())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        parse_leading_float(self.get(key)?.value())
    }

    /// Value as an integer, `0` if missing or not numeric.
    ///
    /// Only the leading numeric part is read, so `3.14` gives `3`.
    pub fn to_int(&self, key: &str) -> i32 {
        self.get_i32(key).unwrap_or_else(|| {
            debug!(
                "Cannot convert [{}] {}='{}' to int, using 0",
                self.name,
                key,
                self.get_value(key)
            );
            0
        })
    }

    /// Value as a double, `0.0` if missing or not numeric.
    pub fn to_double(&self, key: &str) -> f64 {
        self.get_f64(key).unwrap_or_else(|| {
            debug!(
                "Cannot convert [{}] {}='{}' to double, using 0.0",
                self.name,
                key,
                self.get_value(key)
            );
            0.0
        })
    }

    /// Value as an owned string, empty if missing.
    pub fn to_string_value(&self, key: &str) -> String {
        self.get_value(key).to_string()
    }
}

/// Parse the longest leading `[+-]digits` prefix of `s`.
fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(&['+', '-'][..]));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the longest leading decimal floating point prefix of `s`.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(&['+', '-'][..]));

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}
