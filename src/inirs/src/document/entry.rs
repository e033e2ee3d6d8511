// inirs/src/document/entry.rs

//! A single `key=value` assignment and where it was found.

use serde::{Deserialize, Serialize};

/// Line number reported for entries and sections that were never located in a file.
pub const UNASSIGNED_LINE: i64 = -1;

/// The value of a key plus the 1-based line its assignment last appeared on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    value: String,
    line: Option<usize>,
}

impl Entry {
    /// Create an entry that has not been located in a file yet.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            line: None,
        }
    }

    /// Create an entry found on `line`.
    pub fn at_line<S: Into<String>>(value: S, line: usize) -> Self {
        Self {
            value: value.into(),
            line: Some(line),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// The line as a signed number, [`UNASSIGNED_LINE`] when unknown.
    pub fn line_number(&self) -> i64 {
        line_number(self.line)
    }

    /// Overwrite both the value and its line.
    pub fn update<S: Into<String>>(&mut self, value: S, line: Option<usize>) {
        self.value = value.into();
        self.line = line;
    }
}

pub(crate) fn line_number(line: Option<usize>) -> i64 {
    line.map_or(UNASSIGNED_LINE, |l| l as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_sentinel() {
        let entry = Entry::new("554");
        assert_eq!(entry.line(), None);
        assert_eq!(entry.line_number(), UNASSIGNED_LINE);

        let entry = Entry::at_line("554", 2);
        assert_eq!(entry.line_number(), 2);
    }

    #[test]
    fn test_update_in_place() {
        let mut entry = Entry::at_line("554", 2);
        entry.update("555", Some(7));
        assert_eq!(entry.value(), "555");
        assert_eq!(entry.line(), Some(7));
    }
}
