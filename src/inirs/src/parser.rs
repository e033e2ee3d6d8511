// inirs/src/parser.rs

//! Line-oriented parser that records where every assignment was found.
//!
//! The parser keeps a running [`Section`] while it reads. A section header
//! flushes it into the [`Document`] and starts a new one; lines containing
//! `=` are assigned into whatever section is currently open. Nothing is ever
//! rejected: a header without `]` or a line without `=` is counted and
//! otherwise ignored.

use crate::document::{Document, Section};
use crate::error::{IniError, Result};
use crate::filter::{filter_line, LineKind};
use log::{debug, trace};
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::Path;

/// Read one physical line, terminator included, into `buf`.
///
/// Returns `false` at end of input. Bytes are kept as they are so that the
/// rewrite engine can copy lines it does not touch byte-for-byte.
pub(crate) fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

/// Parser over any buffered reader.
pub struct Parser<R> {
    reader: R,
    line: usize,
    current: Section,
    document: Document,
}

impl<R: BufRead> Parser<R> {
    /// Create a new parser for the given input.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            current: Section::new(""),
            document: Document::new(),
        }
    }

    /// Parse the whole input and return the document.
    pub fn parse(mut self) -> io::Result<Document> {
        let mut buf = Vec::new();

        while read_raw_line(&mut self.reader, &mut buf)? {
            self.line += 1;
            let text = String::from_utf8_lossy(&buf);
            self.parse_line(&text);
        }

        // The last section has no terminating header, so its header line is dropped.
        if !self.current.is_empty() {
            let mut last = mem::take(&mut self.current);
            let name = last.name().to_string();
            last.set_name(name, None);
            self.document.add_section(last);
        }

        debug!(
            "Parsed {} lines into {} sections",
            self.line,
            self.document.len()
        );
        Ok(self.document)
    }

    fn parse_line(&mut self, raw: &str) {
        let line = filter_line(raw);
        if !line.keep() {
            return;
        }

        if line.kind == LineKind::SectionHeader {
            let Some(close) = line.text.find(']') else {
                trace!("Line {}: section header without ']', skipped", self.line);
                return;
            };
            let name = &line.text[1..close];
            let next = Section::with_line(name, self.line);
            let previous = mem::replace(&mut self.current, next);
            if !previous.is_default() || !previous.is_empty() {
                self.document.add_section(previous);
            }
        }

        // Header lines are not exempt: `[a]b=c` assigns `[a]b` inside `a`.
        if let Some((key, value)) = line.text.split_once('=') {
            self.current.set_value(key, value, Some(self.line));
        }
    }
}

/// Parse INI text held in memory.
pub fn parse_str(content: &str) -> Document {
    // Reading from a byte slice cannot fail.
    Parser::new(content.as_bytes()).parse().unwrap_or_default()
}

/// Open `path` for reading, creating it if missing, and parse it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let file = fs_err::OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| IniError::io(path, e))?;

    Parser::new(BufReader::new(file))
        .parse()
        .map_err(|e| IniError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_numbers_count_discarded_lines() {
        let doc = parse_str("; comment\n\n[rtsp]\n# other\nport = 554\n\nip=127.0.0.1\n");

        assert_eq!(doc.get_line_in("rtsp", "port"), 5);
        assert_eq!(doc.get_line_in("rtsp", "ip"), 7);
        assert_eq!(doc.get_value("rtsp", "port"), "554");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let doc = parse_str("[a]\nk=1\nk=2\n");
        assert_eq!(doc.get_value("a", "k"), "2");
        assert_eq!(doc.get_line_in("a", "k"), 3);
    }

    #[test]
    fn test_default_section() {
        let doc = parse_str("title=inirs\nlicense=MIT\n[head]\nx=1\n");
        assert_eq!(doc.get_value("", "title"), "inirs");
        assert_eq!(doc.get_line("license"), 2);
        assert_eq!(
            doc.list_section_names(),
            vec!["".to_string(), "head".to_string()]
        );
    }

    #[test]
    fn test_no_leading_content_hides_default() {
        let doc = parse_str("[rtsp]\nport=554\n");
        assert_eq!(doc.list_section_names(), vec!["rtsp".to_string()]);
        assert!(!doc.section_exists(""));
    }

    #[test]
    fn test_unterminated_header_is_ignored() {
        let doc = parse_str("[rtsp]\nport=554\n[broken\nip=1.2.3.4\n");
        assert!(!doc.section_exists("broken"));
        // Still counted as a line, and still inside [rtsp].
        assert_eq!(doc.get_line_in("rtsp", "ip"), 4);
    }

    #[test]
    fn test_trailing_text_after_header() {
        let doc = parse_str("[rtsp] ; note\nport=554\n");
        assert_eq!(doc.get_value("rtsp", "port"), "554");
    }

    #[test]
    fn test_empty_named_section_keeps_header_line() {
        let doc = parse_str("[empty]\n[rtsp]\nport=554\n");
        let empty = doc.get_section("empty").expect("empty section is flushed");
        assert_eq!(empty.line(), Some(1));
        assert_eq!(empty.get_end_line(), Some(1));
    }

    #[test]
    fn test_last_section_has_no_header_line() {
        let doc = parse_str("[a]\nk=1\n[b]\nk=2\n");
        assert_eq!(doc.section("a").line(), Some(1));
        assert_eq!(doc.section("b").line(), None);
        assert_eq!(doc.section("b").get_end_line(), Some(4));
    }

    #[test]
    fn test_trailing_empty_section_is_dropped() {
        let doc = parse_str("[a]\nk=1\n[math]\n");
        assert!(!doc.section_exists("math"));
    }

    #[test]
    fn test_duplicate_sections_merge() {
        let doc = parse_str("[a]\nk=1\nx=9\n[b]\ny=2\n[a]\nk=3\n");
        assert_eq!(doc.get_value("a", "k"), "3");
        assert_eq!(doc.get_line_in("a", "k"), 7);
        assert_eq!(doc.get_value("a", "x"), "9");
        assert_eq!(doc.section("a").line(), Some(1));
    }

    #[test]
    fn test_split_at_first_equals_and_strip_whitespace() {
        let doc = parse_str("[s]\nurl = a=b c\n");
        assert_eq!(doc.get_value("s", "url"), "a=bc");
    }

    #[test]
    fn test_header_line_with_assignment() {
        let doc = parse_str("[a]b=c\n");
        assert_eq!(doc.get_value("a", "[a]b"), "c");
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let doc = parse_str("[a]\r\nk=1\r\nj=2");
        assert_eq!(doc.get_value("a", "k"), "1");
        assert_eq!(doc.get_value("a", "j"), "2");
        assert_eq!(doc.get_line_in("a", "j"), 3);
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_str("");
        assert!(doc.is_empty());
        assert!(doc.list_section_names().is_empty());
    }
}
