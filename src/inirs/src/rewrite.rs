// inirs/src/rewrite.rs

//! Rewrite engine: single-key edits applied as line-level patches.
//!
//! An edit never re-serializes the [`Document`]. The document is only used to
//! decide *where* the new `key=value` block goes; the output is then produced
//! by streaming the original file line by line and splicing the block in at
//! that position. Every line the edit does not target is copied byte for
//! byte, terminator included.

use crate::document::Document;
use crate::error::{IniError, Result};
use crate::filter::{is_comment, strip_blanks};
use crate::parser::{self, read_raw_line};
use log::{debug, info};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Blank lines written before a new section header.
const SECTION_SEPARATOR: &str = "\n\n";

/// A single `key=value` update, optionally with a comment line above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
    pub comment: &'a str,
}

impl<'a> Edit<'a> {
    pub fn new(section: &'a str, key: &'a str, value: &'a str) -> Self {
        Self {
            section,
            key,
            value,
            comment: "",
        }
    }

    /// Attach a comment. An empty comment leaves existing comments alone.
    pub fn with_comment(mut self, comment: &'a str) -> Self {
        self.comment = comment;
        self
    }

    /// Reject empty keys and values.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() || self.value.is_empty() {
            return Err(IniError::invalid_parameter(self.key, self.value));
        }
        Ok(())
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// The text that replaces or is inserted for this edit.
    ///
    /// `key=value\n`, preceded by the comment on its own line. A comment that
    /// does not already start with `;` gets one.
    pub fn block(&self) -> String {
        let mut block = String::new();
        if self.has_comment() {
            if !self.comment.starts_with(';') {
                block.push(';');
            }
            block.push_str(self.comment);
            block.push('\n');
        }
        block.push_str(self.key);
        block.push('=');
        block.push_str(self.value);
        block.push('\n');
        block
    }
}

/// Where an edit's block goes in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The key exists: replace its line, optionally dropping the comment line above.
    Replace { line: usize, drop_comment: bool },
    /// The section exists without the key: insert after the section's last line.
    InsertAfter { line: Option<usize> },
    /// Default section: write at the top of the file, never with a header.
    Prepend,
    /// New section: write at the end of the file.
    Append { header: Option<String> },
}

/// Whether `name` can be written as a `[name]` header line.
///
/// Names that would read back as a header or an assignment, or that are
/// blank once spaces and tabs are removed, are written without a header.
pub fn is_valid_section_name(name: &str) -> bool {
    !strip_blanks(name).is_empty() && !name.contains(&['[', ']', '='][..])
}

/// The separator and header written in front of a new section, if any.
fn section_header(document: &Document, name: &str) -> Option<String> {
    if !is_valid_section_name(name) {
        return None;
    }
    let separator = if document.is_empty() {
        ""
    } else {
        SECTION_SEPARATOR
    };
    Some(format!("{}[{}]\n", separator, name))
}

/// Decide where `edit` goes, given the current state of the file.
pub fn plan(document: &Document, edit: &Edit<'_>) -> Placement {
    if let Some(section) = document.get_section(edit.section) {
        if let Some(line) = section.get(edit.key).and_then(|entry| entry.line()) {
            return Placement::Replace {
                line,
                drop_comment: edit.has_comment(),
            };
        }
        return Placement::InsertAfter {
            line: section.get_end_line(),
        };
    }

    // Nothing parsed yet: the first key goes into the default section.
    if document.is_empty() || strip_blanks(edit.section).is_empty() {
        return Placement::Prepend;
    }
    Placement::Append {
        header: section_header(document, edit.section),
    }
}

/// Stream `reader` into `writer`, placing `block` as `placement` says.
pub fn apply<R, W>(
    reader: &mut R,
    writer: &mut W,
    placement: &Placement,
    block: &str,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut written = false;
    // An empty file counts as terminated.
    let mut terminated = true;

    if *placement == Placement::Prepend {
        writer.write_all(block.as_bytes())?;
        written = true;
    }

    // The comment line right above a replaced key.
    let mut held_comment: Option<Vec<u8>> = None;

    while read_raw_line(reader, &mut buf)? {
        line_no += 1;

        match *placement {
            Placement::Replace { line, drop_comment } => {
                if drop_comment && line_no + 1 == line {
                    let text = String::from_utf8_lossy(&buf);
                    if is_comment(&text) {
                        held_comment = Some(buf.clone());
                        continue;
                    }
                }
                if line_no == line {
                    held_comment = None;
                    writer.write_all(block.as_bytes())?;
                    written = true;
                    terminated = true;
                    continue;
                }
            }
            Placement::InsertAfter { line: Some(end) } if line_no == end + 1 && !written => {
                writer.write_all(block.as_bytes())?;
                written = true;
            }
            _ => {}
        }

        writer.write_all(&buf)?;
        terminated = buf.ends_with(b"\n");
    }

    if written {
        return Ok(());
    }

    // The target line was not reached; keep what was held back.
    if let Some(comment) = held_comment {
        writer.write_all(&comment)?;
        terminated = comment.ends_with(b"\n");
    }
    if !terminated {
        writer.write_all(b"\n")?;
    }
    if let Placement::Append {
        header: Some(header),
    } = placement
    {
        writer.write_all(header.as_bytes())?;
    }
    writer.write_all(block.as_bytes())
}

/// Apply `edit` to INI text held in memory and return the patched text.
///
/// # Examples
///
/// ```
/// # use inirs::rewrite::{patch_str, Edit};
/// # fn main() -> inirs::Result<()> {
/// let patched = patch_str("[rtsp]\nport=554\n", &Edit::new("rtsp", "port", "555"))?;
/// assert_eq!(patched, "[rtsp]\nport=555\n");
/// # Ok(())
/// # }
/// ```
pub fn patch_str(content: &str, edit: &Edit<'_>) -> Result<String> {
    edit.validate()?;
    let document = parser::parse_str(content);
    let placement = plan(&document, edit);

    let mut output = Vec::with_capacity(content.len() + edit.block().len());
    apply(
        &mut content.as_bytes(),
        &mut output,
        &placement,
        &edit.block(),
    )
    .map_err(|e| IniError::io("<memory>", e))?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Apply `edit` to the file at `path` and return the re-parsed document.
///
/// The file is parsed again first, so the placement always reflects what is
/// on disk right now. The patched copy is written to a temporary file next to
/// `path` and then renamed over it; if anything fails before that rename the
/// original file is left untouched and the temporary file is removed.
pub fn modify_file<P: AsRef<Path>>(path: P, edit: &Edit<'_>) -> Result<Document> {
    let path = path.as_ref();
    edit.validate()?;

    let document = parser::parse_file(path)?;
    let placement = plan(&document, edit);
    debug!(
        "Placing [{}] {} in {}: {:?}",
        edit.section,
        edit.key,
        path.display(),
        placement
    );

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".inirs-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| IniError::io(dir, e))?;
    let temp_path = temp.path().to_path_buf();

    {
        let input = fs_err::File::open(path).map_err(|e| IniError::io(path, e))?;
        let permissions = input
            .metadata()
            .map_err(|e| IniError::io(path, e))?
            .permissions();
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| IniError::io(&temp_path, e))?;

        let mut reader = BufReader::new(input);
        let mut writer = BufWriter::new(temp.as_file_mut());
        apply(&mut reader, &mut writer, &placement, &edit.block())
            .and_then(|()| writer.flush())
            .map_err(|e| IniError::io(&temp_path, e))?;
    }

    temp.persist(path).map_err(|e| IniError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    info!(
        "Updated [{}] {}={} in {}",
        edit.section,
        edit.key,
        edit.value,
        path.display()
    );

    parser::parse_file(path)
}
