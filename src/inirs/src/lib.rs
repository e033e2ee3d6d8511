// inirs/src/lib.rs

//! A Rust-native library for reading and editing INI configuration files in place.
//!
//! This library provides functionality to:
//! - Parse INI files into sections and keys, remembering the line of every assignment
//! - Update a single key by patching only the lines it touches
//! - Keep comments, blank lines and formatting of everything else intact
//! - Read values as strings, integers or floats
//!
//! ```no_run
//! fn main() -> inirs::Result<()> {
//!     let mut ini = inirs::IniManager::new("config.ini");
//!     ini.modify("rtsp", "port", "554")?;
//!     ini.modify_with_comment("rtsp", "ip", "127.0.0.1", "listen address")?;
//!     assert_eq!(ini["rtsp"].to_int("port"), 554);
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod filter;
pub mod manager;
pub mod parser;
pub mod rewrite;

#[cfg(feature = "cli")]
pub mod cli;

use std::path::Path;

pub use document::{Document, Entry, Section, UNASSIGNED_LINE};
pub use error::{IniError, Result};
pub use manager::IniManager;
pub use parser::Parser;
pub use rewrite::{Edit, Placement};

/// Parse an INI file from a file path.
///
/// A missing file is created empty, as [`IniManager`] does.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), inirs::IniError> {
///     let ini = inirs::read("config.ini")?;
///     println!("{:?}", ini.list_section_names());
///     Ok(())
/// }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Document> {
    parser::parse_file(path)
}

/// Parse INI text from a string.
///
/// # Examples
///
/// ```
/// let ini = inirs::reads("[rtsp]\nport=554\n");
/// assert_eq!(ini.get_value("rtsp", "port"), "554");
/// assert_eq!(ini.get_line_in("rtsp", "port"), 2);
/// ```
pub fn reads(content: &str) -> Document {
    parser::parse_str(content)
}

/// Set `key=value` in `section` of the file at `path` and return the updated document.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> inirs::Result<()> {
/// let ini = inirs::modify("config.ini", "math", "PI", "3.14")?;
/// assert_eq!(ini.get_value("math", "PI"), "3.14");
/// # Ok(())
/// # }
/// ```
pub fn modify<P: AsRef<Path>>(
    path: P,
    section: &str,
    key: &str,
    value: &str,
) -> Result<Document> {
    rewrite::modify_file(path, &Edit::new(section, key, value))
}

#[cfg(feature = "json")]
/// Convert a document to a JSON string.
pub fn to_json(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(IniError::from)
}

#[cfg(feature = "json")]
/// Parse a document from a JSON string.
pub fn from_json(json: &str) -> Result<Document> {
    serde_json::from_str(json).map_err(IniError::from)
}
