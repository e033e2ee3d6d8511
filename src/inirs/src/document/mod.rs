// inirs/src/document/mod.rs

//! In-memory view of an INI file.
//!
//! A [`Document`] owns [`Section`]s, which own [`Entry`]s. Every entry
//! remembers the line it was read from; the rewrite engine uses those line
//! numbers to patch the file in place. The model itself is never written
//! back to disk.

pub mod core;
pub mod entry;
pub mod section;

pub use self::core::Document;
pub use entry::{Entry, UNASSIGNED_LINE};
pub use section::Section;
