//! bmf-core: build-matrix filtering over untyped YAML documents
//!
//! This crate focuses on a small, well-factored surface:
//! - YAML decode/encode of a whole document (`document`)
//! - Null-safe, write-back views into the decoded tree (`lens`)
//! - Platform filtering of `builds` and pruning of `archives` (`filter`)
//!
pub mod document;
pub mod error;
pub mod filter;
pub mod lens;

pub use document::{
    Format, NodeKind, decode, decode_str, encode, encode_to_string, kind_of, read_document_file,
    write_document_file,
};
pub use error::{Error, Result};
pub use filter::{FilterReport, Filters, apply};
pub use lens::{Bound, Detached, Lens, Navigable, Peek};

// Re-export the tree type so callers need not depend on serde_yaml directly.
pub use serde_yaml::Value;
