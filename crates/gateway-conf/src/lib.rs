//! Format-preserving configuration editing for the gateway console
//!
//! The console's configuration file is also hand-edited: comments, key
//! ordering, and unrelated formatting must survive programmatic edits
//! untouched. This crate therefore never round-trips the document through a
//! parse tree. It works on a line/indentation model instead, rewriting only
//! the lines a requested edit actually touches.
//!
//! Operations: path-addressed patches and queries ([`Document::apply`],
//! [`Document::get_scalar`] and friends), whole-block template merging
//! ([`Document::merge_template`]), and commenting one sequence entry in and
//! out ([`Document::disable_entry`] / [`Document::enable_entry`]).

pub mod block;
pub mod document;
pub mod error;
pub mod line;
pub mod patch;
pub mod path;

mod format;
mod query;
mod template;
mod toggle;

pub use block::Block;
pub use document::{Document, Newline};
pub use error::{Error, Result};
pub use patch::{Edit, EditKind, OrderHints, Patch};
pub use path::KeyPath;
