//! # lesson-core — Foundational Types for the Lesson Checker
//!
//! Defines the data model shared by the validation engine and the
//! command-line front end. Every other crate in the workspace depends on
//! `lesson-core`; it depends on nothing internal.
//!
//! ## Key Types
//!
//! - [`Document`] — one loaded lesson file: path, optional front matter,
//!   raw body lines, and the structural tree produced by the external
//!   Markdown parser.
//! - [`Node`] — one element of a document tree. Trees are owned and
//!   acyclic by construction: children live inside their parent.
//! - [`Metadata`] — decoded front matter, with [`ValueType`] giving the
//!   semantic type of each value (text, integer, list, ...).
//! - [`Violation`] — one recorded rule failure with an optional
//!   [`Location`] and a rendered message.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lesson-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Documents are read-only once loaded; nothing here mutates after
//!   construction except the builder helpers used by loaders and tests.

pub mod document;
pub mod error;
pub mod metadata;
pub mod violation;

pub use document::{Document, Line, Node};
pub use error::MetadataError;
pub use metadata::{render_value, Metadata, ValueType};
pub use violation::{Location, Violation, ViolationKind};
