//! # lesson-validate — Lesson Validation Engine
//!
//! Checks a set of loaded lesson documents against the fixed lesson
//! template and records every problem in a single [`Reporter`] rather than
//! stopping at the first one.
//!
//! ## Components
//!
//! - [`matcher`] — declarative pattern search over document trees.
//! - [`schema`] — front-matter field/type schemas, selected for episodes
//!   by the `layout` discriminant.
//! - [`dispatch`] — ordered, first-match-wins mapping from path to
//!   document [`Variant`].
//! - [`fileset`] — required files, episode filenames, episode numbering.
//! - [`reporter`] — violation sink; the only place a run's outcome is
//!   decided.
//! - [`checker`] — per-document checks and the whole-lesson driver
//!   [`LessonChecker`].
//! - [`catalogue`] — immutable rule data (known classes, required files,
//!   line limit).
//!
//! ## Crate Policy
//!
//! - Depends only on `lesson-core` internally.
//! - Single-threaded: documents are checked in the order given and the
//!   reporter is borrowed mutably by one checker at a time.
//! - Content problems are violations, never `Err`. Errors are reserved for
//!   start-up failures (a rule pattern that does not compile).

pub mod catalogue;
pub mod checker;
pub mod dispatch;
pub mod error;
pub mod fileset;
pub mod matcher;
pub mod reporter;
pub mod schema;

pub use checker::{check_config, check_document, CheckSettings, LessonChecker, CONFIG_FILE};
pub use dispatch::{Dispatcher, MetadataPolicy, Variant};
pub use error::RuleError;
pub use fileset::{check_numbering, FileSetValidator};
pub use matcher::{find_all, Pattern};
pub use reporter::{Outcome, Reporter};
pub use schema::{check_episode_metadata, check_fields, MetadataSchema, BREAK_SCHEMA, TEACHING_SCHEMA};
