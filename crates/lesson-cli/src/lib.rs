//! # lesson-cli — Lesson Checker Front End
//!
//! Everything between the command line and the validation engine:
//!
//! - [`config`] — clap arguments resolved into a [`config::CheckConfig`].
//! - [`loader`] — document discovery, front matter, external Markdown
//!   parser.
//! - [`check`] — a full run producing the report and its
//!   [`Outcome`](lesson_validate::Outcome).
//!
//! ## Crate Policy
//!
//! - Fatal problems are `anyhow` errors carrying the typed cause
//!   ([`config::ConfigError`], [`loader::LoadError`],
//!   [`lesson_validate::RuleError`]).
//! - The report goes to the writer handed to [`check::run_check`]; logs go
//!   through `tracing`.

pub mod check;
pub mod config;
pub mod loader;
