//! # SQL Text Scanning
//!
//! Seed files are never parsed as SQL. The executor only needs two things
//! from the raw text: comments removed (so commented-out statements neither
//! run nor trip the danger check) and the text cut at top-level semicolons.
//! Both scanners track quoted literals so that `--`, `/*` and `;` inside a
//! string value are treated as data.

pub mod comments;
pub mod split;

pub use comments::strip_comments;
pub use split::{split_statements, Statement};
