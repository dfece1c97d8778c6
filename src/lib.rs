//! drizzle-fix - rewrites `db.query.*` lookups into explicit Drizzle ORM
//! `db.select()` chains.
//!
//! This library provides the core functionality for drizzle-fix, including:
//! - The ordered regex rule set and its pure text transform
//! - Rewriting files in place only when their content changes
//! - Batch runs over a target list with per-file error isolation
//! - Target list configuration and discovery
//!
//! # Example
//!
//! ```
//! use drizzle_fix::rules::drizzle_rules;
//!
//! let rules = drizzle_rules().unwrap();
//! assert_eq!(
//!     rules.transform("db.query.posts.findMany()"),
//!     "db.select().from(posts)"
//! );
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod rules;
pub mod telemetry;

pub use error::{FixError, Result};
