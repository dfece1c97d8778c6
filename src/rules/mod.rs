//! Text rewrite rules for drizzle-fix.
//!
//! This module handles:
//! - Ordered regex rules with template or computed replacements
//! - The built-in `db.query.*` migration rule set

pub mod drizzle;
pub mod rewriter;

pub use drizzle::drizzle_rules;
pub use rewriter::{Replacement, Rewrite, Rule, RuleHit, RuleSet};
