//! The five `db.query.*` to `db.select()` rewrite rules.
//!
//! Rules run in this order:
//!
//! | Rule                | Source shape                                           | Target shape                                       |
//! |---------------------|--------------------------------------------------------|----------------------------------------------------|
//! | `find-first`        | `db.query.T.findFirst({ where: C })`                   | `db.select().from(T).where(C).limit(1)`            |
//! | `find-first-and`    | `db.query.T.findFirst({ where: and(..) })`             | `db.select().from(T).where(and(..)).limit(1)`      |
//! | `find-many-where`   | `db.query.T.findMany({ where: C[, limit: N] })`        | `db.select().from(T).where(C)`                     |
//! | `find-many-ordered` | `db.query.T.findMany({ where: C, orderBy: [O][, limit: N] })` | `db.select().from(T).where(C).orderBy(O)[.limit(N)]` |
//! | `find-many-all`     | `db.query.T.findMany()`                                | `db.select().from(T)`                              |

use crate::error::Result;
use crate::rules::rewriter::{Replacement, Rule, RuleSet};
use regex::Captures;

pub const FIND_FIRST: &str = "find-first";
pub const FIND_FIRST_AND: &str = "find-first-and";
pub const FIND_MANY_WHERE: &str = "find-many-where";
pub const FIND_MANY_ORDERED: &str = "find-many-ordered";
pub const FIND_MANY_ALL: &str = "find-many-all";

/// How deep parentheses may nest inside a `findMany` condition.
const CONDITION_NESTING: usize = 3;

/// Build the ordered Drizzle migration rule set.
pub fn drizzle_rules() -> Result<RuleSet> {
	let condition = list_condition();

	let rules = vec![
		Rule::new(
			FIND_FIRST,
			r"db\.query\.(\w+)\.findFirst\(\{\s*where:\s*([^{}]+?)\s*,?\s*\}\)",
			Replacement::Computed(find_first),
		)?,
		Rule::new(
			FIND_FIRST_AND,
			r"db\.query\.(\w+)\.findFirst\(\{\s*where:\s*(and\([^{}]*?\))\s*,?\s*\}\)",
			Replacement::Template("db.select().from(${1}).where(${2}).limit(1)"),
		)?,
		Rule::new(
			FIND_MANY_WHERE,
			&format!(
				r"db\.query\.(\w+)\.findMany\(\{{\s*where:\s*({condition})\s*(?:,\s*limit:\s*([^,{{}}]+?)\s*)?,?\s*\}}\)"
			),
			Replacement::Computed(find_many_where),
		)?,
		Rule::new(
			FIND_MANY_ORDERED,
			&format!(
				r"db\.query\.(\w+)\.findMany\(\{{\s*where:\s*({condition})\s*,\s*orderBy:\s*\[([^\]]+)\](?:\s*,\s*limit:\s*(\d+))?\s*,?\s*\}}\)"
			),
			Replacement::Computed(find_many_ordered),
		)?,
		Rule::new(
			FIND_MANY_ALL,
			r"db\.query\.(\w+)\.findMany\(\)",
			Replacement::Template("db.select().from(${1})"),
		)?,
	];

	Ok(RuleSet::new(rules))
}

/// A condition with no top-level comma or brace. Commas are allowed inside
/// balanced parentheses.
fn list_condition() -> String {
	format!(r"(?:[^,(){{}}]|{})+?", paren_group(CONDITION_NESTING))
}

/// Balanced parentheses nested at most `depth` levels below the outer pair.
fn paren_group(depth: usize) -> String {
	if depth == 0 {
		return r"\([^(){}]*\)".to_string();
	}
	format!(r"\((?:[^(){{}}]|{})*\)", paren_group(depth - 1))
}

/// `and(...)` conditions are left for the compound rule.
fn find_first(caps: &Captures<'_>) -> Option<String> {
	let condition = &caps[2];
	if is_compound(condition) {
		return None;
	}
	Some(format!(
		"db.select().from({}).where({}).limit(1)",
		&caps[1], condition
	))
}

fn is_compound(condition: &str) -> bool {
	condition.starts_with("and(") && condition.ends_with(')')
}

fn find_many_where(caps: &Captures<'_>) -> Option<String> {
	let table = &caps[1];
	if let Some(limit) = caps.get(3) {
		tracing::warn!(
			table,
			limit = limit.as_str(),
			"Dropping limit clause from findMany without orderBy"
		);
	}
	Some(format!("db.select().from({}).where({})", table, &caps[2]))
}

fn find_many_ordered(caps: &Captures<'_>) -> Option<String> {
	let mut out = format!(
		"db.select().from({}).where({}).orderBy({})",
		&caps[1], &caps[2], &caps[3]
	);
	if let Some(limit) = caps.get(4) {
		out.push_str(&format!(".limit({})", limit.as_str()));
	}
	Some(out)
}
