use crate::error::{FixError, Result};
use regex::{Captures, Regex};

/// How a matched call is turned into its replacement text.
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
	/// Fixed template expanded with `${N}` capture references.
	Template(&'static str),

	/// Replacement computed from the captures. Returning `None` leaves the
	/// matched text untouched so a later rule can handle it.
	Computed(fn(&Captures<'_>) -> Option<String>),
}

/// A single pattern-to-replacement rule applied over the full text.
#[derive(Debug)]
pub struct Rule {
	/// Short name used in logs and hit counts.
	pub name: &'static str,

	/// Compiled match pattern.
	pub pattern: Regex,

	/// Replacement strategy.
	pub replacement: Replacement,
}

impl Rule {
	/// Compile a rule from a pattern string.
	pub fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Result<Self> {
		Ok(Rule {
			name,
			pattern: compile_regex(pattern)?,
			replacement,
		})
	}

	/// Apply this rule to every non-overlapping match in `input`.
	///
	/// Returns the rewritten text and the number of matches actually replaced.
	pub fn apply(&self, input: &str) -> (String, usize) {
		let mut hits = 0;
		let rewritten = self.pattern.replace_all(input, |caps: &Captures<'_>| {
			match self.replacement {
				Replacement::Template(template) => {
					hits += 1;
					let mut out = String::new();
					caps.expand(template, &mut out);
					out
				}
				Replacement::Computed(compute) => match compute(caps) {
					Some(out) => {
						hits += 1;
						out
					}
					None => caps[0].to_string(),
				},
			}
		});
		(rewritten.into_owned(), hits)
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| FixError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Number of replacements one rule made during a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
	pub rule: &'static str,
	pub count: usize,
}

/// Output of running a [`RuleSet`] over some text.
#[derive(Debug, Clone)]
pub struct Rewrite {
	/// The rewritten text.
	pub text: String,

	/// Hit counts in rule order, one entry per rule.
	pub hits: Vec<RuleHit>,
}

impl Rewrite {
	/// Total replacements across all rules.
	pub fn total_hits(&self) -> usize {
		self.hits.iter().map(|hit| hit.count).sum()
	}

	/// Replacements made by the named rule.
	pub fn hits_for(&self, rule: &str) -> usize {
		self.hits
			.iter()
			.find(|hit| hit.rule == rule)
			.map_or(0, |hit| hit.count)
	}
}

/// Ordered rules. Each rule sees the text produced by the rules before it.
#[derive(Debug, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	pub fn new(rules: Vec<Rule>) -> Self {
		RuleSet { rules }
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn into_rules(self) -> Vec<Rule> {
		self.rules
	}

	/// Run every rule in order and record how often each one fired.
	pub fn apply(&self, input: &str) -> Rewrite {
		let mut text = input.to_string();
		let mut hits = Vec::with_capacity(self.rules.len());

		for rule in &self.rules {
			let (rewritten, count) = rule.apply(&text);
			if count > 0 {
				tracing::debug!(rule = rule.name, count, "Rule rewrote calls");
			}
			hits.push(RuleHit {
				rule: rule.name,
				count,
			});
			text = rewritten;
		}

		Rewrite { text, hits }
	}

	/// Pure text transform: same input, same output, no side effects.
	pub fn transform(&self, input: &str) -> String {
		self.apply(input).text
	}
}
