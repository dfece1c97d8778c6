use crate::config::types::DEFAULT_TARGETS;

/// Generate the `.drizzle-fix.toml` written by `--init`.
///
/// The template lists the built-in targets so they can be edited in place.
pub fn generate_init_template() -> String {
	let mut out = String::from(
		"# drizzle-fix configuration\n\
		 #\n\
		 # Files to rewrite, relative to this file's directory.\n\
		 # Remove the `files` key to fall back to the built-in list.\n\
		 files = [\n",
	);
	for target in DEFAULT_TARGETS {
		out.push_str(&format!("    \"{target}\",\n"));
	}
	out.push_str("]\n");
	out
}
