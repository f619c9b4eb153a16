use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("slug regex is valid"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("slug regex is valid"));
static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("slug regex is valid"));

/// Turns a title into a URL-safe slug. Only ASCII letters, digits,
/// underscores and hyphens survive; accented letters are dropped, not folded.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUNS.replace_all(stripped.trim(), "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_owned()
}
