//! Ignore-glob compilation
//!
//! Ignore settings use editor-style globs such as
//! `**/{node_modules,.git,dist,bin}/**`. The `glob` crate has no brace
//! alternation, so braces are expanded into one pattern per alternative
//! before compiling.

use glob::{MatchOptions, Pattern};

use crate::types::{DocsmithError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Expand `{a,b}` alternatives. Nested braces are expanded recursively;
/// an unbalanced `{` is kept literally.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    for (offset, ch) in pattern[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let body = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];

    split_top_level(body)
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

/// Split on commas that are not inside nested braces
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Compiled set of exclusion globs, matched against `/`-separated relative paths
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
    /// Globs ending in `/**` with that suffix removed. A directory matching
    /// one of these has every descendant excluded.
    dir_patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// Compile raw settings. Each entry may itself be a comma-separated list
    /// of globs, as editor settings often are.
    pub fn new<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut dir_patterns = Vec::new();

        for entry in raw {
            for glob in split_top_level(entry.as_ref()) {
                let glob = glob.trim();
                if glob.is_empty() {
                    continue;
                }
                for expanded in expand_braces(glob) {
                    patterns.push(compile(&expanded)?);
                    if let Some(dir) = expanded.strip_suffix("/**")
                        && !dir.is_empty()
                    {
                        dir_patterns.push(compile(dir)?);
                    }
                }
            }
        }

        Ok(Self {
            patterns,
            dir_patterns,
        })
    }

    pub fn is_match(&self, relative_path: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative_path, MATCH_OPTIONS))
    }

    /// Whether a whole directory can be skipped without visiting its files
    pub fn excludes_dir(&self, relative_dir: &str) -> bool {
        self.dir_patterns
            .iter()
            .any(|p| p.matches_with(relative_dir, MATCH_OPTIONS))
    }
}

fn compile(glob: &str) -> Result<Pattern> {
    Pattern::new(glob).map_err(|e| DocsmithError::Pattern {
        pattern: glob.to_string(),
        message: e.msg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::scan::{BINARY_EXCLUDE_PATTERN, DEFAULT_IGNORE_PATTERN};

    #[test]
    fn test_expand_no_braces() {
        assert_eq!(expand_braces("**/*.rs"), vec!["**/*.rs"]);
    }

    #[test]
    fn test_expand_default_ignore() {
        assert_eq!(
            expand_braces(DEFAULT_IGNORE_PATTERN),
            vec![
                "**/node_modules/**",
                "**/.git/**",
                "**/dist/**",
                "**/bin/**"
            ]
        );
    }

    #[test]
    fn test_expand_multiple_and_nested() {
        assert_eq!(
            expand_braces("{a,b}/{c,d}"),
            vec!["a/c", "a/d", "b/c", "b/d"]
        );
        assert_eq!(expand_braces("x.{j{s,sx},ts}"), vec!["x.js", "x.jsx", "x.ts"]);
    }

    #[test]
    fn test_expand_unbalanced_kept_literal() {
        assert_eq!(expand_braces("foo{bar"), vec!["foo{bar"]);
    }

    #[test]
    fn test_matcher_default_patterns() {
        let matcher = IgnoreMatcher::new(&[DEFAULT_IGNORE_PATTERN, BINARY_EXCLUDE_PATTERN]).unwrap();

        assert!(matcher.is_match("node_modules/react/index.js"));
        assert!(matcher.is_match("packages/app/node_modules/x/y.js"));
        assert!(matcher.is_match(".git/config"));
        assert!(matcher.is_match("dist/bundle.js"));
        assert!(matcher.is_match("assets/logo.png"));

        assert!(!matcher.is_match("src/main.rs"));
        assert!(!matcher.is_match("src/distribution.ts"));
        assert!(!matcher.is_match("assets/logo.svg"));
    }

    #[test]
    fn test_matcher_comma_separated_entry() {
        let matcher = IgnoreMatcher::new(&["**/target/**, **/*.lock"]).unwrap();
        assert!(matcher.is_match("target/debug/build.rs"));
        assert!(matcher.is_match("Cargo.lock"));
        assert!(!matcher.is_match("src/lib.rs"));
    }

    #[test]
    fn test_matcher_invalid_pattern() {
        let err = IgnoreMatcher::new(&["src/***/x.rs"]).unwrap_err();
        assert!(matches!(err, DocsmithError::Pattern { .. }));
    }

    #[test]
    fn test_empty_matcher_matches_nothing() {
        let matcher = IgnoreMatcher::new::<&str>(&[]).unwrap();
        assert!(!matcher.is_match("anything.js"));
        assert!(!matcher.excludes_dir("node_modules"));
    }

    #[test]
    fn test_excludes_dir_only_for_recursive_globs() {
        let matcher =
            IgnoreMatcher::new(&[DEFAULT_IGNORE_PATTERN, "build/*", "docs/**"]).unwrap();

        assert!(matcher.excludes_dir("node_modules"));
        assert!(matcher.excludes_dir("packages/app/node_modules"));
        assert!(matcher.excludes_dir(".git"));
        assert!(matcher.excludes_dir("docs"));

        // only `/**` globs prune whole directories
        assert!(!matcher.excludes_dir("build"));
        assert!(!matcher.excludes_dir("src"));
        assert!(!matcher.excludes_dir("distribution"));
    }
}
