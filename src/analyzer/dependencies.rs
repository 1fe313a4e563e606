//! Dependency identifier extraction
//!
//! Scans whole-file text for four dependency declaration syntaxes:
//! ES module `from '...'`, CommonJS `require('...')`, Maven
//! `<dependency><groupId>...` and Gradle `implementation '...'`.
//! Identifiers are never validated against a registry.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

static ES_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from\s+['"]([^'"]+)['"]"#).expect("valid from pattern"));

static CJS_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\(['"]([^'"]+)['"]\)"#).expect("valid require pattern"));

static MAVEN_GROUP_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<dependency>\s*<groupId>([^<]+)").expect("valid maven pattern")
});

static GRADLE_IMPLEMENTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"implementation\s+['"]([^'"]+)['"]"#).expect("valid gradle pattern")
});

/// Scans in priority order; earlier scans insert first
static SCANS: [&LazyLock<Regex>; 4] = [
    &ES_FROM,
    &CJS_REQUIRE,
    &MAVEN_GROUP_ID,
    &GRADLE_IMPLEMENTATION,
];

/// Deduplicated dependency identifiers in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet(Vec<String>);

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|d| d == id)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Comma-joined identifiers, or `None` when empty
    pub fn display_list(&self) -> String {
        if self.0.is_empty() {
            "None".to_string()
        } else {
            self.0.join(", ")
        }
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Stateless dependency extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyExtractor;

impl DependencyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract identifiers from the entire text. Total over all inputs.
    pub fn extract(&self, text: &str) -> DependencySet {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ordered = Vec::new();

        for scan in SCANS {
            for caps in scan.captures_iter(text) {
                if let Some(id) = caps.get(1).map(|m| m.as_str())
                    && seen.insert(id)
                {
                    ordered.push(id.to_string());
                }
            }
        }

        DependencySet(ordered)
    }
}

/// Shorthand for `DependencyExtractor::new().extract(text)`
pub fn extract_dependencies(text: &str) -> DependencySet {
    DependencyExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert!(extract_dependencies("").is_empty());
        assert!(extract_dependencies("let x = 1;").is_empty());
    }

    #[test]
    fn test_require_deduplicated() {
        let deps = extract_dependencies(r#"const a = require("a");\nconst b = require("a");"#);
        assert_eq!(deps.as_slice(), &["a".to_string()]);
    }

    #[test]
    fn test_merges_across_pattern_types() {
        let deps = extract_dependencies("import x from \"pkg1\";\nconst y = require(\"pkg2\");");
        assert!(deps.contains("pkg1"));
        assert!(deps.contains("pkg2"));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_scan_priority_order() {
        // require appears first in the text, but from-scan results insert first
        let text = "const fs = require('fs');\nimport path from 'path';\nimport fs2 from 'fs';";
        let deps = extract_dependencies(text);
        assert_eq!(deps.into_vec(), vec!["path", "fs"]);
    }

    #[test]
    fn test_single_and_double_quotes() {
        let deps = extract_dependencies("import a from 'single';\nimport b from \"double\";");
        assert_eq!(deps.into_vec(), vec!["single", "double"]);
    }

    #[test]
    fn test_require_with_space_not_matched() {
        let deps = extract_dependencies("require ('spaced'); require('tight');");
        assert_eq!(deps.into_vec(), vec!["tight"]);
    }

    #[test]
    fn test_maven_group_ids() {
        let pom = r#"
<dependencies>
    <dependency>
        <groupId>org.junit</groupId>
        <artifactId>junit</artifactId>
    </dependency>
    <dependency><groupId>com.google.guava</groupId></dependency>
    <dependency>
        <artifactId>first</artifactId>
        <groupId>not.captured</groupId>
    </dependency>
</dependencies>"#;
        let deps = extract_dependencies(pom);
        assert_eq!(deps.into_vec(), vec!["org.junit", "com.google.guava"]);
    }

    #[test]
    fn test_gradle_implementation() {
        // `testImplementation` is case-sensitive and never matches
        let gradle = "dependencies {\n    implementation 'com.squareup.okhttp3:okhttp:4.12.0'\n    implementation \"androidx.core:core-ktx:1.12.0\"\n    testImplementation 'junit:junit:4.13.2'\n}";
        let deps = extract_dependencies(gradle);
        assert_eq!(
            deps.into_vec(),
            vec![
                "com.squareup.okhttp3:okhttp:4.12.0",
                "androidx.core:core-ktx:1.12.0",
            ]
        );
    }

    #[test]
    fn test_python_from_import_is_not_a_dependency() {
        // `from x import y` has no quoted module, so nothing is captured
        let deps = extract_dependencies("from os import path\nfrom . import sibling");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_display_list() {
        assert_eq!(DependencySet::new().display_list(), "None");
        let deps = extract_dependencies("import a from 'a'; import b from 'b';");
        assert_eq!(deps.display_list(), "a, b");
    }

    #[test]
    fn test_serializes_as_array() {
        let deps = extract_dependencies("require('lodash')");
        assert_eq!(serde_json::to_string(&deps).unwrap(), r#"["lodash"]"#);
    }

    proptest! {
        #[test]
        fn prop_extract_is_total_and_unique(text in ".*") {
            let deps = extract_dependencies(&text);
            let unique: HashSet<&str> = deps.iter().collect();
            prop_assert_eq!(unique.len(), deps.len());
            prop_assert_eq!(extract_dependencies(&text), deps);
        }

        #[test]
        fn prop_repeated_requires_collapse(name in "[a-z@/._-]{1,12}", times in 1usize..6) {
            let text = format!("require('{}');\n", name).repeat(times);
            let deps = extract_dependencies(&text);
            prop_assert_eq!(deps.into_vec(), vec![name]);
        }
    }
}
