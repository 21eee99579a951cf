//! Ordered `key=value` configuration assembly.
//!
//! SHOUTcast-family frontends read flat `key=value` files where later
//! occurrences of a key silently win. [`ConfigAssembly`] keeps the
//! directives in insertion order so the generated file is stable, while
//! letting an operator-supplied custom fragment override generated values
//! in place.

use indexmap::IndexMap;
use tracing::warn;

/// Ordered set of configuration directives.
///
/// Keys are lower-cased on insertion. Setting an existing key replaces its
/// value but keeps its original position, so overrides never reshuffle the
/// rendered file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigAssembly {
    entries: IndexMap<String, String>,
}

impl ConfigAssembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a directive. Existing keys keep their position; new keys are
    /// appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into().to_ascii_lowercase();
        self.entries.insert(key, value.to_string());
    }

    /// Value of a directive, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies an operator-supplied custom fragment over the assembly.
    ///
    /// The fragment is `key=value` lines; blank lines and lines starting
    /// with `#` or `;` are ignored. A fragment containing any other line
    /// without `=` is rejected as a whole, leaving the assembly untouched,
    /// so a typo cannot half-apply an override set.
    pub fn apply_custom_fragment(&mut self, fragment: &str) {
        match parse_fragment(fragment) {
            Some(directives) => {
                for (key, value) in directives {
                    self.set(key, value);
                }
            }
            None => {
                warn!("custom configuration fragment is malformed and was ignored");
            }
        }
    }

    /// Renders the directives as the frontend expects them, one
    /// `key=value` per line. Newlines inside values are stripped so a
    /// value can never break the line format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(&value.replace('\n', ""));
            out.push('\n');
        }
        out
    }
}

/// Parses a custom fragment into ordered directives, or `None` when any
/// meaningful line is not a `key=value` pair.
fn parse_fragment(fragment: &str) -> Option<Vec<(String, String)>> {
    let mut directives = Vec::new();
    for line in fragment.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        directives.push((key.to_string(), value.trim().to_string()));
    }
    Some(directives)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base_assembly() -> ConfigAssembly {
        let mut assembly = ConfigAssembly::new();
        assembly.set("password", "hackme");
        assembly.set("maxuser", 250);
        assembly.set("portbase", 8000);
        assembly
    }

    #[test]
    fn renders_in_insertion_order() {
        let assembly = base_assembly();
        assert_eq!(
            assembly.render(),
            "password=hackme\nmaxuser=250\nportbase=8000\n"
        );
    }

    #[test]
    fn override_keeps_position() {
        let mut assembly = base_assembly();
        assembly.set("maxuser", 500);
        assert_eq!(
            assembly.render(),
            "password=hackme\nmaxuser=500\nportbase=8000\n"
        );
    }

    #[test]
    fn keys_are_lowercased() {
        let mut assembly = ConfigAssembly::new();
        assembly.set("MaxUser", 100);
        assert_eq!(assembly.get("maxuser"), Some("100"));
        assert_eq!(assembly.render(), "maxuser=100\n");
    }

    #[test]
    fn values_lose_embedded_newlines() {
        let mut assembly = ConfigAssembly::new();
        assembly.set("songtitle", "line one\nline two");
        assert_eq!(assembly.render(), "songtitle=line oneline two\n");
    }

    #[test]
    fn custom_fragment_overrides_and_appends() {
        let mut assembly = base_assembly();
        assembly.apply_custom_fragment("maxuser=32\nlogrotates=4\n");

        assert_eq!(
            assembly.render(),
            "password=hackme\nmaxuser=32\nportbase=8000\nlogrotates=4\n"
        );
    }

    #[test]
    fn custom_fragment_skips_comments_and_blanks() {
        let mut assembly = base_assembly();
        assembly.apply_custom_fragment("# tuning\n\n; more tuning\nmaxuser=32\n");

        assert_eq!(assembly.get("maxuser"), Some("32"));
        assert_eq!(assembly.len(), 3);
    }

    #[test]
    fn malformed_fragment_is_discarded_whole() {
        let mut assembly = base_assembly();
        let before = assembly.clone();
        assembly.apply_custom_fragment("maxuser=32\nthis is not a directive\n");

        assert_eq!(assembly, before);
    }

    #[test]
    fn fragment_keys_and_values_are_trimmed() {
        let mut assembly = ConfigAssembly::new();
        assembly.apply_custom_fragment("  maxuser = 64  ");
        assert_eq!(assembly.get("maxuser"), Some("64"));
    }

    #[test]
    fn empty_fragment_is_a_no_op() {
        let mut assembly = base_assembly();
        let before = assembly.clone();
        assembly.apply_custom_fragment("\n   \n");
        assert_eq!(assembly, before);
    }

    #[test]
    fn fragment_value_may_contain_equals() {
        let mut assembly = ConfigAssembly::new();
        assembly.apply_custom_fragment("streamurl=http://example.com/?a=b");
        assert_eq!(assembly.get("streamurl"), Some("http://example.com/?a=b"));
    }
}
