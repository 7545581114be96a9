//! Slug derivation for category names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Runs of whitespace and hyphens collapse into a single hyphen.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Derives a URL-safe slug from a display name.
///
/// # Rules
///
/// 1. The name is decomposed (NFKD), so accented letters lose their marks
/// 2. Remaining non-ASCII characters and punctuation other than `_` and `-`
///    are dropped
/// 3. Letters are lowercased
/// 4. Runs of whitespace and hyphens become a single hyphen
/// 5. Leading and trailing hyphens and underscores are stripped
///
/// The result can be empty (e.g. for `"+++"`); callers that need a usable
/// identifier must reject that case.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Random Category String"), "random-category-string");
/// assert_eq!(slugify("C++"), "c");
/// assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
/// ```
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    SEPARATOR_RUN
        .replace_all(kept.trim(), "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(slugify("Random Category String"), "random-category-string");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(slugify("Python"), "python");
        assert_eq!(slugify("Other Frameworks"), "other-frameworks");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("Node.js & Deno!"), "nodejs-deno");
    }

    #[test]
    fn test_whitespace_and_hyphen_runs_collapse() {
        assert_eq!(slugify("  Rust  --  Systems\tProgramming "), "rust-systems-programming");
    }

    #[test]
    fn test_edges_are_trimmed() {
        assert_eq!(slugify("-_hello_-"), "hello");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn test_accents_fold_to_ascii() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Ｆｕｌｌｗｉｄｔｈ"), "fullwidth");
    }

    #[test]
    fn test_accented_and_plain_names_stay_distinct() {
        assert_ne!(slugify("Café"), slugify("Caf"));
        assert_eq!(slugify("Café"), slugify("Cafe"));
    }

    #[test]
    fn test_unfoldable_characters_are_dropped() {
        assert_eq!(slugify("Rust 日本"), "rust");
    }

    #[test]
    fn test_only_punctuation_yields_empty() {
        assert_eq!(slugify("+++"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_idempotent() {
        for name in ["Random Category String", "C++", "  Mixed -- Case_Name  ", "Erlang"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
            assert_eq!(slugify(name), once);
        }
    }
}
