//! Option filtering for the combobox query.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use serde::Deserialize;

/// How the query is matched against option text.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Normalized substring containment.
    #[default]
    Substring,
    /// Skim fuzzy matching. Filters only; option order is never re-ranked.
    Fuzzy,
}

impl MatchMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Strips all whitespace and case-folds `text`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the options matching `query`, in their original order.
///
/// An empty query returns every option unchanged.
pub fn filter_options<'a>(options: &'a [String], query: &str, mode: MatchMode) -> Vec<&'a str> {
    if query.is_empty() {
        return options.iter().map(String::as_str).collect();
    }

    match mode {
        MatchMode::Substring => {
            let needle = normalize(query);
            options
                .iter()
                .filter(|option| normalize(option).contains(&needle))
                .map(String::as_str)
                .collect()
        }
        MatchMode::Fuzzy => {
            let needle = normalize(query);
            if needle.is_empty() {
                return options.iter().map(String::as_str).collect();
            }

            let matcher = SkimMatcherV2::default().ignore_case();
            options
                .iter()
                .filter(|option| matcher.fuzzy_match(&normalize(option), &needle).is_some())
                .map(String::as_str)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchMode, filter_options, normalize};

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn normalize_strips_whitespace_and_case() {
        assert_eq!(normalize("  New\tDelhi \n"), "newdelhi");
        assert_eq!(normalize("KOTTAYAM"), "kottayam");
    }

    #[test]
    fn empty_query_returns_all_in_order() {
        let list = options(&["Kerala", "Kochi", "Kottayam"]);
        let filtered = filter_options(&list, "", MatchMode::Substring);
        assert_eq!(filtered, vec!["Kerala", "Kochi", "Kottayam"]);
    }

    #[test]
    fn substring_match_ignores_case_and_whitespace() {
        let list = options(&["New Delhi", "Newcastle", "Delhi Cantt"]);
        let filtered = filter_options(&list, "wde L", MatchMode::Substring);
        assert_eq!(filtered, vec!["New Delhi"]);
    }

    #[test]
    fn substring_filter_preserves_relative_order() {
        let list = options(&["Kottayam", "Kerala", "Kochi", "Kozhikode", "Kannur"]);
        let filtered = filter_options(&list, "ko", MatchMode::Substring);
        assert_eq!(filtered, vec!["Kottayam", "Kochi", "Kozhikode"]);
    }

    #[test]
    fn whitespace_only_query_matches_everything_in_substring_mode() {
        let list = options(&["A", "B"]);
        let filtered = filter_options(&list, "   ", MatchMode::Substring);
        assert_eq!(filtered, vec!["A", "B"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let list = options(&["Kerala"]);
        assert!(filter_options(&list, "xyz", MatchMode::Substring).is_empty());
    }

    #[test]
    fn fuzzy_mode_filters_without_reranking() {
        let list = options(&["Thiruvananthapuram", "Kottayam", "Thrissur"]);
        let filtered = filter_options(&list, "thr", MatchMode::Fuzzy);
        assert_eq!(filtered, vec!["Thiruvananthapuram", "Thrissur"]);
    }

    #[test]
    fn fuzzy_mode_ignores_whitespace_inside_query() {
        let list = options(&["Kerala", "Kottayam", "New Delhi"]);
        assert_eq!(
            filter_options(&list, "kot tayam", MatchMode::Fuzzy),
            vec!["Kottayam"]
        );
        assert_eq!(
            filter_options(&list, "newd", MatchMode::Fuzzy),
            vec!["New Delhi"]
        );
    }
}
