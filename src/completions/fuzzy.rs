//! Fuzzy ranking of directory entries against a partial path segment

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt;

/// Ranks candidates by fuzzy match quality against a partial segment.
///
/// Matching is smart-case: a lowercase pattern matches either case.
pub struct FuzzyRanker {
    matcher: SkimMatcherV2,
}

impl FuzzyRanker {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Match score of `candidate` against `partial`, `None` when it does not match
    pub fn score(&self, candidate: &str, partial: &str) -> Option<i64> {
        self.matcher.fuzzy_match(candidate, partial)
    }

    /// Keep the candidates matching `partial`, best match first.
    ///
    /// An empty partial returns `entries` untouched. Equal scores keep their
    /// input order so repeated completions of the same prefix page identically.
    pub fn rank(&self, partial: &str, entries: Vec<String>) -> Vec<String> {
        if partial.is_empty() {
            return entries;
        }

        let mut scored: Vec<(i64, String)> = entries
            .into_iter()
            .filter_map(|entry| self.score(&entry, partial).map(|score| (score, entry)))
            .collect();

        // `sort_by` is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, entry)| entry).collect()
    }
}

impl Default for FuzzyRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FuzzyRanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyRanker").finish_non_exhaustive()
    }
}

/// Rank with a fresh [`FuzzyRanker`]
pub fn rank_candidates(partial: &str, entries: Vec<String>) -> Vec<String> {
    FuzzyRanker::new().rank(partial, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_partial_keeps_everything_in_order() {
        let entries = strings(&["zeta", "alpha", "mu"]);
        assert_eq!(rank_candidates("", entries.clone()), entries);
    }

    #[test]
    fn test_all_matches_are_kept_and_ties_keep_input_order() {
        let ranked = rank_candidates("a", strings(&["alpha", "beta", "alamo"]));

        assert_eq!(ranked.len(), 3);
        let alpha = ranked.iter().position(|s| s == "alpha").unwrap();
        let alamo = ranked.iter().position(|s| s == "alamo").unwrap();
        assert!(alpha < alamo);
        assert!(ranked.contains(&"beta".to_string()));
    }

    #[test]
    fn test_equal_scores_are_stable() {
        let ranked = rank_candidates("ar", strings(&["far", "bar", "car"]));
        assert_eq!(ranked, strings(&["far", "bar", "car"]));
    }

    #[test]
    fn test_non_matching_entries_are_dropped() {
        let ranked = rank_candidates("e", strings(&["bookclub/", "examples.go", "zip"]));
        assert_eq!(ranked, strings(&["examples.go"]));
    }

    #[test]
    fn test_better_matches_rank_first() {
        let ranked = rank_candidates("e", strings(&["kenosis.lrc", "examples.go"]));
        assert_eq!(ranked[0], "examples.go");
    }

    #[test]
    fn test_lowercase_pattern_matches_uppercase() {
        let ranker = FuzzyRanker::new();
        assert!(ranker.score("README.md", "e").is_some());
        assert!(ranker.score("README.md", "x").is_none());
    }
}
