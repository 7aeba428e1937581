//! Scoring candidate items against a search query.
//!
//! A [`Ranker`] returns one score per item, in input order, higher is better.
//! The list prompt reorders its results by these scores; items are never
//! dropped, an unmatched item simply scores 0.

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};

pub trait Ranker {
    fn rank(&self, query: &str, items: &[String]) -> Vec<u32>;
}

impl<F> Ranker for F
where
    F: Fn(&str, &[String]) -> Vec<u32>,
{
    fn rank(&self, query: &str, items: &[String]) -> Vec<u32> {
        self(query, items)
    }
}

/// Fuzzy ranking backed by nucleo-matcher
///
/// Case-insensitive by default, with smart case: an uppercase letter in the
/// query makes the match case-sensitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct FuzzyRanker {
    case_sensitive: bool,
}

impl FuzzyRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always respect case, whatever the query looks like
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    fn pattern(&self, query: &str) -> Pattern {
        let case_matching = if self.case_sensitive {
            CaseMatching::Respect
        } else {
            CaseMatching::Smart
        };
        Pattern::new(query, case_matching, Normalization::Smart, AtomKind::Fuzzy)
    }
}

impl Ranker for FuzzyRanker {
    fn rank(&self, query: &str, items: &[String]) -> Vec<u32> {
        if query.is_empty() {
            return vec![0; items.len()];
        }

        let pattern = self.pattern(query);
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        items
            .iter()
            .map(|item| {
                let haystack = Utf32Str::new(item, &mut buf);
                pattern.score(haystack, &mut matcher).unwrap_or(0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_score_per_item() {
        let list = items(&["apple", "apply", "banana"]);
        assert_eq!(FuzzyRanker::new().rank("appl", &list).len(), 3);
        assert_eq!(FuzzyRanker::new().rank("", &list), vec![0, 0, 0]);
    }

    #[test]
    fn test_matching_items_outscore_others() {
        let list = items(&["apple", "apply", "banana"]);
        let scores = FuzzyRanker::new().rank("appl", &list);
        assert!(scores[0] > 0);
        assert!(scores[1] > 0);
        assert_eq!(scores[2], 0);
    }

    #[test]
    fn test_subsequence_matches() {
        let list = items(&["release/1.2", "main", "feature/login"]);
        let scores = FuzzyRanker::new().rank("rl12", &list);
        assert!(scores[0] > 0);
        assert_eq!(scores[1], 0);
    }

    #[test]
    fn test_case_handling() {
        let list = items(&["apple", "Apple"]);
        let smart = FuzzyRanker::new().rank("appl", &list);
        assert!(smart[0] > 0 && smart[1] > 0);

        let strict = FuzzyRanker::case_sensitive().rank("Appl", &list);
        assert_eq!(strict[0], 0);
        assert!(strict[1] > 0);
    }

    #[test]
    fn test_closures_are_rankers() {
        let by_len = |_: &str, items: &[String]| -> Vec<u32> {
            items.iter().map(|s| s.len() as u32).collect()
        };
        assert_eq!(by_len.rank("x", &items(&["a", "abc"])), vec![1, 3]);
    }
}
