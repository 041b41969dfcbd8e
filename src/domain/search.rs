//! Search criteria and result highlighting.
//!
//! A [`SearchQuery`] combines free text with an optional minimum rating. The
//! [`Highlighter`] marks every case-insensitive occurrence of the free text
//! inside result fields. The text is matched literally: regex metacharacters
//! typed by the user (`C++`, `a+b`, `(vegan)`) are escaped before the pattern
//! is compiled.

use super::recipe::Rating;
use regex::{Regex, RegexBuilder};

/// Text shown instead of issuing a request when no criteria are set.
pub const SEARCH_PROMPT: &str = "Type a search term or pick a rating filter, or load all recipes";

/// Criteria for one recipe search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed free text; empty when absent.
    pub free_text: String,
    pub min_rating: Option<Rating>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(free_text: &str, min_rating: Option<Rating>) -> Self {
        Self {
            free_text: free_text.trim().to_string(),
            min_rating,
        }
    }

    /// True when neither free text nor a rating is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free_text.is_empty() && self.min_rating.is_none()
    }

    /// Query string pairs for `GET /api/recipes`.
    ///
    /// `search` and `min_rating` are only present when set.
    #[must_use]
    pub fn query_pairs(&self, per_page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("per_page", per_page.to_string())];
        if !self.free_text.is_empty() {
            pairs.push(("search", self.free_text.clone()));
        }
        if let Some(rating) = self.min_rating {
            pairs.push(("min_rating", rating.to_string()));
        }
        pairs
    }

    /// Message shown when the search returned nothing.
    ///
    /// Phrased differently depending on which criteria were supplied.
    #[must_use]
    pub fn no_results_message(&self) -> String {
        match (self.free_text.is_empty(), self.min_rating) {
            (false, Some(rating)) => format!(
                "No recipes found matching \"{}\" rated {rating}+ stars",
                self.free_text
            ),
            (false, None) => format!("No recipes found matching \"{}\"", self.free_text),
            (true, Some(rating)) => format!("No recipes rated {rating}+ stars"),
            (true, None) => SEARCH_PROMPT.to_string(),
        }
    }

    /// Highlighter for this query's free text, if any.
    #[must_use]
    pub fn highlighter(&self) -> Option<Highlighter> {
        Highlighter::new(&self.free_text)
    }
}

/// Case-insensitive literal substring highlighter.
///
/// # Examples
///
/// ```
/// use recipe_client::domain::Highlighter;
///
/// let hl = Highlighter::new("c++").unwrap();
/// assert_eq!(hl.mark("Quick C++ recipe", "[", "]"), "Quick [C++] recipe");
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Builds a highlighter for `term`; `None` when the term is blank.
    #[must_use]
    pub fn new(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| tracing::debug!(error = %e, "escaped search pattern rejected"))
            .ok()?;

        Some(Self { pattern })
    }

    /// Matched ranges as `(start, end)` character indices, end exclusive.
    #[must_use]
    pub fn ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut chars_seen = 0;
        let mut byte_seen = 0;

        for m in self.pattern.find_iter(text) {
            chars_seen += text[byte_seen..m.start()].chars().count();
            let start = chars_seen;
            chars_seen += m.as_str().chars().count();
            byte_seen = m.end();
            ranges.push((start, chars_seen));
        }

        ranges
    }

    /// Wraps every match in `open`/`close` markers.
    #[must_use]
    pub fn mark(&self, text: &str, open: &str, close: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures<'_>| format!("{open}{}{close}", &caps[0]))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_detected() {
        assert!(SearchQuery::new("   ", None).is_empty());
        assert!(!SearchQuery::new("", Some(Rating::new(3).unwrap())).is_empty());
    }

    #[test]
    fn query_pairs_omit_absent_criteria() {
        let text_only = SearchQuery::new(" chicken ", None);
        assert_eq!(
            text_only.query_pairs(20),
            vec![("per_page", "20".to_string()), ("search", "chicken".to_string())]
        );

        let rating_only = SearchQuery::new("", Some(Rating::new(4).unwrap()));
        assert_eq!(
            rating_only.query_pairs(10),
            vec![("per_page", "10".to_string()), ("min_rating", "4".to_string())]
        );
    }

    #[test]
    fn highlights_regex_metacharacters_literally() {
        let hl = Highlighter::new("a+b").unwrap();
        assert_eq!(hl.ranges("aab a+b"), vec![(4, 7)]);
        assert_eq!(hl.mark("aab a+b", "<", ">"), "aab <a+b>");

        let hl = Highlighter::new("C++ recipe").unwrap();
        assert_eq!(hl.mark("My c++ Recipe book", "[", "]"), "My [c++ Recipe] book");

        let hl = Highlighter::new("(vegan").unwrap();
        assert!(hl.ranges("vegan").is_empty());
    }

    #[test]
    fn highlights_every_case_insensitive_occurrence() {
        let hl = Highlighter::new("chicken").unwrap();
        assert_eq!(hl.mark("Chicken Soup", "[", "]"), "[Chicken] Soup");
        assert_eq!(hl.mark("BBQ Chicken", "[", "]"), "BBQ [Chicken]");
        assert_eq!(hl.ranges("chicken, CHICKEN stock"), vec![(0, 7), (9, 16)]);
    }

    #[test]
    fn ranges_are_character_indices() {
        let hl = Highlighter::new("crème").unwrap();
        assert_eq!(hl.ranges("Brûlée crème"), vec![(7, 12)]);
    }

    #[test]
    fn blank_term_has_no_highlighter() {
        assert!(Highlighter::new("  ").is_none());
        assert!(SearchQuery::default().highlighter().is_none());
    }

    #[test]
    fn no_results_message_depends_on_criteria() {
        let four = Some(Rating::new(4).unwrap());
        assert_eq!(
            SearchQuery::new("tofu", None).no_results_message(),
            "No recipes found matching \"tofu\""
        );
        assert_eq!(
            SearchQuery::new("tofu", four).no_results_message(),
            "No recipes found matching \"tofu\" rated 4+ stars"
        );
        assert_eq!(SearchQuery::new("", four).no_results_message(), "No recipes rated 4+ stars");
    }
}
