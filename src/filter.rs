//! List filtering for the palette search box
//!
//! A [`ListFilter`] narrows a list of labels to the subsequence matching a
//! query. The engine only consumes the result; matching policy lives here.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

/// Narrows labels to those matching a query.
///
/// Returns indices into `items`. An empty (or all-whitespace) query keeps
/// everything.
pub trait ListFilter {
    fn filter(&mut self, items: &[&str], query: &str) -> Vec<usize>;
}

/// Case-insensitive substring match
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringFilter;

impl ListFilter for SubstringFilter {
    fn filter(&mut self, items: &[&str], query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return (0..items.len()).collect();
        }

        items
            .iter()
            .enumerate()
            .filter(|(_, label)| label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Fuzzy match backed by nucleo.
///
/// Keeps input order; scores only decide membership. Reuses the matcher and
/// UTF-32 buffer across calls.
pub struct FuzzyFilter {
    matcher: Matcher,
    buf: Vec<char>,
}

impl FuzzyFilter {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(64),
        }
    }
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FuzzyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyFilter").finish_non_exhaustive()
    }
}

impl ListFilter for FuzzyFilter {
    fn filter(&mut self, items: &[&str], query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return (0..items.len()).collect();
        }

        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut matched = Vec::new();
        for (i, label) in items.iter().enumerate() {
            self.buf.clear();
            let haystack = Utf32Str::new(label, &mut self.buf);
            if pattern.score(haystack, &mut self.matcher).is_some() {
                matched.push(i);
            }
        }
        matched
    }
}

/// Which filter the palette uses, as named in `config.yaml`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    Fuzzy,
    Substring,
}

impl FilterKind {
    pub fn build(self) -> Box<dyn ListFilter> {
        match self {
            FilterKind::Fuzzy => Box::new(FuzzyFilter::new()),
            FilterKind::Substring => Box::new(SubstringFilter),
        }
    }
}
