//! Name search

use serde::Serialize;

/// Case-insensitive literal substring test. An empty term matches everything.
pub fn name_matches(name: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Search response body: hit count plus the hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchResults<T> {
    pub fn new(search_term: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            search_term: search_term.into(),
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_substring() {
        assert!(name_matches("The Musical Hop", "hop"));
        assert!(name_matches("The Musical Hop", "MUSIC"));
        assert!(name_matches("The Wild Sax Band", "Band"));
        assert!(!name_matches("Guns N Petals", "Band"));
    }

    #[test]
    fn empty_term_matches_all() {
        assert!(name_matches("anything", ""));
        assert!(name_matches("", ""));
    }

    #[test]
    fn wildcards_are_literal() {
        assert!(!name_matches("The Musical Hop", "%"));
        assert!(!name_matches("The Musical Hop", "M_sical"));
        assert!(name_matches("100% Club", "0%"));
    }

    #[test]
    fn results_count_matches_data() {
        let r = SearchResults::new("a", vec![1, 2, 3]);
        assert_eq!(r.count, 3);
        assert_eq!(r.search_term, "a");
    }
}
