/// Handles keyword matching against row cells.
///
/// A cell matches when the keyword appears as a substring of the cell text,
/// case-folded when the search is case-insensitive. An empty keyword is a
/// substring of every cell, so it matches every row that has at least one
/// column.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    case_sensitive: bool,
}

impl KeywordMatcher {
    /// Creates a new KeywordMatcher for the given keyword
    pub fn new(keyword: &str, case_sensitive: bool) -> Self {
        let keyword = if case_sensitive {
            keyword.to_string()
        } else {
            keyword.to_lowercase()
        };
        Self {
            keyword,
            case_sensitive,
        }
    }

    /// Tests a single cell for a keyword occurrence
    pub fn is_match(&self, cell: &str) -> bool {
        if self.case_sensitive {
            cell.contains(&self.keyword)
        } else {
            cell.to_lowercase().contains(&self.keyword)
        }
    }

    /// Collects the 0-indexed columns of a row where the keyword occurs
    pub fn matching_columns(&self, row: &[String]) -> Vec<usize> {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| self.is_match(cell))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let matcher = KeywordMatcher::new("engineering", false);
        assert!(matcher.is_match("Engineering"));
        assert!(matcher.is_match("ENGINEERING DEPT"));
        assert!(!matcher.is_match("Marketing"));
    }

    #[test]
    fn test_case_sensitive_match() {
        let matcher = KeywordMatcher::new("engineering", true);
        assert!(!matcher.is_match("Engineering"));
        assert!(matcher.is_match("civil engineering"));
    }

    #[test]
    fn test_substring_not_exact_equality() {
        let matcher = KeywordMatcher::new("@example.com", false);
        assert!(matcher.is_match("alice@example.com"));
    }

    #[test]
    fn test_matching_columns_collects_all_hits() {
        let matcher = KeywordMatcher::new("needle", false);
        let cells = row(&["a", "b", "needle", "d", "the needle here"]);
        assert_eq!(matcher.matching_columns(&cells), vec![2, 4]);
    }

    #[test]
    fn test_matching_columns_no_hits() {
        let matcher = KeywordMatcher::new("needle", false);
        let cells = row(&["a", "b", "c"]);
        assert!(matcher.matching_columns(&cells).is_empty());
    }

    #[test]
    fn test_empty_keyword_matches_every_column() {
        let matcher = KeywordMatcher::new("", false);
        let cells = row(&["a", "", "c"]);
        assert_eq!(matcher.matching_columns(&cells), vec![0, 1, 2]);
    }
}
