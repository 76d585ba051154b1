use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Default cap on the rendered length of a row in formatted output
pub const DEFAULT_MAX_ROW_DISPLAY: usize = 100;

/// A row that contains the search keyword in one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// The file the row was found in
    pub file_path: PathBuf,
    /// 1-indexed row number; a header line counts as row 1
    pub row_number: usize,
    /// The original columns of the row
    pub row_data: Vec<String>,
    /// 0-indexed columns where the keyword occurred, ascending, duplicate-free
    pub matching_columns: Vec<usize>,
}

/// Counts derived from the current path cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub total_csv_files: usize,
    pub total_directories_scanned: usize,
}

/// Formats search results for human display.
///
/// Rows render in their debug form, truncated to `max_row_display` characters;
/// the matching column indices always print in full.
pub fn format_search_results(matches: &[SearchMatch], max_row_display: usize) -> String {
    if matches.is_empty() {
        return "No matches found.".to_string();
    }

    let files: BTreeSet<&PathBuf> = matches.iter().map(|m| &m.file_path).collect();
    let mut output = vec![format!(
        "Found {} matching rows in {} files:",
        matches.len(),
        files.len()
    )];

    let mut current_file = None;
    for result in matches {
        if current_file != Some(&result.file_path) {
            current_file = Some(&result.file_path);
            output.push(format!("\nFile: {}", result.file_path.display()));
        }

        let mut row_str = format!("{:?}", result.row_data);
        if row_str.chars().count() > max_row_display {
            row_str = row_str.chars().take(max_row_display).collect();
            row_str.push_str("...");
        }

        output.push(format!("  Row {}: {}", result.row_number, row_str));
        output.push(format!(
            "    Matching columns: {:?}",
            result.matching_columns
        ));
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(file: &str, row_number: usize) -> SearchMatch {
        SearchMatch {
            file_path: PathBuf::from(file),
            row_number,
            row_data: vec!["Alice".to_string(), "Engineering".to_string()],
            matching_columns: vec![1],
        }
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(
            format_search_results(&[], DEFAULT_MAX_ROW_DISPLAY),
            "No matches found."
        );
    }

    #[test]
    fn test_groups_rows_by_file() {
        let matches = vec![
            sample_match("a.csv", 2),
            sample_match("a.csv", 5),
            sample_match("b.csv", 3),
        ];

        let formatted = format_search_results(&matches, DEFAULT_MAX_ROW_DISPLAY);
        assert!(formatted.starts_with("Found 3 matching rows in 2 files:"));
        assert_eq!(formatted.matches("File: a.csv").count(), 1);
        assert_eq!(formatted.matches("File: b.csv").count(), 1);
        assert!(formatted.contains("  Row 5: "));
        assert!(formatted.contains("    Matching columns: [1]"));
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let long_match = SearchMatch {
            file_path: PathBuf::from("wide.csv"),
            row_number: 1,
            row_data: vec!["x".repeat(500)],
            matching_columns: vec![0],
        };

        let formatted = format_search_results(&[long_match], 40);
        let row_line = formatted
            .lines()
            .find(|l| l.starts_with("  Row 1: "))
            .unwrap();
        assert!(row_line.ends_with("..."));
        assert_eq!(row_line.len(), "  Row 1: ".len() + 40 + 3);
        // Truncation never hides which columns matched
        assert!(formatted.contains("Matching columns: [0]"));
    }
}
