use glob::Pattern;
use std::path::Path;

const CSV_EXTENSION: &str = "csv";

/// Checks if a path names a CSV file (case-insensitive match on the extension)
pub fn is_csv_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case(CSV_EXTENSION),
        None => false,
    }
}

/// Checks if a path should be excluded from scanning based on ignore patterns
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    ignore_patterns.iter().any(|pattern| {
        if let Ok(p) = Pattern::new(pattern) {
            // Convert path to a format that matches the pattern style
            let normalized_path = path_str.replace('\\', "/");
            p.matches(&normalized_path)
        } else {
            false
        }
    })
}
