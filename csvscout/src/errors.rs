/// This module defines custom error types for csvscout, demonstrating Rust's error handling
/// compared to .NET's exception system.
///
/// .NET uses exceptions for error handling:
/// ```csharp
/// try {
///     var scanner = new CsvScanner(root);
///     scanner.SearchKeyword(keyword);
/// } catch (DirectoryNotFoundException ex) {
///     // Handle missing directory
/// } catch (UnauthorizedAccessException ex) {
///     // Handle permission error
/// }
/// ```
///
/// Rust uses Result types with custom errors:
/// ```rust,ignore
/// match Scanner::new(root) {
///     Ok(scanner) => // Scan succeeded,
///     Err(ScanError::DirectoryNotFound(path)) => // Handle missing directory,
///     Err(e) => // Handle other errors
/// }
/// ```
///
/// Only `DirectoryNotFound` (at construction or refresh) and `Config` are hard
/// conditions the caller must handle. Every other variant is reported as a
/// warning on the error channel and the scan degrades gracefully.
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for scan and search operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while scanning directories and reading CSV files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    FileAccessDenied(PathBuf),
    #[error("Unable to decode {path}: content does not match any supported encoding")]
    DecodeFailure { path: PathBuf },
    #[error("Malformed row {row} in {path}: {source}")]
    RowParse {
        path: PathBuf,
        row: usize,
        source: csv::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Canonicalize the path and strip UNC prefixes so that
/// comparisons on Windows are consistent.
pub fn unify_path(original: &Path) -> PathBuf {
    let canonical = original
        .canonicalize()
        .unwrap_or_else(|_| original.to_path_buf());
    strip_unc_prefix(&canonical)
}

/// Strips the Windows UNC prefix (\\?\) from a path if present
fn strip_unc_prefix(p: &Path) -> PathBuf {
    let s = p.display().to_string();
    if let Some(stripped) = s.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        p.to_path_buf()
    }
}

impl ScanError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn access_denied(path: impl Into<PathBuf>) -> Self {
        Self::FileAccessDenied(path.into())
    }

    pub fn decode_failure(path: impl Into<PathBuf>) -> Self {
        Self::DecodeFailure { path: path.into() }
    }

    pub fn row_parse(path: impl Into<PathBuf>, row: usize, source: csv::Error) -> Self {
        Self::RowParse {
            path: path.into(),
            row,
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
