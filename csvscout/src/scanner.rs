use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::errors::{unify_path, ScanError, ScanResult};
use crate::filters::{is_csv_file, should_ignore};
use crate::matcher::KeywordMatcher;
use crate::reader;
use crate::results::{ScanStats, SearchMatch};

/// Discovers CSV files under a root directory and searches them for keywords.
///
/// The path cache is built once at construction and replaced wholesale by
/// [`refresh`](Scanner::refresh). A scanner owns its cache exclusively; it is
/// not safe for concurrent refresh and search without external serialization,
/// but independent scanners share nothing.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    ignore_patterns: Vec<String>,
    csv_files: Vec<PathBuf>,
}

impl Scanner {
    /// Constructs a scanner and performs the initial scan.
    ///
    /// Fails with [`ScanError::DirectoryNotFound`] if `root` does not exist or
    /// is not a directory.
    pub fn new(root: impl AsRef<Path>) -> ScanResult<Self> {
        Self::with_patterns(root, Vec::new())
    }

    /// Constructs a scanner from configuration, honoring its ignore patterns
    pub fn with_config(config: &ScanConfig) -> ScanResult<Self> {
        Self::with_patterns(&config.root_path, config.ignore_patterns.clone())
    }

    fn with_patterns(root: impl AsRef<Path>, ignore_patterns: Vec<String>) -> ScanResult<Self> {
        let root = unify_path(root.as_ref());
        let csv_files = build_file_list(&root, &ignore_patterns)?;
        Ok(Self {
            root,
            ignore_patterns,
            csv_files,
        })
    }

    /// The canonicalized scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The cached CSV file paths, in scan order
    pub fn csv_files(&self) -> &[PathBuf] {
        &self.csv_files
    }

    /// Re-scans the root and atomically replaces the cached list.
    ///
    /// The new list is fully built before the swap, so a caller never observes
    /// a half-updated cache. If the root has vanished since construction the
    /// cache is replaced with an empty list and the error is returned.
    pub fn refresh(&mut self) -> ScanResult<()> {
        match build_file_list(&self.root, &self.ignore_patterns) {
            Ok(csv_files) => {
                self.csv_files = csv_files;
                Ok(())
            }
            Err(err) => {
                self.csv_files = Vec::new();
                Err(err)
            }
        }
    }

    /// Searches every cached file for the keyword, in cache order.
    ///
    /// A row yields at most one [`SearchMatch`], carrying every column index
    /// where the keyword occurred. Files that fail to open or decode
    /// contribute zero matches and a warning, without aborting the search.
    pub fn search_keyword(&self, keyword: &str, case_sensitive: bool) -> Vec<SearchMatch> {
        let matcher = KeywordMatcher::new(keyword, case_sensitive);
        let mut matches = Vec::new();

        for path in &self.csv_files {
            let rows = match reader::read_rows(path) {
                Ok(rows) => rows,
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            for (row_number, row) in rows {
                let matching_columns = matcher.matching_columns(&row);
                if !matching_columns.is_empty() {
                    matches.push(SearchMatch {
                        file_path: path.clone(),
                        row_number,
                        row_data: row,
                        matching_columns,
                    });
                }
            }
        }

        info!(
            "search for {:?} matched {} rows in {} files",
            keyword,
            matches.len(),
            self.csv_files.len()
        );
        matches
    }

    /// Derives counts from the current cache; pure projection, no side effects
    pub fn stats(&self) -> ScanStats {
        let mut directories: BTreeSet<&Path> =
            self.csv_files.iter().filter_map(|p| p.parent()).collect();
        directories.insert(&self.root);

        ScanStats {
            total_csv_files: self.csv_files.len(),
            total_directories_scanned: directories.len(),
        }
    }
}

/// Walks the directory tree and collects CSV file paths.
///
/// The walk is depth-first with siblings visited in file-name order, so the
/// cache order is deterministic within one run. Unreadable entries are skipped
/// with a warning and the traversal continues.
fn build_file_list(root: &Path, ignore_patterns: &[String]) -> ScanResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ScanError::directory_not_found(root));
    }

    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut csv_files = Vec::new();
    for entry in walker.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if is_csv_file(path) && !should_ignore(path, ignore_patterns) {
            csv_files.push(entry.into_path());
        }
    }

    debug!("found {} CSV files under {}", csv_files.len(), root.display());
    Ok(csv_files)
}
