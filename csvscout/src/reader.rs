use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{ScanError, ScanResult};

/// Number of leading lines sampled for delimiter detection
const SNIFF_LINES: usize = 10;

/// Decode attempts in order; the first that decodes without error wins.
/// A lossy UTF-8 pass follows as the permissive terminal fallback.
static ENCODING_ATTEMPTS: &[&Encoding] = &[UTF_8, WINDOWS_1252];

const DELIMITER_CANDIDATES: &[u8] = &[b',', b';', b'\t', b'|'];

/// Opens a CSV file and returns a lazy iterator of (row_number, columns).
///
/// Each call opens the file anew, so the sequence is restartable. Row numbers
/// are 1-indexed and a header line counts as row 1. Malformed rows are skipped
/// with a warning; they still advance the row number.
pub fn read_rows(path: &Path) -> ScanResult<RowIter> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => ScanError::access_denied(path),
        _ => ScanError::Io(e),
    })?;

    let (content, encoding) = decode_bytes(&bytes, path)?;
    debug!("decoded {} as {}", path.display(), encoding);

    let delimiter = detect_delimiter(&content);
    let reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.into_bytes()));

    Ok(RowIter {
        records: reader.into_records(),
        path: path.to_path_buf(),
        row_number: 0,
    })
}

/// Decodes file bytes by trying each supported encoding in order.
///
/// NUL bytes mark the content as binary; such files are rejected with
/// `DecodeFailure` before any decode attempt.
fn decode_bytes(bytes: &[u8], path: &Path) -> ScanResult<(String, &'static str)> {
    if bytes.contains(&0) {
        return Err(ScanError::decode_failure(path));
    }

    for encoding in ENCODING_ATTEMPTS {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok((text.into_owned(), encoding.name()));
        }
    }

    warn!("replaced invalid byte sequences in {}", path.display());
    Ok((String::from_utf8_lossy(bytes).into_owned(), "utf-8 (lossy)"))
}

/// Picks the delimiter whose per-line count is most consistent across a sample
/// of leading lines. Falls back to comma.
fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best_delimiter = b',';
    let mut best_score = 0.0f32;

    for &delimiter in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delimiter).count())
            .collect();

        let mean = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
        let variance = counts
            .iter()
            .map(|&c| (c as f32 - mean).powi(2))
            .sum::<f32>()
            / counts.len() as f32;

        // Frequent and consistent beats frequent and erratic
        let score = mean / (1.0 + variance.sqrt());
        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

/// Lazy row sequence over a single CSV file
pub struct RowIter {
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    path: PathBuf,
    row_number: usize,
}

impl std::fmt::Debug for RowIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIter")
            .field("path", &self.path)
            .field("row_number", &self.row_number)
            .finish_non_exhaustive()
    }
}

impl Iterator for RowIter {
    type Item = (usize, Vec<String>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.records.next()? {
                Ok(record) => {
                    self.row_number += 1;
                    let row = record.iter().map(str::to_string).collect();
                    return Some((self.row_number, row));
                }
                Err(source) => {
                    // Keep numbering consistent with the raw record sequence
                    self.row_number += 1;
                    let err = ScanError::row_parse(&self.path, self.row_number, source);
                    warn!("{}", err);
                }
            }
        }
    }
}
