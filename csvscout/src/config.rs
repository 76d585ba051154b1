use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ScanError, ScanResult};
use crate::results::DEFAULT_MAX_ROW_DISPLAY;

/// Configuration for a scan, loadable from YAML and mergeable with CLI flags.
///
/// The configuration can be loaded from multiple locations in order of
/// precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.csvscout.yaml` in the current directory
/// 3. Global `$HOME/.config/csvscout/config.yaml`
///
/// Example:
/// ```yaml
/// root_path: "exports"
/// case_sensitive: false
/// ignore_patterns:
///   - "**/archive/**"
/// show_stats: true
/// max_row_display: 120
/// log_level: "info"
/// ```
///
/// CLI arguments take precedence over config file values; the merging behavior
/// is defined in [`merge_with_cli`](ScanConfig::merge_with_cli).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory to scan for CSV files
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Whether keyword matching is case-sensitive
    #[serde(default)]
    pub case_sensitive: bool,

    /// Paths to exclude from scanning (glob syntax)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Whether to print scan statistics before search results
    #[serde(default)]
    pub show_stats: bool,

    /// Maximum characters of a row rendering to display
    #[serde(default = "default_max_row_display")]
    pub max_row_display: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_row_display() -> usize {
    DEFAULT_MAX_ROW_DISPLAY
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            case_sensitive: false,
            ignore_patterns: Vec::new(),
            show_stats: false,
            max_row_display: default_max_row_display(),
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> ScanResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> ScanResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("csvscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".csvscout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ScanError::config(e.to_string()))
    }

    /// Merges CLI arguments with configuration file values.
    /// CLI values take precedence over config file values.
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        if cli_config.case_sensitive {
            self.case_sensitive = true;
        }
        if !cli_config.ignore_patterns.is_empty() {
            self.ignore_patterns = cli_config.ignore_patterns;
        }
        if cli_config.show_stats {
            self.show_stats = true;
        }
        if cli_config.max_row_display != default_max_row_display() {
            self.max_row_display = cli_config.max_row_display;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            root_path: "exports"
            case_sensitive: true
            ignore_patterns: ["**/archive/**"]
            show_stats: true
            max_row_display: 120
            log_level: "debug"
        "#;
        fs::write(&config_path, config_content).unwrap();

        let config = ScanConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.root_path, PathBuf::from("exports"));
        assert!(config.case_sensitive);
        assert_eq!(config.ignore_patterns, vec!["**/archive/**".to_string()]);
        assert!(config.show_stats);
        assert_eq!(config.max_row_display, 120);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, "root_path: \"data\"\n").unwrap();

        let config = ScanConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.root_path, PathBuf::from("data"));
        assert!(!config.case_sensitive);
        assert!(config.ignore_patterns.is_empty());
        assert!(!config.show_stats);
        assert_eq!(config.max_row_display, DEFAULT_MAX_ROW_DISPLAY);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_merge_with_cli() {
        let config_file = ScanConfig {
            root_path: PathBuf::from("exports"),
            case_sensitive: false,
            ignore_patterns: vec!["**/archive/**".to_string()],
            show_stats: false,
            max_row_display: 120,
            log_level: "info".to_string(),
        };

        let cli_config = ScanConfig {
            root_path: PathBuf::from("downloads"),
            case_sensitive: true,
            ignore_patterns: Vec::new(),
            show_stats: true,
            max_row_display: DEFAULT_MAX_ROW_DISPLAY,
            log_level: "debug".to_string(),
        };

        let merged = config_file.merge_with_cli(cli_config);
        assert_eq!(merged.root_path, PathBuf::from("downloads")); // CLI value
        assert!(merged.case_sensitive); // CLI value
        assert_eq!(
            merged.ignore_patterns,
            vec!["**/archive/**".to_string()] // File value (CLI empty)
        );
        assert!(merged.show_stats); // CLI value
        assert_eq!(merged.max_row_display, 120); // File value (CLI default)
        assert_eq!(merged.log_level, "debug"); // CLI value
    }
}
