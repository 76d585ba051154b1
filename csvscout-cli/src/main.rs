use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use csvscout::{format_search_results, ScanConfig, ScanStats, Scanner};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Recursively scan directories for CSV files and search for keywords
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory to scan for CSV files
    directory: PathBuf,

    /// Keyword to search for in CSV files
    keyword: String,

    /// Perform a case-sensitive search
    #[arg(short = 'c', long)]
    case_sensitive: bool,

    /// Show statistics about scanned files
    #[arg(short, long)]
    stats: bool,

    /// Maximum characters to display per row
    #[arg(long, default_value_t = 100)]
    max_display: usize,

    /// Paths to exclude from scanning (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print matches as a JSON array instead of formatted text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = ScanConfig::load_from(cli.config.as_deref())?;
    let config = file_config.merge_with_cli(ScanConfig {
        root_path: cli.directory,
        case_sensitive: cli.case_sensitive,
        ignore_patterns: cli.ignore,
        show_stats: cli.stats,
        max_row_display: cli.max_display,
        log_level: cli.log_level.unwrap_or_else(|| "warn".to_string()),
    });

    init_logging(&config.log_level);

    let scanner = Scanner::with_config(&config)
        .with_context(|| format!("failed to scan {}", config.root_path.display()))?;
    debug!(
        "scanned {} with {} CSV files cached",
        scanner.root().display(),
        scanner.csv_files().len()
    );

    if cli.json {
        // Machine-readable mode: nothing but the JSON array on stdout
        let matches = scanner.search_keyword(&cli.keyword, config.case_sensitive);
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if config.show_stats {
        print_stats(&scanner.stats());
    }

    println!(
        "Searching for '{}' in {} CSV files...",
        cli.keyword.bold(),
        scanner.csv_files().len()
    );

    let matches = scanner.search_keyword(&cli.keyword, config.case_sensitive);
    println!("{}", format_search_results(&matches, config.max_row_display));
    Ok(())
}

fn print_stats(stats: &ScanStats) {
    println!("{}", "Statistics:".bold());
    println!(
        "  Total CSV files found: {}",
        stats.total_csv_files.to_string().green()
    );
    println!(
        "  Directories scanned: {}",
        stats.total_directories_scanned.to_string().green()
    );
    println!();
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
