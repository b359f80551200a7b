use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use filesift::{MatchMode, ResultSet, SearchEngine, SearchRequest};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Recursively search for a string in all files of a given extension"
)]
struct Cli {
    /// Directory to search
    root: PathBuf,

    /// File-name suffix to include (e.g. .py, .txt); pass '' for all files
    extension: String,

    /// Substring to look for (regular expression with --regex)
    pattern: String,

    /// Interpret the pattern as a regular expression
    #[arg(short = 'r', long)]
    regex: bool,

    /// Search only the root directory's direct children
    #[arg(long)]
    no_recursive: bool,

    /// Match case exactly instead of folding it
    #[arg(short = 's', long)]
    case_sensitive: bool,

    /// Number of worker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Print the result set as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let request = SearchRequest::new(&cli.root, &cli.pattern)
        .with_extension(&cli.extension)
        .with_mode(if cli.regex {
            MatchMode::Regex
        } else {
            MatchMode::Literal
        })
        .with_recursive(!cli.no_recursive)
        .with_case_insensitive(!cli.case_sensitive);

    let engine = match cli.threads {
        Some(threads) => SearchEngine::with_thread_count(threads)?,
        None => SearchEngine::new()?,
    };
    let results = engine.search(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&cli, &results);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_results(cli: &Cli, results: &ResultSet) {
    if results.is_empty() {
        if cli.extension.is_empty() {
            println!("No files contain \"{}\".", cli.pattern);
        } else {
            println!(
                "No files with extension '{}' contain \"{}\".",
                cli.extension, cli.pattern
            );
        }
        return;
    }

    println!(
        "{} files containing \"{}\":",
        results.files_with_matches(),
        cli.pattern
    );
    for file_match in &results.matches {
        println!(
            "{}: {}",
            file_match.count.to_string().green(),
            file_match.path.display().to_string().blue()
        );
    }
    println!(
        "\nFound {} matches in {} of {} files",
        results.total_matches,
        results.files_with_matches(),
        results.files_searched
    );
}
