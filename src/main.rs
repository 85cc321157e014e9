use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use tunetally::config::AppConfig;
use tunetally::records::RecordWriter;
use tunetally::{report, scanner};

#[derive(Parser)]
#[command(name = "tunetally", version, about = "Music library statistics")]
struct Cli {
    /// Library root to scan (defaults to config file library_dir)
    library: Option<PathBuf>,

    /// Directory for the record logs (defaults to config, then the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();

    // Resolve the library root: CLI > config
    let library = match cli.library.or(config.library_dir) {
        Some(path) => path,
        None => anyhow::bail!(
            "No library to scan. Pass a path as an argument or set library_dir in config."
        ),
    };

    if !library.exists() {
        anyhow::bail!(
            "Library path not found: '{}' does not exist.\n\
             Check the path. Common locations:\n\
               ~/Music/Music/Media.localized/Music\n\
               ~/Music/iTunes/iTunes Music/Music\n\
             or, for an external drive:\n\
               /Volumes/<drive name>/.../iTunes Music/Music",
            library.display()
        );
    }
    if !library.is_dir() {
        anyhow::bail!(
            "'{}' exists but is not a directory. Provide the folder containing your music files.",
            library.display()
        );
    }

    // Resolve the record-log directory: CLI > config > cwd
    let output_dir = cli
        .output
        .or(config.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut records = RecordWriter::create(&output_dir)
        .with_context(|| format!("Failed to create record logs in {}", output_dir.display()))?;

    println!("Processing: {}", library.display());

    let started = Instant::now();
    let result = scanner::scan(&library, &mut records).context("Scan failed")?;
    records.finish().context("Failed to flush record logs")?;
    let elapsed = started.elapsed();

    println!();
    print!("{}", report::render(&result.stats));
    println!(">> Processing time: {}", report::format_elapsed(elapsed));

    Ok(())
}
