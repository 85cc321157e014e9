pub mod classify;
pub mod metadata;

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use walkdir::WalkDir;

use crate::records::{FileRecord, RecordError, RecordWriter};
use crate::stats::LibraryStats;
use crate::SUPPORTED_EXTENSIONS;
use classify::{classify, FileKind};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record log error: {0}")]
    Record(#[from] RecordError),
}

/// What one scan produced: the aggregate histograms plus the split between
/// files that classified and files that could not be read.
pub struct ScanResult {
    pub stats: LibraryStats,
    pub processed: u64,
    pub failed: u64,
}

/// Scan a library root and account for every candidate file exactly once:
/// each one updates the stats and lands in exactly one of the two record
/// logs. Per-file extraction failures are recovered locally; the scan only
/// aborts if a record log cannot be written.
pub fn scan(root: &Path, records: &mut RecordWriter) -> Result<ScanResult, ScanError> {
    // First pass: collect candidate files so the progress bar has a length.
    let candidates: Vec<walkdir::DirEntry> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .collect();

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) ({eta}) {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message("Scanning...");

    let mut stats = LibraryStats::default();
    let mut processed = 0u64;
    let mut failed = 0u64;

    for entry in &candidates {
        let path = entry.path();
        let Some(kind) = FileKind::from_path(path) else {
            continue;
        };
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        match metadata::extract(path) {
            Ok(raw) => {
                let classified = classify(path, kind, &raw);
                stats.record(&classified, size);
                records.write(FileRecord::Processed {
                    classified: &classified,
                    path,
                })?;
                processed += 1;
            }
            Err(e) => {
                log::warn!("Skipping metadata for {}: {}", path.display(), e);
                stats.record_unreadable(kind, size);
                records.write(FileRecord::Failed {
                    kind,
                    path,
                    error: e.to_string(),
                })?;
                failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!("Done: {} processed, {} unreadable", processed, failed));

    Ok(ScanResult {
        stats,
        processed,
        failed,
    })
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}
