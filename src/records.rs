use std::fs::File;
use std::path::Path;

use csv::Writer;
use thiserror::Error;

use crate::scanner::classify::{Classified, FileKind};

/// Log of files whose metadata was read successfully.
pub const PROCESSED_LOG: &str = "processed_files.csv";

/// Log of files whose metadata extraction failed.
pub const ERROR_LOG: &str = "error_files.csv";

const COLUMNS: [&str; 8] = [
    "Artist",
    "Album",
    "Song",
    "File Type",
    "Bitrate",
    "Sample Rate",
    "Sample size",
    "File Path",
];

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row for one scanned file, routed to exactly one of the two logs.
pub enum FileRecord<'a> {
    Processed {
        classified: &'a Classified,
        path: &'a Path,
    },
    Failed {
        kind: FileKind,
        path: &'a Path,
        error: String,
    },
}

/// Writer over the two record logs.
///
/// Both logs are created up front (truncating any previous run) with their
/// header rows. Each scanned file goes through a single `write` call and
/// lands in exactly one log.
pub struct RecordWriter {
    processed: Writer<File>,
    errors: Writer<File>,
}

impl RecordWriter {
    pub fn create(dir: &Path) -> Result<Self, RecordError> {
        let mut processed = Writer::from_path(dir.join(PROCESSED_LOG))?;
        processed.write_record(COLUMNS)?;

        let mut errors = Writer::from_path(dir.join(ERROR_LOG))?;
        errors.write_record(COLUMNS.iter().copied().chain(["Error"]))?;

        Ok(Self { processed, errors })
    }

    pub fn write(&mut self, record: FileRecord<'_>) -> Result<(), RecordError> {
        match record {
            FileRecord::Processed { classified, path } => {
                let bitrate = classified.bitrate.to_string();
                let sample_rate = sample_rate_field(classified.sample_rate_hz);
                let bit_depth = classified.bit_depth.to_string();
                let path_text = path.display().to_string();
                self.processed.write_record([
                    classified.artist.as_str(),
                    classified.album.as_str(),
                    classified.title.as_str(),
                    classified.kind.label(),
                    bitrate.as_str(),
                    sample_rate.as_str(),
                    bit_depth.as_str(),
                    path_text.as_str(),
                ])?;
            }
            FileRecord::Failed { kind, path, error } => {
                let path_text = path.display().to_string();
                self.errors.write_record([
                    "",
                    "",
                    "",
                    kind.label(),
                    "",
                    "",
                    "",
                    path_text.as_str(),
                    error.as_str(),
                ])?;
            }
        }
        Ok(())
    }

    /// Flush both logs. Called once, after the walk completes.
    pub fn finish(mut self) -> Result<(), RecordError> {
        self.processed.flush()?;
        self.errors.flush()?;
        Ok(())
    }
}

fn sample_rate_field(sample_rate_hz: Option<u32>) -> String {
    sample_rate_hz
        .map(|hz| format!("{} Hz", hz))
        .unwrap_or_default()
}
