use std::collections::BTreeMap;

use crate::scanner::classify::{BitrateClass, Classified, DepthClass, FileKind, MediaKind};

/// Running totals for one scan.
///
/// Owned by the scan loop, mutated once per file, and handed to the report
/// renderer by reference once the walk finishes. Keys are `BTreeMap`s so the
/// renderer's ordering rules (alphabetical labels, ascending rates) fall out
/// of key order.
#[derive(Debug, Default)]
pub struct LibraryStats {
    pub total_files: u64,
    pub total_size_bytes: u64,
    pub file_types: BTreeMap<&'static str, u64>,
    pub bitrates: BTreeMap<BitrateClass, u64>,
    pub sample_rates: BTreeMap<u32, u64>,
    pub bit_depths: BTreeMap<DepthClass, u64>,
    pub media_types: BTreeMap<MediaKind, u64>,
}

impl LibraryStats {
    /// Record a fully classified file: one bucket in each of the file-type,
    /// media-type, bitrate, and bit-depth histograms, plus the sample-rate
    /// histogram when the rate is known.
    pub fn record(&mut self, classified: &Classified, size_bytes: u64) {
        self.total_files += 1;
        self.total_size_bytes += size_bytes;
        *self.file_types.entry(classified.kind.label()).or_insert(0) += 1;
        *self.media_types.entry(classified.media).or_insert(0) += 1;
        *self.bitrates.entry(classified.bitrate).or_insert(0) += 1;
        if let Some(hz) = classified.sample_rate_hz {
            *self.sample_rates.entry(hz).or_insert(0) += 1;
        }
        *self.bit_depths.entry(classified.bit_depth).or_insert(0) += 1;
    }

    /// Record a file whose metadata could not be read. The extension still
    /// tells us what it is and the filesystem how big it is; the
    /// stream-level histograms (bitrate, sample rate, bit depth) get no
    /// entry for it.
    pub fn record_unreadable(&mut self, kind: FileKind, size_bytes: u64) {
        self.total_files += 1;
        self.total_size_bytes += size_bytes;
        *self.file_types.entry(kind.label()).or_insert(0) += 1;
        *self.media_types.entry(kind.media_kind()).or_insert(0) += 1;
    }
}
