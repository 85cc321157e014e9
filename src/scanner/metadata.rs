use std::fs::File;
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::TaggedFileExt;
use lofty::mp4::Mp4File;
use lofty::prelude::*;
use thiserror::Error;

/// Raw technical metadata pulled from one media file.
///
/// Every field is optional: absence means the container does not carry the
/// value, which is distinct from the read failing outright.
#[derive(Debug, Default)]
pub struct RawMetadata {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    /// Codec descriptor, e.g. "Alac" or "Aac". Only MP4-family containers report one.
    pub codec: Option<String>,
    /// Average audio bitrate in kbps.
    pub bitrate_kbps: Option<u32>,
    pub sample_rate_hz: Option<u32>,
    pub bit_depth: Option<u8>,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] lofty::error::LoftyError),
}

/// Read tags and stream properties from a media file.
///
/// An error here means the file could not be parsed at all; the caller
/// routes it to the error log. Missing fields inside a successful read are
/// normal and left to the classifier's fallbacks.
pub fn extract(path: &Path) -> Result<RawMetadata, MetadataError> {
    if is_mp4_container(path) {
        extract_mp4(path)
    } else {
        extract_tagged(path)
    }
}

fn is_mp4_container(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("m4a" | "mp4" | "m4v")
    )
}

/// MP4-family containers are read with the concrete reader so the codec
/// atom is visible; the generic probe cannot tell ALAC from AAC.
fn extract_mp4(path: &Path) -> Result<RawMetadata, MetadataError> {
    let mut file = File::open(path)?;
    let mp4 = Mp4File::read_from(&mut file, ParseOptions::new())?;
    let properties = mp4.properties();

    let mut meta = RawMetadata {
        codec: Some(format!("{:?}", properties.codec())),
        bitrate_kbps: Some(properties.audio_bitrate()),
        sample_rate_hz: Some(properties.sample_rate()),
        bit_depth: properties.bit_depth(),
        ..RawMetadata::default()
    };

    if let Some(ilst) = mp4.ilst() {
        meta.artist = non_empty(ilst.artist());
        meta.album = non_empty(ilst.album());
        meta.title = non_empty(ilst.title());
    }

    Ok(meta)
}

fn extract_tagged(path: &Path) -> Result<RawMetadata, MetadataError> {
    let tagged = lofty::read_from_path(path)?;
    let properties = tagged.properties();

    let mut meta = RawMetadata {
        bitrate_kbps: properties.audio_bitrate(),
        sample_rate_hz: properties.sample_rate(),
        bit_depth: properties.bit_depth(),
        ..RawMetadata::default()
    };

    // Primary tag first, then whatever else the file carries
    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        meta.artist = non_empty(tag.artist())
            .or_else(|| non_empty(tag.get_string(&ItemKey::AlbumArtist)));
        meta.album = non_empty(tag.album());
        meta.title = non_empty(tag.title());
    }

    Ok(meta)
}

fn non_empty<S: AsRef<str>>(value: Option<S>) -> Option<String> {
    value
        .map(|v| v.as_ref().to_string())
        .filter(|v| !v.trim().is_empty())
}
