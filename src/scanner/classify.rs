use std::fmt;
use std::path::Path;

use crate::scanner::metadata::RawMetadata;

/// Bit-depth sentinel for `.m4a` files whose stream info carries no sample size.
pub const DEPTH_UNKNOWN_AAC: &str = "Unknown (likely 16-bit AAC)";

/// Bit-depth sentinel for every other format with no readable sample size.
pub const DEPTH_UNKNOWN_GENERIC: &str = "Unknown / N/A (likely 16-bit)";

/// Audio vs video, decided by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
        }
    }
}

/// The bucket a file is counted under in the file-type histogram.
///
/// `.m4a` starts life as `M4aAac` and is upgraded to `Alac` during
/// classification when the container's codec says so. The upgrade happens
/// before any histogram counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Mp3,
    M4aAac,
    Alac,
    Aac,
    Wav,
    Aiff,
    Flac,
    Mp4,
    M4v,
}

impl FileKind {
    /// Map a file extension (any case) to its provisional kind.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(FileKind::Mp3),
            "m4a" => Some(FileKind::M4aAac),
            "aac" => Some(FileKind::Aac),
            "wav" => Some(FileKind::Wav),
            "aiff" => Some(FileKind::Aiff),
            "flac" => Some(FileKind::Flac),
            "mp4" => Some(FileKind::Mp4),
            "m4v" => Some(FileKind::M4v),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<FileKind> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(FileKind::from_extension)
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Mp3 => "MP3",
            FileKind::M4aAac => "M4A (AAC)",
            FileKind::Alac => "ALAC",
            FileKind::Aac => "AAC",
            FileKind::Wav => "WAV",
            FileKind::Aiff => "AIFF",
            FileKind::Flac => "FLAC",
            FileKind::Mp4 => "MP4",
            FileKind::M4v => "M4V",
        }
    }

    pub fn media_kind(self) -> MediaKind {
        match self {
            FileKind::Mp4 | FileKind::M4v => MediaKind::Video,
            _ => MediaKind::Audio,
        }
    }
}

/// Bitrate bucket in kbps, or the sentinel for files where no rate could be
/// measured and no per-format fallback applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitrateClass {
    Kbps(u32),
    Unknown,
}

impl fmt::Display for BitrateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitrateClass::Kbps(kbps) => write!(f, "{} kbps", kbps),
            BitrateClass::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Bits per sample, or a descriptive sentinel when the stream info has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepthClass {
    Bits(u8),
    Unknown(&'static str),
}

impl fmt::Display for DepthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthClass::Bits(bits) => write!(f, "{}-bit", bits),
            DepthClass::Unknown(text) => write!(f, "{}", text),
        }
    }
}

/// Everything we know about one file once classification is done.
#[derive(Debug)]
pub struct Classified {
    pub kind: FileKind,
    pub media: MediaKind,
    pub bitrate: BitrateClass,
    pub sample_rate_hz: Option<u32>,
    pub bit_depth: DepthClass,
    pub artist: String,
    pub album: String,
    pub title: String,
}

/// Fold raw metadata into final classification buckets.
///
/// The codec check runs first; every later rule sees the final kind.
/// Missing fields trigger the per-format fallbacks. Extraction failures
/// never reach this function.
pub fn classify(path: &Path, kind: FileKind, raw: &RawMetadata) -> Classified {
    let kind = resolve_codec(kind, raw.codec.as_deref());

    let bitrate = match raw.bitrate_kbps {
        Some(kbps) if kbps > 0 => BitrateClass::Kbps(kbps),
        _ => fallback_bitrate(kind),
    };

    let sample_rate_hz = raw.sample_rate_hz.filter(|&hz| hz > 0);

    let bit_depth = match raw.bit_depth {
        Some(bits) if bits > 0 => DepthClass::Bits(bits),
        _ => fallback_depth(kind),
    };

    let artist = clean(raw.artist.as_deref());
    let album = clean(raw.album.as_deref());
    let mut title = clean(raw.title.as_deref());
    if title.is_empty() {
        title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    Classified {
        kind,
        media: kind.media_kind(),
        bitrate,
        sample_rate_hz,
        bit_depth,
        artist,
        album,
        title,
    }
}

/// Upgrade an `.m4a` to ALAC when the codec descriptor carries the lossless
/// marker. Only the ambiguous M4A container qualifies; other kinds keep
/// whatever the extension said.
fn resolve_codec(kind: FileKind, codec: Option<&str>) -> FileKind {
    match (kind, codec) {
        (FileKind::M4aAac, Some(codec)) if codec.to_lowercase().contains("alac") => FileKind::Alac,
        _ => kind,
    }
}

fn fallback_bitrate(kind: FileKind) -> BitrateClass {
    match kind {
        // Common average for older MP3s
        FileKind::Mp3 => BitrateClass::Kbps(192),
        // Assume CD-quality lossless when nothing was read
        FileKind::M4aAac | FileKind::Alac => BitrateClass::Kbps(1411),
        _ => BitrateClass::Unknown,
    }
}

fn fallback_depth(kind: FileKind) -> DepthClass {
    match kind {
        // MP3 is effectively 16-bit
        FileKind::Mp3 => DepthClass::Bits(16),
        FileKind::M4aAac => DepthClass::Unknown(DEPTH_UNKNOWN_AAC),
        _ => DepthClass::Unknown(DEPTH_UNKNOWN_GENERIC),
    }
}

fn clean(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
