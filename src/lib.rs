pub mod config;
pub mod records;
pub mod report;
pub mod scanner;
pub mod stats;

/// Media file extensions we inspect. Everything else is skipped during the walk.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "aac", "wav", "aiff", "flac",
    // Video containers
    "mp4", "m4v",
];

/// Application name for XDG paths
pub const APP_NAME: &str = "tunetally";
