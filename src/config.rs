use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have sensible defaults — the config file is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Library root to scan (used when the CLI gives no path).
    pub library_dir: Option<PathBuf>,
    /// Directory the two record logs are written to (defaults to the
    /// current working directory).
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from `~/.config/tunetally/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match config_path {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_none() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.library_dir.is_none());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn paths_parse_from_toml() {
        let config: AppConfig = toml::from_str(
            "library_dir = \"/music\"\noutput_dir = \"/tmp/reports\"\n",
        )
        .unwrap();
        assert_eq!(config.library_dir, Some(PathBuf::from("/music")));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/reports")));
    }
}
