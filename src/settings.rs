//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional settings file,
//! then `WHATSUP_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::sites::DEFAULT_SITES_FILE;

/// Default tracing filter. Logs go to stderr so they never reach the
/// status bar.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path to the sites file.
    pub sites_file: PathBuf,
    /// Tracing filter directive, e.g. `info` or `whats_up=debug`.
    pub log_level: String,
    /// Cap on concurrent status page requests. Unbounded when absent.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sites_file: PathBuf::from(DEFAULT_SITES_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_in_flight: None,
        }
    }
}

impl Settings {
    /// Load settings, optionally reading `path` as a settings file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("sites_file", DEFAULT_SITES_FILE)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("WHATSUP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sites_file, PathBuf::from("./.whats-up.json"));
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.max_in_flight, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "sites_file = \"/tmp/sites.json\"\nlog_level = \"debug\"\nmax_in_flight = 4"
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.sites_file, PathBuf::from("/tmp/sites.json"));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.max_in_flight, Some(4));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }
}
