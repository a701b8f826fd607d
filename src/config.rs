//! Optional TOML settings for the command-line front end.
//!
//! Lookup order: an explicit `--config` path, then
//! `$XDG_CONFIG_HOME/kamar-notices/notices.toml`, then `$HOME/.config/kamar-notices/notices.toml`.
//! A missing file means defaults.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Directory name under the user's config directory.
pub const APP_DIR_NAME: &str = "kamar-notices";
/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "notices.toml";

/// Failure to load a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists (or was named explicitly) but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// What: User settings read from `notices.toml`.
///
/// Details:
/// - Every key is optional; command-line flags take precedence over file values.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Portal host or URL.
    pub host: Option<String>,
    /// Scheme for hosts given without one.
    pub use_https: bool,
    /// Whole-request timeout in seconds; unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// Log level used when neither `--log-level`, `--verbose` nor `RUST_LOG` is given.
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: None,
            use_https: true,
            timeout_secs: None,
            log_level: None,
        }
    }
}

/// What: Candidate settings files in priority order.
///
/// Inputs:
/// - `xdg_config`: Value of `XDG_CONFIG_HOME`, if set.
/// - `home`: Value of `HOME`, if set.
///
/// Output:
/// - Paths to check; empty or blank variables contribute nothing.
#[must_use]
pub fn candidate_paths(xdg_config: Option<&str>, home: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(xdg) = xdg_config.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(xdg).join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    if let Some(h) = home.filter(|h| !h.trim().is_empty()) {
        candidates.push(
            Path::new(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }
    candidates
}

/// First existing settings file from the environment's candidate paths.
#[must_use]
pub fn resolve_config_path() -> Option<PathBuf> {
    let xdg = env::var("XDG_CONFIG_HOME").ok();
    let home = env::var("HOME").ok();
    candidate_paths(xdg.as_deref(), home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// What: Read and parse one settings file.
///
/// # Errors
/// - `ConfigError::Io` when the file cannot be read
/// - `ConfigError::Parse` when it is not valid settings TOML
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// What: Load settings from an explicit path or the default locations.
///
/// Inputs:
/// - `explicit`: Path from `--config`; must exist when given.
///
/// Output:
/// - Parsed settings, or defaults when no file is found at the default locations.
///
/// # Errors
/// - Same as [`load_settings`]
pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return load_settings(path);
    }
    resolve_config_path().map_or_else(|| Ok(Settings::default()), |path| load_settings(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: All keys are read from a complete file.
    ///
    /// Inputs:
    /// - TOML file with host, scheme, timeout and log level.
    ///
    /// Output:
    /// - Matching `Settings`.
    fn loads_complete_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "host = \"portal.school.nz\"\nuse_https = false\ntimeout_secs = 20\nlog_level = \"debug\"\n",
        )
        .expect("write config");
        let settings = load(Some(&path)).expect("load config");
        assert_eq!(
            settings,
            Settings {
                host: Some("portal.school.nz".to_string()),
                use_https: false,
                timeout_secs: Some(20),
                log_level: Some("debug".to_string()),
            }
        );
    }

    #[test]
    fn empty_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").expect("write config");
        let settings = load_settings(&path).expect("load config");
        assert_eq!(settings, Settings::default());
        assert!(settings.use_https);
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load(Some(&dir.path().join("absent.toml"))).expect_err("file is absent");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "hots = \"typo\"\n").expect("write config");
        let err = load_settings(&path).expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    /// What: XDG location is checked before the HOME fallback; blank variables are skipped.
    ///
    /// Inputs:
    /// - Both variables set; only HOME set; XDG blank.
    ///
    /// Output:
    /// - Candidate lists in the documented order.
    fn candidate_order_prefers_xdg() {
        let both = candidate_paths(Some("/xdg"), Some("/home/u"));
        assert_eq!(
            both,
            vec![
                PathBuf::from("/xdg/kamar-notices/notices.toml"),
                PathBuf::from("/home/u/.config/kamar-notices/notices.toml"),
            ]
        );
        assert_eq!(candidate_paths(Some("  "), Some("/home/u")).len(), 1);
        assert!(candidate_paths(None, None).is_empty());
    }
}
