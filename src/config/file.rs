//! Configuration file support for persistent settings.
//!
//! Settings are read from a TOML file located at `~/.config/hexwalk/config.toml`
//! (or the platform-specific equivalent). Values in the file act as defaults
//! that CLI arguments can override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [hex]
//! lowercase = true
//!
//! [size]
//! dirs = ["~/Projects", "~/Downloads"]
//! policy = "files"
//! follow_links = false
//! max_depth = 8
//! verbose = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can tell which values the file actually
/// sets and layer them under the CLI arguments.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Codec options
    #[serde(default)]
    pub hex: FileHexConfig,

    /// Directory size options
    #[serde(default)]
    pub size: FileSizeConfig,
}

/// Codec options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileHexConfig {
    /// Encode with lowercase `a-f` instead of uppercase
    pub lowercase: Option<bool>,
}

/// Directory size options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileSizeConfig {
    /// Default directories to measure
    pub dirs: Option<Vec<PathBuf>>,

    /// Size policy (`"files"` or `"all"`)
    pub policy: Option<String>,

    /// Whether to follow symlinks
    pub follow_links: Option<bool>,

    /// Maximum depth below each root
    pub max_depth: Option<usize>,

    /// Whether to log walk progress and skipped entries in detail
    pub verbose: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` when the platform config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hexwalk").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if it
    /// contains invalid TOML or unknown fields.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.hex.lowercase.is_none());
        assert!(config.size.dirs.is_none());
        assert!(config.size.policy.is_none());
        assert!(config.size.follow_links.is_none());
        assert!(config.size.max_depth.is_none());
        assert!(config.size.verbose.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[hex]
lowercase = true

[size]
dirs = ["~/Projects", "/tmp"]
policy = "all"
follow_links = true
max_depth = 4
verbose = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.hex.lowercase, Some(true));
        assert_eq!(
            config.size.dirs,
            Some(vec![PathBuf::from("~/Projects"), PathBuf::from("/tmp")])
        );
        assert_eq!(config.size.policy, Some("all".to_string()));
        assert_eq!(config.size.follow_links, Some(true));
        assert_eq!(config.size.max_depth, Some(4));
        assert_eq!(config.size.verbose, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[size]
policy = "files"
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.hex.lowercase.is_none());
        assert_eq!(config.size.policy, Some("files".to_string()));
        assert!(config.size.dirs.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.hex.lowercase.is_none());
        assert!(config.size.policy.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[size]
max_depth = "deep"
"#;
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_unknown_field_errors() {
        let toml_content = r"
[hex]
uppercase = true
";
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with(Path::new("hexwalk").join("config.toml")));
        }
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert!(config.hex.lowercase.is_none());
        assert!(config.size.dirs.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[hex]\nlowercase = true\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.hex.lowercase, Some(true));
    }

    #[test]
    fn test_load_from_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[size\n").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/Projects"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Projects"));
        }
    }

    #[test]
    fn test_expand_tilde_bare() {
        let expanded = expand_tilde(&PathBuf::from("~"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }

    #[test]
    fn test_expand_tilde_no_effect_on_non_tilde() {
        let relative = PathBuf::from("some/relative/path");
        assert_eq!(expand_tilde(&relative), relative);

        let absolute = PathBuf::from("/usr/local/bin");
        assert_eq!(expand_tilde(&absolute), absolute);

        // A tilde in the middle is not a home reference.
        let middle = PathBuf::from("a/~/b");
        assert_eq!(expand_tilde(&middle), middle);
    }
}
