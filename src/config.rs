use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix substituted for root-relative `href="/` and `src="/` links.
    pub base_path: String,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("docs"),
            template: PathBuf::from("template.html"),
        }
    }
}

impl Config {
    /// The bundled `default_config.toml`, checked by the build script.
    pub fn compiled_default() -> Self {
        Self::parse_or_default(DEFAULT_CONFIG)
    }

    fn parse_or_default(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bundled default config is invalid, using built-in values: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from a TOML file, or return the compiled defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compiled_default_matches_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config =
            Config::from_toml(Path::new("site.toml"), "base_path = \"/blog/\"\n").unwrap();
        assert_eq!(config.base_path, "/blog/");
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = Config::from_toml(Path::new("site.toml"), "base_path = [").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn wrongly_typed_value_is_an_error() {
        let err = Config::from_toml(Path::new("site.toml"), "base_path = 1\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn unparsable_bundled_config_falls_back() {
        assert_eq!(Config::parse_or_default("base_path = 1\n"), Config::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
