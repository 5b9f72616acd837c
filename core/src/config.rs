use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::model::dataset::SortOrder;

const DEFAULT_SPREADSHEET_ID: &str = "1mhzjuXpC7YYus9qvzlLahRwlz3QaQgjVQpYNRaugOU4";
const DEFAULT_ACCESS_PASSWORD: &str = "3737";
const CONFIG_DIR_NAME: &str = "salesboard";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_id: String,
    /// ダッシュボードの簡易パスワード。本当の認証ではない。
    pub access_password: String,
    pub export_dir: PathBuf,
    pub sort_order: SortOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            access_password: DEFAULT_ACCESS_PASSWORD.to_string(),
            export_dir: PathBuf::from("."),
            sort_order: SortOrder::default(),
        }
    }
}

impl Config {
    /// `~/.config/salesboard/config.toml` (platform dependent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            access_password = "secret"
            sort_order = "oldest"
            "#,
        )
        .unwrap();
        assert_eq!(config.access_password, "secret");
        assert_eq!(config.sort_order, SortOrder::Oldest);
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("sort_order = \"sideways\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "export_dir = \"exports\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
