use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TankerConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(default)]
    pub color: ColorSetting,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    /// off, error, warn, info, debug or trace
    pub level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorSetting {
    #[default]
    Auto,
    Always,
    Never,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<TankerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config if it exists; a missing file means defaults.
pub fn load_config(path: &Path) -> anyhow::Result<TankerConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(TankerConfig::default())
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tanker"));
        }
    }
    Ok(home_dir()?.join(".config").join("tanker"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tanker"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("tanker"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: TankerConfig = toml::from_str(
            "[storage]\ndata_dir = \"/srv/tanker\"\n\n[ui]\ncolor = \"never\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .expect("parse");
        assert_eq!(config.storage.data_dir.as_deref(), Some("/srv/tanker"));
        assert_eq!(config.ui.color, ColorSetting::Never);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config: TankerConfig = toml::from_str("").expect("parse");
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.ui.color, ColorSetting::Auto);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("config.toml")).expect("load");
        assert!(config.logging.level.is_none());
    }
}
