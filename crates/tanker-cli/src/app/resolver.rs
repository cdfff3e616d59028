//! Path and clock resolution.

use std::path::PathBuf;

use tanker_core::date_input::{format_digits_as_date, parse_date};
use tanker_core::{Clock, FixedClock, SystemClock};

use crate::config::{default_config_path, default_data_dir, TankerConfig};

/// Config file path, `TANKER_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("TANKER_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Data directory: `--data-dir` / `TANKER_DATA_DIR`, then the config's
/// `[storage] data_dir`, then the XDG data directory.
pub fn resolve_data_dir(flag: Option<&PathBuf>, config: &TankerConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.clone());
    }
    if let Some(path) = config.storage.data_dir.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_data_dir()
}

/// `--today` pins the clock; without it the system clock is used.
pub fn parse_today(value: Option<&str>) -> anyhow::Result<Box<dyn Clock>> {
    match value {
        None => Ok(Box::new(SystemClock)),
        Some(raw) => {
            let date = parse_date(&format_digits_as_date(raw))
                .ok_or_else(|| anyhow::anyhow!("Invalid --today date: {} (use DD/MM/YYYY)", raw))?;
            Ok(Box::new(FixedClock::new(date)))
        }
    }
}
