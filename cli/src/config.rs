use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

const APP_DIR_NAME: &str = "minimalist-todo";
const HOME_DIR_NAME: &str = ".minimalist-todo";

/// Where records live. `data_dir` is `None` for an in-memory session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn resolve(data_dir: Option<PathBuf>, ephemeral: bool) -> Result<Self> {
        if ephemeral {
            return Ok(Self { data_dir: None });
        }
        let dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        Ok(Self {
            data_dir: Some(dir),
        })
    }
}

/// The platform data directory (e.g. `~/.local/share/minimalist-todo`), or
/// `~/.minimalist-todo` when the platform has none.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(APP_DIR_NAME));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(HOME_DIR_NAME))
}
