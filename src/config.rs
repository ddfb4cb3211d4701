use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{model::filter::DEFAULT_PAGE_SIZE, util::log::PROJECT_NAME};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_NOTIFICATION_SECS: u64 = 4;

pub const API_URL_ENV: &str = "BOOKSHELF_API_URL";
pub const PAGE_SIZE_ENV: &str = "BOOKSHELF_PAGE_SIZE";
pub const PAGED_ENV: &str = "BOOKSHELF_PAGED";

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub paged: Option<bool>,
    pub notification_secs: Option<u64>,
}

/// Values read from the process environment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvConfig {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub paged: Option<bool>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()),
            page_size: lookup(PAGE_SIZE_ENV).and_then(|v| v.trim().parse().ok()),
            paged: lookup(PAGED_ENV).and_then(|v| parse_flag(&v)),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub page_size: u32,
    /// When off, the whole catalog is fetched and filtered locally.
    pub paged: bool,
    pub notification_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, EnvConfig::default())
    }
}

impl AppConfig {
    pub fn resolve(file: Option<FileConfig>, env: EnvConfig) -> Self {
        let file = file.unwrap_or_default();
        Self {
            api_url: env
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            page_size: env
                .page_size
                .or(file.page_size)
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            paged: env.paged.or(file.paged).unwrap_or(true),
            notification_ttl: Duration::from_secs(
                file.notification_secs.unwrap_or(DEFAULT_NOTIFICATION_SECS),
            ),
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let file = match find_config_file() {
            Some(path) => Some(load_config(&path)?),
            None => None,
        };
        Ok(Self::resolve(file, EnvConfig::from_env()))
    }
}

pub fn find_config_file() -> Option<PathBuf> {
    let cwd_config = PathBuf::from(format!("{}.toml", PROJECT_NAME.as_str()));
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    let config_file = crate::util::log::get_config_dir().join("config.toml");
    config_file.exists().then_some(config_file)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
