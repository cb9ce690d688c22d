use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use wacleaner_core::{DeleteConfig, ListingConfig, SortCriteria, SortKey};

/// Home directory of the regular WhatsApp app on Android
pub const DEFAULT_HOME: &str = "/storage/emulated/0/Android/media/com.whatsapp/WhatsApp";

/// Optional settings file, `<config_dir>/wacleaner/config.toml`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub home: Option<PathBuf>,
    pub sort: Option<SortKey>,
    pub descending: Option<bool>,
    pub include_hidden: Option<bool>,
    pub delete_workers: Option<usize>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wacleaner").join("config.toml"))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("Invalid config file")
    }

    /// Load `explicit`, or the default file if it exists.
    /// A missing default file yields the default config; a missing explicit one is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Could not read {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Self::parse(&content).wrap_err_with(|| format!("in {}", path.display()))
    }
}

/// Effective settings after merging flags over the config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    pub criteria: SortCriteria,
    pub listing: ListingConfig,
    pub delete: DeleteConfig,
}

impl Settings {
    pub fn resolve(
        config: &Config,
        home: Option<PathBuf>,
        sort: Option<SortKey>,
        descending: Option<bool>,
    ) -> Self {
        let home = home
            .or_else(|| config.home.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME));
        let defaults = SortCriteria::default();
        let criteria = SortCriteria::new(
            sort.or(config.sort).unwrap_or(defaults.key),
            descending.or(config.descending).unwrap_or(defaults.descending),
        );

        Self {
            home,
            criteria,
            listing: ListingConfig {
                include_hidden: config.include_hidden.unwrap_or(false),
            },
            delete: DeleteConfig {
                num_workers: config.delete_workers.unwrap_or(0),
            },
        }
    }
}
