// config.rs

//! Site configuration: a YAML file plus environment overrides, read once.

use color_eyre::eyre::{eyre, Result};
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::dom::{RootRepresentation, ThemeApplier};
use crate::store::{StoreSettings, DEFAULT_NAMESPACE};
use crate::theme::ThemeMode;

const DEFAULT_PORT: u16 = 3001;
const FILE_NAME: &str = "site.yml";
const APP_CONFIG_DIR: &str = "site-theme";
const STORAGE_FILE: &str = "storage.json";

pub const ENV_THEME_COLOR: &str = "SITE_THEME_COLOR";
pub const ENV_THEME_MODE: &str = "SITE_THEME_MODE";
pub const ENV_LANG: &str = "SITE_LANG";
pub const ENV_PORT: &str = "SITE_PORT";
pub const ENV_VERSION: &str = "SITE_VERSION";
pub const ENV_NAMESPACE: &str = "SITE_NAMESPACE";

/// Defaults the site was built with, consulted when storage has nothing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildDefaults {
    pub theme_color: Option<String>,
    pub theme_mode: Option<ThemeMode>,
    pub lang: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub namespace: String,
    pub theme_color: Option<String>,
    pub theme_mode: Option<ThemeMode>,
    pub lang: Option<String>,
    pub port: u16,
    /// Path segment the site is published under outside development
    pub version: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub colors_path: Option<PathBuf>,
    pub storage_path: Option<PathBuf>,
    pub representation: RootRepresentation,
    pub css_variables: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            theme_color: None,
            theme_mode: None,
            lang: None,
            port: DEFAULT_PORT,
            version: None,
            catalog_path: None,
            colors_path: None,
            storage_path: None,
            representation: RootRepresentation::default(),
            css_variables: false,
        }
    }
}

impl SiteConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        match dirs::config_dir() {
            Some(dir) => Ok(dir.join(APP_CONFIG_DIR).join(FILE_NAME)),
            None => Err(eyre!("No config directory found for site config")),
        }
    }

    /// Reads `path` (or the default location) and applies the process
    /// environment on top. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<SiteConfig> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        let mut config = Self::from_file(&path)?;
        config.apply_env(&std::env::vars().collect());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<SiteConfig> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(SiteConfig::default());
        }
        let config_string = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&config_string)
            .map_err(|e| eyre!("Invalid config {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Overrides fields from `SITE_*` variables. Empty or invalid values are ignored.
    pub fn apply_env(&mut self, env: &HashMap<String, String>) {
        let var = |name: &str| {
            env.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(color) = var(ENV_THEME_COLOR) {
            self.theme_color = Some(color);
        }
        if let Some(mode) = var(ENV_THEME_MODE) {
            match mode.parse() {
                Ok(mode) => self.theme_mode = Some(mode),
                Err(e) => warn!("Ignoring {ENV_THEME_MODE}: {e}"),
            }
        }
        if let Some(lang) = var(ENV_LANG) {
            self.lang = Some(lang);
        }
        if let Some(port) = var(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Ignoring {ENV_PORT}={port}: {e}"),
            }
        }
        if let Some(version) = var(ENV_VERSION) {
            self.version = Some(version);
        }
        if let Some(namespace) = var(ENV_NAMESPACE) {
            self.namespace = namespace;
        }
    }

    /// URL prefix the site is served from
    pub fn base_path(&self, development: bool) -> String {
        match (development, self.version.as_deref()) {
            (false, Some(version)) if !version.is_empty() => format!("/{version}/"),
            _ => "/".to_string(),
        }
    }

    pub fn build_defaults(&self) -> BuildDefaults {
        BuildDefaults {
            theme_color: self.theme_color.clone().filter(|c| !c.is_empty()),
            theme_mode: self.theme_mode,
            lang: self.lang.clone().filter(|l| !l.is_empty()),
        }
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            namespace: self.namespace.clone(),
            defaults: self.build_defaults(),
            applier: ThemeApplier::new(self.representation, self.css_variables),
        }
    }

    /// Where persisted preferences live when not configured explicitly
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(STORAGE_FILE))
        })
    }
}
