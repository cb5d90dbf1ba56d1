//! Theme catalog and color database models

use enum_iterator::Sequence;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::parser::CssColor;

pub const DEFAULT_FOOTER_LOGO_VARIANT: &str = "white";
pub const DEFAULT_QR_CODE_IMAGE: &str = "qrcode_d";
pub const DEFAULT_NAV_TYPE: &str = "type-1";

/// Display mode of a theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Sequence, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Accepts the same spellings as [`FromStr`], so `Light` in a config file works.
impl<'de> Deserialize<'de> for ThemeMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// Logo variants shown in the footer, one per brand slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLogo {
    pub bb: String,
    pub ub: String,
}

impl Default for FooterLogo {
    fn default() -> Self {
        Self {
            bb: DEFAULT_FOOTER_LOGO_VARIANT.to_string(),
            ub: DEFAULT_FOOTER_LOGO_VARIANT.to_string(),
        }
    }
}

/// One entry of the theme catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    /// Stable key, also the value persisted in storage
    pub theme_name: String,
    /// Mode applied when this theme is selected
    pub theme_mode: ThemeMode,
    /// Identifiers into the color database. `None` defers to the catalog-wide list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_variables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_logo: Option<FooterLogo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_qrcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_nav: Option<String>,
}

impl ThemeDefinition {
    pub fn new(theme_name: impl Into<String>, theme_mode: ThemeMode) -> Self {
        Self {
            theme_name: theme_name.into(),
            theme_mode,
            color_variables: None,
            footer_logo: None,
            img_qrcode: None,
            theme_nav: None,
        }
    }
}

/// An option for a theme picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub value: String,
    pub label: String,
}

/// Immutable, ordered collection of theme definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCatalog {
    #[serde(default)]
    pub(crate) color_themes: Vec<ThemeDefinition>,
    /// Used by known themes that carry no list of their own
    #[serde(default)]
    pub(crate) color_variables: Vec<String>,
}

impl ThemeCatalog {
    pub fn new(color_themes: Vec<ThemeDefinition>, color_variables: Vec<String>) -> Self {
        Self {
            color_themes,
            color_variables,
        }
    }

    pub fn themes(&self) -> &[ThemeDefinition] {
        &self.color_themes
    }

    pub fn find_theme(&self, name: &str) -> Option<&ThemeDefinition> {
        self.color_themes.iter().find(|t| t.theme_name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_theme(name).is_some()
    }

    pub fn default_mode_of(&self, name: &str) -> Option<ThemeMode> {
        self.find_theme(name).map(|t| t.theme_mode)
    }

    /// Color identifiers for a theme; empty when the theme is unknown.
    pub fn color_variables_of(&self, name: &str) -> &[String] {
        match self.find_theme(name) {
            Some(theme) => theme
                .color_variables
                .as_deref()
                .unwrap_or(&self.color_variables),
            None => &[],
        }
    }

    pub fn footer_logo_of(&self, name: &str) -> FooterLogo {
        self.find_theme(name)
            .and_then(|t| t.footer_logo.clone())
            .unwrap_or_default()
    }

    pub fn qr_code_image_of(&self, name: &str) -> &str {
        self.find_theme(name)
            .and_then(|t| t.img_qrcode.as_deref())
            .unwrap_or(DEFAULT_QR_CODE_IMAGE)
    }

    pub fn nav_type_of(&self, name: &str) -> &str {
        self.find_theme(name)
            .and_then(|t| t.theme_nav.as_deref())
            .unwrap_or(DEFAULT_NAV_TYPE)
    }

    pub fn options(&self) -> Vec<ThemeOption> {
        self.color_themes
            .iter()
            .map(|t| ThemeOption {
                value: t.theme_name.clone(),
                label: format!("{} ({})", t.theme_name, t.theme_mode),
            })
            .collect()
    }
}

/// A named color of the global color database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub id: String,
    pub value: CssColor,
}

/// Read-only list of colors shared by every theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorDatabase(pub(crate) Vec<ColorEntry>);

impl ColorDatabase {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.0
    }
}
