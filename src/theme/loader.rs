//! Theme catalog and color database loading functionality

use super::models::{ColorDatabase, ThemeCatalog};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../../data/theme.json");
const BUNDLED_COLORS: &str = include_str!("../../data/colors.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Theme name declared more than once: {0}")]
    DuplicateTheme(String),
}

/// The catalog shipped with the crate
pub fn bundled_catalog() -> ThemeCatalog {
    match parse_catalog(BUNDLED_CATALOG, false) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Bundled theme catalog is invalid: {e}. Using an empty catalog.");
            ThemeCatalog::default()
        }
    }
}

/// The color database shipped with the crate
pub fn bundled_colors() -> ColorDatabase {
    match parse_document(BUNDLED_COLORS, false) {
        Ok(colors) => colors,
        Err(e) => {
            warn!("Bundled color database is invalid: {e}. Using an empty database.");
            ColorDatabase::default()
        }
    }
}

/// Load a catalog from `path`, with fallback to the bundled catalog
pub fn load_catalog(path: Option<&Path>) -> ThemeCatalog {
    let Some(path) = path else {
        return bundled_catalog();
    };
    match try_load_catalog(path) {
        Ok(catalog) => {
            info!(
                "Loaded {} themes from {}",
                catalog.themes().len(),
                path.display()
            );
            catalog
        }
        Err(e) => {
            warn!("Failed to load theme catalog: {e}. Using bundled catalog.");
            bundled_catalog()
        }
    }
}

/// Load a color database from `path`, with fallback to the bundled one
pub fn load_colors(path: Option<&Path>) -> ColorDatabase {
    let Some(path) = path else {
        return bundled_colors();
    };
    match try_load_colors(path) {
        Ok(colors) => {
            info!(
                "Loaded {} colors from {}",
                colors.entries().len(),
                path.display()
            );
            colors
        }
        Err(e) => {
            warn!("Failed to load color database: {e}. Using bundled colors.");
            bundled_colors()
        }
    }
}

/// Attempt to load a catalog file, returning errors for handling
pub fn try_load_catalog(path: &Path) -> Result<ThemeCatalog, CatalogError> {
    debug!("Loading theme catalog from: {}", path.display());
    let content = read(path)?;
    parse_catalog(&content, is_yaml(path))
}

/// Attempt to load a color database file, returning errors for handling
pub fn try_load_colors(path: &Path) -> Result<ColorDatabase, CatalogError> {
    debug!("Loading color database from: {}", path.display());
    let content = read(path)?;
    parse_document(&content, is_yaml(path))
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yml") | Some("yaml")
    )
}

fn parse_document<T: DeserializeOwned>(content: &str, yaml: bool) -> Result<T, CatalogError> {
    if yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

/// Parse a catalog document and check that theme names are unique
pub fn parse_catalog(content: &str, yaml: bool) -> Result<ThemeCatalog, CatalogError> {
    let catalog: ThemeCatalog = parse_document(content, yaml)?;
    if let Some(name) = catalog
        .themes()
        .iter()
        .map(|t| t.theme_name.as_str())
        .duplicates()
        .next()
    {
        return Err(CatalogError::DuplicateTheme(name.to_string()));
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::models::ThemeMode;
    use std::io::Write;

    #[test]
    fn test_bundled_catalog_is_valid() {
        parse_catalog(BUNDLED_CATALOG, false).unwrap();
        let colors: ColorDatabase = parse_document(BUNDLED_COLORS, false).unwrap();
        assert!(!colors.entries().is_empty());
    }

    #[test]
    fn test_load_missing_catalog_falls_back() {
        let catalog = load_catalog(Some(Path::new("/nonexistent/theme.json")));
        assert_eq!(catalog, bundled_catalog());
    }

    #[test]
    fn test_load_yaml_catalog() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            "colorThemes:
  - themeName: \"sunrise\"
    themeMode: light
    themeNav: type-3
colorVariables: [gold]
"
        )
        .unwrap();

        let catalog = try_load_catalog(file.path()).unwrap();
        assert_eq!(catalog.default_mode_of("sunrise"), Some(ThemeMode::Light));
        assert_eq!(catalog.nav_type_of("sunrise"), "type-3");
        assert_eq!(catalog.color_variables_of("sunrise"), ["gold".to_string()]);
    }

    #[test]
    fn test_duplicate_theme_names_rejected() {
        let json = r#"{ "colorThemes": [
            { "themeName": "a", "themeMode": "dark" },
            { "themeName": "a", "themeMode": "light" }
        ] }"#;
        match parse_catalog(json, false) {
            Err(CatalogError::DuplicateTheme(name)) => assert_eq!(name, "a"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_color_rejected() {
        let json = r##"[{ "id": "gold", "value": "#zzz" }]"##;
        assert!(parse_document::<ColorDatabase>(json, false).is_err());
    }
}
