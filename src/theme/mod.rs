//! Theme catalog and color database
//!
//! Both documents are loaded once at startup and never mutated afterwards.
//! Every lookup by theme name treats a miss as "use the fallback".

pub mod colors;
pub mod loader;
pub mod models;
pub mod parser;

#[cfg(test)]
mod tests;

pub use colors::selected_colors;
pub use loader::{load_catalog, load_colors, CatalogError};
pub use models::{
    ColorDatabase, ColorEntry, FooterLogo, ThemeCatalog, ThemeDefinition, ThemeMode, ThemeOption,
};
pub use parser::CssColor;
