//! Theme, mode and language preferences for the site.
//!
//! A [`PreferenceStore`] resolves the active preference from storage, the
//! theme catalog and build defaults, persists every change, and mirrors the
//! theme onto a [`DocumentRoot`] so stylesheets can react to it.

pub mod config;
pub mod dom;
pub mod logger;
pub mod store;
pub mod theme;

pub use config::{BuildDefaults, SiteConfig};
pub use dom::{DocumentRoot, Element, RootRepresentation, ThemeApplier};
pub use store::storage::{DetachedStorage, FileStorage, MemoryStorage, Storage};
pub use store::{ColorOptions, Preference, PreferenceStore, StoreError, StoreSettings};
pub use theme::{ColorDatabase, ThemeCatalog, ThemeMode};
