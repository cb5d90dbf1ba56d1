// store/mod.rs

//! Preference store: the single owner of the active theme, mode and language.
//!
//! Every setter updates memory, persists, and (for theme and mode) re-applies
//! the theme to the document root. Nothing else writes the root's theme
//! attributes.

pub mod custom_colors;
pub mod storage;

use log::*;

use crate::config::BuildDefaults;
use crate::dom::{ApplyOutcome, AttributeMutation, DocumentRoot, ThemeApplier, ThemeWatcher};
use crate::theme::colors::select_by_ids;
use crate::theme::{
    selected_colors, ColorDatabase, ColorEntry, FooterLogo, ThemeCatalog, ThemeDefinition,
    ThemeMode, ThemeOption,
};
use storage::Storage;

pub const DEFAULT_NAMESPACE: &str = "app";
pub const FALLBACK_THEME: &str = "2501221";
pub const FALLBACK_MODE: ThemeMode = ThemeMode::Dark;
pub const FALLBACK_LANG: &str = "zh-cn";

const THEME_COLOR: &str = "themeColor";
const THEME_MODE: &str = "themeMode";
const LANG_KEY: &str = "lang";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Theme name must not be empty")]
    EmptyThemeName,
    #[error("Language tag must not be empty")]
    EmptyLanguage,
}

/// The live `(theme, mode, language)` triple
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preference {
    pub theme_name: String,
    pub mode: ThemeMode,
    pub lang: String,
}

/// Options for [`PreferenceStore::set_theme_color`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Keep the current mode instead of switching to the theme's own
    pub keep_mode: bool,
}

impl ColorOptions {
    pub fn keep_mode() -> Self {
        Self { keep_mode: true }
    }
}

/// Everything fixed at construction time besides the data documents
#[derive(Clone, Debug, PartialEq)]
pub struct StoreSettings {
    pub namespace: String,
    pub defaults: BuildDefaults,
    pub applier: ThemeApplier,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            defaults: BuildDefaults::default(),
            applier: ThemeApplier::default(),
        }
    }
}

pub struct PreferenceStore<S: Storage, R: DocumentRoot> {
    catalog: ThemeCatalog,
    colors: ColorDatabase,
    storage: S,
    root: R,
    settings: StoreSettings,
    preference: Preference,
    watcher: ThemeWatcher,
}

impl<S: Storage, R: DocumentRoot> PreferenceStore<S, R> {
    /// Builds a store with its state resolved from storage and defaults.
    /// Neither storage nor the root is written until [`Self::initialize`].
    pub fn new(
        catalog: ThemeCatalog,
        colors: ColorDatabase,
        storage: S,
        root: R,
        settings: StoreSettings,
    ) -> Self {
        let mut store = Self {
            catalog,
            colors,
            storage,
            root,
            settings,
            preference: Preference {
                theme_name: FALLBACK_THEME.to_string(),
                mode: FALLBACK_MODE,
                lang: FALLBACK_LANG.to_string(),
            },
            watcher: ThemeWatcher::new(),
        };
        store.preference = store.resolve();
        store
    }

    /// Resolves the preference, writes it back to storage and applies it once.
    pub fn initialize(&mut self) -> &Preference {
        self.preference = self.resolve();
        self.persist_theme();
        self.persist_lang();
        self.apply();
        info!(
            "Initialized preferences: theme={} mode={} lang={}",
            self.preference.theme_name, self.preference.mode, self.preference.lang
        );
        &self.preference
    }

    pub fn set_theme_color(&mut self, name: &str, options: ColorOptions) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyThemeName);
        }
        if !options.keep_mode {
            self.preference.mode = self.default_mode_for(name);
        }
        self.preference.theme_name = name.to_string();
        self.persist_theme();
        info!(
            "Theme set to {} ({})",
            self.preference.theme_name, self.preference.mode
        );
        self.apply();
        Ok(())
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.preference.mode = mode;
        self.storage.set_item(&self.key(THEME_MODE), mode.as_str());
        info!("Theme mode set to {mode}");
        self.apply();
    }

    pub fn toggle_theme_mode(&mut self) -> ThemeMode {
        let mode = enum_iterator::next_cycle(&self.preference.mode);
        self.set_theme_mode(mode);
        mode
    }

    /// Language has no effect on the document root.
    pub fn set_lang(&mut self, tag: &str) -> Result<(), StoreError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(StoreError::EmptyLanguage);
        }
        self.preference.lang = tag.to_string();
        self.persist_lang();
        info!("Language set to {tag}");
        Ok(())
    }

    /// Forgets every persisted preference and initializes again from defaults.
    pub fn reset_to_default(&mut self) -> &Preference {
        for key in [
            self.key(THEME_COLOR),
            self.key(THEME_MODE),
            THEME_COLOR.to_string(),
            THEME_MODE.to_string(),
            LANG_KEY.to_string(),
        ] {
            self.storage.remove_item(&key);
        }
        info!("Cleared persisted preferences");
        self.initialize()
    }

    pub fn preference(&self) -> &Preference {
        &self.preference
    }

    pub fn theme_color(&self) -> &str {
        &self.preference.theme_name
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.preference.mode
    }

    pub fn lang(&self) -> &str {
        &self.preference.lang
    }

    pub fn namespace(&self) -> &str {
        &self.settings.namespace
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    /// Access for collaborators that touch the root outside the theme attributes.
    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    pub fn active_theme(&self) -> Option<&ThemeDefinition> {
        self.catalog.find_theme(&self.preference.theme_name)
    }

    pub fn theme_options(&self) -> Vec<ThemeOption> {
        self.catalog.options()
    }

    pub fn footer_logo(&self) -> FooterLogo {
        self.catalog.footer_logo_of(&self.preference.theme_name)
    }

    pub fn qr_code_image(&self) -> &str {
        self.catalog.qr_code_image_of(&self.preference.theme_name)
    }

    pub fn nav_type(&self) -> &str {
        self.catalog.nav_type_of(&self.preference.theme_name)
    }

    /// Catalog colors of the active theme
    pub fn selected_colors(&self) -> Vec<&ColorEntry> {
        selected_colors(&self.catalog, &self.colors, &self.preference.theme_name)
    }

    /// Colors of `theme_name`, honoring a custom override when one is stored
    pub fn effective_colors(&self, theme_name: &str) -> Vec<&ColorEntry> {
        effective_colors(
            &self.catalog,
            &self.colors,
            &self.storage,
            &self.settings.namespace,
            theme_name,
        )
    }

    pub fn custom_colors(&self, theme_name: &str) -> Vec<String> {
        custom_colors::get(&self.storage, &self.settings.namespace, theme_name)
    }

    pub fn set_custom_colors<C: AsRef<str>>(&mut self, theme_name: &str, colors: &[C]) {
        custom_colors::set(&mut self.storage, &self.settings.namespace, theme_name, colors);
        self.reapply_if_active(theme_name);
    }

    pub fn clear_custom_colors(&mut self, theme_name: &str) {
        custom_colors::clear(&mut self.storage, &self.settings.namespace, theme_name);
        self.reapply_if_active(theme_name);
    }

    /// Starts reacting to writes of the root's theme attributes. Only the first
    /// call registers anything.
    pub fn start_watching<F>(&mut self, hook: F) -> bool
    where
        F: FnMut(&AttributeMutation) + 'static,
    {
        let attributes = self.settings.applier.representation.attributes();
        self.watcher.start(&mut self.root, attributes, hook)
    }

    pub fn stop_watching(&mut self) {
        self.watcher.stop(&mut self.root);
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_watching()
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{name}", self.settings.namespace)
    }

    /// Namespaced key first, then the bare key older builds wrote. Values are
    /// trimmed the same way the setters trim their input.
    fn read(&self, name: &str) -> Option<String> {
        self.storage
            .get_item(&self.key(name))
            .or_else(|| self.storage.get_item(name))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn resolve(&self) -> Preference {
        let theme_name = self
            .read(THEME_COLOR)
            .or_else(|| self.settings.defaults.theme_color.clone())
            .unwrap_or_else(|| FALLBACK_THEME.to_string());

        let stored_mode = self.read(THEME_MODE).and_then(|raw| match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                warn!("Ignoring stored theme mode: {e}");
                None
            }
        });
        let mode = stored_mode.unwrap_or_else(|| self.default_mode_for(&theme_name));

        let lang = self
            .storage
            .get_item(LANG_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| self.settings.defaults.lang.clone())
            .unwrap_or_else(|| FALLBACK_LANG.to_string());

        debug!("Resolved preference: theme={theme_name} mode={mode} lang={lang}");
        Preference {
            theme_name,
            mode,
            lang,
        }
    }

    fn default_mode_for(&self, theme_name: &str) -> ThemeMode {
        self.catalog
            .default_mode_of(theme_name)
            .or(self.settings.defaults.theme_mode)
            .unwrap_or(FALLBACK_MODE)
    }

    fn persist_theme(&mut self) {
        let color_key = self.key(THEME_COLOR);
        let mode_key = self.key(THEME_MODE);
        self.storage
            .set_item(&color_key, &self.preference.theme_name);
        self.storage
            .set_item(&mode_key, self.preference.mode.as_str());
    }

    fn persist_lang(&mut self) {
        self.storage.set_item(LANG_KEY, &self.preference.lang);
    }

    fn reapply_if_active(&mut self, theme_name: &str) {
        if self.preference.theme_name == theme_name {
            self.apply();
        }
    }

    fn apply(&mut self) -> ApplyOutcome {
        let Self {
            catalog,
            colors,
            storage,
            root,
            settings,
            preference,
            ..
        } = self;
        let colors = effective_colors(
            catalog,
            colors,
            storage,
            &settings.namespace,
            &preference.theme_name,
        );
        settings
            .applier
            .apply(root, catalog, &preference.theme_name, preference.mode, &colors)
    }
}

fn effective_colors<'a, S: Storage>(
    catalog: &ThemeCatalog,
    colors: &'a ColorDatabase,
    storage: &S,
    namespace: &str,
    theme_name: &str,
) -> Vec<&'a ColorEntry> {
    let custom = custom_colors::get(storage, namespace, theme_name);
    if custom.is_empty() || !catalog.contains(theme_name) {
        selected_colors(catalog, colors, theme_name)
    } else {
        select_by_ids(colors, &custom[..])
    }
}
