//! Per-theme user color overrides
//!
//! Stored as a JSON array of color ids under
//! `<namespace>:customThemeColors:<themeName>`, independent of the active theme.

use log::*;

use super::storage::Storage;

pub fn storage_key(namespace: &str, theme_name: &str) -> String {
    format!("{namespace}:customThemeColors:{theme_name}")
}

/// Stored override for `theme_name`; empty when absent or unreadable.
pub fn get<S: Storage + ?Sized>(storage: &S, namespace: &str, theme_name: &str) -> Vec<String> {
    let key = storage_key(namespace, theme_name);
    let Some(raw) = storage.get_item(&key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(colors) => colors,
        Err(e) => {
            warn!("Ignoring malformed custom colors in {key}: {e}");
            Vec::new()
        }
    }
}

pub fn set<S: Storage + ?Sized, C: AsRef<str>>(
    storage: &mut S,
    namespace: &str,
    theme_name: &str,
    colors: &[C],
) {
    let colors: Vec<&str> = colors.iter().map(AsRef::as_ref).collect();
    match serde_json::to_string(&colors) {
        Ok(raw) => storage.set_item(&storage_key(namespace, theme_name), &raw),
        Err(e) => warn!("Could not serialize custom colors for {theme_name}: {e}"),
    }
}

pub fn clear<S: Storage + ?Sized>(storage: &mut S, namespace: &str, theme_name: &str) {
    storage.remove_item(&storage_key(namespace, theme_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::{DetachedStorage, MemoryStorage};
    use rstest::rstest;

    #[test]
    fn should_round_trip_in_order() {
        let mut storage = MemoryStorage::new();
        set(&mut storage, "app", "2501221", &["ruby", "gold", "night"]);
        assert_eq!(get(&storage, "app", "2501221"), vec!["ruby", "gold", "night"]);
        assert_eq!(
            storage.get_item("app:customThemeColors:2501221").as_deref(),
            Some(r#"["ruby","gold","night"]"#)
        );
    }

    #[test]
    fn should_return_empty_after_clear() {
        let mut storage = MemoryStorage::new();
        set(&mut storage, "app", "2501221", &["gold"]);
        clear(&mut storage, "app", "2501221");
        assert!(get(&storage, "app", "2501221").is_empty());
    }

    #[test]
    fn should_not_leak_across_themes_or_namespaces() {
        let mut storage = MemoryStorage::new();
        set(&mut storage, "app", "2501221", &["gold"]);
        assert!(get(&storage, "app", "2501222").is_empty());
        assert!(get(&storage, "admin", "2501221").is_empty());
        clear(&mut storage, "app", "2501222");
        assert_eq!(get(&storage, "app", "2501221"), vec!["gold"]);
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"gold": true}"#)]
    #[case("[1, 2]")]
    #[case("")]
    fn should_treat_malformed_value_as_absent(#[case] raw: &str) {
        let storage: MemoryStorage = [("app:customThemeColors:2501221", raw)].into_iter().collect();
        assert!(get(&storage, "app", "2501221").is_empty());
    }

    #[test]
    fn should_ignore_missing_storage() {
        let mut storage = DetachedStorage;
        set(&mut storage, "app", "2501221", &["gold"]);
        assert!(get(&storage, "app", "2501221").is_empty());
    }
}
