//! Resolution of a theme's color variables against the color database

use super::models::{ColorDatabase, ColorEntry, ThemeCatalog};

/// Colors selected by `theme_name`, in color database order.
///
/// Unknown themes select nothing.
pub fn selected_colors<'a>(
    catalog: &ThemeCatalog,
    database: &'a ColorDatabase,
    theme_name: &str,
) -> Vec<&'a ColorEntry> {
    select_by_ids(database, catalog.color_variables_of(theme_name))
}

/// Entries whose id appears in `ids`, in color database order.
pub fn select_by_ids<'a, S: AsRef<str>>(database: &'a ColorDatabase, ids: &[S]) -> Vec<&'a ColorEntry> {
    database
        .entries()
        .iter()
        .filter(|entry| ids.iter().any(|id| id.as_ref() == entry.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::models::{ThemeDefinition, ThemeMode};
    use crate::theme::parser::parse_color;

    fn database() -> ColorDatabase {
        ColorDatabase::new(
            ["gold", "night", "ruby", "jade"]
                .iter()
                .zip(["#ffd700", "#0b1026", "#9b111e", "#00a86b"])
                .map(|(id, value)| ColorEntry {
                    id: id.to_string(),
                    value: parse_color(value).unwrap(),
                })
                .collect(),
        )
    }

    fn catalog(vars: &[&str]) -> ThemeCatalog {
        let mut theme = ThemeDefinition::new("2501221", ThemeMode::Dark);
        theme.color_variables = Some(vars.iter().map(|v| v.to_string()).collect());
        ThemeCatalog::new(vec![theme], vec![])
    }

    fn ids(entries: Vec<&ColorEntry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn should_keep_database_order() {
        let db = database();
        let selected = selected_colors(&catalog(&["jade", "gold", "ruby"]), &db, "2501221");
        assert_eq!(ids(selected), vec!["gold", "ruby", "jade"]);
    }

    #[test]
    fn should_be_stable_across_variable_reordering() {
        let db = database();
        let a = selected_colors(&catalog(&["night", "jade"]), &db, "2501221");
        let b = selected_colors(&catalog(&["jade", "night"]), &db, "2501221");
        assert_eq!(a, b);
    }

    #[test]
    fn should_ignore_ids_missing_from_database() {
        let db = database();
        let selected = selected_colors(&catalog(&["gold", "plum"]), &db, "2501221");
        assert_eq!(ids(selected), vec!["gold"]);
    }

    #[test]
    fn should_select_nothing_for_unknown_theme() {
        let db = database();
        assert!(selected_colors(&catalog(&["gold"]), &db, "night-blue").is_empty());
    }
}
