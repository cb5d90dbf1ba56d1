//! Projection of the active theme onto the document root

use log::*;
use serde::{Deserialize, Serialize};

use super::DocumentRoot;
use crate::theme::{ColorEntry, ThemeCatalog, ThemeMode};

/// `"<mode> <themeName>"`, so selectors can match either token with `~=`
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const MODE_ATTRIBUTE: &str = "data-theme-mode";
pub const NAME_ATTRIBUTE: &str = "data-theme-name";
pub const CSS_VARIABLE_PREFIX: &str = "--theme-";

/// Which attributes carry the theme on the root
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootRepresentation {
    /// `data-theme="<mode> <themeName>"`
    #[default]
    Combined,
    /// `data-theme-mode="<mode>"` and `data-theme-name="<themeName>"`
    Discrete,
    Both,
}

impl RootRepresentation {
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            RootRepresentation::Combined => &[THEME_ATTRIBUTE],
            RootRepresentation::Discrete => &[MODE_ATTRIBUTE, NAME_ATTRIBUTE],
            RootRepresentation::Both => &[THEME_ATTRIBUTE, MODE_ATTRIBUTE, NAME_ATTRIBUTE],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// At least one attribute or property was written
    Applied,
    /// The root already reflected the theme
    Unchanged,
    /// The theme is not in the catalog; the root was left alone
    UnknownTheme,
}

/// Writes theme attributes and, optionally, color custom properties
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeApplier {
    pub representation: RootRepresentation,
    pub css_variables: bool,
}

impl ThemeApplier {
    pub fn new(representation: RootRepresentation, css_variables: bool) -> Self {
        Self {
            representation,
            css_variables,
        }
    }

    /// Makes the root reflect `(theme_name, mode)`. Repeated calls with the
    /// same arguments write nothing.
    pub fn apply<R: DocumentRoot + ?Sized>(
        &self,
        root: &mut R,
        catalog: &ThemeCatalog,
        theme_name: &str,
        mode: ThemeMode,
        colors: &[&ColorEntry],
    ) -> ApplyOutcome {
        if !catalog.contains(theme_name) {
            warn!("Theme '{theme_name}' is not in the catalog, leaving document root unchanged");
            return ApplyOutcome::UnknownTheme;
        }

        let mut written = false;
        for &attribute in self.representation.attributes() {
            let value = match attribute {
                THEME_ATTRIBUTE => format!("{mode} {theme_name}"),
                MODE_ATTRIBUTE => mode.to_string(),
                _ => theme_name.to_string(),
            };
            written |= write_attribute(root, attribute, &value);
        }
        if self.css_variables {
            written |= write_color_variables(root, colors);
        }

        if written {
            debug!("Applied theme '{theme_name}' ({mode}) to document root");
            ApplyOutcome::Applied
        } else {
            ApplyOutcome::Unchanged
        }
    }
}

fn write_attribute<R: DocumentRoot + ?Sized>(root: &mut R, name: &str, value: &str) -> bool {
    if root.attribute(name) == Some(value) {
        return false;
    }
    root.set_attribute(name, value);
    true
}

fn write_color_variables<R: DocumentRoot + ?Sized>(root: &mut R, colors: &[&ColorEntry]) -> bool {
    let mut written = false;
    let wanted: Vec<(String, String)> = colors
        .iter()
        .map(|c| (format!("{CSS_VARIABLE_PREFIX}{}", c.id), c.value.to_string()))
        .collect();

    for stale in root
        .style_property_names()
        .into_iter()
        .filter(|n| n.starts_with(CSS_VARIABLE_PREFIX))
        .filter(|n| !wanted.iter().any(|(name, _)| name == n))
    {
        root.remove_style_property(&stale);
        written = true;
    }
    for (name, value) in &wanted {
        if root.style_property(name) != Some(value.as_str()) {
            root.set_style_property(name, value);
            written = true;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::theme::parser::parse_color;
    use crate::theme::ThemeDefinition;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::new(
            vec![
                ThemeDefinition::new("2501221", ThemeMode::Dark),
                ThemeDefinition::new("2501222", ThemeMode::Light),
            ],
            vec![],
        )
    }

    fn color(id: &str, value: &str) -> ColorEntry {
        ColorEntry {
            id: id.to_string(),
            value: parse_color(value).unwrap(),
        }
    }

    #[test]
    fn should_write_combined_attribute() {
        let mut root = Element::new();
        let outcome =
            ThemeApplier::default().apply(&mut root, &catalog(), "2501221", ThemeMode::Dark, &[]);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("dark 2501221"));
        assert_eq!(root.attribute(MODE_ATTRIBUTE), None);
    }

    #[test]
    fn should_write_discrete_attributes() {
        let mut root = Element::new();
        let applier = ThemeApplier::new(RootRepresentation::Discrete, false);
        applier.apply(&mut root, &catalog(), "2501222", ThemeMode::Dark, &[]);
        assert_eq!(root.attribute(MODE_ATTRIBUTE), Some("dark"));
        assert_eq!(root.attribute(NAME_ATTRIBUTE), Some("2501222"));
        assert_eq!(root.attribute(THEME_ATTRIBUTE), None);
    }

    #[test]
    fn should_be_idempotent() {
        let writes = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&writes);
        let mut root = Element::new();
        root.observe(THEME_ATTRIBUTE, Box::new(move |_| *sink.borrow_mut() += 1));
        let applier = ThemeApplier::new(RootRepresentation::Both, true);
        let gold = color("gold", "#d4af37");

        let first = applier.apply(&mut root, &catalog(), "2501221", ThemeMode::Light, &[&gold]);
        let after_first = root.attributes().clone();
        let second = applier.apply(&mut root, &catalog(), "2501221", ThemeMode::Light, &[&gold]);

        assert_eq!(first, ApplyOutcome::Applied);
        assert_eq!(second, ApplyOutcome::Unchanged);
        assert_eq!(root.attributes(), &after_first);
        assert_eq!(*writes.borrow(), 1);
    }

    #[test]
    fn should_leave_root_alone_for_unknown_theme() {
        let mut root = Element::new();
        root.set_attribute(THEME_ATTRIBUTE, "dark 2501221");
        let outcome =
            ThemeApplier::default().apply(&mut root, &catalog(), "night-blue", ThemeMode::Light, &[]);
        assert_eq!(outcome, ApplyOutcome::UnknownTheme);
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("dark 2501221"));
    }

    #[test]
    fn should_replace_stale_color_variables() {
        let mut root = Element::new();
        root.set_style_property("--page-width", "1200px");
        let applier = ThemeApplier::new(RootRepresentation::Combined, true);
        let gold = color("gold", "#d4af37");
        let ruby = color("ruby", "#9b111e");
        let jade = color("jade", "#00a86b");

        applier.apply(&mut root, &catalog(), "2501221", ThemeMode::Dark, &[&gold, &ruby]);
        applier.apply(&mut root, &catalog(), "2501222", ThemeMode::Light, &[&jade]);

        assert_eq!(root.style_property("--theme-jade"), Some("#00a86b"));
        assert_eq!(root.style_property("--theme-gold"), None);
        assert_eq!(root.style_property("--theme-ruby"), None);
        assert_eq!(root.style_property("--page-width"), Some("1200px"));
    }
}
