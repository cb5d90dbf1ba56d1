//! Tests for the bundled theme data

#[cfg(test)]
mod tests {
    use crate::theme::loader::{bundled_catalog, bundled_colors};
    use crate::theme::models::{FooterLogo, ThemeMode};
    use crate::theme::selected_colors;
    use rstest::rstest;

    #[test]
    fn test_default_theme_is_bundled() {
        let catalog = bundled_catalog();
        assert_eq!(catalog.default_mode_of("2501221"), Some(ThemeMode::Dark));
        assert_eq!(catalog.default_mode_of("2501222"), Some(ThemeMode::Light));
    }

    #[rstest]
    #[case("night-blue")]
    #[case("")]
    #[case("2501221 ")]
    fn test_unknown_theme_uses_fallbacks(#[case] name: &str) {
        let catalog = bundled_catalog();
        let colors = bundled_colors();
        assert!(selected_colors(&catalog, &colors, name).is_empty());
        assert_eq!(
            catalog.footer_logo_of(name),
            FooterLogo {
                bb: "white".to_string(),
                ub: "white".to_string()
            }
        );
        assert_eq!(catalog.qr_code_image_of(name), "qrcode_d");
        assert_eq!(catalog.nav_type_of(name), "type-1");
        assert_eq!(catalog.default_mode_of(name), None);
    }

    #[test]
    fn test_known_theme_derived_assets() {
        let catalog = bundled_catalog();
        assert_eq!(catalog.footer_logo_of("2502101").bb, "gold");
        assert_eq!(catalog.qr_code_image_of("2502101"), "qrcode_g");
        assert_eq!(catalog.nav_type_of("2502101"), "type-3");
        // no imgQrcode declared
        assert_eq!(catalog.qr_code_image_of("2503051"), "qrcode_d");
    }

    #[test]
    fn test_theme_without_variables_uses_catalog_list() {
        let catalog = bundled_catalog();
        let colors = bundled_colors();
        let ids: Vec<_> = selected_colors(&catalog, &colors, "2503051")
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["gold", "ink", "pearl"]);
    }
}
