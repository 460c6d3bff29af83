//! Theme color roles, handed to the resolver explicitly.

use serde::Serialize;

use crate::color::Color;

/// Color roles the resolver may consult. There is no ambient theme: the
/// caller picks a context and passes it to every resolve call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveContext {
    pub primary: Color,
    pub on_primary: Color,
    pub secondary_container: Color,
    pub on_secondary_container: Color,
    pub surface: Color,
    pub on_surface: Color,
    pub surface_variant: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,
    /// Content color over custom fills that are dark
    pub light_content: Color,
    /// Content color over custom fills that are light
    pub dark_content: Color,
}

impl ResolveContext {
    pub fn light() -> Self {
        Self {
            primary: Color::from_argb(0xFF67_50A4),
            on_primary: Color::WHITE,
            secondary_container: Color::from_argb(0xFFE8_DEF8),
            on_secondary_container: Color::from_argb(0xFF1D_192B),
            surface: Color::from_argb(0xFFFE_F7FF),
            on_surface: Color::from_argb(0xFF1D_1B20),
            surface_variant: Color::from_argb(0xFFE7_E0EC),
            on_surface_variant: Color::from_argb(0xFF49_454F),
            outline: Color::from_argb(0xFF79_747E),
            outline_variant: Color::from_argb(0xFFCA_C4D0),
            light_content: Color::WHITE,
            dark_content: Color::from_argb(0xFF1D_1B20),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::from_argb(0xFFD0_BCFF),
            on_primary: Color::from_argb(0xFF38_1E72),
            secondary_container: Color::from_argb(0xFF4A_4458),
            on_secondary_container: Color::from_argb(0xFFE8_DEF8),
            surface: Color::from_argb(0xFF14_1218),
            on_surface: Color::from_argb(0xFFE6_E0E9),
            surface_variant: Color::from_argb(0xFF49_454F),
            on_surface_variant: Color::from_argb(0xFFCA_C4D0),
            outline: Color::from_argb(0xFF93_8F99),
            outline_variant: Color::from_argb(0xFF49_454F),
            light_content: Color::from_argb(0xFFE6_E0E9),
            dark_content: Color::BLACK,
        }
    }

    /// `"dark"` selects the dark roles; anything else is light
    pub fn named(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Content color readable on top of `fill`
    pub fn content_for(&self, fill: Color) -> Color {
        if fill.is_dark() {
            self.light_content
        } else {
            self.dark_content
        }
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::light()
    }
}
