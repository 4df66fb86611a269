//! Named presets: a base hue and scheme that evoke a familiar editor theme.

use serde::Serialize;

use crate::error::{Result, ThemeError};
use crate::palette::GenerationRequest;
use crate::scheme::ColorScheme;

/// A named starting point for generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub base_hue: f64,
    pub scheme: ColorScheme,
}

impl Preset {
    /// A request for this preset at the given polarity and saturation.
    #[must_use]
    pub fn request(&self, is_dark: bool, saturation: f64) -> GenerationRequest {
        GenerationRequest::new(is_dark, self.base_hue, saturation, self.scheme)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset { name: "vscode", base_hue: 210.0, scheme: ColorScheme::Analogous },
    Preset { name: "monokai", base_hue: 70.0, scheme: ColorScheme::Complementary },
    Preset { name: "solarized", base_hue: 45.0, scheme: ColorScheme::Triadic },
    Preset { name: "nord", base_hue: 220.0, scheme: ColorScheme::Analogous },
    Preset { name: "dracula", base_hue: 260.0, scheme: ColorScheme::SplitComplementary },
];

/// Look up a preset by name.
///
/// # Errors
///
/// [`ThemeError::UnknownPreset`] if the name is not recognized.
pub fn preset(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ThemeError::UnknownPreset(name.to_owned()))
}

/// All preset names, in catalog order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::generate_palette;

    #[test]
    fn all_presets_resolve() {
        for name in preset_names() {
            assert_eq!(preset(name).unwrap().name, name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(preset("Nord").unwrap().base_hue, 220.0);
    }

    #[test]
    fn unknown_preset_errors() {
        assert_eq!(preset("gruvbox"), Err(ThemeError::UnknownPreset("gruvbox".into())));
    }

    #[test]
    fn monokai_is_complementary() {
        let p = preset("monokai").unwrap();
        assert_eq!(p.scheme, ColorScheme::Complementary);
        assert_eq!(p.base_hue, 70.0);
    }

    #[test]
    fn each_preset_is_distinct() {
        let palettes: Vec<_> = PRESETS
            .iter()
            .map(|p| generate_palette(&p.request(true, 60.0)))
            .collect();
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
