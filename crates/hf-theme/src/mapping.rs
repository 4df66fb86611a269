//! Role → external variable name table.
//!
//! The rendering surface knows colors by its own names (`--background`,
//! `--syntax-keyword`, ...). This table is the contract between the two
//! vocabularies. It is total over [`ColorRole`] and injective, so every
//! generated color has exactly one rendering target.

use std::collections::BTreeMap;

use hf_color::Rgb;
use serde::Serialize;

use crate::roles::{ColorRole, ColorVariables};

/// Bumped whenever an entry is renamed, added or removed.
pub const MAPPING_VERSION: u32 = 1;

/// `(external name, role)` pairs, in palette order.
pub const VARIABLE_MAPPING: [(&str, ColorRole); ColorRole::COUNT] = [
    ("--background", ColorRole::Bg1),
    ("--card", ColorRole::Bg2),
    ("--muted", ColorRole::Bg3),
    ("--foreground", ColorRole::Fg1),
    ("--card-foreground", ColorRole::Fg2),
    ("--muted-foreground", ColorRole::Fg3),
    ("--primary", ColorRole::Ac1),
    ("--secondary", ColorRole::Ac2),
    ("--border", ColorRole::Border),
    ("--selection", ColorRole::Selection),
    ("--line-highlight", ColorRole::LineHighlight),
    ("--find-match", ColorRole::FindMatch),
    ("--destructive", ColorRole::Error),
    ("--warning", ColorRole::Warning),
    ("--info", ColorRole::Info),
    ("--success", ColorRole::Success),
    ("--syntax-comment", ColorRole::Comment),
    ("--syntax-keyword", ColorRole::Keyword),
    ("--syntax-function", ColorRole::Function),
    ("--syntax-string", ColorRole::StringLiteral),
    ("--syntax-number", ColorRole::Number),
    ("--syntax-type", ColorRole::TypeName),
    ("--syntax-variable", ColorRole::Variable),
    ("--syntax-operator", ColorRole::Operator),
    ("--syntax-constant", ColorRole::Constant),
    ("--syntax-tag", ColorRole::Tag),
];

/// External name for `role`.
#[must_use]
pub fn variable_for_role(role: ColorRole) -> &'static str {
    VARIABLE_MAPPING[role.index()].0
}

/// Role behind an external name, for manual edits addressed by variable.
#[must_use]
pub fn role_for_variable(name: &str) -> Option<ColorRole> {
    VARIABLE_MAPPING
        .iter()
        .find(|(var, _)| *var == name)
        .map(|&(_, role)| role)
}

/// Colors keyed by external variable name, ready for a [`StyleSink`](crate::StyleSink).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeVariables(BTreeMap<&'static str, Rgb>);

impl ThemeVariables {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries sorted by variable name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Rgb)> + '_ {
        self.0.iter().map(|(&name, &color)| (name, color))
    }
}

/// Translate a palette into the rendering surface's vocabulary.
#[must_use]
pub fn to_theme_variables(colors: &ColorVariables) -> ThemeVariables {
    ThemeVariables(
        colors
            .iter()
            .map(|(role, color)| (variable_for_role(role), color))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn table_is_in_role_order() {
        for (i, (name, role)) in VARIABLE_MAPPING.iter().enumerate() {
            assert_eq!(role.index(), i, "{name}");
        }
    }

    #[test]
    fn table_is_total_and_injective() {
        let names: BTreeSet<&str> = VARIABLE_MAPPING.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), ColorRole::COUNT);
        for role in ColorRole::ALL {
            assert_eq!(role_for_variable(variable_for_role(role)), Some(role));
        }
    }

    #[test]
    fn names_are_custom_properties() {
        for (name, _) in VARIABLE_MAPPING {
            assert!(name.starts_with("--"), "{name}");
        }
    }

    #[test]
    fn unknown_variable() {
        assert_eq!(role_for_variable("--nope"), None);
        assert_eq!(role_for_variable("background"), None);
    }

    #[test]
    fn theme_variables_cover_palette() {
        let colors = ColorVariables::from_fn(|role| {
            if role == ColorRole::Keyword { Rgb::WHITE } else { Rgb::BLACK }
        });
        let vars = to_theme_variables(&colors);
        assert_eq!(vars.len(), ColorRole::COUNT);
        assert_eq!(vars.get("--syntax-keyword"), Some(Rgb::WHITE));
        assert_eq!(vars.get("--background"), Some(Rgb::BLACK));
    }

    #[test]
    fn serializes_as_name_map() {
        let vars = to_theme_variables(&ColorVariables::from_fn(|_| Rgb::new(0x12, 0x34, 0x56)));
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["--primary"], "#123456");
    }
}
