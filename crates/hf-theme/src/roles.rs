//! Color roles, complete palettes, and lock sets.
//!
//! A [`ColorVariables`] always holds exactly one color per [`ColorRole`]:
//! it is backed by a fixed array indexed by role, so no operation can add
//! or drop a key. Partial maps ([`PartialColors`]) only appear at the edges,
//! as locked snapshots and while parsing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use hf_color::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

// ---------------------------------------------------------------------------
// ColorRole
// ---------------------------------------------------------------------------

/// A semantic slot in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    // ── Backgrounds ───────────────────────────────────────────
    /// Primary editor background.
    Bg1,
    /// Secondary background (sidebars, panels).
    Bg2,
    /// Tertiary background (gutter, inactive tabs).
    Bg3,

    // ── Foregrounds ───────────────────────────────────────────
    /// Primary text.
    Fg1,
    /// Secondary text (status lines, breadcrumbs).
    Fg2,
    /// Tertiary text (placeholders, disabled).
    Fg3,

    // ── Accents and surfaces ──────────────────────────────────
    Ac1,
    Ac2,
    Border,
    Selection,
    LineHighlight,
    FindMatch,

    // ── Diagnostics ───────────────────────────────────────────
    Error,
    Warning,
    Info,
    Success,

    // ── Syntax ────────────────────────────────────────────────
    Comment,
    Keyword,
    Function,
    #[serde(rename = "string")]
    StringLiteral,
    Number,
    #[serde(rename = "type")]
    TypeName,
    Variable,
    Operator,
    Constant,
    Tag,
}

impl ColorRole {
    pub const COUNT: usize = 26;

    /// Every role, in palette order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Bg1, Self::Bg2, Self::Bg3,
        Self::Fg1, Self::Fg2, Self::Fg3,
        Self::Ac1, Self::Ac2, Self::Border, Self::Selection, Self::LineHighlight, Self::FindMatch,
        Self::Error, Self::Warning, Self::Info, Self::Success,
        Self::Comment, Self::Keyword, Self::Function, Self::StringLiteral, Self::Number,
        Self::TypeName, Self::Variable, Self::Operator, Self::Constant, Self::Tag,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The key used in palette documents.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bg1 => "bg1",
            Self::Bg2 => "bg2",
            Self::Bg3 => "bg3",
            Self::Fg1 => "fg1",
            Self::Fg2 => "fg2",
            Self::Fg3 => "fg3",
            Self::Ac1 => "ac1",
            Self::Ac2 => "ac2",
            Self::Border => "border",
            Self::Selection => "selection",
            Self::LineHighlight => "line_highlight",
            Self::FindMatch => "find_match",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::Function => "function",
            Self::StringLiteral => "string",
            Self::Number => "number",
            Self::TypeName => "type",
            Self::Variable => "variable",
            Self::Operator => "operator",
            Self::Constant => "constant",
            Self::Tag => "tag",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorRole {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ThemeError::UnknownRole(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ColorVariables
// ---------------------------------------------------------------------------

/// Colors for some roles: a locked snapshot, or a palette under construction.
pub type PartialColors = BTreeMap<ColorRole, Rgb>;

/// A complete palette: one color for every [`ColorRole`].
///
/// Serializes as a `{ "bg1": "#rrggbb", ... }` map. Deserializing requires
/// every role and rejects unknown keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, Rgb>", try_from = "BTreeMap<String, Rgb>")]
pub struct ColorVariables {
    colors: [Rgb; ColorRole::COUNT],
}

impl ColorVariables {
    /// Build a palette by asking `f` for each role in order.
    pub fn from_fn(mut f: impl FnMut(ColorRole) -> Rgb) -> Self {
        Self {
            colors: ColorRole::ALL.map(&mut f),
        }
    }

    /// Build a palette from a partial map that must cover every role.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingRole`] naming the first uncovered role.
    pub fn from_partial(partial: &PartialColors) -> Result<Self, ThemeError> {
        if let Some(missing) = ColorRole::ALL.into_iter().find(|r| !partial.contains_key(r)) {
            return Err(ThemeError::MissingRole(missing.key()));
        }
        Ok(Self::from_fn(|role| partial[&role]))
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, role: ColorRole) -> Rgb {
        self.colors[role.index()]
    }

    /// Replace one role's color (a manual edit).
    #[inline]
    pub fn set(&mut self, role: ColorRole, color: Rgb) {
        self.colors[role.index()] = color;
    }

    /// `(role, color)` pairs in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Rgb)> + '_ {
        ColorRole::ALL.into_iter().zip(self.colors.iter().copied())
    }
}

impl Index<ColorRole> for ColorVariables {
    type Output = Rgb;

    fn index(&self, role: ColorRole) -> &Rgb {
        &self.colors[role.index()]
    }
}

impl fmt::Debug for ColorVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(role, color)| (role.key(), color)))
            .finish()
    }
}

impl From<ColorVariables> for BTreeMap<String, Rgb> {
    fn from(colors: ColorVariables) -> Self {
        colors
            .iter()
            .map(|(role, color)| (role.key().to_owned(), color))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, Rgb>> for ColorVariables {
    type Error = ThemeError;

    fn try_from(map: BTreeMap<String, Rgb>) -> Result<Self, Self::Error> {
        let partial = map
            .into_iter()
            .map(|(key, color)| key.parse::<ColorRole>().map(|role| (role, color)))
            .collect::<Result<PartialColors, _>>()?;
        Self::from_partial(&partial)
    }
}

// ---------------------------------------------------------------------------
// LockedColors
// ---------------------------------------------------------------------------

/// Roles the user has pinned. Locked roles keep their current color across
/// regenerations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedColors(BTreeSet<ColorRole>);

impl LockedColors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, role: ColorRole) -> bool {
        self.0.contains(&role)
    }

    pub fn lock(&mut self, role: ColorRole) {
        self.0.insert(role);
    }

    pub fn unlock(&mut self, role: ColorRole) {
        self.0.remove(&role);
    }

    /// Flip the lock on `role`. Returns `true` if it is now locked.
    pub fn toggle(&mut self, role: ColorRole) -> bool {
        if self.0.remove(&role) {
            false
        } else {
            self.0.insert(role);
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ColorRole> + '_ {
        self.0.iter().copied()
    }

    /// The current colors of the locked roles only.
    #[must_use]
    pub fn snapshot(&self, current: &ColorVariables) -> PartialColors {
        self.iter().map(|role| (role, current.get(role))).collect()
    }
}

impl FromIterator<ColorRole> for LockedColors {
    fn from_iter<I: IntoIterator<Item = ColorRole>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ColorVariables {
        ColorVariables::from_fn(|role| {
            let i = u8::try_from(role.index()).unwrap();
            Rgb::new(i, i.wrapping_mul(3), 255 - i)
        })
    }

    #[test]
    fn all_is_in_index_order() {
        for (i, role) in ColorRole::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i, "{role:?}");
        }
    }

    #[test]
    fn keys_round_trip() {
        for role in ColorRole::ALL {
            assert_eq!(ColorRole::from_key(role.key()), Some(role));
        }
    }

    #[test]
    fn keys_are_unique() {
        let keys: BTreeSet<&str> = ColorRole::ALL.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), ColorRole::COUNT);
    }

    #[test]
    fn serde_key_matches_key() {
        for role in ColorRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.key()));
        }
    }

    #[test]
    fn unknown_role_errors() {
        assert_eq!(
            "background".parse::<ColorRole>(),
            Err(ThemeError::UnknownRole("background".into()))
        );
    }

    // ── ColorVariables ──────────────────────────────────────────────

    #[test]
    fn get_set_index() {
        let mut colors = sample();
        colors.set(ColorRole::Tag, Rgb::WHITE);
        assert_eq!(colors.get(ColorRole::Tag), Rgb::WHITE);
        assert_eq!(colors[ColorRole::Tag], Rgb::WHITE);
    }

    #[test]
    fn iter_covers_every_role_once() {
        let roles: Vec<ColorRole> = sample().iter().map(|(r, _)| r).collect();
        assert_eq!(roles, ColorRole::ALL.to_vec());
    }

    #[test]
    fn from_partial_requires_every_role() {
        let mut partial: PartialColors = sample().iter().collect();
        partial.remove(&ColorRole::Comment);
        assert_eq!(
            ColorVariables::from_partial(&partial),
            Err(ThemeError::MissingRole("comment"))
        );
    }

    #[test]
    fn json_round_trip() {
        let colors = sample();
        let json = serde_json::to_string(&colors).unwrap();
        assert!(json.contains("\"line_highlight\":\"#0a1ef5\""), "{json}");
        let back: ColorVariables = serde_json::from_str(&json).unwrap();
        assert_eq!(back, colors);
    }

    #[test]
    fn json_rejects_unknown_key() {
        let mut map: BTreeMap<String, Rgb> = sample().into();
        map.insert("sparkle".into(), Rgb::BLACK);
        let json = serde_json::to_string(&map).unwrap();
        assert!(serde_json::from_str::<ColorVariables>(&json).is_err());
    }

    // ── LockedColors ────────────────────────────────────────────────

    #[test]
    fn toggle_flips() {
        let mut locked = LockedColors::new();
        assert!(locked.toggle(ColorRole::Bg1));
        assert!(locked.contains(ColorRole::Bg1));
        assert!(!locked.toggle(ColorRole::Bg1));
        assert!(locked.is_empty());
    }

    #[test]
    fn snapshot_filters_to_locked_roles() {
        let colors = sample();
        let locked: LockedColors = [ColorRole::Fg1, ColorRole::Keyword].into_iter().collect();
        let snap = locked.snapshot(&colors);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[&ColorRole::Fg1], colors.get(ColorRole::Fg1));
        assert_eq!(snap[&ColorRole::Keyword], colors.get(ColorRole::Keyword));
    }
}
