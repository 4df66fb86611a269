// SPDX-License-Identifier: MIT
//
// Hex RGB storage with HSL arithmetic.
//
// Channel math uses the usual one-letter names (r, g, b, h, s, l, p, q, t).
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   "#rgb" / "#rrggbb" ↔ Rgb (u8 channels) ↔ sRGB (0.0–1.0) ↔ Hsl
//
// Hsl → sRGB uses the standard six-segment piecewise-linear hue wheel.
// Every derived palette color passes through it, so it must match the
// reference formula exactly, including the segment boundaries.
//
// Units: hue in degrees [0, 360), saturation and lightness in percent
// [0, 100]. The relative operations (lighten, saturate, ...) take ratios of
// the current value, so `lighten(0.2)` on lightness 50 gives 60.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A malformed color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Wrong length, missing `#`, or non-hex characters.
    #[error("invalid hex color {input:?}: {reason}")]
    Format {
        input: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ColorError>;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color. This is the canonical stored form of a palette entry.
///
/// Serializes as its `#rrggbb` hex string.
///
/// # Examples
///
/// ```
/// use hf_color::Rgb;
///
/// let red: Rgb = "#f00".parse().unwrap();
/// assert_eq!(red, Rgb::new(255, 0, 0));
/// assert_eq!(red.to_hex(), "#ff0000");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Format`] for any other length, a missing `#`,
    /// or non-hex digits. The parser never guesses.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_hex(s)
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL (unrounded).
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Linear interpolation in sRGB: `t` = 0.0 returns `self`, 1.0 returns `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: u8, b: u8| {
            let a = f64::from(a) / 255.0;
            let b = f64::from(b) / 255.0;
            to_u8((b - a).mul_add(t, a))
        };
        Self::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex(s)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self> {
        parse_hex(&s)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL: hue in degrees, saturation and lightness in percent.
///
/// Values are kept as `f64` so the iterative adjusters can take many small
/// steps without accumulating 8-bit rounding; rounding happens once, when
/// the color is realized as [`Rgb`].
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue angle in degrees, [0, 360).
    pub h: f64,
    /// Saturation in percent, [0, 100].
    pub s: f64,
    /// Lightness in percent, [0, 100].
    pub l: f64,
}

impl Hsl {
    /// Create an HSL color, normalizing hue and clamping saturation/lightness.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_saturation(s),
            l: clamp_lightness(l),
        }
    }

    /// Parse a hex string straight into HSL.
    ///
    /// # Errors
    ///
    /// Same as [`Rgb::from_hex`].
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_hex(s).map(Rgb::to_hsl)
    }

    /// Realize as 8-bit RGB (each channel rounded to nearest).
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = hsl_to_srgb(self);
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Format as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// Format as `"H S% L%"` with every component rounded. This is the form the
    /// rendering surface consumes as a style property value.
    #[must_use]
    pub fn to_css_string(self) -> String {
        // Round before wrapping so 359.6 renders as 0, not 360.
        let h = css_component(normalize_hue(self.h.round()));
        let s = css_component(clamp_saturation(self.s));
        let l = css_component(clamp_lightness(self.l));
        format!("{h} {s}% {l}%")
    }

    // ─── Relative Operations ─────────────────────────────────────────────
    //
    // Ratios scale the current value: `darken(0.5)` halves lightness.

    /// Increase lightness by `ratio` of its current value.
    #[inline]
    #[must_use]
    pub fn lighten(self, ratio: f64) -> Self {
        Self {
            l: clamp_lightness(self.l.mul_add(ratio, self.l)),
            ..self
        }
    }

    /// Decrease lightness by `ratio` of its current value.
    #[inline]
    #[must_use]
    pub fn darken(self, ratio: f64) -> Self {
        Self {
            l: clamp_lightness((-self.l).mul_add(ratio, self.l)),
            ..self
        }
    }

    /// Increase saturation by `ratio` of its current value.
    #[inline]
    #[must_use]
    pub fn saturate(self, ratio: f64) -> Self {
        Self {
            s: clamp_saturation(self.s.mul_add(ratio, self.s)),
            ..self
        }
    }

    /// Decrease saturation by `ratio` of its current value.
    #[inline]
    #[must_use]
    pub fn desaturate(self, ratio: f64) -> Self {
        Self {
            s: clamp_saturation((-self.s).mul_add(ratio, self.s)),
            ..self
        }
    }

    /// Rotate the hue by `degrees` (wraps around 360°).
    #[inline]
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    // ─── Absolute Setters ────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self {
            s: clamp_saturation(s),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self {
            l: clamp_lightness(l),
            ..self
        }
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsl()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.1}, {:.1}%, {:.1}%)", self.h, self.s, self.l)
    }
}

// ─── sRGB access ─────────────────────────────────────────────────────────────

/// Anything that can be viewed as unrounded sRGB components in [0, 1].
///
/// Luminance and contrast are defined on sRGB; implementing this for both
/// color forms lets the adjusters measure an in-progress [`Hsl`] without
/// rounding it to 8 bits first.
pub trait ToSrgb: Copy {
    fn to_srgb(self) -> (f64, f64, f64);
}

impl ToSrgb for Rgb {
    fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl ToSrgb for Hsl {
    fn to_srgb(self) -> (f64, f64, f64) {
        hsl_to_srgb(self)
    }
}

// ─── Free functions ──────────────────────────────────────────────────────────

/// Parse `#rgb` / `#rrggbb` into HSL.
///
/// # Errors
///
/// [`ColorError::Format`] on anything else.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Hsl::from_hex(hex)
}

/// Realize an HSL color as `#rrggbb`.
#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_hex()
}

/// Normalize a hue angle into [0, 360). Non-finite input maps to 0.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// Clamp saturation into [0, 100]. Non-finite input maps to 0.
#[inline]
#[must_use]
pub fn clamp_saturation(s: f64) -> f64 {
    clamp_percent(s)
}

/// Clamp lightness into [0, 100]. Non-finite input maps to 0.
#[inline]
#[must_use]
pub fn clamp_lightness(l: f64) -> f64 {
    clamp_percent(l)
}

#[inline]
fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

// ─── HSL ↔ sRGB ──────────────────────────────────────────────────────────────

/// HSL → sRGB (0.0–1.0), six-segment piecewise-linear hue wheel.
fn hsl_to_srgb(hsl: Hsl) -> (f64, f64, f64) {
    let h = normalize_hue(hsl.h) / 360.0;
    let s = clamp_saturation(hsl.s) / 100.0;
    let l = clamp_lightness(hsl.l) / 100.0;

    if s <= 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
    let p = 2.0f64.mul_add(l, -q);
    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

/// One channel of the hue wheel. `t` is the hue fraction offset for that channel.
#[inline]
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return (q - p).mul_add(6.0 * t, p);
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return (q - p).mul_add((2.0 / 3.0 - t) * 6.0, p);
    }
    p
}

/// 8-bit RGB → HSL. Channel comparisons are done on the integers so the
/// max-channel branch is exact.
fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.to_srgb();
    let max_u = rgb.r.max(rgb.g).max(rgb.b);
    let min_u = rgb.r.min(rgb.g).min(rgb.b);
    let max = f64::from(max_u) / 255.0;
    let min = f64::from(min_u) / 255.0;
    let l = (max + min) / 2.0;

    if max_u == min_u {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max_u == rgb.r {
        (g - b) / d + if rgb.g < rgb.b { 6.0 } else { 0.0 }
    } else if max_u == rgb.g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: normalize_hue(h * 60.0),
        s: s * 100.0,
        l: l * 100.0,
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Result<Rgb> {
    let format_error = |reason| ColorError::Format {
        input: s.to_owned(),
        reason,
    };

    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| format_error("missing leading '#'"))?;
    let bytes = digits.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0]).ok_or_else(|| format_error("non-hex digit"))?;
            let g = parse_hex_digit(bytes[1]).ok_or_else(|| format_error("non-hex digit"))?;
            let b = parse_hex_digit(bytes[2]).ok_or_else(|| format_error("non-hex digit"))?;
            Ok(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2]).ok_or_else(|| format_error("non-hex digit"))?;
            let g = parse_hex_byte(&bytes[2..4]).ok_or_else(|| format_error("non-hex digit"))?;
            let b = parse_hex_byte(&bytes[4..6]).ok_or_else(|| format_error("non-hex digit"))?;
            Ok(Rgb::new(r, g, b))
        }
        _ => Err(format_error("expected #rgb or #rrggbb")),
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255), rounding half up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn css_component(v: f64) -> i64 {
    v.round() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
