// SPDX-License-Identifier: MIT
//
// Color primitives underneath hueforge.
//
// Every palette color lives in one of two forms: 8-bit hex RGB (the
// canonical, stored form) and HSL (the form the generator does arithmetic
// in). This crate converts between them and answers the luminance questions
// the contrast adjusters ask: how bright is this color, how far apart are
// two colors, and does a background read as light or dark.
//
// Nothing here allocates on the hot path except hex formatting, and nothing
// here knows about palettes, roles or schemes.

pub mod color;
pub mod luminance;

pub use color::{
    ColorError, Hsl, Result, Rgb, ToSrgb, clamp_lightness, clamp_saturation, hex_to_hsl,
    hsl_to_hex, normalize_hue,
};
pub use luminance::{contrast_ratio, is_dark, is_light, relative_luminance};
