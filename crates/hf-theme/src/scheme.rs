//! Harmonic scheme engine: pure hue arithmetic.
//!
//! Each scheme takes a `base_hue` (degrees) and produces a fixed-length,
//! ordered list of hue angles related to it by a geometric rule. The first
//! hue is always the (normalized) base hue, every hue is in [0, 360), and
//! the same input always yields the same output.

use std::fmt;
use std::str::FromStr;

use hf_color::{Hsl, normalize_hue};
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The golden ratio conjugate, 1/φ.
const GOLDEN_RATIO: f64 = 0.618_033_988_749_895;

/// The harmonic relationship used to derive a palette's hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// The base hue four times.
    Monochromatic,
    /// Neighbours at ±30° and ±60°.
    Analogous,
    /// Base and its opposite.
    Complementary,
    /// Base plus the two hues flanking its complement (±30°).
    SplitComplementary,
    /// Base, +60°, +120°.
    Triadic,
    /// 90° spacing (4 hues).
    Tetradic,
    /// Successive multiples of 360°/φ (8 hues).
    GoldenRatio,
    /// 360° divided by successive Fibonacci numbers (9 hues).
    Fibonacci,
    /// 72° spacing (5 hues).
    PentagramStar,
    /// Two 33° steps (3 hues).
    VesicaPiscis,
    /// 60° spacing (6 hues).
    FlowerOfLife,
    /// 72° spacing, like the pentagram (5 hues).
    PlatonicSolids,
    /// Offsets of 180°·√n for n = 2..=8 (8 hues).
    SpiralOfTheodorus,
    /// 360°/7 spacing (7 hues).
    SeedOfLife,
    /// Hexagon at 60°, then the 30°-offset hexagon (12 hues).
    MetatronsCube,
}

impl ColorScheme {
    /// Generate the hue list for this scheme.
    #[must_use]
    pub fn generate(self, base_hue: f64) -> Vec<f64> {
        generate(self, base_hue)
    }

    /// The first five hues only, for smaller palettes.
    #[must_use]
    pub fn generate_few(self, base_hue: f64) -> Vec<f64> {
        let mut hues = generate(self, base_hue);
        hues.truncate(5);
        hues
    }

    /// Number of hues [`generate`](Self::generate) returns.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Complementary => 2,
            Self::SplitComplementary | Self::Triadic | Self::VesicaPiscis => 3,
            Self::Monochromatic | Self::Tetradic => 4,
            Self::Analogous | Self::PentagramStar | Self::PlatonicSolids => 5,
            Self::FlowerOfLife => 6,
            Self::SeedOfLife | Self::SpiralOfTheodorus => 7,
            Self::GoldenRatio => 8,
            Self::Fibonacci => 9,
            Self::MetatronsCube => 12,
        }
    }

    /// Kebab-case name, as used on the command line and in JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::GoldenRatio => "golden-ratio",
            Self::Fibonacci => "fibonacci",
            Self::PentagramStar => "pentagram-star",
            Self::VesicaPiscis => "vesica-piscis",
            Self::FlowerOfLife => "flower-of-life",
            Self::PlatonicSolids => "platonic-solids",
            Self::SpiralOfTheodorus => "spiral-of-theodorus",
            Self::SeedOfLife => "seed-of-life",
            Self::MetatronsCube => "metatrons-cube",
        }
    }

    /// Look a scheme up by name. Case, `-`, `_` and spaces are ignored, so
    /// `"split-complementary"`, `"SplitComplementary"` and
    /// `"split_complementary"` all match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = squash(name);
        Self::all().iter().find(|s| squash(s.name()) == wanted).copied()
    }

    /// All schemes, in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monochromatic, Self::Analogous, Self::Complementary,
            Self::SplitComplementary, Self::Triadic, Self::Tetradic,
            Self::GoldenRatio, Self::Fibonacci, Self::PentagramStar,
            Self::VesicaPiscis, Self::FlowerOfLife, Self::PlatonicSolids,
            Self::SpiralOfTheodorus, Self::SeedOfLife, Self::MetatronsCube,
        ]
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ThemeError::UnknownScheme(s.to_owned()))
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Hues for `scheme` around `base_hue`.
#[must_use]
pub fn generate_scheme_hues(base_hue: f64, scheme: ColorScheme) -> Vec<f64> {
    generate(scheme, base_hue)
}

/// Hues for a scheme given by name. An unrecognized name is not an error:
/// it yields the base hue alone.
#[must_use]
pub fn generate_scheme_hues_named(base_hue: f64, name: &str) -> Vec<f64> {
    ColorScheme::from_name(name).map_or_else(
        || vec![normalize_hue(base_hue)],
        |scheme| generate(scheme, base_hue),
    )
}

/// Rotate `base` by `hue_offset` degrees and saturate it by 10%.
#[must_use]
pub fn harmonized_color(base: Hsl, hue_offset: f64) -> Hsl {
    base.rotate(hue_offset).saturate(0.1)
}

/// Base plus each offset, normalized.
fn offsets(base: f64, offsets: &[f64]) -> Vec<f64> {
    std::iter::once(0.0)
        .chain(offsets.iter().copied())
        .map(|o| normalize_hue(base + o))
        .collect()
}

/// `count` hues spaced `step` degrees apart, starting at `base`.
fn spaced(base: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| normalize_hue((i as f64).mul_add(step, base)))
        .collect()
}

/// Core scheme dispatch.
fn generate(scheme: ColorScheme, base: f64) -> Vec<f64> {
    match scheme {
        ColorScheme::Monochromatic => vec![normalize_hue(base); 4],
        ColorScheme::Analogous => offsets(base, &[30.0, 60.0, -30.0, -60.0]),
        ColorScheme::Complementary => offsets(base, &[180.0]),
        ColorScheme::SplitComplementary => offsets(base, &[150.0, 210.0]),
        ColorScheme::Triadic => offsets(base, &[60.0, 120.0]),
        ColorScheme::Tetradic => spaced(base, 90.0, 4),
        ColorScheme::GoldenRatio => spaced(base, 360.0 * GOLDEN_RATIO, 8),
        ColorScheme::Fibonacci => {
            const FIBS: [f64; 8] = [2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0];
            let divisions: Vec<f64> = FIBS.iter().map(|f| 360.0 / f).collect();
            offsets(base, &divisions)
        }
        ColorScheme::PentagramStar | ColorScheme::PlatonicSolids => spaced(base, 72.0, 5),
        ColorScheme::VesicaPiscis => offsets(base, &[33.0, 66.0]),
        ColorScheme::FlowerOfLife => spaced(base, 60.0, 6),
        ColorScheme::SpiralOfTheodorus => {
            // n = 4 would land back on the base hue.
            let spiral: Vec<f64> = [2, 3, 5, 6, 7, 8]
                .into_iter()
                .map(|n| 180.0 * f64::from(n).sqrt())
                .collect();
            offsets(base, &spiral)
        }
        ColorScheme::SeedOfLife => spaced(base, 360.0 / 7.0, 7),
        ColorScheme::MetatronsCube => {
            // Inner hexagon first, then the ring rotated by half a step.
            let mut v = spaced(base, 60.0, 6);
            v.extend(spaced(base + 30.0, 60.0, 6));
            v
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
