//! Palette generation: the bridge from scheme hues to concrete colors.
//!
//! A palette is derived in three passes:
//!
//! 1. Realize every role at its nominal HSL: the hue comes from the role's
//!    slot (the base hue, a scheme hue, or a fixed semantic hue), the
//!    saturation from the request, the lightness from the role and polarity.
//! 2. Overlay locked colors verbatim.
//! 3. Run each unlocked foreground-like role through the contrast adjuster
//!    against its paired background as it stands after pass 2, so a locked
//!    background is honored.
//!
//! Backgrounds are never paired, so pass 3 is order independent.

use hf_color::{Hsl, Rgb, clamp_saturation, normalize_hue};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::contrast::{Polarity, adjust_muted_color_with, cap_saturation, ensure_readability_with};
use crate::roles::{ColorRole, ColorVariables, LockedColors, PartialColors};
use crate::scheme::ColorScheme;

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// Inputs to [`generate_palette`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub is_dark: bool,
    /// Degrees; normalized before use.
    pub base_hue: f64,
    /// Percent; clamped before use.
    pub saturation: f64,
    pub scheme: ColorScheme,
    /// Use at most the first five scheme hues.
    #[serde(default)]
    pub few: bool,
    /// Colors that must come back unchanged.
    #[serde(default)]
    pub locked: PartialColors,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(is_dark: bool, base_hue: f64, saturation: f64, scheme: ColorScheme) -> Self {
        Self {
            is_dark,
            base_hue,
            saturation,
            scheme,
            few: false,
            locked: PartialColors::new(),
        }
    }

    #[must_use]
    pub const fn with_few(mut self, few: bool) -> Self {
        self.few = few;
        self
    }

    /// Pin the locked roles to their colors in `current`.
    #[must_use]
    pub fn with_locks(mut self, locked: &LockedColors, current: &ColorVariables) -> Self {
        self.locked = locked.snapshot(current);
        self
    }

    /// Pin a single role to an explicit color.
    #[must_use]
    pub fn with_locked_color(mut self, role: ColorRole, color: Rgb) -> Self {
        self.locked.insert(role, color);
        self
    }

    fn hues(&self, base_hue: f64) -> Vec<f64> {
        if self.few {
            self.scheme.generate_few(base_hue)
        } else {
            self.scheme.generate(base_hue)
        }
    }
}

// ---------------------------------------------------------------------------
// Role table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum HueSlot {
    Base,
    /// Index into the scheme hues, wrapping.
    Scheme(usize),
    Fixed(f64),
}

#[derive(Debug, Clone, Copy)]
enum SaturationRule {
    /// Fraction of the requested saturation.
    Scaled(f64),
    Fixed(f64),
}

impl SaturationRule {
    fn resolve(self, saturation: f64) -> f64 {
        match self {
            Self::Scaled(factor) => saturation * factor,
            Self::Fixed(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Floor {
    Text,
    Accent,
}

#[derive(Debug, Clone, Copy)]
enum Pairing {
    None,
    Readable { against: ColorRole, floor: Floor },
    Muted { against: ColorRole },
}

#[derive(Debug, Clone, Copy)]
struct RoleSpec {
    hue: HueSlot,
    saturation: SaturationRule,
    /// Lightness on dark and light themes.
    lightness: (f64, f64),
    pairing: Pairing,
}

const fn spec(hue: HueSlot, saturation: SaturationRule, dark: f64, light: f64, pairing: Pairing) -> RoleSpec {
    RoleSpec {
        hue,
        saturation,
        lightness: (dark, light),
        pairing,
    }
}

const TEXT: Pairing = Pairing::Readable { against: ColorRole::Bg1, floor: Floor::Text };
const ACCENT: Pairing = Pairing::Readable { against: ColorRole::Bg1, floor: Floor::Accent };
const MUTED: Pairing = Pairing::Muted { against: ColorRole::Bg1 };

use HueSlot::{Base, Fixed, Scheme};
use SaturationRule::{Fixed as FixedSat, Scaled};

/// One entry per role, in [`ColorRole::ALL`] order.
#[rustfmt::skip]
const ROLE_TABLE: [RoleSpec; ColorRole::COUNT] = [
    // Backgrounds
    spec(Base,       Scaled(0.25),    9.0, 97.0, Pairing::None),
    spec(Base,       Scaled(0.25),   12.0, 94.0, Pairing::None),
    spec(Base,       Scaled(0.30),   16.0, 90.0, Pairing::None),
    // Foregrounds
    spec(Base,       Scaled(0.10),   92.0, 10.0, TEXT),
    spec(Base,       Scaled(0.10),   78.0, 28.0, Pairing::Readable { against: ColorRole::Bg2, floor: Floor::Accent }),
    spec(Base,       Scaled(0.10),   60.0, 45.0, MUTED),
    // Accents and surfaces
    spec(Scheme(0),  Scaled(1.0),    65.0, 42.0, ACCENT),
    spec(Scheme(1),  Scaled(1.0),    65.0, 42.0, ACCENT),
    spec(Base,       Scaled(0.20),   24.0, 84.0, Pairing::None),
    spec(Scheme(0),  Scaled(0.50),   28.0, 82.0, Pairing::None),
    spec(Base,       Scaled(0.20),   13.0, 93.0, Pairing::None),
    spec(Scheme(2),  Scaled(0.80),   38.0, 78.0, Pairing::None),
    // Diagnostics
    spec(Fixed(0.0),   FixedSat(75.0), 62.0, 42.0, ACCENT),
    spec(Fixed(38.0),  FixedSat(85.0), 60.0, 38.0, ACCENT),
    spec(Fixed(210.0), FixedSat(70.0), 62.0, 42.0, ACCENT),
    spec(Fixed(140.0), FixedSat(55.0), 55.0, 32.0, ACCENT),
    // Syntax
    spec(Base,       Scaled(0.30),   50.0, 60.0, MUTED),
    spec(Scheme(0),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(1),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(2),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(3),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(4),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(5),  Scaled(0.60),   80.0, 30.0, ACCENT),
    spec(Scheme(6),  Scaled(0.50),   75.0, 35.0, ACCENT),
    spec(Scheme(7),  Scaled(1.0),    70.0, 40.0, ACCENT),
    spec(Scheme(8),  Scaled(1.0),    70.0, 40.0, ACCENT),
];

const fn spec_for(role: ColorRole) -> &'static RoleSpec {
    &ROLE_TABLE[role.index()]
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a complete palette with the default [`GeneratorConfig`].
#[must_use]
pub fn generate_palette(request: &GenerationRequest) -> ColorVariables {
    generate_palette_with(request, &GeneratorConfig::default())
}

/// Generate a complete palette. Locked roles come back byte-identical; every
/// other role is derived fresh. Contrast shortfalls are logged, never fatal.
#[must_use]
pub fn generate_palette_with(request: &GenerationRequest, config: &GeneratorConfig) -> ColorVariables {
    let base_hue = normalize_hue(request.base_hue);
    let saturation = clamp_saturation(request.saturation);
    let hues = request.hues(base_hue);

    debug!(
        scheme = %request.scheme,
        base_hue,
        saturation,
        is_dark = request.is_dark,
        few = request.few,
        hues = hues.len(),
        locked = request.locked.len(),
        "generating palette"
    );

    let mut colors = ColorVariables::from_fn(|role| {
        let spec = spec_for(role);
        let hue = match spec.hue {
            HueSlot::Base => base_hue,
            HueSlot::Scheme(i) => hues.get(i % hues.len().max(1)).copied().unwrap_or(base_hue),
            HueSlot::Fixed(h) => h,
        };
        let lightness = if request.is_dark { spec.lightness.0 } else { spec.lightness.1 };
        Hsl::new(hue, spec.saturation.resolve(saturation), lightness).to_rgb()
    });

    for (&role, &color) in &request.locked {
        colors.set(role, color);
    }

    for role in ColorRole::ALL {
        if request.locked.contains_key(&role) {
            continue;
        }
        let nominal = colors.get(role);
        let adjusted = match spec_for(role).pairing {
            Pairing::None => nominal,
            Pairing::Readable { against, floor } => {
                let min_contrast = match floor {
                    Floor::Text => config.text_contrast,
                    Floor::Accent => config.accent_contrast,
                };
                let outcome =
                    ensure_readability_with(nominal, colors.get(against), min_contrast, &config.readability);
                if !outcome.converged {
                    debug!(%role, iterations = outcome.iterations, "role below readability floor");
                }
                outcome.color
            }
            Pairing::Muted { against } => {
                let bg = colors.get(against);
                let band = config.muted_band(Polarity::of(bg));
                let outcome = adjust_muted_color_with(nominal, bg, band, &config.muted);
                if !outcome.converged {
                    debug!(%role, iterations = outcome.iterations, "role outside muted band");
                }
                outcome.color
            }
        };
        trace!(%role, nominal = %nominal, color = %adjusted, "derived");
        colors.set(role, adjusted);
    }

    colors
}

/// Re-derive saturation across `current` with the default [`GeneratorConfig`].
#[must_use]
pub fn regenerate_for_saturation(
    current: &ColorVariables,
    saturation: f64,
    locked: &LockedColors,
) -> ColorVariables {
    regenerate_for_saturation_with(current, saturation, locked, &GeneratorConfig::default())
}

/// Re-derive saturation across `current` without touching hue or lightness.
///
/// Locked roles are copied unchanged. Achromatic entries carry no hue to
/// saturate and are copied unchanged too; a full [`generate_palette`] call
/// restores them. Muted roles stay under their polarity's saturation
/// ceiling. Readability floors are not re-checked, so a more vivid accent
/// can drop below its floor until the next full generation.
#[must_use]
pub fn regenerate_for_saturation_with(
    current: &ColorVariables,
    saturation: f64,
    locked: &LockedColors,
    config: &GeneratorConfig,
) -> ColorVariables {
    let saturation = clamp_saturation(saturation);
    debug!(saturation, locked = locked.len(), "re-deriving saturation");

    let mut next = *current;
    for (role, color) in current.iter() {
        if locked.contains(role) {
            continue;
        }
        let hsl = color.to_hsl();
        if hsl.s <= 0.0 {
            continue;
        }
        let spec = spec_for(role);
        let target = hsl.with_saturation(spec.saturation.resolve(saturation));
        let resaturated = match spec.pairing {
            Pairing::Muted { against } => {
                let ceiling = config.muted.saturation_ceiling(Polarity::of(current.get(against)));
                cap_saturation(target, ceiling, config.muted.desaturate_step)
            }
            Pairing::None | Pairing::Readable { .. } => target.to_rgb(),
        };
        next.set(role, resaturated);
    }
    next
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
