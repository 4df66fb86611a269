//! Generator configuration.
//!
//! Every tunable constant of the palette engine lives here so a host can
//! load them from a JSON document. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::contrast::{ContrastBand, MutedOptions, Polarity, ReadabilityOptions};
use crate::error::{Result, ThemeError};

/// Contrast targets and adjuster bounds for palette generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Readability floor for primary text.
    pub text_contrast: f64,
    /// Readability floor for accents, diagnostics and syntax.
    pub accent_contrast: f64,
    /// Muted band against dark backgrounds.
    pub muted_dark: ContrastBand,
    /// Muted band against light backgrounds.
    pub muted_light: ContrastBand,
    pub readability: ReadabilityOptions,
    pub muted: MutedOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            text_contrast: 5.5,
            accent_contrast: 4.5,
            muted_dark: ContrastBand::MUTED_DARK,
            muted_light: ContrastBand::MUTED_LIGHT,
            readability: ReadabilityOptions::default(),
            muted: MutedOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Config`] for malformed JSON, an inverted contrast band,
    /// or an out-of-range value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ThemeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check(
            self.text_contrast.is_finite() && self.text_contrast >= 1.0,
            "text_contrast must be a ratio of at least 1",
        )?;
        check(
            self.accent_contrast.is_finite() && self.accent_contrast >= 1.0,
            "accent_contrast must be a ratio of at least 1",
        )?;
        check(
            self.readability.step.is_finite() && self.readability.step > 0.0,
            "readability.step must be positive",
        )?;

        let m = &self.muted;
        check(
            (0.0..1.0).contains(&m.lightness_ratio) && m.lightness_ratio > 0.0,
            "muted.lightness_ratio must be in (0, 1)",
        )?;
        check(
            m.saturate_ratio.is_finite() && m.saturate_ratio >= 0.0,
            "muted.saturate_ratio must be non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&m.desaturate_ratio),
            "muted.desaturate_ratio must be in [0, 1]",
        )?;
        check(
            (0.0..=100.0).contains(&m.dark_saturation_ceiling)
                && (0.0..=100.0).contains(&m.light_saturation_ceiling),
            "muted saturation ceilings must be in [0, 100]",
        )?;
        check(
            m.desaturate_step.is_finite() && m.desaturate_step > 0.0,
            "muted.desaturate_step must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&m.dark_luminance_floor)
                && (0.0..=1.0).contains(&m.light_luminance_ceiling),
            "muted luminance valves must be in [0, 1]",
        )
    }

    /// The muted band for a background of the given polarity.
    #[must_use]
    pub const fn muted_band(&self, polarity: Polarity) -> ContrastBand {
        match polarity {
            Polarity::Dark => self.muted_dark,
            Polarity::Light => self.muted_light,
        }
    }
}

fn check(ok: bool, message: &str) -> Result<()> {
    if ok { Ok(()) } else { Err(ThemeError::Config(message.to_owned())) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
