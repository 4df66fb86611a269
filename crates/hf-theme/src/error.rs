//! Error type for the theme engine.
//!
//! Only boundary problems are errors: malformed colors, unknown names and
//! impossible constraints. A contrast adjuster that runs out of iterations
//! is not an error; it reports the shortfall in its outcome instead.

use hf_color::ColorError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Color(#[from] ColorError),

    /// A contrast band whose floor is above its ceiling (or not a ratio at all).
    #[error("degenerate contrast band [{min}, {max}]")]
    DegenerateConstraint { min: f64, max: f64 },

    #[error("unknown color role {0:?}")]
    UnknownRole(String),

    #[error("unknown color scheme {0:?}")]
    UnknownScheme(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    /// A palette document that does not cover every role.
    #[error("palette is missing role {0:?}")]
    MissingRole(&'static str),

    #[error("invalid generator config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
