//! Error types for okgamut.
//!
//! The conversion and gamut-mapping functions are total and never fail.
//! Errors only arise at the edges: parsing colors and looking up names.

use thiserror::Error;

/// Errors produced while parsing or constructing colors.
#[derive(Debug, Error)]
pub enum ColorError {
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A gamut name was not recognized.
    #[error("unknown gamut '{0}' (expected srgb or p3)")]
    UnknownGamut(String),

    /// A gamut-mapping strategy name was not recognized.
    #[error("unknown gamut-mapping strategy '{0}' (expected chroma, css4 or clip)")]
    UnknownStrategy(String),

    /// An interpolation space name was not recognized.
    #[error("unknown interpolation '{0}' (expected oklab or oklch)")]
    UnknownInterpolation(String),
}
