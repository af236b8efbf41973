#![deny(unsafe_code)]
//! Perceptual color conversions and gamut mapping built on Oklab.
//!
//! Provides the color value types (`Srgb`, `LinearRgb`, `DisplayP3`, `OkLab`,
//! `OkLch`), the sRGB/Display P3 ↔ Oklab ↔ Oklch pipeline, chroma-reduction
//! gamut mapping with the CSS Color 4 and clip alternatives, the ΔEok
//! metric, and Oklab-based blending and gradient palettes.

pub mod adjust;
pub mod color;
pub mod error;
pub mod gamut;
pub mod matrix;
pub mod metrics;
pub mod oklab;
pub mod palette;
pub mod transfer;

pub use adjust::{darken, lighten, mix};
pub use color::{DisplayP3, LinearP3, LinearRgb, Lms, OkLab, OkLch, Srgb};
pub use error::ColorError;
pub use gamut::{in_gamut, is_srgb_in_gamut, map_to_gamut, map_to_gamut_in, Gamut, GamutStrategy};
pub use metrics::{delta_e_ok, delta_e_srgb};
pub use oklab::{oklab_to_oklch, oklab_to_srgb, oklch_to_oklab, oklch_to_srgb, srgb_to_oklab, srgb_to_oklch};
pub use palette::{Interpolation, Palette};
