//! The sRGB transfer function (gamma encode/decode), applied per channel.
//!
//! Display P3 uses the very same curve, so the P3 helpers here share the
//! scalar functions.
//!
//! Values outside [0, 1] go through the same piecewise formula. Negative
//! inputs fall on the linear segment, so nothing here produces NaN.

use crate::color::{DisplayP3, LinearP3, LinearRgb, Srgb};

/// Encoded values at or below this use the linear segment when decoding.
pub const DECODE_THRESHOLD: f64 = 0.04045;

/// Linear values at or below this use the linear segment when encoding.
pub const ENCODE_THRESHOLD: f64 = 0.0031308;

/// Decodes one gamma-encoded component to linear light.
#[inline]
pub fn to_linear(c: f64) -> f64 {
    if c <= DECODE_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encodes one linear-light component with the sRGB curve.
#[inline]
pub fn to_gamma(c: f64) -> f64 {
    if c <= ENCODE_THRESHOLD {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: to_linear(c.r),
        g: to_linear(c.g),
        b: to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: to_gamma(c.r),
        g: to_gamma(c.g),
        b: to_gamma(c.b),
    }
}

/// Converts Display P3 to linear P3. Same curve as sRGB.
pub fn p3_to_linear(c: DisplayP3) -> LinearP3 {
    LinearP3 {
        r: to_linear(c.r),
        g: to_linear(c.g),
        b: to_linear(c.b),
    }
}

/// Converts linear P3 to gamma-encoded Display P3.
pub fn linear_to_p3(c: LinearP3) -> DisplayP3 {
    DisplayP3 {
        r: to_gamma(c.r),
        g: to_gamma(c.g),
        b: to_gamma(c.b),
    }
}
