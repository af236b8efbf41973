//! Oklab / Oklch conversions.
//!
//! The forward path is: gamma-encoded RGB → linear RGB → LMS → signed cube
//! root (LMS') → Oklab. The inverse path reverses each stage. The only
//! nonlinearity besides the transfer curve is the cube root, which is taken
//! sign-preserving because highly saturated colors produce negative LMS.

use crate::color::{DisplayP3, LinearP3, LinearRgb, Lms, OkLab, OkLch, Srgb};
use crate::matrix::{
    apply, LINEAR_P3_TO_LMS, LINEAR_SRGB_TO_LMS, LMS_PRIME_TO_OKLAB, LMS_TO_LINEAR_P3,
    LMS_TO_LINEAR_SRGB, OKLAB_TO_LMS_PRIME,
};
use crate::transfer::{linear_to_p3, linear_to_srgb, p3_to_linear, srgb_to_linear};

/// Below this chroma the hue is reported as 0.0 instead of the
/// indeterminate `atan2(0, 0)`.
pub const ACHROMATIC_CHROMA: f64 = 1e-10;

/// Cube root that keeps the sign of its input.
#[inline]
pub fn signed_cbrt(x: f64) -> f64 {
    x.signum() * x.abs().cbrt()
}

/// Linear sRGB → LMS.
pub fn linear_to_lms(c: LinearRgb) -> Lms {
    let [l, m, s] = apply(&LINEAR_SRGB_TO_LMS, [c.r, c.g, c.b]);
    Lms { l, m, s }
}

/// LMS → linear sRGB.
pub fn lms_to_linear(c: Lms) -> LinearRgb {
    let [r, g, b] = apply(&LMS_TO_LINEAR_SRGB, [c.l, c.m, c.s]);
    LinearRgb { r, g, b }
}

/// Linear Display P3 → LMS.
pub fn linear_p3_to_lms(c: LinearP3) -> Lms {
    let [l, m, s] = apply(&LINEAR_P3_TO_LMS, [c.r, c.g, c.b]);
    Lms { l, m, s }
}

/// LMS → linear Display P3.
pub fn lms_to_linear_p3(c: Lms) -> LinearP3 {
    let [r, g, b] = apply(&LMS_TO_LINEAR_P3, [c.l, c.m, c.s]);
    LinearP3 { r, g, b }
}

/// LMS → cube root → Oklab.
pub fn lms_to_oklab(c: Lms) -> OkLab {
    let lms_prime = [signed_cbrt(c.l), signed_cbrt(c.m), signed_cbrt(c.s)];
    let [l, a, b] = apply(&LMS_PRIME_TO_OKLAB, lms_prime);
    OkLab { l, a, b }
}

/// Oklab → LMS' → cube → LMS.
pub fn oklab_to_lms(c: OkLab) -> Lms {
    let [l_, m_, s_] = apply(&OKLAB_TO_LMS_PRIME, [c.l, c.a, c.b]);
    Lms {
        l: l_ * l_ * l_,
        m: m_ * m_ * m_,
        s: s_ * s_ * s_,
    }
}

/// Converts linear RGB to Oklab.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    lms_to_oklab(linear_to_lms(c))
}

/// Converts Oklab to linear RGB. The result may fall outside [0, 1].
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    lms_to_linear(oklab_to_lms(c))
}

/// Converts linear Display P3 to Oklab.
pub fn linear_p3_to_oklab(c: LinearP3) -> OkLab {
    lms_to_oklab(linear_p3_to_lms(c))
}

/// Converts Oklab to linear Display P3. The result may fall outside [0, 1].
pub fn oklab_to_linear_p3(c: OkLab) -> LinearP3 {
    lms_to_linear_p3(oklab_to_lms(c))
}

/// Converts gamma-encoded sRGB to Oklab.
pub fn srgb_to_oklab(c: Srgb) -> OkLab {
    linear_to_oklab(srgb_to_linear(c))
}

/// Converts Oklab to gamma-encoded sRGB.
///
/// No clamping is applied: colors outside the sRGB gamut come back with
/// components outside [0, 1]. Use [`crate::gamut`] to bring them in.
///
/// Negative linear components stay on the linear segment of the curve
/// (`12.92 * c`) instead of being sign-mirrored through the power segment,
/// so negative outputs are larger in magnitude than a mirrored encoder gives.
pub fn oklab_to_srgb(c: OkLab) -> Srgb {
    linear_to_srgb(oklab_to_linear(c))
}

/// Converts gamma-encoded Display P3 to Oklab.
pub fn p3_to_oklab(c: DisplayP3) -> OkLab {
    linear_p3_to_oklab(p3_to_linear(c))
}

/// Converts Oklab to gamma-encoded Display P3, unclamped.
pub fn oklab_to_p3(c: OkLab) -> DisplayP3 {
    linear_to_p3(oklab_to_linear_p3(c))
}

/// Converts Oklab to Oklch.
///
/// Hue is in degrees, normalized to [0, 360). When chroma is below
/// [`ACHROMATIC_CHROMA`] the hue is set to 0.0 rather than NaN.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let ch = (c.a * c.a + c.b * c.b).sqrt();
    let h = if ch < ACHROMATIC_CHROMA {
        0.0
    } else {
        normalize_hue(c.b.atan2(c.a).to_degrees())
    };
    OkLch { l: c.l, c: ch, h }
}

/// Converts Oklch to Oklab. Any hue angle is accepted.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let (sin, cos) = c.h.to_radians().sin_cos();
    OkLab {
        l: c.l,
        a: c.c * cos,
        b: c.c * sin,
    }
}

/// Convenience: sRGB → linear → Oklab → Oklch.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(srgb_to_oklab(c))
}

/// Convenience: Oklch → Oklab → linear → sRGB, unclamped.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    oklab_to_srgb(oklch_to_oklab(c))
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}
