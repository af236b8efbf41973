//! Perceptual color adjustments: blending, darkening and lightening.
//!
//! All operations work in Oklab/Oklch and map the result back into sRGB
//! with the CSS Color 4 strategy, so the output is always displayable.

use crate::color::{OkLab, Srgb};
use crate::gamut::GamutStrategy;
use crate::oklab::{oklch_to_oklab, srgb_to_oklab, srgb_to_oklch};

/// Straight-line interpolation between two Oklab colors.
pub fn lerp_oklab(c1: OkLab, c2: OkLab, t: f64) -> OkLab {
    OkLab {
        l: c1.l + t * (c2.l - c1.l),
        a: c1.a + t * (c2.a - c1.a),
        b: c1.b + t * (c2.b - c1.b),
    }
}

/// Blends two sRGB colors in Oklab.
///
/// `t = 0` gives `c1` and `t = 1` gives `c2`. Values outside [0, 1]
/// extrapolate; the result is gamut-mapped either way.
pub fn mix(c1: Srgb, c2: Srgb, t: f64) -> Srgb {
    let lab = lerp_oklab(srgb_to_oklab(c1), srgb_to_oklab(c2), t);
    GamutStrategy::Css4.to_srgb(lab)
}

/// Scales Oklch lightness by `1 - amount`. `amount` is clamped to [0, 1].
pub fn darken(color: Srgb, amount: f64) -> Srgb {
    let amount = amount.clamp(0.0, 1.0);
    let mut lch = srgb_to_oklch(color);
    lch.l *= 1.0 - amount;
    GamutStrategy::Css4.to_srgb(oklch_to_oklab(lch))
}

/// Moves Oklch lightness toward 1 by `amount` of the remaining distance.
/// `amount` is clamped to [0, 1].
pub fn lighten(color: Srgb, amount: f64) -> Srgb {
    let amount = amount.clamp(0.0, 1.0);
    let mut lch = srgb_to_oklch(color);
    lch.l = (lch.l + (1.0 - lch.l) * amount).min(1.0);
    GamutStrategy::Css4.to_srgb(oklch_to_oklab(lch))
}
