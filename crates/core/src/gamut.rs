//! Gamut mapping: bringing out-of-range Oklch colors back into an RGB cube.
//!
//! The primary mapper, [`map_to_gamut`], keeps lightness and hue fixed and
//! bisects on chroma for the largest value whose RGB form is inside the
//! cube. Two alternative strategies are available through
//! [`GamutStrategy`]: the CSS Color 4 algorithm (bisection that accepts a
//! clipped color once it is within one just-noticeable difference) and
//! plain per-channel clipping.
//!
//! Precision constants are fixed at compile time and are part of the
//! observable contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::{DisplayP3, LinearP3, LinearRgb, OkLab, OkLch, Srgb};
use crate::error::ColorError;
use crate::metrics::delta_e_ok;
use crate::oklab::{
    linear_p3_to_oklab, linear_to_oklab, normalize_hue, oklab_to_linear, oklab_to_linear_p3,
    oklab_to_oklch, oklch_to_oklab, p3_to_oklab, srgb_to_oklab,
};
use crate::transfer::to_gamma;

/// Slack allowed on each side of [0, 1] when testing gamma-encoded channels.
pub const GAMUT_TOLERANCE: f64 = 1e-5;

/// Upper bound on chroma bisection steps.
pub const MAX_ITERATIONS: usize = 20;

/// Bisection stops early once the chroma bracket is narrower than this.
pub const CHROMA_PRECISION: f64 = 1e-6;

/// Just-noticeable difference in ΔEok used by the CSS Color 4 strategy.
pub const JND: f64 = 0.02;

/// Chroma bracket width at which the CSS Color 4 search stops.
pub const CSS_EPSILON: f64 = 1e-4;

/// Upper chroma bracket for bisection. Every sRGB and Display P3 color
/// has chroma below 0.37.
pub const MAX_CHROMA: f64 = 0.5;

const GAMUT_NAMES: &[&str] = &["srgb", "p3"];
const STRATEGY_NAMES: &[&str] = &["chroma", "css4", "clip"];

/// An RGB cube to map into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gamut {
    #[default]
    Srgb,
    DisplayP3,
}

impl Gamut {
    pub fn name(self) -> &'static str {
        match self {
            Gamut::Srgb => "srgb",
            Gamut::DisplayP3 => "p3",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        GAMUT_NAMES
    }

    fn oklab_to_linear(self, c: OkLab) -> [f64; 3] {
        match self {
            Gamut::Srgb => {
                let LinearRgb { r, g, b } = oklab_to_linear(c);
                [r, g, b]
            }
            Gamut::DisplayP3 => {
                let LinearP3 { r, g, b } = oklab_to_linear_p3(c);
                [r, g, b]
            }
        }
    }

    fn linear_to_oklab(self, [r, g, b]: [f64; 3]) -> OkLab {
        match self {
            Gamut::Srgb => linear_to_oklab(LinearRgb { r, g, b }),
            Gamut::DisplayP3 => linear_p3_to_oklab(LinearP3 { r, g, b }),
        }
    }

    /// Gamma-encoded channels of `c` in this gamut, unclamped.
    fn encode(self, c: OkLab) -> [f64; 3] {
        self.oklab_to_linear(c).map(to_gamma)
    }

    /// True if every encoded channel of `c` lies in [0, 1] within
    /// [`GAMUT_TOLERANCE`].
    pub fn contains(self, c: OkLch) -> bool {
        within_tolerance(self.encode(oklch_to_oklab(c)))
    }
}

impl fmt::Display for Gamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gamut {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "srgb" => Ok(Gamut::Srgb),
            "p3" | "display-p3" | "displayp3" => Ok(Gamut::DisplayP3),
            _ => Err(ColorError::UnknownGamut(s.to_string())),
        }
    }
}

/// True if the Oklch color is displayable in `gamut` (within tolerance).
pub fn in_gamut(gamut: Gamut, c: OkLch) -> bool {
    gamut.contains(c)
}

/// True if every channel of `c` is in [0, 1] within [`GAMUT_TOLERANCE`].
pub fn is_srgb_in_gamut(c: Srgb) -> bool {
    within_tolerance(c.to_array())
}

fn within_tolerance(channels: [f64; 3]) -> bool {
    channels
        .iter()
        .all(|&v| (-GAMUT_TOLERANCE..=1.0 + GAMUT_TOLERANCE).contains(&v))
}

fn in_unit_cube(channels: [f64; 3]) -> bool {
    channels.iter().all(|&v| (0.0..=1.0).contains(&v))
}

fn clip(channels: [f64; 3]) -> [f64; 3] {
    channels.map(|v| v.clamp(0.0, 1.0))
}

/// Maps an Oklch color into the sRGB gamut. See [`map_to_gamut_in`].
pub fn map_to_gamut(c: OkLch) -> OkLch {
    map_to_gamut_in(Gamut::Srgb, c)
}

/// Returns the color with the largest chroma at the same lightness and hue
/// whose RGB form lies in `gamut`.
///
/// - Zero (or negative) chroma is returned unchanged.
/// - `L <= 0` collapses to black `(0, 0, 0)`, `L >= 1` to white `(1, 0, 0)`.
/// - Colors already in gamut keep their lightness and chroma.
/// - Otherwise chroma is bisected between 0 and `min(C, MAX_CHROMA)` for at
///   most [`MAX_ITERATIONS`] steps. The result is the last chroma known to
///   be in gamut, so it may be slightly conservative but never out of gamut.
///
/// Apart from the zero-chroma case, the returned hue is normalized to
/// [0, 360).
///
/// Output chroma never exceeds input chroma, and mapping twice gives the
/// same result as mapping once.
pub fn map_to_gamut_in(gamut: Gamut, c: OkLch) -> OkLch {
    if c.c <= 0.0 {
        return c;
    }
    if c.l <= 0.0 {
        return OkLch::new(0.0, 0.0, 0.0);
    }
    if c.l >= 1.0 {
        return OkLch::new(1.0, 0.0, 0.0);
    }
    let c = OkLch {
        h: normalize_hue(c.h),
        ..c
    };
    if gamut.contains(c) {
        return c;
    }

    let mut low = 0.0;
    let mut high = c.c.min(MAX_CHROMA);
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS && high - low >= CHROMA_PRECISION {
        let mid = 0.5 * (low + high);
        if gamut.contains(OkLch { c: mid, ..c }) {
            low = mid;
        } else {
            high = mid;
        }
        iterations += 1;
    }

    trace!(%gamut, l = c.l, h = c.h, from = c.c, to = low, iterations, "chroma reduced");
    OkLch { c: low, ..c }
}

/// How to turn an arbitrary Oklab color into device RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamutStrategy {
    /// Chroma bisection at constant lightness and hue ([`map_to_gamut_in`]).
    #[default]
    Chroma,
    /// CSS Color 4 gamut mapping.
    Css4,
    /// Clamp each linear channel to [0, 1].
    Clip,
}

impl GamutStrategy {
    pub fn name(self) -> &'static str {
        match self {
            GamutStrategy::Chroma => "chroma",
            GamutStrategy::Css4 => "css4",
            GamutStrategy::Clip => "clip",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        STRATEGY_NAMES
    }

    /// Maps `c` into sRGB. Every channel of the result is in [0, 1].
    pub fn to_srgb(self, c: OkLab) -> Srgb {
        let [r, g, b] = self.map_encoded(Gamut::Srgb, c);
        Srgb { r, g, b }
    }

    /// Maps `c` into Display P3. Every channel of the result is in [0, 1].
    pub fn to_display_p3(self, c: OkLab) -> DisplayP3 {
        let [r, g, b] = self.map_encoded(Gamut::DisplayP3, c);
        DisplayP3 { r, g, b }
    }

    /// Maps `c` into `gamut` and returns clamped, gamma-encoded channels.
    pub fn map_encoded(self, gamut: Gamut, c: OkLab) -> [f64; 3] {
        let encoded = match self {
            GamutStrategy::Chroma => {
                let mapped = map_to_gamut_in(gamut, oklab_to_oklch(c));
                gamut.encode(oklch_to_oklab(mapped))
            }
            GamutStrategy::Css4 => css4_linear(gamut, c).map(to_gamma),
            GamutStrategy::Clip => clip(gamut.oklab_to_linear(c)).map(to_gamma),
        };
        clip(encoded)
    }
}

impl fmt::Display for GamutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GamutStrategy {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chroma" | "bisect" => Ok(GamutStrategy::Chroma),
            "css4" | "css" => Ok(GamutStrategy::Css4),
            "clip" | "clamp" => Ok(GamutStrategy::Clip),
            _ => Err(ColorError::UnknownStrategy(s.to_string())),
        }
    }
}

/// CSS Color 4 gamut mapping, returning linear channels in `gamut`.
///
/// Bisects chroma in Oklch. A candidate that is out of gamut is still
/// accepted as a lower bound if clipping it moves it less than [`JND`];
/// the search ends when the clipped candidate is within [`CSS_EPSILON`]
/// of the JND or the bracket collapses.
fn css4_linear(gamut: Gamut, origin: OkLab) -> [f64; 3] {
    let origin_lch = oklab_to_oklch(origin);
    if origin_lch.l >= 1.0 {
        return [1.0; 3];
    }
    if origin_lch.l <= 0.0 {
        return [0.0; 3];
    }

    let linear = gamut.oklab_to_linear(origin);
    if in_unit_cube(linear) {
        return linear;
    }

    let mut clipped = clip(linear);
    if delta_e_ok(gamut.linear_to_oklab(clipped), origin) < JND {
        trace!(%gamut, "css4: clipped origin within JND");
        return clipped;
    }

    let mut min = 0.0;
    let mut max = origin_lch.c;
    let mut min_in_gamut = true;
    while max - min > CSS_EPSILON {
        let chroma = 0.5 * (min + max);
        let current = oklch_to_oklab(OkLch {
            c: chroma,
            ..origin_lch
        });
        let current_linear = gamut.oklab_to_linear(current);

        if min_in_gamut && in_unit_cube(current_linear) {
            min = chroma;
            continue;
        }

        clipped = clip(current_linear);
        let difference = delta_e_ok(gamut.linear_to_oklab(clipped), current);
        if difference < JND {
            if JND - difference < CSS_EPSILON {
                trace!(%gamut, chroma, "css4: converged on JND");
                break;
            }
            min_in_gamut = false;
            min = chroma;
        } else {
            max = chroma;
        }
    }
    clipped
}

/// Converts sRGB to Display P3 through Oklab. sRGB lies inside P3, so the
/// strategy only matters for inputs outside [0, 1].
pub fn srgb_to_display_p3(c: Srgb, strategy: GamutStrategy) -> DisplayP3 {
    strategy.to_display_p3(srgb_to_oklab(c))
}

/// Converts Display P3 to sRGB through Oklab, mapping wide-gamut colors
/// with `strategy`.
pub fn display_p3_to_srgb(c: DisplayP3, strategy: GamutStrategy) -> Srgb {
    strategy.to_srgb(p3_to_oklab(c))
}
