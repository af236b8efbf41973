//! Multi-stop color gradients, sampled by interpolation.
//!
//! Stops are stored in Oklch. Sampling interpolates either along straight
//! lines in Oklab or in Oklch with shortest-arc hue interpolation, and the
//! sampled color is gamut-mapped into sRGB by chroma reduction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adjust::lerp_oklab;
use crate::color::{OkLch, Srgb};
use crate::error::ColorError;
use crate::gamut::GamutStrategy;
use crate::oklab::{normalize_hue, oklch_to_oklab, srgb_to_oklch};

/// Space in which neighbouring palette stops are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Straight lines in Oklab. Passes through grays between complements.
    #[default]
    Oklab,
    /// Lightness, chroma and hue blended separately; hue takes the short way round.
    Oklch,
}

impl Interpolation {
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Oklab => "oklab",
            Interpolation::Oklch => "oklch",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oklab" => Ok(Interpolation::Oklab),
            "oklch" => Ok(Interpolation::Oklch),
            _ => Err(ColorError::UnknownInterpolation(s.to_string())),
        }
    }
}

/// A palette of colors stored in Oklch, sampled by interpolation.
///
/// Colors are evenly spaced along the `t` parameter: `sample(0.0)` returns
/// the first color, `sample(1.0)` returns the last.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<OkLch>,
    interpolation: Interpolation,
}

impl Palette {
    /// Creates a new palette from a vector of Oklch colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<OkLch>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self {
            colors,
            interpolation: Interpolation::default(),
        })
    }

    /// Creates a palette by parsing hex color strings and converting to Oklch.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex(hexes: &[&str]) -> Result<Self, ColorError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h).map(srgb_to_oklch))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Creates a two-stop palette between sRGB colors.
    pub fn between(start: Srgb, end: Srgb) -> Self {
        Self {
            colors: vec![srgb_to_oklch(start), srgb_to_oklch(end)],
            interpolation: Interpolation::default(),
        }
    }

    /// Creates a gradient palette with `count` colors evenly spaced between
    /// `start` and `end` in Oklch, using shortest-arc hue interpolation.
    pub fn gradient(start: OkLch, end: OkLch, count: usize) -> Self {
        if count <= 1 {
            return Self {
                colors: vec![start],
                interpolation: Interpolation::Oklch,
            };
        }
        let colors = (0..count)
            .map(|i| lerp_oklch(start, end, i as f64 / (count - 1) as f64))
            .collect();
        Self {
            colors,
            interpolation: Interpolation::Oklch,
        }
    }

    /// Returns the palette with a different interpolation space.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn colors(&self) -> &[OkLch] {
        &self.colors
    }

    /// Returns the number of color stops in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Samples the palette at parameter `t` in [0, 1].
    ///
    /// For a single-color palette, returns that color for any `t`.
    /// The `t` parameter is clamped to [0, 1]; NaN samples the first stop.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();

        if n == 1 {
            return to_display(self.colors[0]);
        }

        // Map t to segment index and local interpolation factor
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;

        let c0 = self.colors[idx];
        let c1 = self.colors[idx + 1];

        match self.interpolation {
            Interpolation::Oklch => to_display(lerp_oklch(c0, c1, frac)),
            Interpolation::Oklab => GamutStrategy::Chroma.to_srgb(lerp_oklab(
                oklch_to_oklab(c0),
                oklch_to_oklab(c1),
                frac,
            )),
        }
    }

    /// Returns `count` evenly spaced samples from the first to the last stop.
    pub fn steps(&self, count: usize) -> Vec<Srgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

fn to_display(c: OkLch) -> Srgb {
    GamutStrategy::Chroma.to_srgb(oklch_to_oklab(c))
}

fn lerp_oklch(c0: OkLch, c1: OkLch, t: f64) -> OkLch {
    OkLch {
        l: c0.l + t * (c1.l - c0.l),
        c: c0.c + t * (c1.c - c0.c),
        h: interpolate_hue(c0.h, c1.h, t),
    }
}

/// Interpolates hue using shortest-arc logic, handling wraparound at 360.
fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    let delta = match h1 - h0 {
        d if d > 180.0 => d - 360.0,
        d if d < -180.0 => d + 360.0,
        d => d,
    };
    normalize_hue(h0 + t * delta)
}
