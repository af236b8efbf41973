//! Color value types.
//!
//! Every type is a small `Copy` struct of `f64` components. None of them
//! enforce a range: device colors may legitimately fall outside [0, 1]
//! on their way through the pipeline, and it is the gamut mapper's job to
//! bring them back.

use std::str::FromStr;

use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gamma-encoded sRGB color, nominally in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear-light sRGB (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Gamma-encoded Display P3 color, nominally in [0, 1].
///
/// Display P3 shares the sRGB transfer curve and white point but has
/// wider primaries. Serializes as `"#rrggbb"` like [`Srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayP3 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear-light Display P3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearP3 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Cone-response-like intermediate space between linear RGB and Oklab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

/// Oklab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Oklch, the cylindrical form of Oklab. `h` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `ColorError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, ColorError> {
        let [r, g, b] = parse_hex(hex)?;
        Ok(Srgb { r, g, b })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are clamped to [0, 1] and quantized to 8 bits with rounding.
    pub fn to_hex(self) -> String {
        format_hex(self.to_rgb8())
    }

    /// Builds a color from 8-bit channel values.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|v| v as f64 / 255.0);
        Self { r, g, b }
    }

    /// Quantizes to 8-bit channels, clamping out-of-range components.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(quantize)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl DisplayP3 {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` (or `"rrggbb"`) as Display P3 channel values.
    pub fn from_hex(hex: &str) -> Result<DisplayP3, ColorError> {
        let [r, g, b] = parse_hex(hex)?;
        Ok(DisplayP3 { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format_hex(self.to_rgb8())
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|v| v as f64 / 255.0);
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(quantize)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl OkLab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl OkLch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

/// Accepts either a hex string or three comma/space separated components.
impl FromStr for Srgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [r, g, b] = parse_color_text(s)?;
        Ok(Srgb { r, g, b })
    }
}

impl FromStr for DisplayP3 {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [r, g, b] = parse_color_text(s)?;
        Ok(DisplayP3 { r, g, b })
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for DisplayP3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DisplayP3 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DisplayP3::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Parses three numeric components separated by commas and/or whitespace,
/// e.g. `"0.5, 0.25, 1"` or `"0.5 0.25 1"`.
///
/// Components must be finite but are not range-checked.
pub fn parse_components(text: &str) -> Result<[f64; 3], ColorError> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(ColorError::InvalidColor(format!(
            "expected 3 components, got {}",
            parts.len()
        )));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        let v: f64 = part
            .parse()
            .map_err(|e| ColorError::InvalidColor(format!("invalid component '{part}': {e}")))?;
        if !v.is_finite() {
            return Err(ColorError::InvalidColor(format!(
                "component '{part}' is not finite"
            )));
        }
        *slot = v;
    }
    Ok(out)
}

fn parse_color_text(s: &str) -> Result<[f64; 3], ColorError> {
    let s = s.trim();
    if s.starts_with('#') || (s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())) {
        parse_hex(s)
    } else {
        parse_components(s)
    }
}

fn parse_hex(hex: &str) -> Result<[f64; 3], ColorError> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColor(format!(
            "expected 6 hex digits, got '{hex}'"
        )));
    }
    let r = u8::from_str_radix(&hex[0..2], 16)
        .map_err(|e| ColorError::InvalidColor(format!("invalid red component: {e}")))?;
    let g = u8::from_str_radix(&hex[2..4], 16)
        .map_err(|e| ColorError::InvalidColor(format!("invalid green component: {e}")))?;
    let b = u8::from_str_radix(&hex[4..6], 16)
        .map_err(|e| ColorError::InvalidColor(format!("invalid blue component: {e}")))?;
    Ok([r, g, b].map(|v| v as f64 / 255.0))
}

fn format_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- Hex parsing --

    #[test]
    fn hex_accepts_optional_hash_and_either_case() {
        assert_eq!(Srgb::from_hex("#ff0000").unwrap(), Srgb::new(1.0, 0.0, 0.0));
        assert_eq!(Srgb::from_hex("00FF00").unwrap(), Srgb::new(0.0, 1.0, 0.0));
        assert_eq!(
            DisplayP3::from_hex("#0000Ff").unwrap(),
            DisplayP3::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn hex_rejects_malformed_input() {
        for bad in ["", "#", "#abc", "#12345g", "#+f0000", "#a1b2c3d4", "#ffé0f", "  #"] {
            assert!(
                matches!(Srgb::from_hex(bad), Err(ColorError::InvalidColor(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn hex_channels_are_byte_over_255() {
        let c = Srgb::from_hex("#804020").unwrap();
        assert!(approx_eq(c.r, 128.0 / 255.0));
        assert!(approx_eq(c.g, 64.0 / 255.0));
        assert!(approx_eq(c.b, 32.0 / 255.0));
    }

    // -- Hex / 8-bit output --

    #[test]
    fn to_hex_known_colors() {
        assert_eq!(Srgb::new(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        assert_eq!(Srgb::WHITE.to_hex(), "#ffffff");
        assert_eq!(Srgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let color = Srgb::new(1.5, -0.1, 0.5);
        assert_eq!(color.to_hex(), "#ff0080");
    }

    #[test]
    fn hex_strings_survive_a_round_trip() {
        for hex in ["#c0ffee", "#000001", "#7f7f80"] {
            assert_eq!(Srgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn rgb8_round_trip_is_exact() {
        let bytes = [12, 200, 255];
        assert_eq!(Srgb::from_rgb8(bytes).to_rgb8(), bytes);
        assert_eq!(DisplayP3::from_rgb8(bytes).to_rgb8(), bytes);
    }

    #[test]
    fn to_rgb8_rounds_to_nearest() {
        let c = Srgb::new(0.5, 0.499, 1.0 / 255.0 * 0.6);
        assert_eq!(c.to_rgb8(), [128, 127, 1]);
    }

    // -- Text parsing --

    #[test]
    fn parse_components_accepts_commas_and_spaces() {
        assert_eq!(parse_components("0.1, 0.2, 0.3").unwrap(), [0.1, 0.2, 0.3]);
        assert_eq!(parse_components("0.1 0.2 0.3").unwrap(), [0.1, 0.2, 0.3]);
        assert_eq!(parse_components(" 1,0 ,  0 ").unwrap(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn parse_components_rejects_wrong_count() {
        assert!(parse_components("0.1, 0.2").is_err());
        assert!(parse_components("0.1 0.2 0.3 0.4").is_err());
        assert!(parse_components("").is_err());
    }

    #[test]
    fn parse_components_rejects_non_numbers_and_non_finite() {
        assert!(parse_components("a b c").is_err());
        assert!(parse_components("0.1 NaN 0.3").is_err());
        assert!(parse_components("inf 0 0").is_err());
    }

    #[test]
    fn from_str_dispatches_between_hex_and_components() {
        let hex: Srgb = "#ff8000".parse().unwrap();
        assert_eq!(hex.to_hex(), "#ff8000");
        let bare: Srgb = "ff8000".parse().unwrap();
        assert_eq!(bare, hex);
        let comps: Srgb = "1, 0.5, 0".parse().unwrap();
        assert_eq!(comps, Srgb::new(1.0, 0.5, 0.0));
        let p3: DisplayP3 = "0 1 0".parse().unwrap();
        assert_eq!(p3, DisplayP3::new(0.0, 1.0, 0.0));
    }

    // -- Serde --

    #[test]
    fn srgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Srgb::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn srgb_deserializes_from_hex_string() {
        let green: Srgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(green, Srgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn srgb_deserialize_rejects_invalid_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    #[test]
    fn display_p3_serde_round_trip_is_quantized() {
        let p3 = DisplayP3::new(0.2, 0.4, 0.6);
        let json = serde_json::to_string(&p3).unwrap();
        assert_eq!(json, "\"#336699\"");
        let back: DisplayP3 = serde_json::from_str(&json).unwrap();
        assert!((back.r - p3.r).abs() < 0.5 / 255.0 + 1e-10);
    }

    #[test]
    fn oklch_serializes_as_struct() {
        let lch = OkLch::new(0.5, 0.1, 30.0);
        let value = serde_json::to_value(lch).unwrap();
        assert_eq!(value["l"], 0.5);
        assert_eq!(value["c"], 0.1);
        assert_eq!(value["h"], 30.0);
    }

    #[test]
    fn hex_round_trip_is_idempotent_after_first_quantization() {
        let original = Srgb::new(0.123456, 0.654321, 0.999999);
        let once = Srgb::from_hex(&original.to_hex()).unwrap();
        let twice = Srgb::from_hex(&once.to_hex()).unwrap();
        assert_eq!(once.r.to_bits(), twice.r.to_bits());
        assert_eq!(once.g.to_bits(), twice.g.to_bits());
        assert_eq!(once.b.to_bits(), twice.b.to_bits());
    }

    #[test]
    fn color_types_are_send_sync_copy() {
        fn assert_traits<T: Send + Sync + Copy>() {}
        assert_traits::<Srgb>();
        assert_traits::<LinearRgb>();
        assert_traits::<DisplayP3>();
        assert_traits::<LinearP3>();
        assert_traits::<Lms>();
        assert_traits::<OkLab>();
        assert_traits::<OkLch>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn srgb_component() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn srgb_hex_round_trip_within_quantization(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let original = Srgb { r, g, b };
                let round_tripped = Srgb::from_hex(&original.to_hex()).unwrap();
                // Hex is 8-bit: max error is 0.5/255
                let max_err = 0.5 / 255.0 + 1e-10;
                prop_assert!((round_tripped.r - original.r).abs() < max_err);
                prop_assert!((round_tripped.g - original.g).abs() < max_err);
                prop_assert!((round_tripped.b - original.b).abs() < max_err);
            }
        }
    }
}
