//! Perceptual color difference.

use crate::color::{OkLab, Srgb};
use crate::oklab::srgb_to_oklab;

/// ΔEok: Euclidean distance between two colors in Oklab.
///
/// The a/b axes are weighted 1:1 with lightness, matching the reference
/// implementation used by CSS Color 4.
pub fn delta_e_ok(c1: OkLab, c2: OkLab) -> f64 {
    let dl = c1.l - c2.l;
    let da = c1.a - c2.a;
    let db = c1.b - c2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// ΔEok between two sRGB colors.
pub fn delta_e_srgb(c1: Srgb, c2: Srgb) -> f64 {
    delta_e_ok(srgb_to_oklab(c1), srgb_to_oklab(c2))
}

impl OkLab {
    /// Shorthand for [`delta_e_ok`].
    pub fn distance(self, other: OkLab) -> f64 {
        delta_e_ok(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_colors_have_zero_distance() {
        let c = OkLab::new(0.5, 0.1, -0.2);
        assert_eq!(delta_e_ok(c, c), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = OkLab::new(0.0, 0.0, 0.0);
        let b = OkLab::new(0.3, 0.4, 0.0);
        assert!((delta_e_ok(a, b) - 0.5).abs() < 1e-12);
        assert!((a.distance(b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn black_to_white_is_one() {
        let d = delta_e_srgb(Srgb::BLACK, Srgb::WHITE);
        assert!((d - 1.0).abs() < 1e-6, "got {d}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn lab() -> impl Strategy<Value = OkLab> {
            (0.0_f64..=1.0, -0.4_f64..=0.4, -0.4_f64..=0.4).prop_map(|(l, a, b)| OkLab { l, a, b })
        }

        proptest! {
            #[test]
            fn distance_is_symmetric_and_nonnegative(x in lab(), y in lab()) {
                let d = delta_e_ok(x, y);
                prop_assert!(d >= 0.0);
                prop_assert_eq!(d, delta_e_ok(y, x));
            }

            #[test]
            fn distance_obeys_triangle_inequality(x in lab(), y in lab(), z in lab()) {
                prop_assert!(delta_e_ok(x, z) <= delta_e_ok(x, y) + delta_e_ok(y, z) + 1e-12);
            }
        }
    }
}
