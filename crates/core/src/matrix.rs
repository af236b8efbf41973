//! Fixed 3×3 matrices of the Oklab pipeline.
//!
//! Coefficients are written row-major, exactly as published, and turned
//! into column-major [`DMat3`] values at compile time. Inverses are
//! tabulated rather than computed so that no inversion error creeps in.

#![allow(clippy::excessive_precision)]

use glam::{DMat3, DVec3};

/// Builds a [`DMat3`] from rows.
const fn from_rows(m: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(m[0][0], m[1][0], m[2][0]),
        DVec3::new(m[0][1], m[1][1], m[2][1]),
        DVec3::new(m[0][2], m[1][2], m[2][2]),
    )
}

/// Linear sRGB to LMS.
pub const LINEAR_SRGB_TO_LMS: DMat3 = from_rows([
    [0.4122214694707629, 0.5363325372617349, 0.0514459932675022],
    [0.2119034958178251, 0.6806995506452345, 0.1073969535369406],
    [0.0883024591900564, 0.2817188391361215, 0.6299787016738222],
]);

/// LMS to linear sRGB.
pub const LMS_TO_LINEAR_SRGB: DMat3 = from_rows([
    [4.0767416360759601, -3.3077115392580625, 0.2309699031821046],
    [-1.2684379732850317, 2.6097573492876882, -0.3413193760026572],
    [-0.0041960761386754, -0.7034186179359361, 1.7076146940746113],
]);

/// Linear Display P3 to LMS.
pub const LINEAR_P3_TO_LMS: DMat3 = from_rows([
    [0.4813798527499544, 0.4621183710113182, 0.0565017762387275],
    [0.2288319418112447, 0.6532168193835679, 0.1179512388051878],
    [0.0839457523229932, 0.2241652709775665, 0.6918889766994405],
]);

/// LMS to linear Display P3.
pub const LMS_TO_LINEAR_P3: DMat3 = from_rows([
    [3.1277689713618742, -2.2571357625916386, 0.1293667912297653],
    [-1.0910090184377974, 2.4133317103069212, -0.3223226918691247],
    [-0.0260108019385704, -0.5080413317041669, 1.5340521336427371],
]);

/// Cube-rooted LMS (LMS') to Oklab.
pub const LMS_PRIME_TO_OKLAB: DMat3 = from_rows([
    [0.2104542683093140, 0.7936177747023054, -0.0040720430116193],
    [1.9779985324311684, -2.4285922420485799, 0.4505937096174110],
    [0.0259040424655478, 0.7827717124575296, -0.8086757549230774],
]);

/// Oklab to cube-rooted LMS (LMS').
pub const OKLAB_TO_LMS_PRIME: DMat3 = from_rows([
    [1.0000000000000000, 0.3963377773761749, 0.2158037573099136],
    [1.0000000000000000, -0.1055613458156586, -0.0638541728258133],
    [1.0000000000000000, -0.0894841775298119, -1.2914855480194092],
]);

/// Multiplies `matrix` by the column vector `v`.
#[inline]
pub fn apply(matrix: &DMat3, v: [f64; 3]) -> [f64; 3] {
    matrix.mul_vec3(DVec3::from_array(v)).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inverse_pair(forward: &DMat3, inverse: &DMat3, name: &str) {
        let product = *inverse * *forward;
        assert!(
            product.abs_diff_eq(DMat3::IDENTITY, 1e-9),
            "{name}: inverse * forward is not identity: {product:?}"
        );
        let product = *forward * *inverse;
        assert!(
            product.abs_diff_eq(DMat3::IDENTITY, 1e-9),
            "{name}: forward * inverse is not identity: {product:?}"
        );
    }

    #[test]
    fn from_rows_keeps_row_major_layout() {
        let m = from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(apply(&m, [1.0, 0.0, 0.0]), [1.0, 4.0, 7.0]);
        assert_eq!(apply(&m, [0.0, 0.0, 1.0]), [3.0, 6.0, 9.0]);
        assert_eq!(apply(&m, [1.0, 1.0, 1.0]), [6.0, 15.0, 24.0]);
    }

    #[test]
    fn srgb_lms_matrices_are_inverses() {
        assert_inverse_pair(&LINEAR_SRGB_TO_LMS, &LMS_TO_LINEAR_SRGB, "srgb/lms");
    }

    #[test]
    fn p3_lms_matrices_are_inverses() {
        assert_inverse_pair(&LINEAR_P3_TO_LMS, &LMS_TO_LINEAR_P3, "p3/lms");
    }

    #[test]
    fn oklab_matrices_are_inverses() {
        assert_inverse_pair(&LMS_PRIME_TO_OKLAB, &OKLAB_TO_LMS_PRIME, "lms'/oklab");
    }

    #[test]
    fn rgb_to_lms_rows_sum_to_one() {
        // White (1, 1, 1) must land on LMS (1, 1, 1) for both gamuts.
        for m in [&LINEAR_SRGB_TO_LMS, &LINEAR_P3_TO_LMS] {
            let lms = apply(m, [1.0, 1.0, 1.0]);
            for v in lms {
                assert!((v - 1.0).abs() < 1e-9, "row sum {v}");
            }
        }
    }

    #[test]
    fn white_lms_prime_maps_to_unit_lightness_and_no_chroma() {
        let lab = apply(&LMS_PRIME_TO_OKLAB, [1.0, 1.0, 1.0]);
        assert!((lab[0] - 1.0).abs() < 1e-9);
        assert!(lab[1].abs() < 1e-9);
        assert!(lab[2].abs() < 1e-9);
    }
}
