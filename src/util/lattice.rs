//! Lattice vector helpers.
//!
//! Lattice displacements are integer-valued but travel through `DVec3` so they
//! can be mixed freely with rotations. Anything that needs the *direction* of
//! such a vector goes through [`sign_vector`] first.

use glam::{DQuat, DVec3};

/// Tolerance under which a component is treated as zero.
pub const LATTICE_EPSILON: f64 = 1e-6;

/// Snap each component to -1, 0, or +1.
///
/// Components are truncated to a multiple of [`LATTICE_EPSILON`] before the
/// sign is taken, so anything smaller than the tolerance (and NaN) becomes 0.
#[must_use]
pub fn sign_vector(v: DVec3) -> DVec3 {
    DVec3::new(sign_component(v.x), sign_component(v.y), sign_component(v.z))
}

fn sign_component(c: f64) -> f64 {
    let rounded = (c / LATTICE_EPSILON).trunc() * LATTICE_EPSILON;
    if rounded.is_nan() || rounded == 0.0 {
        0.0
    } else {
        rounded.signum()
    }
}

/// Sum of absolute components (lattice step count).
#[inline]
#[must_use]
pub fn l1_norm(v: DVec3) -> f64 {
    v.abs().element_sum()
}

/// Scale `v` to the given length; the zero vector stays zero.
#[inline]
#[must_use]
pub fn with_length(v: DVec3, length: f64) -> DVec3 {
    v.normalize_or_zero() * length
}

/// Rotate `v` about `axis` by `angle` radians.
///
/// A degenerate (zero) axis leaves `v` untouched.
#[must_use]
pub fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return v;
    }
    DQuat::from_axis_angle(axis, angle) * v
}

/// Component-wise equality within [`LATTICE_EPSILON`].
#[inline]
#[must_use]
pub fn approx_eq(a: DVec3, b: DVec3) -> bool {
    a.abs_diff_eq(b, LATTICE_EPSILON)
}

/// Round a lattice vector to the nearest integer cell.
#[must_use]
pub fn to_cell(v: DVec3) -> [i32; 3] {
    [v.x.round() as i32, v.y.round() as i32, v.z.round() as i32]
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_sign_vector_snaps_components() {
        let v = DVec3::new(0.707, -2.0, 0.0);
        assert_eq!(sign_vector(v), DVec3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_sign_vector_ignores_tiny_components() {
        let v = DVec3::new(5e-7, -5e-7, 1e-3);
        assert_eq!(sign_vector(v), DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sign_vector_maps_nan_to_zero() {
        let v = DVec3::new(f64::NAN, 1.0, -1.0);
        assert_eq!(sign_vector(v), DVec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn test_l1_norm() {
        assert_eq!(l1_norm(DVec3::new(1.0, -1.0, 0.0)), 2.0);
        assert_eq!(l1_norm(DVec3::ZERO), 0.0);
    }

    #[test]
    fn test_with_length_keeps_zero() {
        assert_eq!(with_length(DVec3::ZERO, 3.0), DVec3::ZERO);
        let v = with_length(DVec3::new(0.0, 2.0, 0.0), 0.5);
        assert!(approx_eq(v, DVec3::new(0.0, 0.5, 0.0)));
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let v = rotate_about(DVec3::X, DVec3::Z, FRAC_PI_2);
        assert!(approx_eq(v, DVec3::Y));
    }

    #[test]
    fn test_rotate_about_zero_axis_is_identity() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_about(v, DVec3::ZERO, 1.0), v);
    }

    #[test]
    fn test_to_cell_rounds() {
        assert_eq!(to_cell(DVec3::new(0.9999999, -1.0000001, 2.4)), [1, -1, 2]);
    }
}
