//! Animation segments of a move.

use glam::{DMat4, DVec3};

/// How a step moves the module over its slice of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMotion {
    /// Rotate about a pivot point: translate by `pre_trans` so the pivot sits
    /// at the origin, rotate, translate back by `post_trans`.
    Pivot {
        /// Unit rotation axis (zero for a degenerate pivot).
        rot_axis: DVec3,
        /// Total angle swept by this step, in radians.
        max_angle: f64,
        /// Offset applied before rotating.
        pre_trans: DVec3,
        /// Offset applied after rotating.
        post_trans: DVec3,
    },
    /// Pure translation by the step's `delta_pos`.
    Slide,
}

/// One segment of a move's animation.
///
/// Steps of a move partition normalized time `[0, 1]` in order; each one
/// ends at its `max_pct`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Lattice displacement attributed to this segment.
    pub delta_pos: DVec3,
    /// Normalized time at which the segment completes.
    pub max_pct: f64,
    /// Rotation or translation performed by the segment.
    pub motion: StepMotion,
}

impl Step {
    /// Translation-only step.
    #[must_use]
    pub fn slide(delta_pos: DVec3, max_pct: f64) -> Self {
        Self {
            delta_pos,
            max_pct,
            motion: StepMotion::Slide,
        }
    }

    /// Pivot step rotating about the point `post_trans` away from the module
    /// origin.
    #[must_use]
    pub fn pivot(
        delta_pos: DVec3,
        rot_axis: DVec3,
        max_angle: f64,
        max_pct: f64,
        post_trans: DVec3,
    ) -> Self {
        Self {
            delta_pos,
            max_pct,
            motion: StepMotion::Pivot {
                rot_axis,
                max_angle,
                pre_trans: -post_trans,
                post_trans,
            },
        }
    }

    /// Rotation axis; zero for slides.
    #[must_use]
    pub fn rot_axis(&self) -> DVec3 {
        match self.motion {
            StepMotion::Pivot { rot_axis, .. } => rot_axis,
            StepMotion::Slide => DVec3::ZERO,
        }
    }

    /// Total rotation angle; zero for slides.
    #[must_use]
    pub fn max_angle(&self) -> f64 {
        match self.motion {
            StepMotion::Pivot { max_angle, .. } => max_angle,
            StepMotion::Slide => 0.0,
        }
    }

    /// Transform of this step at local progress `step_pct` in `[0, 1]`.
    #[must_use]
    pub fn transform(&self, step_pct: f64) -> DMat4 {
        match self.motion {
            StepMotion::Pivot {
                rot_axis,
                max_angle,
                pre_trans,
                post_trans,
            } => {
                DMat4::from_translation(post_trans)
                    * rotation(rot_axis, max_angle * step_pct)
                    * DMat4::from_translation(pre_trans)
            }
            StepMotion::Slide => DMat4::from_translation(self.delta_pos * step_pct),
        }
    }

    /// The rotation this step commits once finished, if it rotates at all.
    #[must_use]
    pub fn full_rotation(&self) -> Option<DMat4> {
        match self.motion {
            StepMotion::Pivot {
                rot_axis,
                max_angle,
                ..
            } => Some(rotation(rot_axis, max_angle)),
            StepMotion::Slide => None,
        }
    }
}

/// Rotation matrix about `axis`; a zero axis yields the identity.
#[must_use]
pub fn rotation(axis: DVec3, angle: f64) -> DMat4 {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        DMat4::IDENTITY
    } else {
        DMat4::from_axis_angle(axis, angle)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::util::lattice::approx_eq;

    #[test]
    fn test_slide_transform_scales_delta() {
        let step = Step::slide(DVec3::new(2.0, 0.0, 0.0), 1.0);
        let m = step.transform(0.25);
        assert!(approx_eq(m.transform_point3(DVec3::ZERO), DVec3::new(0.5, 0.0, 0.0)));
        assert!(step.full_rotation().is_none());
        assert_eq!(step.max_angle(), 0.0);
    }

    #[test]
    fn test_pivot_at_zero_is_identity() {
        let step = Step::pivot(DVec3::X, DVec3::Z, FRAC_PI_2, 1.0, DVec3::X * 0.5);
        let m = step.transform(0.0);
        assert!(m.abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_pivot_rotates_about_pivot_point() {
        // Pivot point half a unit along +x; a quarter turn about +z carries
        // the origin to (0.5, -0.5, 0).
        let step = Step::pivot(DVec3::X, DVec3::Z, FRAC_PI_2, 1.0, DVec3::new(0.5, 0.0, 0.0));
        let m = step.transform(1.0);
        assert!(approx_eq(
            m.transform_point3(DVec3::ZERO),
            DVec3::new(0.5, -0.5, 0.0)
        ));
        // The pivot point itself stays put.
        assert!(approx_eq(
            m.transform_point3(DVec3::new(0.5, 0.0, 0.0)),
            DVec3::new(0.5, 0.0, 0.0)
        ));
    }

    #[test]
    fn test_rotation_with_zero_axis_is_identity() {
        assert_eq!(rotation(DVec3::ZERO, 1.0), DMat4::IDENTITY);
    }

    #[test]
    fn test_pivot_pre_trans_negates_post_trans() {
        let step = Step::pivot(DVec3::X, DVec3::Y, 1.0, 1.0, DVec3::new(0.1, 0.2, 0.3));
        match step.motion {
            StepMotion::Pivot {
                pre_trans,
                post_trans,
                ..
            } => assert_eq!(pre_trans, -post_trans),
            StepMotion::Slide => unreachable!(),
        }
    }
}
