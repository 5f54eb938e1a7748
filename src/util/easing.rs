//! Easing functions for move animation progress.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]` with fixed endpoints, so a move's
//! steps still start and finish exactly on their lattice cells.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve applied to raw animation progress before it is mapped onto a
/// move's steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Sinusoidal ease-in-out: `-(cos(πt) - 1) / 2`.
    #[default]
    SineInOut,
    /// Quadratic ease-in-out.
    QuadraticInOut,
    /// Cubic ease-in-out.
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
