//! Shared utilities for the kinematics engine.
//!
//! Easing curves and the lattice vector helpers every move computation goes
//! through.

pub mod easing;
pub mod lattice;
