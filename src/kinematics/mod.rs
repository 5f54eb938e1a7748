//! Move kinematics: how a symbolic move becomes rigid-body motion.
//!
//! Moves are built from `(id, adc, delta, kind, shape)` descriptors and turned
//! into time-partitioned [`Step`]s once, at construction. [`ModuleState`]
//! applies them: [`ModuleState::animate_move`] for in-between frames and
//! [`ModuleState::finish_move`] to commit.

pub mod anchor;
mod module;
pub mod moves;
mod registry;
pub mod shape;
pub mod step;

pub use module::{LatticeState, ModuleColor, ModuleState};
pub use moves::{CatomFace, Move, MoveAnomaly, MoveKind, MovePlan};
pub use registry::ModuleRegistry;
pub use shape::{ShapeConstants, ShapeTable, ShapeType};
pub use step::{Step, StepMotion};

/// Identifier of a module within a simulation.
pub type ModuleId = u32;
