// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Move kinematics and playback engine for modular robot metamodules.
//!
//! Metamodules are ensembles of unit shapes (cubes, rhombic dodecahedra,
//! catoms) sitting on a lattice. A reconfiguration is a sequence of symbolic
//! moves; this crate turns each move into the rigid-body transforms that
//! animate a module from its old lattice cell to its new one, and plays those
//! moves forward or backward one batch at a time.
//!
//! # Key entry points
//!
//! - [`kinematics::Move`] - a single module's reconfiguration step and its
//!   animation segments
//! - [`kinematics::anchor`] - anchor-direction code encoding/decoding
//! - [`sequence::MoveSetSequence`] - the pending queue and undo stack of move
//!   batches
//! - [`animation::AnimationDriver`] - the frame-driven playback state machine
//! - [`scenario::Scenario`] - `.scen` file parsing
//! - [`options::Options`] - runtime configuration (playback, shape constants)
//!
//! # Architecture
//!
//! Everything runs on the caller's frame tick. The driver owns the module
//! registry and the move sequence; on every tick it asks each module to
//! [`animate_move`](kinematics::ModuleState::animate_move) (visual only) and,
//! once a batch completes, to
//! [`finish_move`](kinematics::ModuleState::finish_move), which is the only
//! call that commits lattice position and orientation. Renderers read
//! [`world_transform`](kinematics::ModuleState::world_transform) and never
//! interpret moves themselves.

pub mod animation;
pub mod error;
pub mod kinematics;
pub mod options;
pub mod planner;
pub mod scenario;
pub mod sequence;
pub mod util;

pub use error::MetavisError;
