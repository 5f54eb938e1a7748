//! Playback state machine for move sequences.

mod driver;

pub use driver::{AnimationDriver, Direction, DriverState};
