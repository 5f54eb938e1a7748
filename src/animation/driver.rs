//! Frame-driven playback of a move sequence.

use std::sync::Arc;
use std::time::Duration;

use crate::kinematics::{ModuleRegistry, Move};
use crate::options::PlaybackOptions;
use crate::sequence::{MoveSet, MoveSetSequence};

/// Playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Pop batches off the pending queue.
    #[default]
    Forward,
    /// Undo played batches.
    Backward,
}

/// Whether a batch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No active batch; ready to start one.
    Idle,
    /// A batch is animating.
    Animating,
}

/// Owns the simulation (modules and move sequence) and advances it one
/// frame at a time.
///
/// At most one [`MoveSet`] is ever in flight. Progress accumulates as
/// `elapsed * speed²`; once it passes 1 every move in the batch is committed
/// and, depending on auto-animate and checkpoints, the next batch is
/// requested.
#[derive(Debug)]
pub struct AnimationDriver {
    modules: ModuleRegistry,
    sequence: MoveSetSequence,
    playback: PlaybackOptions,
    direction: Direction,
    /// Set by step requests and by auto-play; cleared when nothing is left.
    next_requested: bool,
    ready_for_new: bool,
    progress: f64,
    active: Option<Arc<MoveSet>>,
}

impl AnimationDriver {
    /// Driver over `modules` that will play `sequence`.
    #[must_use]
    pub fn new(
        modules: ModuleRegistry,
        sequence: MoveSetSequence,
        playback: PlaybackOptions,
    ) -> Self {
        Self {
            modules,
            sequence,
            playback,
            direction: Direction::Forward,
            next_requested: false,
            ready_for_new: true,
            progress: 0.0,
            active: None,
        }
    }

    /// Advance playback by one frame of length `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.progress > 1.0 {
            self.complete_active();
        }

        if self.ready_for_new && self.next_requested {
            self.start_next();
        }

        if let Some(active) = &self.active {
            for mv in &active.moves {
                if let Some(module) = self.modules.get_mut(mv.id()) {
                    module.animate_move(mv, self.progress, self.playback.easing);
                }
            }
            self.progress += dt.as_secs_f64() * self.playback.effective_speed();
        }
    }

    fn complete_active(&mut self) {
        let finished = self.active.take();
        if let Some(set) = &finished {
            for mv in &set.moves {
                if let Some(module) = self.modules.get_mut(mv.id()) {
                    module.finish_move(mv);
                }
            }
            self.modules.refresh_cells();
        }
        self.ready_for_new = true;
        self.progress = 0.0;

        self.next_requested = if self.playback.auto_animate {
            true
        } else {
            // Pause at checkpoints: ahead of one going forward, after one
            // going backward.
            let upcoming = match self.direction {
                Direction::Forward => self.sequence.peek_next(),
                Direction::Backward => finished.as_ref(),
            };
            upcoming.is_some_and(|set| !set.checkpoint)
        };
        log::debug!(
            "move set finished ({}); next requested: {}",
            self.sequence,
            self.next_requested
        );
    }

    fn start_next(&mut self) {
        let next = match self.direction {
            Direction::Forward => self.sequence.pop(),
            Direction::Backward => self.sequence.undo(),
        };
        match next {
            Some(set) => {
                for mv in set.moves.iter().filter(|mv| self.modules.get(mv.id()).is_none()) {
                    log::warn!("move refers to unknown module {}; skipping it", mv.id());
                }
                self.ready_for_new = false;
                self.active = Some(set);
            }
            None => self.next_requested = false,
        }
    }

    /// Drop the active batch without committing it.
    ///
    /// Modules keep whatever pose they were last shown in until their next
    /// move; lattice state is unaffected.
    pub fn cancel(&mut self) {
        self.active = None;
        self.progress = 0.0;
        self.ready_for_new = true;
        self.next_requested = false;
    }

    /// Request the next batch forward.
    pub fn step_forward(&mut self) {
        self.request(Direction::Forward);
    }

    /// Request undoing the last played batch.
    pub fn step_backward(&mut self) {
        self.request(Direction::Backward);
    }

    fn request(&mut self, direction: Direction) {
        self.direction = direction;
        self.next_requested = true;
    }

    /// Toggle auto-play; enabling it also requests the next batch.
    pub fn set_auto_animate(&mut self, enabled: bool) {
        self.playback.auto_animate = enabled;
        if enabled {
            self.next_requested = true;
        }
    }

    /// Set the speed slider value (effective speed is its square).
    pub fn set_speed(&mut self, slider: f64) {
        self.playback.speed = slider;
    }

    /// Replace the simulation, cancelling anything in flight.
    pub fn load_scenario(&mut self, modules: ModuleRegistry, sequence: MoveSetSequence) {
        self.cancel();
        log::info!(
            "loaded {} modules and {} move sets",
            modules.len(),
            sequence.total()
        );
        self.modules = modules;
        self.sequence = sequence;
    }

    /// Current state of the state machine.
    #[must_use]
    pub fn state(&self) -> DriverState {
        if self.active.is_some() {
            DriverState::Animating
        } else {
            DriverState::Idle
        }
    }

    /// Whether nothing is animating and nothing is requested.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.active.is_none() && !self.next_requested
    }

    /// Checkpoint progress label of the sequence.
    #[must_use]
    pub fn progress_label(&self) -> String {
        self.sequence.progress_label()
    }

    /// Raw progress of the active batch.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Moves currently animating.
    #[must_use]
    pub fn active_moves(&self) -> &[Move] {
        match &self.active {
            Some(set) => set.moves.as_slice(),
            None => &[],
        }
    }

    /// Current playback direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Modules in the simulation.
    #[must_use]
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// The move sequence.
    #[must_use]
    pub fn sequence(&self) -> &MoveSetSequence {
        &self.sequence
    }

    /// Playback settings.
    #[must_use]
    pub fn playback(&self) -> &PlaybackOptions {
        &self.playback
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::kinematics::{ModuleState, MoveKind, ShapeTable, ShapeType};
    use crate::util::lattice::approx_eq;

    const FRAME: Duration = Duration::from_millis(100);

    fn slide(id: u32, delta: DVec3) -> Move {
        Move::new(id, 0, delta, MoveKind::Sliding, ShapeType::Cube, &ShapeTable::default())
    }

    fn driver(sets: Vec<MoveSet>) -> AnimationDriver {
        let modules: ModuleRegistry = [
            ModuleState::new(1, ShapeType::Cube, DVec3::ZERO),
            ModuleState::new(2, ShapeType::Cube, DVec3::new(0.0, 1.0, 0.0)),
        ]
        .into_iter()
        .collect();
        AnimationDriver::new(modules, MoveSetSequence::new(sets), PlaybackOptions::default())
    }

    fn run(driver: &mut AnimationDriver, frames: usize) {
        for _ in 0..frames {
            driver.tick(FRAME);
        }
    }

    fn position(driver: &AnimationDriver, id: u32) -> DVec3 {
        driver.modules().get(id).map_or(DVec3::NAN, ModuleState::position)
    }

    #[test]
    fn test_idle_until_requested() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        run(&mut d, 5);
        assert_eq!(d.state(), DriverState::Idle);
        assert_eq!(d.sequence().current(), 0);
    }

    #[test]
    fn test_step_forward_plays_one_batch() {
        let mut d = driver(vec![
            MoveSet::new(vec![slide(1, DVec3::X)], true),
            MoveSet::new(vec![slide(2, DVec3::Z)], true),
        ]);
        d.step_forward();
        d.tick(FRAME);
        assert_eq!(d.state(), DriverState::Animating);
        // Mid-animation nothing is committed.
        assert_eq!(position(&d, 1), DVec3::ZERO);

        run(&mut d, 15);
        assert_eq!(d.state(), DriverState::Idle);
        assert!(approx_eq(position(&d, 1), DVec3::X));
        // Next batch is a checkpoint, so playback paused.
        assert_eq!(d.sequence().current(), 1);
        assert_eq!(position(&d, 2), DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(d.progress_label(), "Move #1 / #2");
    }

    #[test]
    fn test_non_checkpoint_sets_chain_until_checkpoint() {
        let mut d = driver(vec![
            MoveSet::new(vec![slide(1, DVec3::X)], false),
            MoveSet::new(vec![slide(1, DVec3::X)], false),
            MoveSet::new(vec![slide(2, DVec3::Z)], true),
            MoveSet::new(vec![slide(2, DVec3::Z)], false),
        ]);
        d.step_forward();
        run(&mut d, 60);
        // Stops ahead of the checkpoint batch.
        assert_eq!(d.sequence().current(), 2);
        assert!(approx_eq(position(&d, 1), DVec3::new(2.0, 0.0, 0.0)));
        assert!(d.is_settled());
    }

    #[test]
    fn test_auto_animate_plays_through_checkpoints() {
        let mut d = driver(vec![
            MoveSet::new(vec![slide(1, DVec3::X)], true),
            MoveSet::new(vec![slide(2, DVec3::Z), slide(1, DVec3::Y)], true),
        ]);
        d.set_auto_animate(true);
        run(&mut d, 60);
        assert!(d.sequence().is_finished());
        assert!(d.is_settled());
        assert!(approx_eq(position(&d, 1), DVec3::new(1.0, 1.0, 0.0)));
        assert!(approx_eq(position(&d, 2), DVec3::new(0.0, 1.0, 1.0)));
        assert_eq!(d.modules().module_at(DVec3::new(1.0, 1.0, 0.0)), Some(1));
    }

    #[test]
    fn test_step_backward_restores_positions() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], true)]);
        d.step_forward();
        run(&mut d, 20);
        assert!(approx_eq(position(&d, 1), DVec3::X));

        d.step_backward();
        run(&mut d, 20);
        assert_eq!(d.direction(), Direction::Backward);
        assert!(approx_eq(position(&d, 1), DVec3::ZERO));
        assert_eq!(d.sequence().current(), 0);
        assert_eq!(d.sequence().remaining(), 1);
    }

    #[test]
    fn test_backward_pauses_after_checkpoint() {
        let mut d = driver(vec![
            MoveSet::new(vec![slide(1, DVec3::X)], false),
            MoveSet::new(vec![slide(1, DVec3::X)], true),
            MoveSet::new(vec![slide(1, DVec3::X)], false),
        ]);
        d.set_auto_animate(true);
        run(&mut d, 80);
        d.set_auto_animate(false);
        assert!(d.sequence().is_finished());

        d.step_backward();
        run(&mut d, 80);
        // Undoes the last batch, then the checkpoint batch, then pauses.
        assert_eq!(d.sequence().current(), 1);
        assert!(approx_eq(position(&d, 1), DVec3::X));
    }

    #[test]
    fn test_cancel_is_safe_in_any_state() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        d.cancel();
        assert_eq!(d.state(), DriverState::Idle);

        d.step_forward();
        run(&mut d, 3);
        assert_eq!(d.state(), DriverState::Animating);
        d.cancel();
        assert_eq!(d.state(), DriverState::Idle);
        assert_eq!(d.progress(), 0.0);
        assert!(d.is_settled());
        // The cancelled batch was consumed but never committed.
        assert_eq!(position(&d, 1), DVec3::ZERO);
        run(&mut d, 5);
        assert_eq!(d.state(), DriverState::Idle);
    }

    #[test]
    fn test_empty_sequence_clears_request() {
        let mut d = driver(Vec::new());
        d.step_forward();
        d.tick(FRAME);
        assert!(d.is_settled());
        d.step_backward();
        d.tick(FRAME);
        assert!(d.is_settled());
    }

    #[test]
    fn test_unknown_module_is_skipped() {
        let mut d = driver(vec![MoveSet::new(vec![slide(9, DVec3::X), slide(1, DVec3::Y)], false)]);
        d.step_forward();
        run(&mut d, 20);
        assert!(approx_eq(position(&d, 1), DVec3::Y));
        assert_eq!(d.modules().len(), 2);
    }

    #[test]
    fn test_speed_is_quadratic() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        d.set_speed(2.0);
        d.step_forward();
        d.tick(FRAME);
        assert!((d.progress() - 0.4).abs() < 1e-9);
        assert_eq!(d.active_moves().len(), 1);
    }

    #[test]
    fn test_zero_speed_never_finishes() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        d.set_speed(0.0);
        d.step_forward();
        run(&mut d, 50);
        assert_eq!(d.state(), DriverState::Animating);
        assert_eq!(d.progress(), 0.0);
    }

    #[test]
    fn test_nan_speed_keeps_progress_finite() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        d.set_speed(f64::NAN);
        d.step_forward();
        run(&mut d, 5);
        assert_eq!(d.progress(), 0.0);
        d.set_speed(1.0);
        run(&mut d, 20);
        assert!(approx_eq(position(&d, 1), DVec3::X));
    }

    #[test]
    fn test_load_scenario_resets_playback() {
        let mut d = driver(vec![MoveSet::new(vec![slide(1, DVec3::X)], false)]);
        d.step_forward();
        run(&mut d, 3);
        let modules: ModuleRegistry =
            [ModuleState::new(7, ShapeType::Cube, DVec3::ZERO)].into_iter().collect();
        d.load_scenario(modules, MoveSetSequence::new(Vec::new()));
        assert_eq!(d.state(), DriverState::Idle);
        assert_eq!(d.modules().sorted_ids(), vec![7]);
        assert_eq!(d.sequence().total(), 0);
    }
}
