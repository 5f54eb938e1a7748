//! Batches of moves that animate together.

use crate::kinematics::Move;

/// Moves that play concurrently, optionally marking a checkpoint where
/// auto-play pauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoveSet {
    /// Auto-play pauses after (forward) or before (backward) this set.
    pub checkpoint: bool,
    /// Moves, at most one per module.
    pub moves: Vec<Move>,
}

impl MoveSet {
    /// Batch of `moves`.
    #[must_use]
    pub fn new(moves: Vec<Move>, checkpoint: bool) -> Self {
        Self { checkpoint, moves }
    }

    /// The batch that undoes this one; every move is reversed in place.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            checkpoint: self.checkpoint,
            moves: self.moves.iter().map(Move::reverse).collect(),
        }
    }

    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether the batch has no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::kinematics::{MoveKind, ShapeTable, ShapeType};
    use crate::util::lattice::approx_eq;

    #[test]
    fn test_reverse_negates_every_move() {
        let shapes = ShapeTable::default();
        let set = MoveSet::new(
            vec![
                Move::new(1, 2, DVec3::X, MoveKind::Pivot, ShapeType::Cube, &shapes),
                Move::new(2, 0, DVec3::NEG_Z, MoveKind::Sliding, ShapeType::Cube, &shapes),
            ],
            true,
        );
        let rev = set.reverse();
        assert!(rev.checkpoint);
        assert_eq!(rev.len(), 2);
        for (a, b) in set.moves.iter().zip(&rev.moves) {
            assert_eq!(a.id(), b.id());
            assert!(approx_eq(a.delta_pos(), -b.delta_pos()));
        }
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_set() {
        let set = MoveSet::default();
        assert!(set.is_empty());
        assert!(set.reverse().is_empty());
    }
}
