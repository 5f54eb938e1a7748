//! Scenario files: an initial module layout plus the move sets that
//! reconfigure it.
//!
//! The text format has a three-line header (name, description, shape) and
//! blank-line separated blocks after it:
//!
//! ```text
//! 3x3 Metamodule
//! Pivots the corner module around the block.
//! CUBE
//!
//! 0, 255, 255, 255, 90
//! 1, 255, 128, 0, 90
//!
//! 0, 1, 0, 0, 0
//! 1, 0, 1, 0, 0
//!
//! *1, 2, 1, -1, 0
//!
//! 1, -1, -1, 1, 0
//! ```
//!
//! The optional first block is a palette (`group, r, g, b, alpha`), then one
//! module block (`id, group, x, y, z`), then one block per move set
//! (`id, adc, dx, dy, dz`). A leading `*` on any move line marks the set as a
//! checkpoint. Lines starting with `//` are ignored.

mod parser;
mod writer;

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use glam::{DVec3, IVec3};

use crate::error::MetavisError;
use crate::kinematics::anchor::AnchorCode;
use crate::kinematics::{
    ModuleColor, ModuleId, ModuleRegistry, ModuleState, Move, MoveKind,
    ShapeTable, ShapeType,
};
use crate::sequence::{MoveSet, MoveSetSequence};

/// A palette row: the color modules of one group are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// RGB color.
    pub color: ModuleColor,
    /// Opacity in percent, as written by the planner.
    pub alpha: u8,
}

/// Initial placement of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModulePlacement {
    /// Module id.
    pub id: ModuleId,
    /// Palette group (also the static flag when no palette is used).
    pub group: u32,
    /// Lattice cell.
    pub position: IVec3,
}

/// One move line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Module that moves.
    pub id: ModuleId,
    /// Anchor direction code.
    pub adc: AnchorCode,
    /// Lattice displacement.
    pub delta: IVec3,
}

impl MoveRecord {
    /// Pivot when the code is positive, slide otherwise.
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        if self.adc > 0 {
            MoveKind::Pivot
        } else {
            MoveKind::Sliding
        }
    }
}

/// One move block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSetRecord {
    /// Whether auto-play pauses at this set.
    pub checkpoint: bool,
    /// Moves of the set.
    pub moves: Vec<MoveRecord>,
}

/// A parsed scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Shape shared by every module.
    pub shape: ShapeType,
    /// Group colors, keyed by group.
    pub palette: BTreeMap<u32, PaletteEntry>,
    /// Initial layout.
    pub modules: Vec<ModulePlacement>,
    /// Move sets in play order.
    pub move_sets: Vec<MoveSetRecord>,
}

impl Scenario {
    /// Parse a scenario file.
    pub fn load(path: &Path) -> Result<Self, MetavisError> {
        let content = std::fs::read_to_string(path).map_err(MetavisError::Io)?;
        let scenario: Self = content.parse()?;
        log::info!(
            "loaded scenario '{}' from {}: {} modules, {} move sets",
            scenario.name,
            path.display(),
            scenario.modules.len(),
            scenario.move_sets.len()
        );
        Ok(scenario)
    }

    /// Write the scenario in the text format it was parsed from.
    pub fn save(&self, path: &Path) -> Result<(), MetavisError> {
        std::fs::write(path, self.to_scen_string()).map_err(MetavisError::Io)
    }

    /// Color of a palette group; white when the group has no entry.
    #[must_use]
    pub fn group_color(&self, group: u32) -> ModuleColor {
        self.palette.get(&group).map_or_else(
            || {
                if !self.palette.is_empty() {
                    log::warn!("no palette entry for group {group}; using white");
                }
                ModuleColor::WHITE
            },
            |entry| entry.color,
        )
    }

    /// Modules in their initial placement.
    #[must_use]
    pub fn module_registry(&self) -> ModuleRegistry {
        self.modules
            .iter()
            .map(|placement| {
                ModuleState::new(placement.id, self.shape, placement.position.as_dvec3())
                    .with_color(self.group_color(placement.group))
            })
            .collect()
    }

    /// Build every move set, with constants from `shapes`.
    #[must_use]
    pub fn move_sets(&self, shapes: &ShapeTable) -> Vec<MoveSet> {
        self.move_sets
            .iter()
            .map(|record| {
                let moves = record
                    .moves
                    .iter()
                    .map(|mv| {
                        Move::new(
                            mv.id,
                            mv.adc,
                            mv.delta.as_dvec3(),
                            mv.kind(),
                            self.shape,
                            shapes,
                        )
                    })
                    .collect();
                MoveSet::new(moves, record.checkpoint)
            })
            .collect()
    }

    /// Module registry and move sequence ready for an
    /// [`AnimationDriver`](crate::animation::AnimationDriver).
    #[must_use]
    pub fn into_simulation(self, shapes: &ShapeTable) -> (ModuleRegistry, MoveSetSequence) {
        let modules = self.module_registry();
        let sequence = MoveSetSequence::new(self.move_sets(shapes));
        (modules, sequence)
    }

    /// Net displacement of each module over the whole scenario.
    #[must_use]
    pub fn net_displacements(&self) -> BTreeMap<ModuleId, DVec3> {
        let mut net = BTreeMap::new();
        for mv in self.move_sets.iter().flat_map(|set| &set.moves) {
            *net.entry(mv.id).or_insert(DVec3::ZERO) += mv.delta.as_dvec3();
        }
        net
    }
}

impl FromStr for Scenario {
    type Err = MetavisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::lattice::approx_eq;

    pub(super) const SAMPLE: &str = "\
3x3 Metamodule
Pivots the corner module around the block.
CUBE

// group, r, g, b, alpha
0, 255, 255, 255, 90
1, 255, 128, 0, 90

00, 0, 0, 0, 0
01, 1, 1, 0, 0
02, 1, 0, 1, 0

*01, 2, 1, -1, 0
 02, -1, 1, 1, 0

 01, 0, 0, 0, 1

*02, 5, -1, 0, 0
";

    fn sample() -> Scenario {
        SAMPLE.parse().unwrap()
    }

    #[test]
    fn test_sample_header_and_blocks() {
        let scen = sample();
        assert_eq!(scen.name, "3x3 Metamodule");
        assert_eq!(scen.shape, ShapeType::Cube);
        assert_eq!(scen.palette.len(), 2);
        assert_eq!(scen.modules.len(), 3);
        assert_eq!(scen.move_sets.len(), 3);
        assert!(scen.move_sets[0].checkpoint);
        assert!(!scen.move_sets[1].checkpoint);
        assert_eq!(scen.move_sets[0].moves[1].delta, IVec3::new(1, 1, 0));
    }

    #[test]
    fn test_move_kind_from_code_sign() {
        let scen = sample();
        assert_eq!(scen.move_sets[0].moves[0].kind(), MoveKind::Pivot);
        assert_eq!(scen.move_sets[0].moves[1].kind(), MoveKind::Sliding);
        assert_eq!(scen.move_sets[1].moves[0].kind(), MoveKind::Sliding);
    }

    #[test]
    fn test_into_simulation() {
        let (modules, sequence) = sample().into_simulation(&ShapeTable::default());
        assert_eq!(modules.len(), 3);
        assert_eq!(sequence.total(), 3);
        assert_eq!(sequence.total_checkpoints(), 2);
        let colored = modules.get(1).map(ModuleState::color);
        assert_eq!(colored, Some(ModuleColor([255, 128, 0])));
        assert_eq!(modules.module_at(DVec3::new(0.0, 1.0, 0.0)), Some(2));
        // Negative-code diagonal slide splits around the corner.
        let corner = sequence
            .peek_next()
            .map(|set| set.moves[1].steps().len());
        assert_eq!(corner, Some(2));
    }

    #[test]
    fn test_unknown_group_is_white() {
        let scen = sample();
        assert_eq!(scen.group_color(7), ModuleColor::WHITE);
    }

    #[test]
    fn test_net_displacements() {
        let net = sample().net_displacements();
        assert!(approx_eq(net[&1], DVec3::new(1.0, -1.0, 1.0)));
        assert!(approx_eq(net[&2], DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.scen");
        let scen = sample();
        scen.save(&path).unwrap();
        let loaded = Scenario::load(&path).unwrap();
        assert_eq!(loaded, scen);
    }
}
