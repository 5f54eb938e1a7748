//! `.scen` text output.

use std::fmt::Write as _;

use super::parser::CHECKPOINT_MARKER;
use super::Scenario;

impl Scenario {
    /// Render the scenario as `.scen` text.
    ///
    /// The checkpoint marker goes on the first line of a checkpoint set and
    /// the palette block is written only when the palette has entries. Empty
    /// move sets have no text form and are skipped.
    #[must_use]
    pub fn to_scen_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(out, "{}", self.description);
        let _ = writeln!(out, "{}", self.shape);
        out.push('\n');

        if !self.palette.is_empty() {
            for (group, entry) in &self.palette {
                let [r, g, b] = entry.color.0;
                let _ = writeln!(out, "{group}, {r}, {g}, {b}, {}", entry.alpha);
            }
            out.push('\n');
        }

        for module in &self.modules {
            let p = module.position;
            let _ = writeln!(out, "{}, {}, {}, {}, {}", module.id, module.group, p.x, p.y, p.z);
        }

        for set in self.move_sets.iter().filter(|set| !set.moves.is_empty()) {
            out.push('\n');
            for (i, mv) in set.moves.iter().enumerate() {
                let marker = if set.checkpoint && i == 0 {
                    CHECKPOINT_MARKER
                } else {
                    ' '
                };
                let d = mv.delta;
                let _ = writeln!(out, "{marker}{}, {}, {}, {}, {}", mv.id, mv.adc, d.x, d.y, d.z);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use glam::IVec3;

    use crate::kinematics::ShapeType;
    use crate::scenario::tests::SAMPLE;
    use crate::scenario::{
        ModulePlacement, MoveRecord, MoveSetRecord, Scenario,
    };

    #[test]
    fn test_written_sample_parses_back() {
        let scen: Scenario = SAMPLE.parse().unwrap();
        let text = scen.to_scen_string();
        let reparsed: Scenario = text.parse().unwrap();
        assert_eq!(reparsed, scen);
    }

    #[test]
    fn test_layout_without_palette() {
        let scen = Scenario {
            name: "pair".to_owned(),
            description: "two cubes".to_owned(),
            shape: ShapeType::Cube,
            palette: BTreeMap::new(),
            modules: vec![
                ModulePlacement {
                    id: 0,
                    group: 0,
                    position: IVec3::ZERO,
                },
                ModulePlacement {
                    id: 1,
                    group: 0,
                    position: IVec3::X,
                },
            ],
            move_sets: vec![
                MoveSetRecord {
                    checkpoint: true,
                    moves: vec![MoveRecord {
                        id: 1,
                        adc: 4,
                        delta: IVec3::new(-1, 1, 0),
                    }],
                },
                MoveSetRecord::default(),
            ],
        };
        let expected = "pair\ntwo cubes\nCUBE\n\n0, 0, 0, 0, 0\n1, 0, 1, 0, 0\n\n*1, 4, -1, 1, 0\n";
        assert_eq!(scen.to_scen_string(), expected);

        let reparsed: Scenario = expected.parse().unwrap();
        assert!(reparsed.palette.is_empty());
        assert_eq!(reparsed.move_sets.len(), 1);
    }
}
