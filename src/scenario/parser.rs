//! `.scen` text parsing.

use std::collections::BTreeMap;
use std::str::FromStr;

use glam::IVec3;

use super::{
    ModulePlacement, MoveRecord, MoveSetRecord, PaletteEntry, Scenario,
};
use crate::error::MetavisError;
use crate::kinematics::{ModuleColor, ShapeType};

/// Marks a move line whose set is a checkpoint.
pub(super) const CHECKPOINT_MARKER: char = '*';

/// A source line with its 1-based line number.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl Line<'_> {
    fn error(&self, message: impl Into<String>) -> MetavisError {
        MetavisError::ScenarioParse {
            line: self.number,
            message: message.into(),
        }
    }

    /// Comma-separated fields, the checkpoint marker stripped.
    fn fields(&self) -> (bool, Vec<&str>) {
        let text = self.text.trim();
        let (marked, rest) = match text.strip_prefix(CHECKPOINT_MARKER) {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        (marked, rest.split(',').map(str::trim).collect())
    }

    fn field<T: FromStr>(&self, raw: &str, what: &str) -> Result<T, MetavisError> {
        raw.parse()
            .map_err(|_| self.error(format!("invalid {what} '{raw}'")))
    }

    fn five_fields(&self) -> Result<(bool, [&str; 5]), MetavisError> {
        let (marked, fields) = self.fields();
        let count = fields.len();
        let fields: [&str; 5] = fields
            .try_into()
            .map_err(|_| self.error(format!("expected 5 fields, found {count}")))?;
        Ok((marked, fields))
    }
}

pub(super) fn parse(input: &str) -> Result<Scenario, MetavisError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            text,
        })
        .filter(|line| !line.text.trim_start().starts_with("//"));

    let mut header = |what: &str| {
        lines.next().map_or_else(
            || {
                Err(MetavisError::ScenarioParse {
                    line: input.lines().count() + 1,
                    message: format!("missing {what}"),
                })
            },
            Ok,
        )
    };
    let name = header("scenario name")?;
    let description = header("scenario description")?;
    let shape_line = header("module shape")?;
    let shape = ShapeType::from_str(shape_line.text)
        .map_err(|e| shape_line.error(e.to_string()))?;

    let blocks = split_blocks(lines);
    let mut rest = blocks.as_slice();

    let mut palette = BTreeMap::new();
    if let [first, second, ..] = rest {
        if looks_like_palette(first) && !has_marker(second) {
            palette = parse_palette(first)?;
            rest = &rest[1..];
        }
    }

    let (modules, move_blocks) = match rest.split_first() {
        Some((first, tail)) => (parse_modules(first)?, tail),
        None => (Vec::new(), rest),
    };
    let move_sets = move_blocks
        .iter()
        .map(Vec::as_slice)
        .map(parse_move_set)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scenario {
        name: name.text.trim().to_owned(),
        description: description.text.trim().to_owned(),
        shape,
        palette,
        modules,
        move_sets,
    })
}

fn split_blocks<'a>(lines: impl Iterator<Item = Line<'a>>) -> Vec<Vec<Line<'a>>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        if line.text.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Whether any line of the block carries the checkpoint marker.
///
/// The first block of every exported move sequence is marked, which is what
/// tells an unmarked module block apart from a palette.
fn has_marker(block: &[Line<'_>]) -> bool {
    block.iter().any(|line| line.fields().0)
}

/// A palette row has five fields, the last four of them bytes, and never
/// carries a checkpoint marker.
fn looks_like_palette(block: &[Line<'_>]) -> bool {
    block.iter().all(|line| {
        let (marked, fields) = line.fields();
        !marked
            && fields.len() == 5
            && fields[0].parse::<u32>().is_ok()
            && fields[1..].iter().all(|f| f.parse::<u8>().is_ok())
    })
}

fn parse_palette(block: &[Line<'_>]) -> Result<BTreeMap<u32, PaletteEntry>, MetavisError> {
    let mut palette = BTreeMap::new();
    for line in block {
        let (_, [group, r, g, b, alpha]) = line.five_fields()?;
        let entry = PaletteEntry {
            color: ModuleColor([
                line.field(r, "red")?,
                line.field(g, "green")?,
                line.field(b, "blue")?,
            ]),
            alpha: line.field(alpha, "alpha")?,
        };
        let group: u32 = line.field(group, "palette group")?;
        if palette.insert(group, entry).is_some() {
            return Err(line.error(format!("duplicate palette group {group}")));
        }
    }
    Ok(palette)
}

fn parse_modules(block: &[Line<'_>]) -> Result<Vec<ModulePlacement>, MetavisError> {
    let mut modules: Vec<ModulePlacement> = Vec::with_capacity(block.len());
    for line in block {
        let (marked, [id, group, x, y, z]) = line.five_fields()?;
        if marked {
            return Err(line.error("checkpoint marker in module block"));
        }
        let placement = ModulePlacement {
            id: line.field(id, "module id")?,
            group: line.field(group, "module group")?,
            position: IVec3::new(
                line.field(x, "x coordinate")?,
                line.field(y, "y coordinate")?,
                line.field(z, "z coordinate")?,
            ),
        };
        if modules.iter().any(|m| m.id == placement.id) {
            return Err(line.error(format!("duplicate module id {}", placement.id)));
        }
        modules.push(placement);
    }
    Ok(modules)
}

fn parse_move_set(block: &[Line<'_>]) -> Result<MoveSetRecord, MetavisError> {
    let mut set = MoveSetRecord::default();
    for line in block {
        let (marked, [id, adc, dx, dy, dz]) = line.five_fields()?;
        set.checkpoint |= marked;
        set.moves.push(MoveRecord {
            id: line.field(id, "module id")?,
            adc: line.field(adc, "anchor code")?,
            delta: IVec3::new(
                line.field(dx, "x offset")?,
                line.field(dy, "y offset")?,
                line.field(dz, "z offset")?,
            ),
        });
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::tests::SAMPLE;

    fn parse_err(input: &str) -> (usize, String) {
        match parse(input) {
            Err(MetavisError::ScenarioParse { line, message }) => (line, message),
            other => panic!("expected a scenario parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_parses() {
        let scen = parse(SAMPLE).unwrap();
        assert_eq!(scen.description, "Pivots the corner module around the block.");
        assert_eq!(
            scen.palette.get(&1).map(|e| e.color),
            Some(ModuleColor([255, 128, 0]))
        );
        assert_eq!(scen.modules[2].position, IVec3::new(0, 1, 0));
    }

    #[test]
    fn test_palette_is_optional() {
        let input = "name\ndesc\nRHOMBIC_DODECAHEDRON\n\n1, 0, 0, 0, 0\n2, 0, 1, 1, 0\n";
        let scen = parse(input).unwrap();
        assert!(scen.palette.is_empty());
        assert_eq!(scen.modules.len(), 2);
        assert!(scen.move_sets.is_empty());
        assert_eq!(scen.shape, ShapeType::RhombicDodecahedron);
    }

    #[test]
    fn test_module_block_followed_by_marked_moves_is_not_a_palette() {
        let input = "n\nd\nCUBE\n\n1, 0, 0, 0, 0\n\n*1, 2, 1, 0, 0\n";
        let scen = parse(input).unwrap();
        assert!(scen.palette.is_empty());
        assert_eq!(scen.modules.len(), 1);
        assert_eq!(scen.move_sets.len(), 1);
    }

    #[test]
    fn test_negative_coordinates_are_modules_not_palette() {
        let input = "n\nd\nCUBE\n\n1, 0, -1, 0, 0\n\n1, 0, 1, 0, 0\n";
        let scen = parse(input).unwrap();
        assert!(scen.palette.is_empty());
        assert_eq!(scen.modules[0].position, IVec3::new(-1, 0, 0));
        assert_eq!(scen.move_sets.len(), 1);
    }

    #[test]
    fn test_extra_blank_lines_and_comments() {
        let input = concat!(
            "// leading comment\nn\nd\nCUBE\n\n\n\n",
            "1, 0, 0, 0, 0\n// note\n2, 0, 1, 0, 0\n\n\n"
        );
        let scen = parse(input).unwrap();
        assert_eq!(scen.name, "n");
        assert_eq!(scen.modules.len(), 2);
    }

    #[test]
    fn test_unknown_shape_reports_line() {
        let (line, message) = parse_err("n\nd\nTETRAHEDRON\n");
        assert_eq!(line, 3);
        assert!(message.contains("TETRAHEDRON"));
    }

    #[test]
    fn test_missing_header() {
        let (line, message) = parse_err("only a name\n");
        assert_eq!(line, 2);
        assert!(message.contains("description"));
    }

    #[test]
    fn test_bad_field_count_reports_line() {
        let (line, message) = parse_err("n\nd\nCUBE\n\n1, 0, 0, 0\n");
        assert_eq!(line, 5);
        assert!(message.contains("5 fields"));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let (line, message) = parse_err("n\nd\nCUBE\n\n1, 0, 0, 0, 0\n\n*1, 2, x, 0, 0\n");
        assert_eq!(line, 7);
        assert!(message.contains("'x'"));
    }

    #[test]
    fn test_duplicate_module_id() {
        let (line, _) = parse_err("n\nd\nCUBE\n\n1, 0, 0, 0, 0\n1, 0, 1, 0, 0\n");
        assert_eq!(line, 6);
    }

    #[test]
    fn test_checkpoint_on_later_line_marks_set() {
        let input = "n\nd\nCUBE\n\n1, 0, 0, 0, 0\n2, 0, 1, 0, 0\n\n1, 0, 0, 0, 1\n*2, 0, 0, 0, 1\n";
        let scen = parse(input).unwrap();
        assert!(scen.move_sets[0].checkpoint);
    }
}
