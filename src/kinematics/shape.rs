//! Module shapes and their geometric constants.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetavisError;

/// The unit shape a module is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// Unit cube; pivots over edges by 90°.
    Cube,
    /// Rhombic dodecahedron; pivots over edges by 60°.
    RhombicDodecahedron,
    /// Catom (truncated octahedral shell); two-phase pivots over square or
    /// triangular faces.
    Catom,
}

impl ShapeType {
    /// Every known shape, in table order.
    pub const ALL: [ShapeType; 3] =
        [ShapeType::Cube, ShapeType::RhombicDodecahedron, ShapeType::Catom];

    /// Name as it appears in scenario files and option tables.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Cube => "CUBE",
            ShapeType::RhombicDodecahedron => "RHOMBIC_DODECAHEDRON",
            ShapeType::Catom => "CATOM",
        }
    }

    /// Whether moves of this shape use the single-step pivot/slide algorithms
    /// (as opposed to catom two-phase pivots).
    #[must_use]
    pub fn is_polyhedral(self) -> bool {
        !matches!(self, ShapeType::Catom)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = MetavisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ShapeType::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MetavisError::UnknownShape(trimmed.to_owned()))
    }
}

/// Geometric constants for one shape.
///
/// `face_dist` is the distance from the module origin to a face centroid and
/// `edge_dist` the distance from a face centroid to an edge midpoint; only
/// catom moves use them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConstants {
    /// Radius of the sphere tangent to every edge.
    pub midsphere: f64,
    /// Edge length.
    pub edge_length: f64,
    /// Origin to face centroid.
    pub face_dist: f64,
    /// Face centroid to edge midpoint.
    pub edge_dist: f64,
    /// Interior angle between adjacent faces, in radians.
    pub dihedral: f64,
}

impl ShapeConstants {
    /// Built-in constants for a shape.
    #[must_use]
    pub fn builtin(shape: ShapeType) -> Self {
        match shape {
            ShapeType::Cube => Self {
                midsphere: 0.7071,
                edge_length: 1.0,
                face_dist: 0.0,
                edge_dist: 0.0,
                dihedral: 90f64.to_radians(),
            },
            // midsphere: sqrt(6)/3, edge length: sqrt(3)/2
            ShapeType::RhombicDodecahedron => Self {
                midsphere: 0.8165,
                edge_length: 0.866,
                face_dist: 0.7071,
                edge_dist: 0.0,
                dihedral: 60f64.to_radians(),
            },
            // midsphere: sqrt(2 - sqrt(2)), edge length: 2 / (2 + sqrt(2)),
            // face dist: sqrt(2)/2, edge dist: 1 - sqrt(2)/2
            ShapeType::Catom => Self {
                midsphere: 0.76537,
                edge_length: 0.585_787,
                face_dist: 0.7071,
                edge_dist: 0.29289,
                dihedral: 90f64.to_radians(),
            },
        }
    }
}

/// Shape constant lookup keyed by shape type.
///
/// Entries can be removed or overridden (e.g. from an options file); a lookup
/// for a missing shape falls back to zeros rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeTable {
    entries: BTreeMap<ShapeType, ShapeConstants>,
}

impl ShapeTable {
    /// Table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Constants for `shape`, if the table has them.
    #[must_use]
    pub fn lookup(&self, shape: ShapeType) -> Option<ShapeConstants> {
        self.entries.get(&shape).copied()
    }

    /// Constants for `shape`, falling back to zeros (with a warning).
    #[must_use]
    pub fn get(&self, shape: ShapeType) -> ShapeConstants {
        self.lookup(shape).unwrap_or_else(|| {
            log::warn!("no shape constants for {shape}; using zeros");
            ShapeConstants::default()
        })
    }

    /// Insert or replace the constants for `shape`.
    pub fn set(&mut self, shape: ShapeType, constants: ShapeConstants) {
        let _ = self.entries.insert(shape, constants);
    }

    /// Remove the entry for `shape`.
    pub fn remove(&mut self, shape: ShapeType) -> Option<ShapeConstants> {
        self.entries.remove(&shape)
    }

    /// Overlay every entry of `other` onto this table.
    pub fn merge(&mut self, other: &ShapeTable) {
        for (shape, constants) in &other.entries {
            self.set(*shape, *constants);
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self {
            entries: ShapeType::ALL
                .into_iter()
                .map(|shape| (shape, ShapeConstants::builtin(shape)))
                .collect(),
        }
    }
}
