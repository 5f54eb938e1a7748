//! Lattice configuration documents exchanged with the path planner.

use std::str::FromStr;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::error::MetavisError;
use crate::kinematics::anchor::ANCHOR_TABLE;
use crate::kinematics::{ModuleId, ModuleRegistry, ShapeType};
use crate::util::lattice::to_cell;

/// One module entry of a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigModule {
    /// Lattice cell.
    pub position: [i32; 3],
    /// Static modules never move and are not part of the goal.
    #[serde(rename = "static", default)]
    pub is_static: bool,
    /// Opaque property definitions passed through to the planner.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// A lattice configuration: the planner's input format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatticeConfig {
    /// Scenario name the planner writes into its output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Scenario description the planner writes into its output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Module shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<ShapeType>,
    /// Lattice dimension.
    pub order: u32,
    /// Cells per axis.
    pub axis_size: u32,
    /// Extra cells the planner pads each axis with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensor_padding: Option<u32>,
    /// Neighbor offsets; the planner assumes face adjacency when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency_offsets: Option<Vec<[i32; 3]>>,
    /// Modules.
    pub modules: Vec<ConfigModule>,
    /// Cells no module may enter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundaries: Vec<[i32; 3]>,
}

impl LatticeConfig {
    /// Configuration of the modules in `registry`.
    ///
    /// Positions are shifted so the smallest coordinate on each axis is 0,
    /// and the axis size covers the largest resulting coordinate. Modules
    /// whose id is in `static_ids` are marked static.
    #[must_use]
    pub fn from_registry(
        registry: &ModuleRegistry,
        shape: ShapeType,
        static_ids: &[ModuleId],
    ) -> Self {
        let cells: Vec<(ModuleId, IVec3)> = registry
            .sorted_ids()
            .into_iter()
            .filter_map(|id| {
                registry
                    .get(id)
                    .map(|m| (id, IVec3::from_array(to_cell(m.position()))))
            })
            .collect();
        let min = cells
            .iter()
            .map(|(_, cell)| *cell)
            .reduce(IVec3::min)
            .unwrap_or(IVec3::ZERO);
        let max_extent = cells
            .iter()
            .map(|(_, cell)| (*cell - min).max_element())
            .max()
            .unwrap_or(0);

        Self {
            name: None,
            description: None,
            module_type: Some(shape),
            order: 3,
            axis_size: max_extent.unsigned_abs() + 1,
            tensor_padding: None,
            adjacency_offsets: adjacency_offsets(shape),
            modules: cells
                .into_iter()
                .map(|(id, cell)| ConfigModule {
                    position: (cell - min).to_array(),
                    is_static: static_ids.contains(&id),
                    properties: serde_json::Map::new(),
                })
                .collect(),
            boundaries: Vec::new(),
        }
    }

    /// Set the name and description the planner copies into its scenario.
    #[must_use]
    pub fn with_title(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_owned());
        self.description = Some(description.to_owned());
        self
    }

    /// Serialize to the planner's JSON.
    pub fn to_json(&self) -> Result<String, MetavisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Modules that are free to move.
    pub fn mobile_modules(&self) -> impl Iterator<Item = &ConfigModule> {
        self.modules.iter().filter(|m| !m.is_static)
    }
}

impl FromStr for LatticeConfig {
    type Err = MetavisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Neighbor offsets for a shape's lattice: face neighbors for cubes, the
/// twelve face-diagonal neighbors for rhombic dodecahedra.
fn adjacency_offsets(shape: ShapeType) -> Option<Vec<[i32; 3]>> {
    let axes = match shape {
        ShapeType::Cube => 1,
        ShapeType::RhombicDodecahedron => 2,
        ShapeType::Catom => return None,
    };
    Some(
        ANCHOR_TABLE
            .iter()
            .map(|(_, dir)| dir.map(|c| c as i32))
            .filter(|offset| offset.iter().filter(|c| **c != 0).count() == axes)
            .collect(),
    )
}
