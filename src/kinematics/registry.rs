//! Lookup of modules by id and by lattice cell.

use glam::DVec3;
use rustc_hash::FxHashMap;

use super::module::ModuleState;
use super::ModuleId;
use crate::util::lattice::to_cell;

/// Every module in a simulation, keyed by id.
///
/// A secondary index maps committed lattice cells to ids; it is refreshed
/// through [`ModuleRegistry::refresh_cells`] after moves are committed.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<ModuleId, ModuleState>,
    cells: FxHashMap<[i32; 3], ModuleId>,
}

impl ModuleRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module, returning the one it replaced.
    pub fn add(&mut self, module: ModuleState) -> Option<ModuleState> {
        let id = module.id();
        let cell = to_cell(module.position());
        let replaced = self.modules.insert(id, module);
        if let Some(old) = &replaced {
            self.unindex(old);
        }
        if let Some(other) = self.cells.insert(cell, id) {
            if other != id {
                log::warn!("module {id} placed on cell {cell:?} already held by {other}");
            }
        }
        replaced
    }

    /// Remove a module by id.
    pub fn remove(&mut self, id: ModuleId) -> Option<ModuleState> {
        let removed = self.modules.remove(&id);
        if let Some(module) = &removed {
            self.unindex(module);
        }
        removed
    }

    fn unindex(&mut self, module: &ModuleState) {
        let cell = to_cell(module.position());
        if self.cells.get(&cell) == Some(&module.id()) {
            let _ = self.cells.remove(&cell);
        }
    }

    /// Module by id.
    #[must_use]
    pub fn get(&self, id: ModuleId) -> Option<&ModuleState> {
        self.modules.get(&id)
    }

    /// Mutable module by id.
    ///
    /// Committing a move through this reference leaves the cell index stale
    /// until [`ModuleRegistry::refresh_cells`] runs.
    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut ModuleState> {
        self.modules.get_mut(&id)
    }

    /// Id of the module whose committed position rounds to `position`.
    #[must_use]
    pub fn module_at(&self, position: DVec3) -> Option<ModuleId> {
        self.cells.get(&to_cell(position)).copied()
    }

    /// Rebuild the cell index from committed positions.
    pub fn refresh_cells(&mut self) {
        self.cells.clear();
        for (id, module) in &self.modules {
            let _ = self.cells.insert(to_cell(module.position()), *id);
        }
    }

    /// Iterate over modules in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleState> {
        self.modules.values()
    }

    /// Module ids in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<ModuleId> {
        let mut ids: Vec<ModuleId> = self.modules.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<ModuleState> for ModuleRegistry {
    fn from_iter<I: IntoIterator<Item = ModuleState>>(iter: I) -> Self {
        let mut registry = Self::new();
        for module in iter {
            let _ = registry.add(module);
        }
        registry
    }
}
