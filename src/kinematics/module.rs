//! Per-module simulation state and pose.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use super::moves::{Move, MoveKind};
use super::shape::ShapeType;
use super::ModuleId;
use crate::util::easing::EasingFunction;

/// 8-bit RGB color of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleColor(pub [u8; 3]);

impl ModuleColor {
    /// White, used when no palette entry applies.
    pub const WHITE: Self = Self([255, 255, 255]);

    /// Packed `0xRRGGBB` value.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

impl Default for ModuleColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Committed lattice state of a module.
///
/// Only [`ModuleState::finish_move`] changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeState {
    /// Lattice cell of the module center.
    pub position: DVec3,
    /// Net orientation from every finished pivot.
    pub rotation: DMat4,
}

/// A module on the lattice: its committed state plus the pose currently
/// shown by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleState {
    id: ModuleId,
    shape: ShapeType,
    color: ModuleColor,
    scale: f64,
    lattice: LatticeState,
    /// Module-local transform relative to `lattice.position`.
    pose: DMat4,
}

impl ModuleState {
    /// Module at `position` with identity orientation.
    #[must_use]
    pub fn new(id: ModuleId, shape: ShapeType, position: DVec3) -> Self {
        Self {
            id,
            shape,
            color: ModuleColor::WHITE,
            scale: 1.0,
            lattice: LatticeState {
                position,
                rotation: DMat4::IDENTITY,
            },
            pose: DMat4::IDENTITY,
        }
    }

    /// Set the display color.
    #[must_use]
    pub fn with_color(mut self, color: ModuleColor) -> Self {
        self.color = color;
        self
    }

    /// Set the display scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Show the in-progress transform of `mv` at raw progress `pct`.
    ///
    /// Purely visual: the lattice state is untouched. The move's transform is
    /// composed with the committed rotation so prior pivots stay visible.
    pub fn animate_move(&mut self, mv: &Move, pct: f64, easing: EasingFunction) {
        let eased = easing.evaluate(pct);
        self.pose = mv.transform_at(eased) * self.lattice.rotation;
    }

    /// Commit `mv`: fold its rotations into the orientation, advance the
    /// position, and snap the pose to the committed rotation.
    pub fn finish_move(&mut self, mv: &Move) {
        if mv.kind() != MoveKind::Sliding {
            for rotation in mv.steps().iter().filter_map(|s| s.full_rotation()) {
                self.lattice.rotation = rotation * self.lattice.rotation;
            }
        }
        self.pose = self.lattice.rotation;
        self.lattice.position += mv.delta_pos();
    }

    /// Transform a renderer applies to the unit mesh of this module.
    #[must_use]
    pub fn world_transform(&self) -> DMat4 {
        DMat4::from_translation(self.lattice.position)
            * self.pose
            * DMat4::from_scale(DVec3::splat(self.scale))
    }

    /// Module id.
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Module shape.
    #[must_use]
    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    /// Display color.
    #[must_use]
    pub fn color(&self) -> ModuleColor {
        self.color
    }

    /// Display scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Committed lattice position.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.lattice.position
    }

    /// Committed orientation.
    #[must_use]
    pub fn rotation(&self) -> DMat4 {
        self.lattice.rotation
    }

    /// Committed lattice state.
    #[must_use]
    pub fn lattice(&self) -> LatticeState {
        self.lattice
    }

    /// Current module-local pose.
    #[must_use]
    pub fn pose(&self) -> DMat4 {
        self.pose
    }
}
