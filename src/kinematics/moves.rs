//! Move descriptors and their step construction.
//!
//! A [`Move`] is built once from its descriptor and never changes; the steps
//! are derived at construction. Which algorithm derives them is recorded as a
//! [`MovePlan`]:
//!
//! - **Standard**: cubes and rhombic dodecahedra. One step; a pivot rotates
//!   about the midpoint of the edge shared with the anchor, projected onto
//!   the shape's midsphere.
//! - **Corner slide**: a diagonal slide (more than one lattice step, negative
//!   anchor code). Split into two axis-aligned half-time slides so the module
//!   goes around the corner instead of through it.
//! - **Catom**: two-phase pivot across a square face or, when the code
//!   carries [`TRIANGLE_FACE_FLAG`], a triangular face. Catom slides, and
//!   catom pivots without a decodable anchor, take the standard path.

use glam::{DMat4, DVec3};

use super::anchor::{self, AnchorCode, GENERIC_SLIDE, TRIANGLE_FACE_FLAG};
use super::shape::{ShapeConstants, ShapeTable, ShapeType};
use super::step::Step;
use super::ModuleId;
use crate::util::lattice::{approx_eq, l1_norm, rotate_about, sign_vector, with_length};

/// Rotation of each phase of a triangular-face catom pivot:
/// `2·atan2(1 − √2/2, √2 − 1)`.
pub const TRIANGLE_PIVOT_ANGLE: f64 = 1.230_959_417_34;

/// How a move travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Rotation about an edge or vertex of a neighbor.
    Pivot,
    /// Pure translation.
    Sliding,
    /// Coordinated move of a module carried along by its neighbors.
    Monkey,
}

/// Which face a catom pivots across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatomFace {
    /// Square face; each phase sweeps the shape's dihedral angle.
    Square,
    /// Triangular face; each phase sweeps [`TRIANGLE_PIVOT_ANGLE`].
    Triangle,
}

/// The algorithm that produced a move's steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePlan {
    /// Single pivot or slide step.
    Standard,
    /// Two half-time slides around a convex corner.
    CornerSlide,
    /// Two-phase catom pivot.
    Catom {
        /// Face pivoted across.
        face: CatomFace,
        /// Axis along which the module leaves the plane of motion.
        bump_axis: DVec3,
    },
}

/// Recoverable problem found while constructing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAnomaly {
    /// The anchor code has no decode table entry.
    UnknownAnchorCode(AnchorCode),
    /// The shape table had no constants for the move's shape.
    MissingShapeConstants(ShapeType),
    /// A pivot without a usable anchor, animated as a slide instead.
    PivotWithoutAnchor,
}

/// One module's reconfiguration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    id: ModuleId,
    adc: AnchorCode,
    delta_pos: DVec3,
    kind: MoveKind,
    shape: ShapeType,
    constants: ShapeConstants,
    anchor_dir: DVec3,
    plan: MovePlan,
    steps: Vec<Step>,
    anomalies: Vec<MoveAnomaly>,
}

impl Move {
    /// Build a move, looking up shape constants in `shapes`.
    ///
    /// A missing table entry is not an error: the move is built with zeroed
    /// constants and records [`MoveAnomaly::MissingShapeConstants`].
    #[must_use]
    pub fn new(
        id: ModuleId,
        adc: AnchorCode,
        delta_pos: DVec3,
        kind: MoveKind,
        shape: ShapeType,
        shapes: &ShapeTable,
    ) -> Self {
        if let Some(constants) = shapes.lookup(shape) {
            Self::with_constants(id, adc, delta_pos, kind, shape, constants)
        } else {
            log::warn!("move for module {id}: no shape constants for {shape}");
            let mut mv = Self::with_constants(
                id,
                adc,
                delta_pos,
                kind,
                shape,
                ShapeConstants::default(),
            );
            mv.anomalies.push(MoveAnomaly::MissingShapeConstants(shape));
            mv
        }
    }

    /// Build a move from explicit shape constants.
    #[must_use]
    pub fn with_constants(
        id: ModuleId,
        adc: AnchorCode,
        delta_pos: DVec3,
        kind: MoveKind,
        shape: ShapeType,
        constants: ShapeConstants,
    ) -> Self {
        let mut anomalies = Vec::new();
        if !anchor::is_known(adc) {
            anomalies.push(MoveAnomaly::UnknownAnchorCode(adc));
        }
        let anchor_dir = anchor::decode(adc);

        let mut mv = Self {
            id,
            adc,
            delta_pos,
            kind,
            shape,
            constants,
            anchor_dir,
            plan: MovePlan::Standard,
            steps: Vec::with_capacity(2),
            anomalies,
        };

        if !shape.is_polyhedral() && kind == MoveKind::Pivot && anchor_dir != DVec3::ZERO {
            mv.build_catom_steps();
        } else if mv.is_diagonal() && adc < 0 {
            mv.build_corner_slide_steps();
        } else {
            mv.build_standard_step();
        }
        mv
    }

    fn is_diagonal(&self) -> bool {
        l1_norm(self.delta_pos) > 1.0
    }

    fn build_standard_step(&mut self) {
        self.plan = MovePlan::Standard;
        let step = match self.kind {
            MoveKind::Pivot if self.anchor_dir != DVec3::ZERO => self.standard_pivot(),
            MoveKind::Pivot => {
                log::warn!(
                    "pivot of module {} has no anchor (code {}); sliding instead",
                    self.id,
                    self.adc
                );
                self.anomalies.push(MoveAnomaly::PivotWithoutAnchor);
                Step::slide(self.delta_pos, 1.0)
            }
            MoveKind::Sliding | MoveKind::Monkey => Step::slide(self.delta_pos, 1.0),
        };
        self.steps.push(step);
    }

    fn standard_pivot(&self) -> Step {
        let delta = self.delta_pos;
        let rot_axis = delta.cross(self.anchor_dir).normalize_or_zero();

        // In the anchor-centered frame the module starts at the sign vector of
        // the anchor direction; the pivot edge lies along start + delta.
        let start = sign_vector(self.anchor_dir);
        let linear = if self.shape == ShapeType::Cube && self.is_diagonal() {
            // 180° cube pivots: the edge is along delta itself.
            delta
        } else {
            start + delta
        };
        let post_trans = linear.normalize_or_zero() * self.constants.midsphere;
        let max_angle = l1_norm(delta) * self.constants.dihedral;

        Step::pivot(delta, rot_axis, max_angle, 1.0, post_trans)
    }

    fn build_corner_slide_steps(&mut self) {
        self.plan = MovePlan::CornerSlide;
        let first = self.delta_pos * self.anchor_dir;
        let second = self.delta_pos - first;
        self.steps.push(Step::slide(first, 0.5));
        self.steps.push(Step::slide(second, 1.0));
    }

    fn build_catom_steps(&mut self) {
        let face = if self.adc >= TRIANGLE_FACE_FLAG {
            CatomFace::Triangle
        } else {
            CatomFace::Square
        };
        let (bump_axis, first, second) = match face {
            CatomFace::Triangle => self.catom_triangle_steps(),
            CatomFace::Square => self.catom_square_steps(),
        };
        self.plan = MovePlan::Catom { face, bump_axis };
        self.steps.push(first);
        self.steps.push(second);
    }

    fn catom_triangle_steps(&self) -> (DVec3, Step, Step) {
        let delta = self.delta_pos;
        let anchor = self.anchor_dir;
        let edge_dist = self.constants.edge_dist;

        let dp2 = (delta * anchor.abs()).normalize_or_zero();
        let dp1 = delta - dp2;
        let bump_axis = sign_vector(anchor) - sign_vector(dp2);

        let ra1 = dp1.cross(anchor).normalize_or_zero();
        let ra2 = delta.cross(bump_axis).normalize_or_zero();

        let post1 = with_length(dp1, edge_dist)
            + with_length(dp2, 0.5)
            + with_length(bump_axis, 0.5);
        let post2 = sign_vector(delta) * 0.5 + with_length(bump_axis, edge_dist);

        (
            bump_axis,
            Step::pivot(dp1, ra1, TRIANGLE_PIVOT_ANGLE, 0.5, post1),
            Step::pivot(dp2, ra2, TRIANGLE_PIVOT_ANGLE, 1.0, post2),
        )
    }

    fn catom_square_steps(&self) -> (DVec3, Step, Step) {
        let delta = self.delta_pos;
        let anchor = self.anchor_dir;
        let ShapeConstants {
            dihedral,
            face_dist,
            edge_dist,
            ..
        } = self.constants;

        let dp1 = (delta * anchor.abs()).normalize_or_zero();
        let dp2 = delta - dp1;
        // Motion happens in a plane; the bump axis is its normal.
        let bump_axis = sign_vector(anchor) - sign_vector(dp1);

        let ra1 = dp1.cross(anchor).normalize_or_zero();
        let ra2 = -dp2.cross(bump_axis).normalize_or_zero();

        // The second phase runs in the frame rotated by the first.
        let straight = approx_eq(dp1, dp2);
        let rot_axis2 = if straight {
            ra1
        } else {
            rotate_about(ra2, ra1, dihedral)
        };
        let post1 = with_length(dp1, face_dist) + with_length(bump_axis, edge_dist);
        let post2 = if straight {
            rotate_about(
                with_length(dp2, edge_dist) + with_length(bump_axis, face_dist),
                -ra1,
                dihedral,
            )
        } else {
            rotate_about(
                with_length(dp2, edge_dist) - with_length(bump_axis, face_dist),
                ra1,
                dihedral,
            )
        };

        (
            bump_axis,
            Step::pivot(dp1, ra1, dihedral, 0.5, post1),
            Step::pivot(
                rotate_about(dp2, ra1, dihedral),
                rot_axis2,
                dihedral,
                1.0,
                post2,
            ),
        )
    }

    /// The move that undoes this one.
    ///
    /// The displacement is negated and the anchor code recomputed so that the
    /// reversed move pivots against the same neighbor from its end cell.
    /// Reversing twice reproduces the displacement and the decoded anchor
    /// direction, though not necessarily the same code integer.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let new_delta = -self.delta_pos;
        let new_adc = if self.adc == GENERIC_SLIDE {
            self.adc
        } else {
            match self.plan {
                MovePlan::CornerSlide => self
                    .steps
                    .get(1)
                    .map_or(self.adc, |step| -anchor::encode(step.delta_pos.abs())),
                MovePlan::Standard if self.shape == ShapeType::RhombicDodecahedron => {
                    anchor::encode(sign_vector(self.anchor_dir) + new_delta)
                }
                MovePlan::Standard => self.adc,
                MovePlan::Catom {
                    face: CatomFace::Triangle,
                    ..
                } => {
                    TRIANGLE_FACE_FLAG
                        + anchor::encode(sign_vector(self.anchor_dir) - self.delta_pos)
                }
                MovePlan::Catom {
                    face: CatomFace::Square,
                    bump_axis,
                } => match (self.steps.first(), self.steps.get(1)) {
                    (Some(first), Some(second)) => {
                        let back = -rotate_about(
                            second.delta_pos,
                            first.rot_axis(),
                            -self.constants.dihedral,
                        );
                        anchor::encode(back + bump_axis)
                    }
                    _ => self.adc,
                },
            }
        };

        Self::with_constants(
            self.id,
            new_adc,
            new_delta,
            self.kind,
            self.shape,
            self.constants,
        )
    }

    /// Transform contributed by this move at eased progress `eased`.
    ///
    /// Completed steps contribute their full transform, the step whose time
    /// bracket contains `eased` contributes a partial one, and later steps
    /// are skipped. Does not include the module's committed rotation.
    #[must_use]
    pub fn transform_at(&self, eased: f64) -> DMat4 {
        let mut transform = DMat4::IDENTITY;
        let mut prev_pct = 0.0;
        for step in &self.steps {
            let span = step.max_pct - prev_pct;
            let step_pct = if span > 0.0 {
                (eased.min(step.max_pct) - prev_pct) / span
            } else {
                1.0
            };
            transform *= step.transform(step_pct);
            if eased < step.max_pct {
                break;
            }
            prev_pct = step.max_pct;
        }
        transform
    }

    /// Module this move applies to.
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Anchor direction code.
    #[must_use]
    pub fn adc(&self) -> AnchorCode {
        self.adc
    }

    /// Decoded (unit) anchor direction; zero for slides and unknown codes.
    #[must_use]
    pub fn anchor_dir(&self) -> DVec3 {
        self.anchor_dir
    }

    /// Total lattice displacement.
    #[must_use]
    pub fn delta_pos(&self) -> DVec3 {
        self.delta_pos
    }

    /// Pivot, slide, or monkey move.
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Shape of the moving module.
    #[must_use]
    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    /// Shape constants captured at construction.
    #[must_use]
    pub fn constants(&self) -> ShapeConstants {
        self.constants
    }

    /// Algorithm that produced the steps.
    #[must_use]
    pub fn plan(&self) -> MovePlan {
        self.plan
    }

    /// Out-of-plane axis of a catom pivot.
    #[must_use]
    pub fn bump_axis(&self) -> Option<DVec3> {
        match self.plan {
            MovePlan::Catom { bump_axis, .. } => Some(bump_axis),
            MovePlan::Standard | MovePlan::CornerSlide => None,
        }
    }

    /// Animation segments, in time order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Problems found while building the move.
    #[must_use]
    pub fn anomalies(&self) -> &[MoveAnomaly] {
        &self.anomalies
    }
}
