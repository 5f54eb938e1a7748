//! Anchor-direction codes.
//!
//! A move pivots against a neighboring module (or face); the direction toward
//! that neighbor is packed into a small signed integer, the *anchor direction
//! code* (ADC). Each nonzero axis contributes one decimal digit, x/y/z as
//! 1/2/3 for positive and 4/5/6 for negative components, in axis order. The
//! thousands place and the sign of the code carry extra move flags (catom
//! triangular-face moves and corner slides) and are ignored when decoding.

use glam::DVec3;

use crate::util::lattice::{sign_vector, LATTICE_EPSILON};

/// Integer anchor direction code.
pub type AnchorCode = i32;

/// Code of a generic slide with no anchor.
pub const GENERIC_SLIDE: AnchorCode = 0;

/// Offset added to catom codes that pivot across a triangular face.
pub const TRIANGLE_FACE_FLAG: AnchorCode = 1000;

/// Every anchor code with a decode table entry, paired with its direction
/// (before normalization).
///
/// Codes 1–6 are cube face normals; the two-axis codes are rhombic
/// dodecahedron face normals in the xy, xz and yz planes.
pub const ANCHOR_TABLE: [(AnchorCode, [f64; 3]); 18] = [
    (1, [1.0, 0.0, 0.0]),
    (2, [0.0, 1.0, 0.0]),
    (3, [0.0, 0.0, 1.0]),
    (4, [-1.0, 0.0, 0.0]),
    (5, [0.0, -1.0, 0.0]),
    (6, [0.0, 0.0, -1.0]),
    (12, [1.0, 1.0, 0.0]),
    (15, [1.0, -1.0, 0.0]),
    (42, [-1.0, 1.0, 0.0]),
    (45, [-1.0, -1.0, 0.0]),
    (13, [1.0, 0.0, 1.0]),
    (16, [1.0, 0.0, -1.0]),
    (43, [-1.0, 0.0, 1.0]),
    (46, [-1.0, 0.0, -1.0]),
    (23, [0.0, 1.0, 1.0]),
    (26, [0.0, 1.0, -1.0]),
    (53, [0.0, -1.0, 1.0]),
    (56, [0.0, -1.0, -1.0]),
];

/// Encode a direction as an anchor code.
///
/// The direction is snapped to a sign vector first, so any vector pointing
/// into the same lattice octant produces the same code. The zero vector
/// encodes to [`GENERIC_SLIDE`].
#[must_use]
pub fn encode(direction: DVec3) -> AnchorCode {
    let signs = sign_vector(direction);
    signs
        .to_array()
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.abs() > LATTICE_EPSILON)
        .fold(0, |code, (axis, c)| {
            let digit = axis as AnchorCode + 1 + if c < 0.0 { 3 } else { 0 };
            code * 10 + digit
        })
}

/// Look up the unit direction for a code.
///
/// Returns `Some(DVec3::ZERO)` for a generic slide and `None` for a code with
/// no table entry.
#[must_use]
pub fn lookup(adc: AnchorCode) -> Option<DVec3> {
    let key = (adc.unsigned_abs() % 1000) as AnchorCode;
    if key == GENERIC_SLIDE {
        return Some(DVec3::ZERO);
    }
    ANCHOR_TABLE
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, dir)| DVec3::from_array(*dir).normalize())
}

/// Whether `adc` decodes through the table (generic slides included).
#[must_use]
pub fn is_known(adc: AnchorCode) -> bool {
    lookup(adc).is_some()
}

/// Decode a code into a unit direction.
///
/// Unknown codes decode to the zero vector, which callers treat as a generic
/// slide; a warning is logged.
#[must_use]
pub fn decode(adc: AnchorCode) -> DVec3 {
    lookup(adc).unwrap_or_else(|| {
        log::warn!("unknown anchor direction code {adc}; treating as slide");
        DVec3::ZERO
    })
}
