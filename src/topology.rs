//! Fixed marker-set topology for the 20-point humanoid template.
//!
//! All transforms in this crate assume the capture template's fixed column
//! order. The tables here name that order once, so marker semantics are
//! discoverable and testable independently of the transform code.

/// Number of markers per frame.
pub const MARKER_COUNT: usize = 20;

/// Marker index of the neck, the translation origin for shoulder
/// re-referencing.
pub const NECK: usize = 4;

/// Marker index of the left shoulder, which defines the rotation target
/// direction for shoulder re-referencing.
pub const LEFT_SHOULDER: usize = 5;

/// Human-readable labels for the template's marker indices.
pub const MARKER_LABELS: [&str; MARKER_COUNT] = [
    "right wrist",     // 0
    "left wrist",      // 1
    "right elbow",     // 2
    "left elbow",      // 3
    "neck",            // 4
    "left shoulder",   // 5
    "right upper arm", // 6
    "right shoulder",  // 7
    "left upper arm",  // 8
    "left arm root",   // 9
    "right hip",       // 10
    "right knee",      // 11
    "right ankle",     // 12
    "right foot",      // 13
    "left hip",        // 14
    "left knee",       // 15
    "left ankle",      // 16
    "left foot",       // 17
    "head front",      // 18
    "head back",       // 19
];

/// Anatomical connections drawn as sticks between point-light dots.
///
/// Used only by renderers; the trajectory transforms never read this table.
pub const LINKS: [(usize, usize); 22] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 2),
    (1, 3),
    (4, 5),
    (4, 10),
    (5, 6),
    (5, 18),
    (6, 7),
    (6, 14),
    (7, 8),
    (8, 9),
    (10, 11),
    (10, 14),
    (11, 12),
    (12, 13),
    (14, 15),
    (15, 16),
    (16, 17),
    (18, 19),
    (19, 5),
];

/// Number of anatomical pairs used by pairwise scrambling.
pub const PAIR_COUNT: usize = 10;

/// Count of pair slots holding arm pairs (slots `0..ARM_PAIRS`).
pub const ARM_PAIRS: usize = 4;

/// Count of pair slots holding leg pairs (slots `ARM_PAIRS..ARM_PAIRS + LEG_PAIRS`).
pub const LEG_PAIRS: usize = 4;

/// Fixed partition of the 20 markers into 10 anatomical pairs, following
/// Kim et al. (2015), doi:10.1167/15.11.13.
///
/// Slots 0–3 are arm pairs, 4–7 leg pairs, 8–9 head/shoulder pairs. The
/// pairwise scramble permutes slots but keeps arm and leg slots reshuffled
/// only within their own sub-ranges.
pub const SCRAMBLE_PAIRS: [[usize; 2]; PAIR_COUNT] = [
    [0, 2],
    [1, 3],
    [6, 7],
    [8, 9],
    [10, 11],
    [12, 13],
    [14, 15],
    [16, 17],
    [4, 18],
    [5, 19],
];

/// True when the link table connects markers `a` and `b` in either order.
#[must_use]
pub fn is_linked(a: usize, b: usize) -> bool {
    LINKS
        .iter()
        .any(|&(m, n)| (m, n) == (a, b) || (m, n) == (b, a))
}
