//! Scrambling transforms that destroy the percept of coherent biological
//! motion while preserving each marker's own motion pattern.
//!
//! All three variants relocate whole marker trajectories by a fixed offset;
//! none of them touch the frame-to-frame deltas within a marker.

use crate::error::{Result, TrajectoryError};
use crate::topology::{ARM_PAIRS, LEG_PAIRS, MARKER_COUNT, PAIR_COUNT, SCRAMBLE_PAIRS};
use crate::trajectory::{Trajectory, AXES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default retry budget for the constrained rejection-sampling loop.
pub const DEFAULT_MAX_RETRIES: usize = 10_000;

/// Which scrambling strategy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrambleKind {
    /// Offsets drawn from the frame-0 extrema, unconstrained afterwards.
    Free,
    /// Offsets rejection-sampled so the result stays inside the global
    /// extrema at every frame.
    Constrained,
    /// Anatomical pair swap after Kim et al. (2015).
    #[default]
    Pairwise,
}

/// Tunables for the scrambling transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambleOptions {
    /// Retry budget per marker and axis for constrained scrambling.
    /// Uncapped rejection sampling can spin forever on infeasible input;
    /// exhausting this budget fails with
    /// [`TrajectoryError::ConstraintUnsatisfiable`] instead.
    pub max_retries: usize,
}

impl Default for ScrambleOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Dispatch to the selected scrambling strategy.
pub fn scramble(
    traj: &mut Trajectory,
    kind: ScrambleKind,
    options: &ScrambleOptions,
    rng: &mut impl Rng,
) -> Result<()> {
    match kind {
        ScrambleKind::Free => {
            scramble_free(traj, rng);
            Ok(())
        }
        ScrambleKind::Constrained => scramble_constrained(traj, options, rng),
        ScrambleKind::Pairwise => scramble_pairwise(traj, rng),
    }
}

/// Free scrambling: one random offset per marker, drawn per axis from the
/// extrema of frame 0 across all markers, subtracted from every frame.
///
/// Only the initial frame constrains the layout, so later frames may roam
/// slightly beyond the original motion area.
pub fn scramble_free(traj: &mut Trajectory, rng: &mut impl Rng) {
    if traj.is_empty() {
        return;
    }
    let bounds = traj.frame_bounds(0);
    let mut offsets = [[0.0; AXES]; MARKER_COUNT];
    for offset in &mut offsets {
        for (axis, o) in offset.iter_mut().enumerate() {
            *o = rng.random_range(bounds[axis].min..=bounds[axis].max);
        }
    }
    for frame in traj.frames_mut() {
        for (marker, offset) in frame.iter_mut().zip(&offsets) {
            for axis in 0..AXES {
                marker[axis] -= offset[axis];
            }
        }
    }
}

/// Constrained scrambling: per marker and axis, rejection-sample an offset
/// from the global extrema range until the marker's whole trajectory plus
/// the offset stays inside those extrema, then add it to every frame.
///
/// # Errors
///
/// [`TrajectoryError::ConstraintUnsatisfiable`] when a marker/axis exhausts
/// the retry budget. No frame is modified in that case.
pub fn scramble_constrained(
    traj: &mut Trajectory,
    options: &ScrambleOptions,
    rng: &mut impl Rng,
) -> Result<()> {
    if traj.is_empty() {
        return Ok(());
    }
    let bounds = traj.bounds();
    let mut offsets = [[0.0; AXES]; MARKER_COUNT];
    for (marker, offset) in offsets.iter_mut().enumerate() {
        for axis in 0..AXES {
            let range = bounds[axis];
            let fits = |o: f64| {
                traj.frames()
                    .iter()
                    .all(|frame| range.contains(frame[marker][axis] + o))
            };
            let mut accepted = None;
            for _ in 0..options.max_retries {
                let candidate = rng.random_range(range.min..=range.max);
                if fits(candidate) {
                    accepted = Some(candidate);
                    break;
                }
            }
            offset[axis] = accepted.ok_or(TrajectoryError::ConstraintUnsatisfiable {
                marker,
                axis,
                retries: options.max_retries,
            })?;
        }
    }
    for frame in traj.frames_mut() {
        for (marker, offset) in frame.iter_mut().zip(&offsets) {
            for axis in 0..AXES {
                marker[axis] += offset[axis];
            }
        }
    }
    Ok(())
}

/// Pairwise scrambling after Kim et al. (2015), doi:10.1167/15.11.13.
///
/// Draws a constrained permutation of the 10 anatomical pair slots, reverses
/// each pair's internal order, and moves every marker by the difference of
/// time-averaged centroids between it and the marker it swaps with. Within-
/// limb dynamics survive; the coherent body configuration does not.
///
/// # Errors
///
/// [`TrajectoryError::Permutation`] when the mapping fails to assign all 20
/// markers exactly once.
pub fn scramble_pairwise(traj: &mut Trajectory, rng: &mut impl Rng) -> Result<()> {
    let mapping = pairwise_mapping(rng)?;
    let centroids: Vec<[f64; AXES]> = (0..MARKER_COUNT)
        .map(|m| traj.marker_centroid(m))
        .collect();
    let mut displacements = [[0.0; AXES]; MARKER_COUNT];
    for (marker, d) in displacements.iter_mut().enumerate() {
        for axis in 0..AXES {
            d[axis] = centroids[mapping[marker]][axis] - centroids[marker][axis];
        }
    }
    for frame in traj.frames_mut() {
        for (marker, d) in frame.iter_mut().zip(&displacements) {
            for axis in 0..AXES {
                marker[axis] += d[axis];
            }
        }
    }
    Ok(())
}

/// Draw the marker-to-marker swap mapping for pairwise scrambling.
///
/// The 10 pair slots are shuffled, then re-shuffled incrementally: an arm
/// slot still holding an arm pair, or a leg slot still holding a leg pair,
/// triggers a reshuffle of the remaining tail. Each permuted pair is then
/// reversed internally to form the new pair.
///
/// # Errors
///
/// [`TrajectoryError::Permutation`] if the resulting mapping is not a
/// complete assignment of all 20 markers.
pub fn pairwise_mapping(rng: &mut impl Rng) -> Result<[usize; MARKER_COUNT]> {
    let mut slots: [usize; PAIR_COUNT] = std::array::from_fn(|i| i);
    slots.shuffle(rng);
    for i in 0..PAIR_COUNT {
        if i < ARM_PAIRS {
            if slots[i] < ARM_PAIRS {
                slots[i..].shuffle(rng);
            }
        } else if i < ARM_PAIRS + LEG_PAIRS
            && (ARM_PAIRS..ARM_PAIRS + LEG_PAIRS).contains(&slots[i])
        {
            slots[i..].shuffle(rng);
        }
    }

    let mut mapping = [usize::MAX; MARKER_COUNT];
    let mut assigned = 0;
    for (slot, &src) in slots.iter().enumerate() {
        let [a, b] = SCRAMBLE_PAIRS[slot];
        let [c, d] = SCRAMBLE_PAIRS[src];
        // The permuted pair is reversed, so the slot's first marker takes
        // the source pair's second position and vice versa.
        for (from, to) in [(a, d), (b, c)] {
            if mapping[from] != usize::MAX {
                return Err(TrajectoryError::Permutation { assigned });
            }
            mapping[from] = to;
            assigned += 1;
        }
    }
    if assigned != MARKER_COUNT || mapping.iter().any(|&m| m == usize::MAX) {
        return Err(TrajectoryError::Permutation { assigned });
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn mapping_is_a_complete_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mapping = pairwise_mapping(&mut rng).unwrap();
            let mut seen = [false; MARKER_COUNT];
            for &target in &mapping {
                assert!(!seen[target]);
                seen[target] = true;
            }
        }
    }

    #[test]
    fn mapping_swaps_whole_pairs() {
        // Whatever the permutation, the two markers of a slot always map
        // onto the two markers of one source pair, crosswise.
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..50 {
            let mapping = pairwise_mapping(&mut rng).unwrap();
            for [a, b] in SCRAMBLE_PAIRS {
                let src = SCRAMBLE_PAIRS
                    .iter()
                    .position(|&[c, d]| mapping[a] == d && mapping[b] == c);
                assert!(src.is_some(), "markers {a},{b} split across pairs");
            }
        }
    }
}
