//! File-to-file operations: preprocess a raw export, scramble a
//! preprocessed table.
//!
//! Both operations transform fully in memory and only then write, so a
//! failing run never leaves a partial output file.

use crate::error::Result;
use crate::io;
use crate::progress::Progress;
use crate::reference::{reference, ReferenceMode};
use crate::scramble::{scramble, ScrambleKind, ScrambleOptions};
use crate::trajectory::FrameRange;
use log::info;
use rand::Rng;
use std::path::Path;

/// Read a raw capture export, re-reference it, and write the preprocessed
/// trajectory CSV.
///
/// # Errors
///
/// Propagates schema, data-format, and I/O errors from the CSV layer.
pub fn preprocess(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    mode: ReferenceMode,
    progress: &mut impl Progress,
) -> Result<()> {
    let mut traj = io::read_raw_export(&input)?;
    info!(
        "preprocessing {} frames ({mode:?})",
        traj.len()
    );
    reference(&mut traj, mode, progress);
    io::write_preprocessed(&output, &traj)
}

/// Read a preprocessed CSV (optionally a frame range), scramble it, and
/// write the scrambled table.
///
/// # Errors
///
/// Propagates CSV-layer errors plus [`crate::TrajectoryError::ConstraintUnsatisfiable`]
/// and [`crate::TrajectoryError::Permutation`] from the scrambling step.
pub fn scramble_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    kind: ScrambleKind,
    range: FrameRange,
    options: &ScrambleOptions,
    rng: &mut impl Rng,
) -> Result<()> {
    let mut traj = io::read_preprocessed(&input, range)?;
    info!("scrambling {} frames ({kind:?})", traj.len());
    scramble(&mut traj, kind, options, rng)?;
    io::write_preprocessed(&output, &traj)
}
