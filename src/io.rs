//! CSV input and output for trajectory tables.
//!
//! Two on-disk shapes exist: the raw export written by the capture system
//! (metadata sections followed by a `Trajectories` block) and the
//! preprocessed table this crate writes, with the pandas-style column
//! convention `X,X.1,..,X.19,Y,..,Y.19,Z,..,Z.19`.

use crate::error::{Result, TrajectoryError};
use crate::topology::MARKER_COUNT;
use crate::trajectory::{Frame, FrameRange, Trajectory, AXES};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const AXIS_LETTERS: [&str; AXES] = ["X", "Y", "Z"];

/// Column name for a marker's coordinate: the first marker is unnumbered,
/// the rest carry a `.1`..`.19` suffix.
#[must_use]
pub fn column_name(axis: usize, marker: usize) -> String {
    if marker == 0 {
        AXIS_LETTERS[axis].to_string()
    } else {
        format!("{}.{marker}", AXIS_LETTERS[axis])
    }
}

/// The full preprocessed header: all x columns, then y, then z.
#[must_use]
pub fn preprocessed_header() -> Vec<String> {
    let mut header = Vec::with_capacity(AXES * MARKER_COUNT);
    for axis in 0..AXES {
        for marker in 0..MARKER_COUNT {
            header.push(column_name(axis, marker));
        }
    }
    header
}

/// Read a preprocessed trajectory CSV, keeping only frames inside `range`.
///
/// # Errors
///
/// [`TrajectoryError::Schema`] when an expected column is missing,
/// [`TrajectoryError::DataFormat`] when a coordinate fails to parse.
pub fn read_preprocessed(path: impl AsRef<Path>, range: FrameRange) -> Result<Trajectory> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    // Map every expected column to its position in this file's header.
    let headers = reader.headers()?.clone();
    let mut positions = [[0usize; MARKER_COUNT]; AXES];
    for axis in 0..AXES {
        for marker in 0..MARKER_COUNT {
            let name = column_name(axis, marker);
            positions[axis][marker] = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TrajectoryError::schema(&name))?;
        }
    }

    let mut frames = Vec::new();
    for (row, record) in reader.records().enumerate() {
        if !range.contains(row) {
            continue;
        }
        let record = record?;
        let mut frame: Frame = [[0.0; AXES]; MARKER_COUNT];
        for axis in 0..AXES {
            for marker in 0..MARKER_COUNT {
                let field = record.get(positions[axis][marker]).ok_or_else(|| {
                    TrajectoryError::data_format(row, "row shorter than header")
                })?;
                frame[marker][axis] = field.trim().parse().map_err(|_| {
                    TrajectoryError::data_format(
                        row,
                        format!("bad value {field:?} in column {}", column_name(axis, marker)),
                    )
                })?;
            }
        }
        frames.push(frame);
    }
    debug!("read {} frames from {}", frames.len(), path.display());
    Ok(Trajectory::new(frames))
}

/// Write a trajectory as a preprocessed CSV.
///
/// The whole table is serialized in memory first, so a failure never leaves
/// a partially written file behind.
pub fn write_preprocessed(path: impl AsRef<Path>, traj: &Trajectory) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(preprocessed_header())?;
    for frame in traj.frames() {
        let mut record = Vec::with_capacity(AXES * MARKER_COUNT);
        for axis in 0..AXES {
            for marker in frame.iter() {
                record.push(marker[axis].to_string());
            }
        }
        writer.write_record(record)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| TrajectoryError::Io(std::io::Error::other(e.to_string())))?;
    std::fs::write(path, buffer)?;
    debug!("wrote {} frames to {}", traj.len(), path.display());
    Ok(())
}

/// Read the `Trajectories` block of a raw capture-system export.
///
/// Everything up to the `Trajectories` marker line is ignored. The block
/// then holds a capture-rate line, a marker-names line, the column header
/// (`Frame,Sub Frame,X,Y,Z,...`), a units line, and the data rows, whose
/// first two fields are dropped. Reading stops at the first blank line.
///
/// # Errors
///
/// [`TrajectoryError::DataFormat`] when the section structure or a data row
/// is malformed, [`TrajectoryError::Schema`] when fewer than 20 markers are
/// present.
pub fn read_raw_export(path: impl AsRef<Path>) -> Result<Trajectory> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines().enumerate();

    // Skip to the trajectories section.
    loop {
        let Some((_, line)) = lines.next() else {
            return Err(TrajectoryError::data_format(0, "no Trajectories section"));
        };
        if line?.split(',').next() == Some("Trajectories") {
            break;
        }
    }

    // Capture rate and marker-names lines carry nothing the transforms need.
    for expected in ["capture rate", "marker names"] {
        match lines.next() {
            Some((_, line)) => {
                line?;
            }
            None => {
                return Err(TrajectoryError::data_format(
                    0,
                    format!("truncated Trajectories section: missing {expected} line"),
                ))
            }
        }
    }

    let Some((header_row, header)) = lines.next() else {
        return Err(TrajectoryError::data_format(
            0,
            "truncated Trajectories section: missing column header",
        ));
    };
    let header = header?;
    let columns: Vec<&str> = header.split(',').collect();
    let coord_columns = columns.len().saturating_sub(2);
    if coord_columns / AXES < MARKER_COUNT {
        return Err(TrajectoryError::schema(column_name(
            0,
            coord_columns / AXES,
        )));
    }
    for (i, &label) in columns.iter().skip(2).take(AXES).enumerate() {
        if label.trim() != AXIS_LETTERS[i] {
            return Err(TrajectoryError::data_format(
                header_row,
                format!("unexpected coordinate header {label:?}"),
            ));
        }
    }

    // Units line.
    match lines.next() {
        Some((_, line)) => {
            line?;
        }
        None => {
            return Err(TrajectoryError::data_format(
                header_row,
                "truncated Trajectories section: missing units line",
            ))
        }
    }

    let mut frames = Vec::new();
    for (row, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 + AXES * MARKER_COUNT {
            return Err(TrajectoryError::data_format(row, "truncated data row"));
        }
        let mut frame: Frame = [[0.0; AXES]; MARKER_COUNT];
        for marker in 0..MARKER_COUNT {
            for axis in 0..AXES {
                let field = fields[2 + marker * AXES + axis];
                frame[marker][axis] = field.trim().parse().map_err(|_| {
                    TrajectoryError::data_format(
                        row,
                        format!("bad value {field:?} for marker {marker}"),
                    )
                })?;
            }
        }
        frames.push(frame);
    }
    debug!(
        "read {} frames from raw export {}",
        frames.len(),
        path.display()
    );
    Ok(Trajectory::new(frames))
}
