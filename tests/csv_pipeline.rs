//! CSV round-trips and the file-to-file pipeline operations.

use approx::assert_abs_diff_eq;
use mocap_pld::io::{preprocessed_header, read_preprocessed, read_raw_export, write_preprocessed};
use mocap_pld::{
    preprocess, scramble_file, Frame, FrameRange, ReferenceMode, ScrambleKind, ScrambleOptions,
    Silent, Trajectory, TrajectoryError, MARKER_COUNT,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Write as _;
use std::path::Path;
use tempfile::tempdir;

fn generate_walker(frames: usize) -> Trajectory {
    let frames: Vec<Frame> = (0..frames)
        .map(|t| {
            let t = t as f64;
            let mut frame: Frame = [[0.0; 3]; MARKER_COUNT];
            for (m, marker) in frame.iter_mut().enumerate() {
                let m_f = m as f64;
                *marker = [
                    (m_f - 9.5) * 40.0 + 5.0 * (t / 10.0 + m_f).sin(),
                    (m_f - 9.5) * 25.0 + 3.0 * (t / 7.0 + m_f).cos(),
                    (m_f - 9.5) * 30.0,
                ];
            }
            frame
        })
        .collect();
    Trajectory::new(frames)
}

/// Build a raw capture export in the system's section layout.
fn write_raw_export(path: &Path, traj: &Trajectory) {
    let mut text = String::new();
    text.push_str("Objects\n0\n\n");
    text.push_str("Trajectories\n100\n");
    // Marker-names line.
    text.push(',');
    for m in 0..MARKER_COUNT {
        let _ = write!(text, ",Subject:M{m},,");
    }
    text.push('\n');
    // Column header with repeated X,Y,Z triplets.
    text.push_str("Frame,Sub Frame");
    for _ in 0..MARKER_COUNT {
        text.push_str(",X,Y,Z");
    }
    text.push('\n');
    // Units line.
    text.push(',');
    for _ in 0..MARKER_COUNT {
        text.push_str(",mm,mm,mm");
    }
    text.push('\n');
    for (i, frame) in traj.frames().iter().enumerate() {
        let _ = write!(text, "{},0", i + 1);
        for marker in frame {
            let _ = write!(text, ",{},{},{}", marker[0], marker[1], marker[2]);
        }
        text.push('\n');
    }
    text.push('\n');
    std::fs::write(path, text).unwrap();
}

#[test]
fn preprocessed_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("walk.csv");
    let traj = generate_walker(40);

    write_preprocessed(&path, &traj).unwrap();
    let loaded = read_preprocessed(&path, FrameRange::All).unwrap();

    assert_eq!(loaded.len(), traj.len());
    for (a, b) in traj.frames().iter().zip(loaded.frames()) {
        for (ma, mb) in a.iter().zip(b.iter()) {
            for axis in 0..3 {
                assert_abs_diff_eq!(ma[axis], mb[axis], epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn frame_ranges_select_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("walk.csv");
    let traj = generate_walker(40);
    write_preprocessed(&path, &traj).unwrap();

    let first = read_preprocessed(&path, FrameRange::First(8)).unwrap();
    assert_eq!(first.len(), 8);
    assert_eq!(first.frames()[0], traj.frames()[0]);

    let span = read_preprocessed(&path, FrameRange::Span { start: 10, end: 25 }).unwrap();
    assert_eq!(span.len(), 15);
    assert_eq!(span.frames()[0], traj.frames()[10]);
}

#[test]
fn missing_column_is_a_schema_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");

    // Drop the last column from an otherwise valid file.
    let header: Vec<String> = preprocessed_header();
    let truncated = header[..59].join(",");
    let row = vec!["0.0"; 59].join(",");
    std::fs::write(&path, format!("{truncated}\n{row}\n")).unwrap();

    let err = read_preprocessed(&path, FrameRange::All).unwrap_err();
    match err {
        TrajectoryError::Schema { column } => assert_eq!(column, "Z.19"),
        other => panic!("expected schema error, got {other}"),
    }
}

#[test]
fn unparseable_value_is_a_data_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");

    let header = preprocessed_header().join(",");
    let good = vec!["1.5"; 60].join(",");
    let mut bad_fields = vec!["1.5"; 60];
    bad_fields[7] = "oops";
    let bad = bad_fields.join(",");
    std::fs::write(&path, format!("{header}\n{good}\n{bad}\n")).unwrap();

    let err = read_preprocessed(&path, FrameRange::All).unwrap_err();
    match err {
        TrajectoryError::DataFormat { row, .. } => assert_eq!(row, 1),
        other => panic!("expected data-format error, got {other}"),
    }
}

#[test]
fn raw_export_parses_trajectories_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    let traj = generate_walker(12);
    write_raw_export(&path, &traj);

    let loaded = read_raw_export(&path).unwrap();
    assert_eq!(loaded.len(), 12);
    for (a, b) in traj.frames().iter().zip(loaded.frames()) {
        for (ma, mb) in a.iter().zip(b.iter()) {
            for axis in 0..3 {
                assert_abs_diff_eq!(ma[axis], mb[axis], epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn raw_export_without_section_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    std::fs::write(&path, "Objects\n0\n\n1,2,3\n").unwrap();

    let err = read_raw_export(&path).unwrap_err();
    assert!(matches!(err, TrajectoryError::DataFormat { .. }));
}

#[test]
fn raw_export_with_too_few_markers_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    let mut text = String::from("Trajectories\n100\n,names\nFrame,Sub Frame");
    for _ in 0..10 {
        text.push_str(",X,Y,Z");
    }
    text.push_str("\n,,mm\n");
    std::fs::write(&path, text).unwrap();

    let err = read_raw_export(&path).unwrap_err();
    assert!(matches!(err, TrajectoryError::Schema { .. }));
}

#[test]
fn preprocess_pipeline_centers_output() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw.csv");
    let out = dir.path().join("pre.csv");
    write_raw_export(&raw, &generate_walker(30));

    preprocess(&raw, &out, ReferenceMode::Mean, &mut Silent).unwrap();

    let result = read_preprocessed(&out, FrameRange::All).unwrap();
    assert_eq!(result.len(), 30);
    for frame in result.frames() {
        for axis in 0..3 {
            let mean: f64 = frame.iter().map(|m| m[axis]).sum::<f64>() / MARKER_COUNT as f64;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn scramble_pipeline_respects_frame_range_and_bounds() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("pre.csv");
    let out = dir.path().join("scrambled.csv");
    let traj = generate_walker(60);
    write_preprocessed(&input, &traj).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(23);
    scramble_file(
        &input,
        &out,
        ScrambleKind::Constrained,
        FrameRange::Span { start: 5, end: 45 },
        &ScrambleOptions::default(),
        &mut rng,
    )
    .unwrap();

    let selected = read_preprocessed(&input, FrameRange::Span { start: 5, end: 45 }).unwrap();
    let bounds = selected.bounds();
    let result = read_preprocessed(&out, FrameRange::All).unwrap();
    assert_eq!(result.len(), 40);
    for frame in result.frames() {
        for marker in frame {
            for (axis, b) in bounds.iter().enumerate() {
                assert!(b.min - 1e-9 <= marker[axis] && marker[axis] <= b.max + 1e-9);
            }
        }
    }
}

#[test]
fn failed_scramble_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("pre.csv");
    let out = dir.path().join("scrambled.csv");

    // Tight far-from-origin cluster: constrained placement is impossible.
    let mut frame: Frame = [[0.0; 3]; MARKER_COUNT];
    for (m, marker) in frame.iter_mut().enumerate() {
        *marker = [5000.0 + m as f64, 5000.0, 5000.0];
    }
    write_preprocessed(&input, &Trajectory::new(vec![frame; 4])).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(29);
    let err = scramble_file(
        &input,
        &out,
        ScrambleKind::Constrained,
        FrameRange::All,
        &ScrambleOptions { max_retries: 50 },
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TrajectoryError::ConstraintUnsatisfiable { .. }
    ));
    assert!(!out.exists(), "partial output left behind");
}
