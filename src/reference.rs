//! Coordinate re-referencing: mean centering and shoulder-axis rotation.
//!
//! Shoulder referencing turns a walk around the capture volume into a
//! treadmill-style walk by pinning the neck to the origin and rotating each
//! frame so the neck–shoulder axis points the same way throughout.

use crate::progress::{report_stride, Progress};
use crate::topology::{LEFT_SHOULDER, NECK};
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};

/// Shoulder y-magnitudes below this are treated as degenerate and pin the
/// frame angle to `pi/2`. Reference-fit constant, in millimeters.
pub const SHOULDER_Y_DEGENERATE_MM: f64 = 10.0;

/// Previous-frame angle at or above this marks a candidate third-quadrant
/// wrap. Reference-fit constant, in radians.
pub const QUADRANT3_PREV_MIN: f64 = 3.0;

/// Current-frame angle at or below this (with the previous angle past
/// [`QUADRANT3_PREV_MIN`]) confirms a third-quadrant wrap. Reference-fit
/// constant, in radians.
pub const QUADRANT3_CURR_MAX: f64 = 1.6;

/// Which reference frame the preprocessed output uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferenceMode {
    /// Keep the capture system's coordinates.
    #[default]
    None,
    /// Per frame, move the 20-marker centroid to the origin.
    Mean,
    /// Per frame, move the neck to the origin and rotate about z so the
    /// left shoulder lies in a canonical direction.
    Shoulder,
}

/// Re-reference a trajectory in place.
pub fn reference(traj: &mut Trajectory, mode: ReferenceMode, progress: &mut impl Progress) {
    match mode {
        ReferenceMode::None => {}
        ReferenceMode::Mean => center_on_mean(traj, progress),
        ReferenceMode::Shoulder => center_on_shoulder(traj, progress),
    }
}

fn center_on_mean(traj: &mut Trajectory, progress: &mut impl Progress) {
    let total = traj.len();
    for (i, frame) in traj.frames_mut().iter_mut().enumerate() {
        for axis in 0..3 {
            let mean =
                frame.iter().map(|m| m[axis]).sum::<f64>() / frame.len() as f64;
            for marker in frame.iter_mut() {
                marker[axis] -= mean;
            }
        }
        report_stride(progress, i + 1, total);
    }
}

fn center_on_shoulder(traj: &mut Trajectory, progress: &mut impl Progress) {
    let total = traj.len();

    // Translation pass: neck to origin.
    for (i, frame) in traj.frames_mut().iter_mut().enumerate() {
        let neck = frame[NECK];
        for marker in frame.iter_mut() {
            for axis in 0..3 {
                marker[axis] -= neck[axis];
            }
        }
        report_stride(progress, i + 1, total);
    }

    // Rotation pass: align the left-shoulder direction, carrying the
    // previous frame's angle as a continuity hint for quadrant correction.
    let mut prev_theta = None;
    for (i, frame) in traj.frames_mut().iter_mut().enumerate() {
        let [sx, sy, _] = frame[LEFT_SHOULDER];
        let theta = frame_angle(sx, sy, prev_theta);
        let (sin, cos) = (-theta).sin_cos();
        for marker in frame.iter_mut() {
            let (x, y) = (marker[0], marker[1]);
            marker[0] = x * cos - y * sin;
            marker[1] = x * sin + y * cos;
        }
        prev_theta = Some(theta);
        report_stride(progress, i + 1, total);
    }
}

/// Rotation angle for one frame from the left shoulder's x/y position.
///
/// `arctan(-x/y)` only resolves the first and fourth quadrants; the hint
/// from the previous frame disambiguates the second and third. Frame 0 has
/// no hint and gets no correction.
fn frame_angle(x: f64, y: f64, prev: Option<f64>) -> f64 {
    let mut theta = if y.abs() < SHOULDER_Y_DEGENERATE_MM {
        std::f64::consts::FRAC_PI_2
    } else {
        (-x / y).atan()
    };
    if let Some(prev) = prev {
        if theta <= 0.0 && prev >= 0.0 && prev < std::f64::consts::PI {
            // Second quadrant.
            theta = std::f64::consts::PI - theta.abs();
        } else if theta > 0.0 && prev >= QUADRANT3_PREV_MIN && theta <= QUADRANT3_CURR_MAX {
            // Third quadrant.
            theta += std::f64::consts::PI;
        }
    }
    theta
}
