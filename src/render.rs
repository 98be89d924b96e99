//! Collaborator contract for point-light-display renderers.
//!
//! Rendering and video encoding live outside this crate; the types here fix
//! the seam a renderer plugs into. The marker dots and the stick edges from
//! [`crate::topology::LINKS`] are all a renderer needs besides the viewing
//! configuration.

use crate::error::Result;
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewing configuration for a rendered clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Elevation (height) viewing angle, degrees.
    pub elevation_deg: f64,
    /// Azimuth (sideways) viewing angle, degrees.
    pub azimuth_deg: f64,
    /// Frames per second of the produced clip.
    pub fps: u32,
    /// Draw the anatomical stick edges between dots.
    pub show_edges: bool,
    /// Brightness (0–1) of the photodetector corner patch used to
    /// synchronize recordings, or `None` for no patch.
    pub detector: Option<f64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            elevation_deg: 0.0,
            azimuth_deg: 0.0,
            fps: 30,
            show_edges: true,
            detector: None,
        }
    }
}

/// Renders a trajectory into a video file.
pub trait Renderer {
    /// Encode `traj` as a clip at `output` under the given view.
    ///
    /// # Errors
    ///
    /// Implementations surface their encoding failures as I/O errors.
    fn render(&mut self, traj: &Trajectory, view: &ViewConfig, output: &Path) -> Result<()>;
}
