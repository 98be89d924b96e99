//! In-memory trajectory table: frames of 20 markers with 3D positions.

use crate::topology::MARKER_COUNT;

/// Coordinate axes, indexed 0 = x, 1 = y, 2 = z.
pub const AXES: usize = 3;

/// Extra room added to the x/y plotting limits so markers never touch the
/// frame edge, in millimeters. The z limits carry no margin.
pub const PLOT_MARGIN_MM: f64 = 100.0;

/// One time sample: every marker's position in millimeters, in the fixed
/// template column order.
pub type Frame = [[f64; AXES]; MARKER_COUNT];

/// Inclusive value range on a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// Empty range that any `include` call will replace.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Grow the range to cover `v`.
    pub fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// True when `v` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Symmetric axis limits for plotting, stable under the scrambling
/// transforms up to the declared margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Half-width of the x axis; limits are `[-x, x]`.
    pub x: f64,
    /// Half-width of the y axis; limits are `[-y, y]`.
    pub y: f64,
    /// Half-width of the z axis; limits are `[-z, z]`.
    pub z: f64,
}

/// An ordered sequence of frames at a fixed capture rate.
///
/// The engine is stateless: a trajectory is loaded fresh for each operation,
/// transformed in place, and discarded after the output is written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    frames: Vec<Frame>,
}

impl Trajectory {
    /// Wrap a frame table.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frames are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the frame table.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Mutably borrow the frame table.
    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Per-axis extrema over all markers and all frames.
    #[must_use]
    pub fn bounds(&self) -> [AxisBounds; AXES] {
        let mut bounds = [AxisBounds::empty(); AXES];
        for frame in &self.frames {
            for marker in frame {
                for (axis, b) in bounds.iter_mut().enumerate() {
                    b.include(marker[axis]);
                }
            }
        }
        bounds
    }

    /// Per-axis extrema over all markers of a single frame.
    #[must_use]
    pub fn frame_bounds(&self, index: usize) -> [AxisBounds; AXES] {
        let mut bounds = [AxisBounds::empty(); AXES];
        for marker in &self.frames[index] {
            for (axis, b) in bounds.iter_mut().enumerate() {
                b.include(marker[axis]);
            }
        }
        bounds
    }

    /// Time-averaged centroid of one marker across all frames.
    #[must_use]
    pub fn marker_centroid(&self, marker: usize) -> [f64; AXES] {
        let mut sum = [0.0; AXES];
        for frame in &self.frames {
            for (axis, s) in sum.iter_mut().enumerate() {
                *s += frame[marker][axis];
            }
        }
        let n = self.frames.len().max(1) as f64;
        sum.map(|s| s / n)
    }

    /// Symmetric plotting limits: the larger coordinate magnitude per axis,
    /// with [`PLOT_MARGIN_MM`] added on x and y.
    #[must_use]
    pub fn plot_bounds(&self) -> PlotBounds {
        let bounds = self.bounds();
        let reach = |b: AxisBounds| b.min.abs().max(b.max.abs());
        PlotBounds {
            x: reach(bounds[0]) + PLOT_MARGIN_MM,
            y: reach(bounds[1]) + PLOT_MARGIN_MM,
            z: reach(bounds[2]),
        }
    }
}

/// Frame selection for reading a subset of a preprocessed file, mirroring
/// the capture tooling's frame-range parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameRange {
    /// All frames in the file.
    #[default]
    All,
    /// The first `n` frames.
    First(usize),
    /// Frames `start..end` (end exclusive).
    Span { start: usize, end: usize },
}

impl FrameRange {
    /// True when the data row at `index` (0-based) falls inside the range.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Self::All => true,
            Self::First(n) => index < n,
            Self::Span { start, end } => start <= index && index < end,
        }
    }
}
