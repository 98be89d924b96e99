//! Progress reporting seam for long frame passes.
//!
//! Transform passes report frame counts through this callback interface
//! instead of printing; callers that do not care pass [`Silent`].

/// How many frames pass between consecutive progress reports.
pub const PROGRESS_STRIDE: usize = 100;

/// Receives frame-count updates during a transform pass.
pub trait Progress {
    /// Called with the number of frames completed so far and the total.
    fn frames_done(&mut self, done: usize, total: usize);
}

/// Progress sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn frames_done(&mut self, _done: usize, _total: usize) {}
}

/// Adapter turning a closure into a progress sink.
#[derive(Debug)]
pub struct Callback<F>(pub F);

impl<F: FnMut(usize, usize)> Progress for Callback<F> {
    fn frames_done(&mut self, done: usize, total: usize) {
        (self.0)(done, total);
    }
}

/// Report every [`PROGRESS_STRIDE`] frames, and once at the end.
pub(crate) fn report_stride(progress: &mut impl Progress, done: usize, total: usize) {
    if done % PROGRESS_STRIDE == 0 || done == total {
        progress.frames_done(done, total);
    }
}
