//! Randomized experiment-sequence design.
//!
//! The experiment shows blocks of biological and scrambled stimuli separated
//! by resting intervals, opening with a detector-calibration intro. This
//! module draws the randomized order and emits the manifest handed to the
//! external clip concatenator; invoking that tool is the caller's job.

use crate::trajectory::FrameRange;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Frames skipped at the start of every capture before a stimulus clip may
/// begin, so the subject is fully in motion.
pub const STIMULUS_LEADIN_FRAMES: usize = 300;

/// Block/timing layout of the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentDesign {
    /// Number of stimulus blocks.
    pub blocks: usize,
    /// Stimuli per block; half biological, half scrambled.
    pub stimuli_per_block: usize,
    /// Length of one stimulus clip, seconds.
    pub stimulus_secs: u32,
    /// Rest between consecutive stimuli, seconds.
    pub short_rest_secs: u32,
    /// Rest between blocks, seconds.
    pub block_rest_secs: u32,
    /// Detector-calibration intro before the first block, seconds.
    pub intro_secs: u32,
}

impl Default for ExperimentDesign {
    fn default() -> Self {
        Self {
            blocks: 3,
            stimuli_per_block: 10,
            stimulus_secs: 30,
            short_rest_secs: 3,
            block_rest_secs: 15,
            intro_secs: 15,
        }
    }
}

/// Kind of a stimulus clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stimulus {
    /// Plain point-light walker.
    Biological,
    /// Scrambled (non-biological) variant.
    Scrambled,
}

/// One slot of the assembled experiment video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceEntry {
    /// Detector-calibration intro.
    Intro,
    /// A stimulus clip.
    Stimulus {
        block: usize,
        index: usize,
        kind: Stimulus,
    },
    /// Short rest between stimuli.
    ShortRest,
    /// Longer rest closing a block.
    BlockRest,
}

/// Draw the full randomized sequence: intro, then per block the shuffled
/// half-biological/half-scrambled stimuli, each followed by a short rest,
/// with a block rest closing each block.
pub fn schedule(design: &ExperimentDesign, rng: &mut impl Rng) -> Vec<SequenceEntry> {
    let mut entries = vec![SequenceEntry::Intro];
    let half = design.stimuli_per_block / 2;
    for block in 0..design.blocks {
        let mut kinds = vec![Stimulus::Scrambled; half];
        kinds.extend(vec![Stimulus::Biological; design.stimuli_per_block - half]);
        kinds.shuffle(rng);
        for (index, &kind) in kinds.iter().enumerate() {
            entries.push(SequenceEntry::Stimulus { block, index, kind });
            entries.push(SequenceEntry::ShortRest);
        }
        entries.push(SequenceEntry::BlockRest);
    }
    entries
}

/// Pick a random frame span for one stimulus clip out of a capture with
/// `total_frames` frames at `fps`.
///
/// The span starts after [`STIMULUS_LEADIN_FRAMES`] and leaves one second of
/// slack at the end of the file. Returns `None` when the capture is too
/// short to hold a clip.
pub fn stimulus_span(
    total_frames: usize,
    fps: u32,
    stimulus_secs: u32,
    rng: &mut impl Rng,
) -> Option<FrameRange> {
    let clip_frames = (fps * stimulus_secs) as usize;
    let latest_start = total_frames.checked_sub((fps * (stimulus_secs + 1)) as usize)?;
    if latest_start <= STIMULUS_LEADIN_FRAMES {
        return None;
    }
    let start = rng.random_range(STIMULUS_LEADIN_FRAMES..latest_start);
    Some(FrameRange::Span {
        start,
        end: start + clip_frames,
    })
}

/// Build the clip-concatenator manifest: one `file <path>` line per clip,
/// in presentation order.
#[must_use]
pub fn concat_manifest<P: AsRef<Path>>(clips: &[P]) -> String {
    let mut manifest = String::new();
    for clip in clips {
        let _ = writeln!(manifest, "file {}", clip.as_ref().display());
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn schedule_balances_stimuli_per_block() {
        let design = ExperimentDesign::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let entries = schedule(&design, &mut rng);

        assert_eq!(entries[0], SequenceEntry::Intro);
        // Intro + per block: 10 stimuli, 10 short rests, 1 block rest.
        assert_eq!(entries.len(), 1 + design.blocks * (2 * design.stimuli_per_block + 1));

        for block in 0..design.blocks {
            let (mut bio, mut scrambled) = (0, 0);
            for entry in &entries {
                if let SequenceEntry::Stimulus { block: b, kind, .. } = entry {
                    if *b == block {
                        match kind {
                            Stimulus::Biological => bio += 1,
                            Stimulus::Scrambled => scrambled += 1,
                        }
                    }
                }
            }
            assert_eq!(bio, 5);
            assert_eq!(scrambled, 5);
        }
    }

    #[test]
    fn every_stimulus_is_followed_by_a_rest() {
        let entries = schedule(
            &ExperimentDesign::default(),
            &mut ChaCha8Rng::seed_from_u64(11),
        );
        for pair in entries.windows(2) {
            if matches!(pair[0], SequenceEntry::Stimulus { .. }) {
                assert_eq!(pair[1], SequenceEntry::ShortRest);
            }
        }
        assert_eq!(entries.last(), Some(&SequenceEntry::BlockRest));
    }

    #[test]
    fn stimulus_span_respects_leadin_and_slack() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let Some(FrameRange::Span { start, end }) =
                stimulus_span(30_000, 30, 30, &mut rng)
            else {
                panic!("span expected");
            };
            assert!(start >= STIMULUS_LEADIN_FRAMES);
            assert_eq!(end - start, 900);
            assert!(end + 30 <= 30_000);
        }
    }

    #[test]
    fn short_capture_yields_no_span() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(stimulus_span(1000, 30, 30, &mut rng), None);
    }

    #[test]
    fn manifest_lists_clips_in_order() {
        let manifest = concat_manifest(&["temp/intro.mp4", "temp/video0000.mp4"]);
        assert_eq!(manifest, "file temp/intro.mp4\nfile temp/video0000.mp4\n");
    }
}
