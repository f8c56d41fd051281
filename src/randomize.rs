//! Re-placement of the binding intervals of a transcript at random, non-overlapping positions.
use crate::genomic::Interval;
use crate::partition::BoundTranscript;
use log::{debug, trace};
use rand::Rng;

/// Claimed coordinates of a transcript in the current iteration. Ranges are treated as closed,
/// so intervals only touching at an endpoint still collide.
#[derive(Debug)]
pub struct CoverageMask {
    offset: u64,
    claimed: Vec<bool>,
}

impl CoverageMask {
    /// Empty mask over `[transcript.start, transcript.end]`
    pub fn new(transcript: &Interval) -> Self {
        Self {
            offset: transcript.start,
            claimed: vec![false; (transcript.len() + 1) as usize],
        }
    }

    /// Checks if any coordinate in the closed range `[start, end]` is already claimed
    pub fn collides(&self, start: u64, end: u64) -> bool {
        let (start, end) = ((start - self.offset) as usize, (end - self.offset) as usize);
        self.claimed[start..=end].iter().any(|claimed| *claimed)
    }

    /// Claims every coordinate of the closed range `[start, end]`
    pub fn claim(&mut self, start: u64, end: u64) {
        let (start, end) = ((start - self.offset) as usize, (end - self.offset) as usize);
        self.claimed[start..=end]
            .iter_mut()
            .for_each(|claimed| *claimed = true);
    }
}

/// How the null model places binding intervals
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    /// Uniformly random, non-overlapping starts within the transcript
    Random,
    /// Intervals are kept where they are. Only useful for testing as the null model then
    /// reproduces the observed frequencies.
    Identity,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Random
    }
}

/// Intervals placed within one transcript
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Randomized {
    /// Newly placed intervals
    pub intervals: Vec<Interval>,
    /// Intervals that collided on every attempt and were left out
    pub dropped: usize,
}

/// Places each interval bound to the transcript at a random start in
/// `[transcript.start, transcript.end - interval.len()]`. Intervals are handled in order; an
/// interval that collides with an already placed one is redrawn up to `max_retries` times and
/// dropped if it still collides.
pub fn randomize<R: Rng + ?Sized>(
    bound: &BoundTranscript<'_>,
    max_retries: usize,
    rng: &mut R,
) -> Randomized {
    let transcript = bound.transcript;
    let mut mask = CoverageMask::new(transcript);
    let mut randomized = Randomized::default();

    'intervals: for interval in &bound.intervals {
        let last_start = transcript.end - interval.len();
        for attempt in 0..=max_retries {
            let start = rng.gen_range(transcript.start..=last_start);
            let end = start + interval.len();
            if mask.collides(start, end) {
                trace!(
                    "Attempt {} to place {} at {} collides",
                    attempt + 1,
                    interval,
                    start
                );
                continue;
            }
            mask.claim(start, end);
            randomized.intervals.push(interval.placed_at(start));
            continue 'intervals;
        }
        debug!(
            "Dropping {} after {} collisions within {}:{}-{}",
            interval,
            max_retries + 1,
            transcript.chrom,
            transcript.start,
            transcript.end
        );
        randomized.dropped += 1;
    }

    randomized
}

/// Keeps the bound intervals at their observed positions
pub fn identity(bound: &BoundTranscript<'_>) -> Randomized {
    Randomized {
        intervals: bound.intervals.iter().map(|interval| (*interval).clone()).collect(),
        dropped: 0,
    }
}
