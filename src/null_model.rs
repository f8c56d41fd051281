//! Runs the partition, association and randomization steps once per iteration to build the
//! null distribution of k-mer incidence.
use crate::error::Error;
use crate::genomic::{chromosomes, Genome, Interval, Strand};
use crate::kmer::{count_presence, KmerFrequencies};
use crate::partition::StrandIndex;
use crate::randomize::{identity, randomize, Placement, Randomized};
use crate::{Result, MIN_ITERATIONS};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Settings of the randomized null model
#[derive(Debug, Clone, PartialEq)]
pub struct NullModel {
    iterations: usize,
    max_retries: usize,
    seed: u64,
    placement: Placement,
}

impl NullModel {
    /// Validates the settings, at least [`MIN_ITERATIONS`] iterations are required
    pub fn new(
        iterations: usize,
        max_retries: usize,
        seed: u64,
        placement: Placement,
    ) -> Result<Self> {
        if iterations < MIN_ITERATIONS {
            return Err(Error::TooFewIterations(iterations, MIN_ITERATIONS));
        }
        Ok(Self {
            iterations,
            max_retries,
            seed,
            placement,
        })
    }

    /// Number of iterations
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed all iterations derive their random source from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One seed per iteration drawn from the master seed, so an iteration gives the same result
    /// no matter which thread it runs on
    fn iteration_seeds(&self) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.iterations).map(|_| rng.gen()).collect()
    }

    /// A single iteration over every partition. Chromosomes are visited in the order given,
    /// `+` before `-`, and transcripts and intervals in input order.
    pub fn iteration<R: Rng + ?Sized>(
        &self,
        index: &StrandIndex<'_>,
        chroms: &[String],
        rng: &mut R,
    ) -> Randomized {
        let mut randomized = Randomized::default();
        for chrom in chroms {
            for strand in Strand::BOTH.iter() {
                let partition = match index.get(chrom, *strand) {
                    Some(partition) => partition,
                    None => continue,
                };
                for bound in partition.associate() {
                    let placed = match self.placement {
                        Placement::Random => randomize(&bound, self.max_retries, rng),
                        Placement::Identity => identity(&bound),
                    };
                    randomized.intervals.extend(placed.intervals);
                    randomized.dropped += placed.dropped;
                }
            }
        }
        randomized
    }

    /// Runs every iteration on the global rayon pool and hands its randomized intervals to
    /// `consume`. Results come back in iteration order.
    fn run<T, F>(&self, transcripts: &[Interval], intervals: &[Interval], consume: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, Randomized) -> T + Sync + Send,
    {
        let index = StrandIndex::new(transcripts, intervals);
        let chroms = chromosomes(transcripts);

        self.iteration_seeds()
            .into_par_iter()
            .enumerate()
            .map(|(i, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                let randomized = self.iteration(&index, &chroms, &mut rng);
                info!(
                    "Iteration {}: placed {} intervals and dropped {}",
                    i + 1,
                    randomized.intervals.len(),
                    randomized.dropped
                );
                consume(i, randomized)
            })
            .collect()
    }

    /// Randomized interval sets, one per iteration
    pub fn randomize_all(
        &self,
        transcripts: &[Interval],
        intervals: &[Interval],
    ) -> Vec<Randomized> {
        self.run(transcripts, intervals, |_, randomized| randomized)
    }

    /// K-mer incidence of every iteration. The randomized intervals and their sequences are
    /// released as soon as the iteration has been counted.
    pub fn kmer_tables(
        &self,
        transcripts: &[Interval],
        intervals: &[Interval],
        genome: &Genome,
        kmer_size: usize,
    ) -> Vec<KmerFrequencies> {
        self.run(transcripts, intervals, |i, randomized| {
            let seqs = genome.sequences(&randomized.intervals);
            drop(randomized);
            let table = count_presence(&seqs, kmer_size);
            debug!("Iteration {}: {} distinct k-mers", i + 1, table.len());
            table
        })
    }
}
