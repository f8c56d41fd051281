//! Aggregation of the per-iteration k-mer incidence into mean, dispersion and z-score for every
//! observed k-mer.
use crate::kmer::KmerFrequencies;
use crate::Result;
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

/// Header of the enrichment table
pub const HEADER: &str = concat!(
    "kmer\tobserved_kmer_frequency\tz_score\t",
    "mean_randomized_kmer_frequency\tstdev_of_randomized_kmer_frequency"
);

/// Z-score of a k-mer. Undefined when the randomized frequencies have no dispersion; an
/// undefined score ranks above any finite one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScore {
    /// Finite score
    Finite(f64),
    /// Dispersion was zero
    Undefined,
}

impl ZScore {
    /// Descending rank order, undefined first
    pub fn cmp_desc(&self, other: &ZScore) -> Ordering {
        match (self, other) {
            (ZScore::Undefined, ZScore::Undefined) => Ordering::Equal,
            (ZScore::Undefined, _) => Ordering::Less,
            (_, ZScore::Undefined) => Ordering::Greater,
            (ZScore::Finite(a), ZScore::Finite(b)) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for ZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZScore::Finite(z) => write!(f, "{}", z),
            ZScore::Undefined => write!(f, "inf"),
        }
    }
}

/// How the spread of randomized frequencies is summarised
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dispersion {
    /// Square root of the summed squared deviations, not normalised by the number of iterations
    SumOfSquares,
    /// Sample standard deviation, normalised by `iterations - 1`
    SampleStdev,
}

impl Default for Dispersion {
    fn default() -> Self {
        Dispersion::SumOfSquares
    }
}

impl Dispersion {
    fn min_samples(&self) -> usize {
        match self {
            Dispersion::SumOfSquares => 1,
            Dispersion::SampleStdev => 2,
        }
    }

    /// Zero when there are too few frequencies to measure any spread
    fn compute(&self, frequencies: &[u32], mean: f64) -> f64 {
        if frequencies.len() < self.min_samples() {
            return 0.0;
        }
        let squares = frequencies
            .iter()
            .map(|f| (*f as f64 - mean).powi(2))
            .sum::<f64>();
        match self {
            Dispersion::SumOfSquares => squares.sqrt(),
            Dispersion::SampleStdev => (squares / (frequencies.len() - 1) as f64).sqrt(),
        }
    }
}

/// Enrichment of a single observed k-mer
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// The k-mer
    pub kmer: String,
    /// Number of observed intervals containing the k-mer
    pub observed: u32,
    /// Mean over iterations of randomized intervals containing the k-mer
    pub mean: f64,
    /// Spread of the randomized frequencies
    pub dispersion: f64,
    /// `(observed - mean) / dispersion`
    pub z_score: ZScore,
}

impl Enrichment {
    /// Scores `kmer` given its randomized frequency in each iteration. Without any iteration the
    /// mean is zero, and with fewer iterations than the dispersion needs (one for
    /// [`Dispersion::SumOfSquares`], two for [`Dispersion::SampleStdev`]) the dispersion is zero
    /// and the z-score undefined.
    pub fn new(kmer: String, observed: u32, randomized: &[u32], dispersion: Dispersion) -> Self {
        let mean = if randomized.is_empty() {
            0.0
        } else {
            randomized.iter().map(|f| *f as f64).sum::<f64>() / randomized.len() as f64
        };
        let dispersion = dispersion.compute(randomized, mean);
        let z_score = if dispersion > 0.0 {
            ZScore::Finite((observed as f64 - mean) / dispersion)
        } else {
            ZScore::Undefined
        };
        Self {
            kmer,
            observed,
            mean,
            dispersion,
            z_score,
        }
    }

    /// Row of the enrichment table
    pub fn to_row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.kmer, self.observed, self.z_score, self.mean, self.dispersion
        )
    }
}

/// Scores every k-mer of the observed table against the randomized tables. K-mers only seen in
/// randomized intervals are ignored and a k-mer absent from an iteration counts as zero there.
/// The result is sorted by descending z-score, ties by k-mer. See [`Enrichment::new`] for how too
/// few iterations are scored.
pub fn aggregate(
    observed: &KmerFrequencies,
    randomized: &[KmerFrequencies],
    dispersion: Dispersion,
) -> Vec<Enrichment> {
    let mut enrichments = observed
        .iter()
        .map(|(kmer, observed)| {
            let frequencies = randomized
                .iter()
                .map(|table| table.get(kmer).copied().unwrap_or(0))
                .collect::<Vec<u32>>();
            Enrichment::new(kmer.clone(), *observed, &frequencies, dispersion)
        })
        .collect::<Vec<_>>();
    debug!(
        "Scored {} k-mers over {} iterations",
        enrichments.len(),
        randomized.len()
    );

    enrichments.sort_by(|a, b| {
        a.z_score
            .cmp_desc(&b.z_score)
            .then_with(|| a.kmer.cmp(&b.kmer))
    });
    enrichments
}

/// Writes the header and one row per k-mer
pub fn write_table<W: Write>(mut writer: W, enrichments: &[Enrichment]) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for enrichment in enrichments {
        writeln!(writer, "{}", enrichment.to_row())?;
    }
    writer.flush()?;
    Ok(())
}
