#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Estimates enrichment of k-mers in binding intervals (e.g. CLIP peaks) relative to a null
//! model in which every interval is re-placed at a random, non-overlapping position inside the
//! transcript that contains it. Each k-mer observed in the real intervals gets a z-score
//! computed against the k-mer incidence across the randomized iterations.
//!

pub mod error;
pub mod genomic;
pub mod kmer;
pub mod null_model;
pub mod partition;
pub mod randomize;
pub mod stats;

/// Nucleotide alphabet used
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];
/// Dispersion needs a few samples so fewer iterations are refused
pub const MIN_ITERATIONS: usize = 3;
/// Chromosome prefix a BED line has to start with to be considered data
pub const DEFAULT_CHROM_PREFIX: &str = "chr";

/// Crate-wide result
pub type Result<T> = std::result::Result<T, crate::error::Error>;
