//! Interval records read from BED6 files and the coordinate to sequence lookup on a FASTA genome.
use crate::error::Error;
use crate::Result;
use bio::alphabets::dna;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
/// Strand of a BED6 record
pub enum Strand {
    /// `+`
    Forward,
    /// `-`
    Reverse,
}

impl Strand {
    /// Both strands in the order partitions are processed
    pub const BOTH: [Strand; 2] = [Strand::Forward, Strand::Reverse];

    /// Parses the BED strand column, anything but `+` or `-` is rejected
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }

    /// BED representation of the strand
    pub fn symbol(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
        }
    }
}

/// A six field BED record. Used both for binding intervals and the transcripts harbouring them.
/// Coordinates are half-open on input, `end > start` always holds.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub score: f64,
    pub strand: Strand,
}

impl Interval {
    /// Creates an interval, `record` is only used for reporting an incorrect interval
    pub fn new<T: Into<String>>(
        chrom: T,
        start: u64,
        end: u64,
        name: T,
        score: f64,
        strand: Strand,
        record: usize,
    ) -> Result<Self> {
        if end <= start {
            return Err(Error::IncorrectInterval(record, start, end));
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            name: name.into(),
            score,
            strand,
        })
    }

    /// Number of bases covered
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Never true as `end > start` is enforced on creation
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Full containment of `other`, mere overlap is not enough
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// New record of the same length starting at `start`. Keeps chromosome and strand of `self`
    /// but carries an empty name and a zero score.
    pub fn placed_at(&self, start: u64) -> Interval {
        Interval {
            chrom: self.chrom.clone(),
            start,
            end: start + self.len(),
            name: String::new(),
            score: 0.0,
            strand: self.strand,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand.symbol()
        )
    }
}

/// Reads a (possibly gzipped) BED6 file. Lines that cannot be parsed, have no strand or whose
/// chromosome does not start with `chrom_prefix` are not data and get skipped.
pub fn read_intervals<P: AsRef<Path>>(path: P, chrom_prefix: &str) -> Result<Vec<Interval>> {
    let path = path.as_ref();
    info!("Reading intervals from {}...", path.display());
    let (rdr, _) = niffler::from_path(path)?;
    let mut bed_rdr = bio::io::bed::Reader::new(rdr);

    let mut intervals = Vec::new();
    for (i, record) in bed_rdr.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping record {} in {}: {}", i + 1, path.display(), e);
                continue;
            }
        };
        if !record.chrom().starts_with(chrom_prefix) {
            debug!(
                "Skipping record {} as {} does not start with {}",
                i + 1,
                record.chrom(),
                chrom_prefix
            );
            continue;
        }
        let strand = match record
            .strand()
            .and_then(|strand| Strand::from_symbol(strand.strand_symbol()))
        {
            Some(strand) => strand,
            None => {
                debug!("Skipping record {} as it has no `+`/`-` strand", i + 1);
                continue;
            }
        };
        let score = match record.score() {
            Some(".") | Some("") | None => 0.0,
            Some(score) => match score.parse::<f64>() {
                Ok(score) => score,
                Err(_) => {
                    debug!("Skipping record {} as score {} is not numeric", i + 1, score);
                    continue;
                }
            },
        };

        intervals.push(Interval::new(
            record.chrom(),
            record.start(),
            record.end(),
            record.name().unwrap_or(""),
            score,
            strand,
            i + 1,
        )?);
    }

    info!("Read {} intervals from {}", intervals.len(), path.display());
    Ok(intervals)
}

/// Chromosome names in order of first appearance
pub fn chromosomes(intervals: &[Interval]) -> Vec<String> {
    let mut seen = HashSet::new();
    intervals
        .iter()
        .filter(|interval| seen.insert(interval.chrom.as_str()))
        .map(|interval| interval.chrom.clone())
        .collect()
}

/// Reference sequences keyed by FASTA id
#[derive(Debug, Default)]
pub struct Genome(HashMap<String, Vec<u8>>);

impl Genome {
    /// Loads a (possibly gzipped) FASTA file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Reading genome from {}...", path.as_ref().display());
        let (rdr, _) = niffler::from_path(path.as_ref())?;
        Self::from_reader(bio::io::fasta::Reader::new(rdr))
    }

    /// Collects all records of a FASTA reader
    pub fn from_reader<T: std::io::Read>(rdr: bio::io::fasta::Reader<T>) -> Result<Self> {
        let mut fasta_records = HashMap::<String, Vec<u8>>::new();
        for record in rdr.records() {
            let record = record?;
            debug!(
                "Loaded sequence {} of length {}",
                record.id(),
                record.seq().len()
            );
            fasta_records.insert(record.id().to_string(), record.seq().to_vec());
        }
        Ok(Genome(fasta_records))
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no sequence was loaded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sequence covered by `interval`, reverse complemented on the `-` strand. `None` when the
    /// chromosome is unknown or the interval runs past its end.
    pub fn sequence(&self, interval: &Interval) -> Option<Vec<u8>> {
        let seq = self.0.get(&interval.chrom)?;
        let (start, end) = (interval.start as usize, interval.end as usize);
        if end > seq.len() {
            return None;
        }
        let seq = &seq[start..end];
        Some(match interval.strand {
            Strand::Forward => seq.to_vec(),
            Strand::Reverse => dna::revcomp(seq),
        })
    }

    /// One sequence per interval in corresponding order. Intervals that cannot be looked up are
    /// reported and contribute nothing.
    pub fn sequences(&self, intervals: &[Interval]) -> Vec<Vec<u8>> {
        intervals
            .iter()
            .filter_map(|interval| {
                let seq = self.sequence(interval);
                if seq.is_none() {
                    warn!(
                        "Could not extract sequence for {}:{}-{}, skipping",
                        interval.chrom, interval.start, interval.end
                    );
                }
                seq
            })
            .collect()
    }
}
