//! Grouping of transcripts and binding intervals by chromosome and strand, and the association of
//! each transcript with the binding intervals it fully contains.
use crate::genomic::{Interval, Strand};
use log::debug;
use std::collections::HashMap;

/// Transcripts and binding intervals sharing a chromosome and strand, in input order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partition<'a> {
    /// Transcripts of the partition
    pub transcripts: Vec<&'a Interval>,
    /// Binding intervals of the partition
    pub intervals: Vec<&'a Interval>,
}

/// Transcript with the binding intervals it fully contains
#[derive(Debug, Clone, PartialEq)]
pub struct BoundTranscript<'a> {
    /// Transcript harbouring the intervals
    pub transcript: &'a Interval,
    /// Contained intervals in partition order
    pub intervals: Vec<&'a Interval>,
}

/// Selects the transcripts and intervals lying on `chrom` and `strand`
pub fn select<'a>(
    transcripts: &'a [Interval],
    intervals: &'a [Interval],
    chrom: &str,
    strand: Strand,
) -> Partition<'a> {
    let on_partition = |interval: &&Interval| interval.chrom == chrom && interval.strand == strand;
    Partition {
        transcripts: transcripts.iter().filter(on_partition).collect(),
        intervals: intervals.iter().filter(on_partition).collect(),
    }
}

/// All partitions built in a single pass over the input. Looking up a partition gives the same
/// records, in the same order, as [`select`].
#[derive(Debug, Default)]
pub struct StrandIndex<'a>(HashMap<&'a str, HashMap<Strand, Partition<'a>>>);

impl<'a> StrandIndex<'a> {
    /// Indexes transcripts and binding intervals by chromosome and strand
    pub fn new(transcripts: &'a [Interval], intervals: &'a [Interval]) -> Self {
        let mut index = HashMap::<&'a str, HashMap<Strand, Partition<'a>>>::new();
        for transcript in transcripts {
            index
                .entry(transcript.chrom.as_str())
                .or_default()
                .entry(transcript.strand)
                .or_default()
                .transcripts
                .push(transcript);
        }
        for interval in intervals {
            index
                .entry(interval.chrom.as_str())
                .or_default()
                .entry(interval.strand)
                .or_default()
                .intervals
                .push(interval);
        }
        StrandIndex(index)
    }

    /// Partition of `chrom` and `strand`, `None` if neither file has a record there
    pub fn get(&self, chrom: &str, strand: Strand) -> Option<&Partition<'a>> {
        self.0.get(chrom)?.get(&strand)
    }
}

impl<'a> Partition<'a> {
    /// Binds each transcript to the intervals it fully contains. Transcripts without a single
    /// contained interval are left out.
    pub fn associate(&self) -> Vec<BoundTranscript<'a>> {
        self.transcripts
            .iter()
            .filter_map(|transcript| {
                let intervals = self
                    .intervals
                    .iter()
                    .filter(|interval| transcript.contains(interval))
                    .copied()
                    .collect::<Vec<_>>();
                if intervals.is_empty() {
                    debug!(
                        "Transcript {}:{}-{} contains no binding intervals",
                        transcript.chrom, transcript.start, transcript.end
                    );
                    None
                } else {
                    Some(BoundTranscript {
                        transcript: *transcript,
                        intervals,
                    })
                }
            })
            .collect()
    }
}
