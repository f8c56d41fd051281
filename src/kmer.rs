use bio::alignment::sparse::hash_kmers;
use std::collections::{HashMap, HashSet};

/// Number of sequences each k-mer occurs in
pub type KmerFrequencies = HashMap<String, u32>;

/// Distinct, uppercased k-mers of a sequence. K-mers with `N` or any other symbol outside of
/// `ACGT` are left out and sequences shorter than `k` have none.
pub fn kmers_present(seq: &[u8], kmer_size: usize) -> HashSet<String> {
    if kmer_size == 0 || seq.len() < kmer_size {
        return HashSet::new();
    }
    let seq = seq.to_ascii_uppercase();

    hash_kmers(&seq, kmer_size)
        .into_iter()
        .filter(|(kmer, _)| kmer.iter().all(|nuc| crate::NUCLEOTIDES.contains(nuc)))
        .map(|(kmer, _)| String::from_utf8_lossy(kmer).into_owned())
        .collect()
}

/// Counts for each k-mer the sequences it is present in. A k-mer repeated within a sequence is
/// only counted once for that sequence.
pub fn count_presence<I, S>(seqs: I, kmer_size: usize) -> KmerFrequencies
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    seqs.into_iter()
        .fold(HashMap::new(), |mut frequencies, seq| {
            for kmer in kmers_present(seq.as_ref(), kmer_size) {
                *frequencies.entry(kmer).or_default() += 1;
            }
            frequencies
        })
}
