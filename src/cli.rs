use kmerich::error::Error;
use kmerich::randomize::Placement;
use kmerich::stats::Dispersion;
use kmerich::Result;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kmerich",
    about = "Z-scores of k-mers in binding intervals against randomly re-placed intervals"
)]
pub(crate) struct KmerIch {
    #[structopt(
        short,
        long,
        help = "BED6 file of transcripts harbouring the binding intervals",
        parse(from_os_str)
    )]
    pub transcripts: PathBuf,
    #[structopt(
        short,
        long,
        help = "BED6 file of binding intervals (peaks)",
        parse(from_os_str)
    )]
    pub peaks: PathBuf,
    #[structopt(
        short,
        long,
        help = "Genome in FASTA format, can be gzipped",
        parse(from_os_str)
    )]
    pub genome: PathBuf,
    #[structopt(short, long, help = "K-mer length", default_value = "6")]
    pub kmer_size: usize,
    #[structopt(
        short,
        long,
        help = "Number of randomization iterations, at least 3",
        default_value = "10"
    )]
    pub iterations: usize,
    #[structopt(
        short = "r",
        long,
        help = "Redraws of a colliding interval before it is dropped from the iteration",
        default_value = "10"
    )]
    pub max_retries: usize,
    #[structopt(
        short,
        long,
        help = "Seed for the random placement, chosen at random (and logged) when missing"
    )]
    pub seed: Option<u64>,
    #[structopt(
        short,
        long,
        help = "Output table, printed to stdout when missing",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,
    #[structopt(long, help = "Number of threads", default_value = "1")]
    pub threads: usize,
    #[structopt(
        long,
        help = "Only BED lines whose chromosome starts with this prefix are read",
        default_value = kmerich::DEFAULT_CHROM_PREFIX
    )]
    pub chrom_prefix: String,
    #[structopt(
        long,
        help = "Normalise the dispersion by the number of iterations minus one"
    )]
    pub sample_stdev: bool,
    #[structopt(long, hidden = true)]
    pub identity: bool,
    #[structopt(
        short,
        long,
        help = "Verbosity, repeat for more detail (-v info, -vv debug, -vvv trace)",
        parse(from_occurrences)
    )]
    pub verbose: u8,
}

impl KmerIch {
    /// Initialises `env_logger` at the level given by the verbosity flag
    pub fn set_logging(&self) {
        let log_level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        env_logger::Builder::new().filter_level(log_level).init();
    }

    /// Settings that are wrong no matter the input
    pub fn validate(&self) -> Result<()> {
        if self.kmer_size == 0 {
            return Err(Error::InvalidKmerSize(self.kmer_size));
        }
        Ok(())
    }

    pub fn placement(&self) -> Placement {
        if self.identity {
            Placement::Identity
        } else {
            Placement::Random
        }
    }

    pub fn dispersion(&self) -> Dispersion {
        if self.sample_stdev {
            Dispersion::SampleStdev
        } else {
            Dispersion::SumOfSquares
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmerich::{DEFAULT_CHROM_PREFIX, MIN_ITERATIONS};

    #[test]
    fn defaults() {
        let opt = KmerIch::from_iter(&["kmerich", "-t", "t.bed", "-p", "p.bed", "-g", "g.fa"]);
        assert_eq!(opt.kmer_size, 6);
        assert_eq!(opt.iterations, 10);
        assert!(opt.iterations >= MIN_ITERATIONS);
        assert_eq!(opt.max_retries, 10);
        assert_eq!(opt.chrom_prefix, DEFAULT_CHROM_PREFIX);
        assert_eq!(opt.seed, None);
        assert_eq!(opt.threads, 1);
        assert_eq!(opt.placement(), Placement::Random);
        assert_eq!(opt.dispersion(), Dispersion::SumOfSquares);
        assert!(opt.validate().is_ok());
    }

    #[test]
    fn zero_kmer_size_is_invalid() {
        let opt = KmerIch::from_iter(&[
            "kmerich", "-t", "t.bed", "-p", "p.bed", "-g", "g.fa", "-k", "0",
        ]);
        assert!(matches!(opt.validate(), Err(Error::InvalidKmerSize(0))));
    }
}
