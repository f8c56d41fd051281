#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Scores k-mers in binding intervals against a null model of intervals randomly re-placed
//! within their transcripts.
mod cli;

use kmerich::error::Error;
use kmerich::genomic::{read_intervals, Genome};
use kmerich::kmer::count_presence;
use kmerich::null_model::NullModel;
use kmerich::stats::{aggregate, write_table};
use kmerich::Result;
use log::info;
use rand::Rng;
use std::io::BufWriter;
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = cli::KmerIch::from_args();
    opt.set_logging();
    opt.validate()?;

    let seed = match opt.seed {
        Some(seed) => seed,
        None => rand::thread_rng().gen(),
    };
    let null_model = NullModel::new(opt.iterations, opt.max_retries, seed, opt.placement())?;
    info!("Using seed {}", null_model.seed());

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build_global()
        .map_err(|_| Error::ThreadError)?;

    let transcripts = read_intervals(&opt.transcripts, &opt.chrom_prefix)?;
    if transcripts.is_empty() {
        return Err(Error::EmptyInput(opt.transcripts.display().to_string()));
    }
    let peaks = read_intervals(&opt.peaks, &opt.chrom_prefix)?;
    if peaks.is_empty() {
        return Err(Error::EmptyInput(opt.peaks.display().to_string()));
    }
    let genome = Genome::from_path(&opt.genome)?;
    if genome.is_empty() {
        return Err(Error::EmptyInput(opt.genome.display().to_string()));
    }

    let observed = count_presence(genome.sequences(&peaks), opt.kmer_size);
    info!(
        "Observed {} distinct {}-mers in {} binding intervals",
        observed.len(),
        opt.kmer_size,
        peaks.len()
    );

    info!("Running {} iterations...", null_model.iterations());
    let randomized = null_model.kmer_tables(&transcripts, &peaks, &genome, opt.kmer_size);
    let enrichments = aggregate(&observed, &randomized, opt.dispersion());

    match opt.output {
        Some(ref path) => {
            info!("Writing {} k-mers to {}", enrichments.len(), path.display());
            write_table(BufWriter::new(std::fs::File::create(path)?), &enrichments)?
        }
        None => {
            let stdout = std::io::stdout();
            write_table(stdout.lock(), &enrichments)?
        }
    }

    Ok(())
}
