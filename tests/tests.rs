use assert_cmd::prelude::*;
use kmerich::genomic::{read_intervals, Genome};
use kmerich::kmer::count_presence;
use kmerich::null_model::NullModel;
use kmerich::randomize::Placement;
use kmerich::stats::{aggregate, Dispersion, HEADER};
use lazy_static::lazy_static;
use predicates::prelude::*;
use predicates::str::{contains, is_match};
use regex::Regex;
use std::process::Command;

lazy_static! {
    static ref ROW_REGEX: Regex =
        Regex::new(r"^([ACGT]+)\t(\d+)\t(\S+)\t(\S+)\t(\S+)$").unwrap();
}

const TRANSCRIPTS: &str = "tests/input/transcripts.bed";
const PEAKS: &str = "tests/input/peaks.bed";
const GENOME: &str = "tests/input/genome.fa";

fn run(extra: &[&str]) -> String {
    let output = Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", TRANSCRIPTS, "-p", PEAKS, "-g", GENOME])
        .args(extra)
        .unwrap()
        .stdout;
    String::from_utf8(output).unwrap()
}

fn rows(output: &str) -> Vec<(String, u32, String, f64, f64)> {
    output
        .lines()
        .skip(1)
        .map(|line| {
            let captures = ROW_REGEX.captures(line).unwrap();
            (
                captures[1].to_string(),
                captures[2].parse().unwrap(),
                captures[3].to_string(),
                captures[4].parse().unwrap(),
                captures[5].parse().unwrap(),
            )
        })
        .collect()
}

#[test]
fn cli_no_args() {
    Command::cargo_bin("kmerich").unwrap().assert().failure();
}

#[test]
fn cli_no_such_file() {
    Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", "tests/no_such_file.bed", "-p", PEAKS, "-g", GENOME])
        .assert()
        .failure()
        .stderr(contains("NotFound"));
}

#[test]
fn cli_too_few_iterations() {
    Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", TRANSCRIPTS, "-p", PEAKS, "-g", GENOME, "-i", "2"])
        .assert()
        .failure()
        .stderr(contains("TooFewIterations"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn cli_zero_kmer_size() {
    Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", TRANSCRIPTS, "-p", PEAKS, "-g", GENOME, "-k", "0"])
        .assert()
        .failure()
        .stderr(contains("InvalidKmerSize"));
}

#[test]
fn cli_same_seed_same_table() {
    let args = ["-k", "6", "-i", "5", "-s", "42"];
    let first = run(&args);
    let second = run(&args);
    assert_eq!(first, second);
    assert_eq!(first.lines().next(), Some(HEADER));
}

#[test]
fn cli_same_seed_any_thread_count() {
    let args = ["-i", "8", "-s", "7"];
    let single = run(&args);
    let multi = run(&["-i", "8", "-s", "7", "--threads", "4"]);
    assert_eq!(single, multi);
}

#[test]
fn cli_only_observed_kmers() {
    let output = run(&["-s", "3"]);
    let mut kmers = rows(&output)
        .into_iter()
        .map(|row| row.0)
        .collect::<Vec<_>>();
    kmers.sort();
    assert_eq!(kmers, vec!["ACGGAC", "GATTCA", "GGACCT"]);
    assert!(!output.contains("TTTTTT"));
}

#[test]
fn cli_exact_fit_has_no_dispersion() {
    Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", TRANSCRIPTS, "-p", PEAKS, "-g", GENOME, "-s", "11"])
        .assert()
        .success()
        .stdout(is_match(r"(?m)^GATTCA\t1\tinf\t1\t0$").unwrap());
}

#[test]
fn cli_identity_reproduces_observed() {
    let output = run(&["--identity", "-i", "4"]);
    let rows = rows(&output);
    assert_eq!(rows.len(), 3);
    for (_, observed, z_score, mean, dispersion) in rows {
        assert_eq!(z_score, "inf");
        assert_eq!(mean, observed as f64);
        assert_eq!(dispersion, 0.0);
    }
}

#[test]
fn cli_sorted_by_descending_z_score() {
    let output = run(&["-s", "5", "-i", "20"]);
    let scores = rows(&output)
        .into_iter()
        .map(|row| row.2.parse::<f64>().unwrap())
        .collect::<Vec<_>>();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn cli_writes_output_file() {
    let path = std::env::temp_dir().join(format!("kmerich-{}.tsv", std::process::id()));
    Command::cargo_bin("kmerich")
        .unwrap()
        .args(&["-t", TRANSCRIPTS, "-p", PEAKS, "-g", GENOME, "-s", "1", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let table = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(table, run(&["-s", "1"]));
}

#[test]
fn library_pipeline_is_reproducible() {
    let transcripts = read_intervals(TRANSCRIPTS, "chr").unwrap();
    let peaks = read_intervals(PEAKS, "chr").unwrap();
    assert_eq!(transcripts.len(), 3);
    assert_eq!(peaks.len(), 3);
    let genome = Genome::from_path(GENOME).unwrap();
    let observed = count_presence(genome.sequences(&peaks), 6);

    let model = NullModel::new(5, 10, 2020, Placement::Random).unwrap();
    let first = aggregate(
        &observed,
        &model.kmer_tables(&transcripts, &peaks, &genome, 6),
        Dispersion::SumOfSquares,
    );
    let second = aggregate(
        &observed,
        &model.kmer_tables(&transcripts, &peaks, &genome, 6),
        Dispersion::SumOfSquares,
    );
    assert_eq!(first, second);
    assert!(first.iter().all(|enrichment| enrichment.mean <= 1.0));
}
