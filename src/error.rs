use thiserror::Error;

#[derive(Debug, Error)]
/// Errors of which majority are related to I/O issues, incorrect file formats or invalid settings
pub enum Error {
    #[error("Could not read input file")]
    /// Could not read or write a file
    IoError(#[from] std::io::Error),
    #[error("Could not open (possibly compressed) file")]
    /// Niffler could not detect or open the file
    CompressedFileError(#[from] niffler::Error),
    #[error("Could not spawn threads")]
    /// Create thread pools erorr
    ThreadError,
    #[error("At least {1} iterations are required to estimate dispersion but got {0}")]
    /// Iteration count below the minimum
    TooFewIterations(usize, usize),
    #[error("K-mer size has to be a positive integer but got {0}")]
    /// K-mer size of zero
    InvalidKmerSize(usize),
    #[error("Incorrect interval in BED record {0}, end {2} is not larger than start {1}")]
    /// Interval where end <= start, reported by 1-based BED record index
    IncorrectInterval(usize, u64, u64),
    #[error("No usable records found in {0}")]
    /// Primary input without a single record
    EmptyInput(String),
}
