use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("JSON Error")]
    JsonError(#[from] serde_json::Error),
    #[error("Probabilities must be between 0 and 1")]
    InvalidProbability,
    #[error("Amount bands must be non-negative with min <= max")]
    InvalidAmountBand,
    #[error("A vocabulary needs at least one income and one expense category")]
    EmptyVocabulary,
    #[error("The anchor date and lookback window are out of range")]
    InvalidAnchor,
    #[error("Amounts must be non-negative")]
    InvalidAmount,
}
