use bondflow_core::{PriceFormatError, UnknownBond};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    UnknownBond(#[from] UnknownBond),

    #[error(transparent)]
    PriceFormat(#[from] PriceFormatError),

    #[error("invalid inquiry transition: {0}")]
    InvalidTransition(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
