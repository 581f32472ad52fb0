//! Error types for MTL primitives

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid digest length: expected {expected}, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    #[error("Invalid record set id: {0}")]
    InvalidRecordSetId(String),

    #[error("Unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hex encoding error: {0}")]
    HexEncoding(#[from] hex::FromHexError),
}
