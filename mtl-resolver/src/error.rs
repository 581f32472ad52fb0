//! Error types for the resolver

use mtl_core::{EpochError, MerkleError, VerificationError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, ResolverError>;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error(transparent)]
    Types(#[from] mtl_types::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error(transparent)]
    Epoch(#[from] EpochError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
