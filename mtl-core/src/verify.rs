//! Inclusion proof and chained signature verification

use mtl_types::{Digest, HashAlgorithm, InclusionProof, Signature};
use thiserror::Error;

use crate::epoch::chain;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Merkle root mismatch: expected {expected}, computed {computed}")]
    RootMismatch { expected: Digest, computed: Digest },

    #[error("MTL signature does not chain the given roots")]
    SignatureMismatch,
}

/// Verify that `record` is included under `expected_root`
///
/// Hashes the record with the proof's algorithm, walks the sibling path
/// and compares the result with the expected root.
pub fn verify_inclusion(
    record: &[u8],
    proof: &InclusionProof,
    expected_root: &Digest,
) -> Result<(), VerificationError> {
    let computed = proof.compute_root_for_record(record);
    if computed != *expected_root {
        return Err(VerificationError::RootMismatch {
            expected: *expected_root,
            computed,
        });
    }
    Ok(())
}

/// Verify that `signature` chains `current_root` to `prior_root`
pub fn verify_signature(
    algorithm: HashAlgorithm,
    current_root: &Digest,
    prior_root: &Digest,
    signature: &Signature,
) -> Result<(), VerificationError> {
    if chain(algorithm, current_root, prior_root) != *signature {
        return Err(VerificationError::SignatureMismatch);
    }
    Ok(())
}
