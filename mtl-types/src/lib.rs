//! Core types for MTL (Merkle Tree Ladder) record-set authentication
//!
//! This crate defines the digest values, hash primitives, record sets and
//! inclusion proofs shared by the tree builder and the resolver.

pub mod error;
pub mod hash;
pub mod primitives;
pub mod proof;
pub mod record;

pub use error::{Error, Result};
pub use hash::{hash_pair, leaf_hash, HashAlgorithm};
pub use primitives::{Digest, RecordSetId, Signature};
pub use proof::InclusionProof;
pub use record::RecordSet;
