//! Core computation for MTL (Merkle Tree Ladder) record-set signatures
//!
//! This crate provides:
//! - Merkle tree construction over ordered records, carrying odd nodes up
//! - Inclusion proof generation for any leaf
//! - Epoch chaining of successive roots into MTL signatures
//! - Proof and signature verification

pub mod epoch;
pub mod merkle;
pub mod verify;

pub use epoch::{chain, observe, EpochError, EpochState, MemoryEpochState};
pub use merkle::{MerkleError, MerkleTree, MerkleTreeBuilder};
pub use verify::{verify_inclusion, verify_signature, VerificationError};
