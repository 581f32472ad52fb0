//! Hash primitives for leaves and interior nodes

use crate::error::Error;
use crate::primitives::Digest;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// Digest function used for every node of a tree and for epoch chaining.
///
/// `Sha256` is the default and reproduces the roots published by existing
/// `mtlroot=` hints. A tree, its proofs and its chained signatures must all
/// use the same algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Hash one record's raw bytes: H(record)
    pub fn leaf_hash(&self, data: &[u8]) -> Digest {
        match self {
            HashAlgorithm::Sha256 => Digest::new(Sha256::digest(data).into()),
            HashAlgorithm::Blake3 => Digest::new(*blake3::hash(data).as_bytes()),
        }
    }

    /// Hash a pair of nodes: H(left || right). Order matters.
    pub fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(left.as_bytes());
                hasher.update(right.as_bytes());
                Digest::new(hasher.finalize().into())
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(left.as_bytes());
                hasher.update(right.as_bytes());
                Digest::new(*hasher.finalize().as_bytes())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(Error::UnknownHashAlgorithm(other.to_string())),
        }
    }
}

/// Leaf hash with the default algorithm
pub fn leaf_hash(data: &[u8]) -> Digest {
    HashAlgorithm::default().leaf_hash(data)
}

/// Pair hash with the default algorithm
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    HashAlgorithm::default().hash_pair(left, right)
}
