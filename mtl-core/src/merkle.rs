//! Merkle tree construction over record sets

use mtl_types::{Digest, HashAlgorithm, InclusionProof};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Record set is empty, tree has no root")]
    EmptyRecordSet,

    #[error("Invalid leaf index {index}: tree has {leaf_count} leaves")]
    InvalidLeafIndex { index: usize, leaf_count: usize },
}

/// A Merkle tree kept level by level so proofs can be read off directly.
///
/// `levels[0]` holds one hash per record in input order and the last level
/// holds only the root. A tree over zero records has no levels at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    algorithm: HashAlgorithm,
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree over `records` in one call
    pub fn from_records<I, R>(algorithm: HashAlgorithm, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut builder = MerkleTreeBuilder::new(algorithm);
        for record in records {
            builder.add_record(record.as_ref());
        }
        builder.build()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// All levels, leaves first
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get a specific leaf hash
    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// The single digest of the top level
    pub fn root(&self) -> Result<Digest, MerkleError> {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .ok_or(MerkleError::EmptyRecordSet)
    }

    /// Generate the inclusion proof for a specific leaf
    pub fn prove(&self, leaf_index: usize) -> Result<InclusionProof, MerkleError> {
        if self.is_empty() {
            return Err(MerkleError::EmptyRecordSet);
        }

        let leaf_count = self.leaf_count();
        if leaf_index >= leaf_count {
            return Err(MerkleError::InvalidLeafIndex {
                index: leaf_index,
                leaf_count,
            });
        }

        let below_root = &self.levels[..self.levels.len() - 1];
        let mut siblings = Vec::with_capacity(below_root.len());
        let mut position = leaf_index;

        for level in below_root {
            // Out of range means this node was carried up without a partner
            siblings.push(level.get(position ^ 1).copied());
            position /= 2;
        }

        Ok(InclusionProof {
            algorithm: self.algorithm,
            leaf_index: leaf_index as u64,
            siblings,
        })
    }
}

/// Builder for constructing a tree one record at a time
#[derive(Debug, Clone)]
pub struct MerkleTreeBuilder {
    algorithm: HashAlgorithm,
    leaves: Vec<Digest>,
}

impl MerkleTreeBuilder {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            leaves: Vec::new(),
        }
    }

    /// Hash a record and append it as the next leaf
    pub fn add_record(&mut self, record: &[u8]) {
        self.leaves.push(self.algorithm.leaf_hash(record));
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn build(self) -> MerkleTree {
        let algorithm = self.algorithm;

        if self.leaves.is_empty() {
            return MerkleTree {
                algorithm,
                levels: Vec::new(),
            };
        }

        let mut levels = vec![self.leaves];

        while let Some(prev_level) = levels.last() {
            if prev_level.len() <= 1 {
                break;
            }

            let next_level: Vec<Digest> = prev_level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => algorithm.hash_pair(left, right),
                    // A trailing odd node moves up as-is, it is not rehashed
                    _ => pair[0],
                })
                .collect();

            levels.push(next_level);
        }

        MerkleTree { algorithm, levels }
    }
}

impl Default for MerkleTreeBuilder {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}
