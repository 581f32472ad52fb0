//! Inclusion proofs

use crate::error::Result;
use crate::hash::HashAlgorithm;
use crate::primitives::Digest;
use serde::{Deserialize, Serialize};

/// Sibling path from one leaf to the root.
///
/// `siblings[level]` is the sibling of the running node at that level, or
/// `None` where the node had no sibling and was carried up unchanged. Which
/// side a sibling sits on is implied by `leaf_index`: an even position at a
/// level takes its sibling on the right, an odd position on the left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Hash algorithm of the tree the proof was taken from
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    /// The leaf index in the tree
    pub leaf_index: u64,
    /// One entry per level below the root
    pub siblings: Vec<Option<Digest>>,
}

impl InclusionProof {
    /// Parse an exported proof
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Recompute the root from a leaf hash
    pub fn compute_root(&self, leaf_hash: &Digest) -> Digest {
        let mut current = *leaf_hash;
        let mut position = self.leaf_index;

        for sibling in &self.siblings {
            if let Some(sibling) = sibling {
                current = if position % 2 == 0 {
                    self.algorithm.hash_pair(&current, sibling)
                } else {
                    self.algorithm.hash_pair(sibling, &current)
                };
            }
            position /= 2;
        }

        current
    }

    /// Recompute the root from a record's raw bytes
    pub fn compute_root_for_record(&self, record: &[u8]) -> Digest {
        self.compute_root(&self.algorithm.leaf_hash(record))
    }

    /// Number of levels covered, carried levels included
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Number of levels where the node was carried without a sibling
    pub fn carried_levels(&self) -> usize {
        self.siblings.iter().filter(|s| s.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_pair;

    #[test]
    fn test_two_leaf_paths() {
        let leaf0 = Digest::new([1u8; 32]);
        let leaf1 = Digest::new([2u8; 32]);
        let root = hash_pair(&leaf0, &leaf1);

        let path0 = InclusionProof {
            algorithm: HashAlgorithm::Sha256,
            leaf_index: 0,
            siblings: vec![Some(leaf1)],
        };
        let path1 = InclusionProof {
            algorithm: HashAlgorithm::Sha256,
            leaf_index: 1,
            siblings: vec![Some(leaf0)],
        };

        assert_eq!(path0.compute_root(&leaf0), root);
        assert_eq!(path1.compute_root(&leaf1), root);
    }

    #[test]
    fn test_carried_level_is_skipped() {
        // Leaf 2 of [L0, L1, L2]: carried at level 0, right operand above
        let l0 = Digest::new([1u8; 32]);
        let l1 = Digest::new([2u8; 32]);
        let l2 = Digest::new([3u8; 32]);
        let left = hash_pair(&l0, &l1);

        let proof = InclusionProof {
            algorithm: HashAlgorithm::Sha256,
            leaf_index: 2,
            siblings: vec![None, Some(left)],
        };

        assert_eq!(proof.compute_root(&l2), hash_pair(&left, &l2));
        assert_eq!(proof.depth(), 2);
        assert_eq!(proof.carried_levels(), 1);
    }

    #[test]
    fn test_empty_path_is_identity() {
        let leaf = Digest::new([9u8; 32]);
        let proof = InclusionProof {
            algorithm: HashAlgorithm::Blake3,
            leaf_index: 0,
            siblings: vec![],
        };
        assert_eq!(proof.compute_root(&leaf), leaf);
    }

    #[test]
    fn test_json_shape() {
        let proof = InclusionProof {
            algorithm: HashAlgorithm::Sha256,
            leaf_index: 2,
            siblings: vec![None, Some(Digest::new([0xAAu8; 32]))],
        };

        let value = serde_json::to_value(&proof).unwrap();
        assert_eq!(value["algorithm"], "sha256");
        assert_eq!(value["leaf_index"], 2);
        assert!(value["siblings"][0].is_null());
        assert_eq!(value["siblings"][1], "aa".repeat(32));

        let parsed: InclusionProof = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, proof);
    }

    #[test]
    fn test_missing_algorithm_defaults_to_sha256() {
        let json = r#"{"leaf_index":0,"siblings":[]}"#;
        let proof: InclusionProof = serde_json::from_str(json).unwrap();
        assert_eq!(proof.algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_from_json_reports_malformed_proof() {
        let proof = InclusionProof::from_json(r#"{"leaf_index":1,"siblings":[null]}"#).unwrap();
        assert_eq!(proof.leaf_index, 1);
        assert_eq!(proof.carried_levels(), 1);

        assert!(matches!(
            InclusionProof::from_json(r#"{"leaf_index":"one"}"#),
            Err(crate::Error::Serialization(_))
        ));
    }
}
