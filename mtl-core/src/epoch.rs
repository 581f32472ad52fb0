//! Cross-epoch chaining of record-set roots
//!
//! Every observation of a record set chains its fresh root to the root seen
//! at the previous observation, `signature = H(current_root || prior_root)`,
//! and then remembers the fresh root for next time.

use mtl_types::{Digest, HashAlgorithm, RecordSetId, Signature};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpochError {
    #[error("Epoch storage error: {0}")]
    Storage(String),
}

/// Latest observed root per record-set identity.
///
/// Identities that were never observed read as [`Digest::ZERO`].
/// Implementations must make [`swap_root`](EpochState::swap_root) atomic per
/// identity: two concurrent swaps on one identity each see the root the
/// other stored, never the same prior root twice.
pub trait EpochState: Send + Sync {
    /// Current prior root for `id`
    fn prior_root(&self, id: &RecordSetId) -> Result<Digest, EpochError>;

    /// Store `root` for `id` and return the root it replaced
    fn swap_root(&self, id: &RecordSetId, root: Digest) -> Result<Digest, EpochError>;

    /// Every identity observed so far with its latest root
    fn roots(&self) -> Result<Vec<(RecordSetId, Digest)>, EpochError>;
}

impl<T: EpochState + ?Sized> EpochState for Arc<T> {
    fn prior_root(&self, id: &RecordSetId) -> Result<Digest, EpochError> {
        (**self).prior_root(id)
    }

    fn swap_root(&self, id: &RecordSetId, root: Digest) -> Result<Digest, EpochError> {
        (**self).swap_root(id, root)
    }

    fn roots(&self) -> Result<Vec<(RecordSetId, Digest)>, EpochError> {
        (**self).roots()
    }
}

/// Chain a fresh root to the prior one
pub fn chain(algorithm: HashAlgorithm, current_root: &Digest, prior_root: &Digest) -> Signature {
    Signature::new(algorithm.hash_pair(current_root, prior_root))
}

/// Observe `current_root` for `id`: chain it to the stored prior root and
/// make it the new prior root.
pub fn observe<S>(
    state: &S,
    algorithm: HashAlgorithm,
    id: &RecordSetId,
    current_root: Digest,
) -> Result<Signature, EpochError>
where
    S: EpochState + ?Sized,
{
    let prior_root = state.swap_root(id, current_root)?;
    Ok(chain(algorithm, &current_root, &prior_root))
}

/// In-process epoch state
#[derive(Debug, Default)]
pub struct MemoryEpochState {
    roots: RwLock<HashMap<RecordSetId, Digest>>,
}

impl MemoryEpochState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Writers never leave the map half-updated, so a poisoned lock is still usable
impl EpochState for MemoryEpochState {
    fn prior_root(&self, id: &RecordSetId) -> Result<Digest, EpochError> {
        let roots = self.roots.read().unwrap_or_else(PoisonError::into_inner);
        Ok(roots.get(id).copied().unwrap_or(Digest::ZERO))
    }

    fn swap_root(&self, id: &RecordSetId, root: Digest) -> Result<Digest, EpochError> {
        let mut roots = self.roots.write().unwrap_or_else(PoisonError::into_inner);
        Ok(roots.insert(id.clone(), root).unwrap_or(Digest::ZERO))
    }

    fn roots(&self) -> Result<Vec<(RecordSetId, Digest)>, EpochError> {
        let roots = self.roots.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<(RecordSetId, Digest)> =
            roots.iter().map(|(id, root)| (id.clone(), *root)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}
