//! On-disk epoch state backed by sled
//!
//! Only the latest root of each record set is kept, keyed by the textual
//! record-set id.

use mtl_core::{EpochError, EpochState};
use mtl_types::{Digest, RecordSetId};
use sled::Db;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct SledEpochState {
    db: Db,
}

impl SledEpochState {
    /// Open or create the epoch database at the given path
    pub fn open(path: &Path) -> Result<Self, EpochError> {
        let db = sled::open(path)
            .map_err(|e| EpochError::Storage(format!("Failed to open database: {}", e)))?;

        info!("Opened epoch database at {}", path.display());
        Ok(Self { db })
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    fn decode_root(bytes: &[u8]) -> Result<Digest, EpochError> {
        Digest::from_slice(bytes)
            .map_err(|e| EpochError::Storage(format!("Invalid root in database: {}", e)))
    }
}

impl EpochState for SledEpochState {
    fn prior_root(&self, id: &RecordSetId) -> Result<Digest, EpochError> {
        let value = self
            .db
            .get(id.to_string())
            .map_err(|e| EpochError::Storage(format!("Failed to read root: {}", e)))?;

        match value {
            Some(bytes) => Self::decode_root(&bytes),
            None => Ok(Digest::ZERO),
        }
    }

    fn swap_root(&self, id: &RecordSetId, root: Digest) -> Result<Digest, EpochError> {
        let key = id.to_string();

        // The stored value is decoded before anything is written, and the
        // swap only lands if nobody replaced it in between
        let prior = loop {
            let current = self
                .db
                .get(&key)
                .map_err(|e| EpochError::Storage(format!("Failed to read root: {}", e)))?;

            let prior = match &current {
                Some(bytes) => Self::decode_root(bytes)?,
                None => Digest::ZERO,
            };

            let swapped = self
                .db
                .compare_and_swap(&key, current, Some(root.as_bytes().to_vec()))
                .map_err(|e| EpochError::Storage(format!("Failed to store root: {}", e)))?;

            if swapped.is_ok() {
                break prior;
            }
        };

        if let Err(e) = self.db.flush() {
            warn!("Root for {} stored but not flushed: {}", id, e);
        }

        debug!("Epoch advanced for {}: {} -> {}", id, prior, root);
        Ok(prior)
    }

    fn roots(&self) -> Result<Vec<(RecordSetId, Digest)>, EpochError> {
        let mut roots = Vec::new();

        for item in self.db.iter() {
            let (key, value) = item
                .map_err(|e| EpochError::Storage(format!("Failed to iterate database: {}", e)))?;

            let id = std::str::from_utf8(&key)
                .map_err(|e| EpochError::Storage(format!("Invalid key in database: {}", e)))?
                .parse::<RecordSetId>()
                .map_err(|e| EpochError::Storage(format!("Invalid key in database: {}", e)))?;

            roots.push((id, Self::decode_root(&value)?));
        }

        Ok(roots)
    }
}
