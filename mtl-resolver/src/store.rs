//! Record-set store

use mtl_types::{RecordSet, RecordSetId};
use thiserror::Error;

use crate::config::ResolverConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record set type {0} not found")]
    UnknownRecordSetType(String),

    #[error("Invalid record set: {0}")]
    InvalidRecordSet(String),
}

/// Source of record sets, looked up by exact type key
pub trait RecordSetStore: Send + Sync {
    fn lookup(&self, rtype: &str) -> Result<&RecordSet, StoreError>;

    /// Type keys served, in store order
    fn types(&self) -> Vec<&str>;
}

/// The record sets of a single zone, held in memory
#[derive(Debug, Clone, Default)]
pub struct ZoneStore {
    origin: String,
    record_sets: Vec<RecordSet>,
}

impl ZoneStore {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            record_sets: Vec::new(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, StoreError> {
        let mut store = Self::new(config.zone.origin.clone());
        for set in &config.record_sets {
            store.insert(&set.rtype, set.records.iter().cloned())?;
        }
        Ok(store)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Add or replace the record set for `rtype`
    pub fn insert<I, S>(&mut self, rtype: &str, records: I) -> Result<RecordSetId, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = RecordSetId::new(self.origin.clone(), rtype)
            .map_err(|e| StoreError::InvalidRecordSet(e.to_string()))?;
        let set = RecordSet::from_text(id.clone(), records);

        match self.record_sets.iter_mut().find(|s| s.id().rtype() == rtype) {
            Some(existing) => *existing = set,
            None => self.record_sets.push(set),
        }

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.record_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_sets.is_empty()
    }
}

impl RecordSetStore for ZoneStore {
    fn lookup(&self, rtype: &str) -> Result<&RecordSet, StoreError> {
        self.record_sets
            .iter()
            .find(|s| s.id().rtype() == rtype)
            .ok_or_else(|| StoreError::UnknownRecordSetType(rtype.to_string()))
    }

    fn types(&self) -> Vec<&str> {
        self.record_sets.iter().map(|s| s.id().rtype()).collect()
    }
}
