//! Query engine: lookup, tree, proof and epoch chaining for one record set

use mtl_core::{observe, verify_inclusion, EpochState, MemoryEpochState, MerkleTree};
use mtl_types::{Digest, HashAlgorithm, InclusionProof, RecordSetId, Signature};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::epoch_db::SledEpochState;
use crate::error::Result;
use crate::present::txt_hint;
use crate::store::{RecordSetStore, ZoneStore};

/// Everything produced by one successful query
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub record_set: RecordSetId,
    pub algorithm: HashAlgorithm,
    /// Records as text, lossily decoded
    pub records: Vec<String>,
    pub root: Digest,
    pub signature: Signature,
    pub txt_hint: String,
    pub proof: InclusionProof,
}

/// Answers record-set queries with MTL signatures.
///
/// Lookup, root and proof errors are raised before the epoch is touched, so
/// a failed query never advances the stored root.
pub struct Resolver {
    store: Box<dyn RecordSetStore>,
    epochs: Box<dyn EpochState>,
    algorithm: HashAlgorithm,
    hint_ttl: u32,
}

impl Resolver {
    pub fn new(store: Box<dyn RecordSetStore>, epochs: Box<dyn EpochState>) -> Self {
        Self {
            store,
            epochs,
            algorithm: HashAlgorithm::default(),
            hint_ttl: 3600,
        }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_hint_ttl(mut self, ttl: u32) -> Self {
        self.hint_ttl = ttl;
        self
    }

    /// Build a resolver from configuration, opening the epoch database if
    /// one is configured
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        let store = ZoneStore::from_config(config)?;

        let epochs: Box<dyn EpochState> = match &config.epoch.path {
            Some(path) => Box::new(SledEpochState::open(path)?),
            None => {
                info!("No epoch path configured, roots are kept in memory");
                Box::new(MemoryEpochState::new())
            }
        };

        Ok(Self::new(Box::new(store), epochs)
            .with_algorithm(config.zone.hash)
            .with_hint_ttl(config.zone.hint_ttl))
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn types(&self) -> Vec<&str> {
        self.store.types()
    }

    /// Build the tree for a record set without touching the epoch
    pub fn tree(&self, rtype: &str) -> Result<MerkleTree> {
        let set = self.store.lookup(rtype)?;
        let tree = MerkleTree::from_records(self.algorithm, set.records());
        debug!(
            "Built tree for {}: {} leaves, {} levels",
            set.id(),
            tree.leaf_count(),
            tree.level_count()
        );
        Ok(tree)
    }

    /// Proof for one leaf without touching the epoch
    pub fn prove(&self, rtype: &str, leaf_index: usize) -> Result<InclusionProof> {
        Ok(self.tree(rtype)?.prove(leaf_index)?)
    }

    /// Run one query: sign the current contents of `rtype` against its
    /// prior root and prove `leaf_index`
    pub fn query(&self, rtype: &str, leaf_index: usize) -> Result<QueryReport> {
        match self.run_query(rtype, leaf_index) {
            Ok(report) => {
                info!(
                    "Answered {} with root {} signature {}",
                    report.record_set, report.root, report.signature
                );
                Ok(report)
            }
            Err(e) => {
                warn!("Query for {} rejected: {}", rtype, e);
                Err(e)
            }
        }
    }

    fn run_query(&self, rtype: &str, leaf_index: usize) -> Result<QueryReport> {
        let set = self.store.lookup(rtype)?;
        let tree = MerkleTree::from_records(self.algorithm, set.records());
        let root = tree.root()?;
        let proof = tree.prove(leaf_index)?;

        let signature = observe(self.epochs.as_ref(), self.algorithm, set.id(), root)?;

        Ok(QueryReport {
            record_set: set.id().clone(),
            algorithm: self.algorithm,
            records: set
                .records()
                .iter()
                .map(|r| String::from_utf8_lossy(r).into_owned())
                .collect(),
            root,
            signature,
            txt_hint: txt_hint(set.id().owner(), self.hint_ttl, &root),
            proof,
        })
    }

    /// Latest stored root for `rtype`, zero if never queried
    pub fn prior_root(&self, rtype: &str) -> Result<Digest> {
        let set = self.store.lookup(rtype)?;
        Ok(self.epochs.prior_root(set.id())?)
    }

    /// Every stored root
    pub fn latest_roots(&self) -> Result<Vec<(RecordSetId, Digest)>> {
        Ok(self.epochs.roots()?)
    }

    /// Check an exported proof for `record` against `root`
    pub fn verify(&self, record: &[u8], proof: &InclusionProof, root: &Digest) -> Result<()> {
        verify_inclusion(record, proof, root)?;
        Ok(())
    }
}

/// Check an exported proof for `record` against `root`.
///
/// Needs neither a record store nor epoch state, so it works without a
/// configuration and while another process holds the epoch database.
pub fn verify_exported(record: &[u8], proof_json: &str, root: &Digest) -> Result<InclusionProof> {
    let proof = InclusionProof::from_json(proof_json)?;
    verify_inclusion(record, &proof, root)?;
    Ok(proof)
}
