//! MTL Resolver
//!
//! Serves the record sets of one zone and answers each query with an
//! MTL signature chained to the previous observation, a `mtlroot=` TXT
//! hint and an inclusion proof for the requested record.

pub mod config;
pub mod epoch_db;
pub mod error;
pub mod present;
pub mod query;
pub mod store;

pub use config::{ConfigError, ResolverConfig};
pub use epoch_db::SledEpochState;
pub use error::{ResolverError, Result};
pub use query::{QueryReport, Resolver};
pub use store::{RecordSetStore, StoreError, ZoneStore};
