//! Resolver configuration

use mtl_types::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides `epoch.path`
pub const EPOCH_PATH_ENV: &str = "MTL_EPOCH_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Zone served by this resolver
    pub zone: ZoneConfig,

    /// Where latest roots are kept between queries
    #[serde(default)]
    pub epoch: EpochConfig,

    /// Record sets of the zone, one per type key
    #[serde(default)]
    pub record_sets: Vec<RecordSetConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Owner name of every record set and of the root hint
    pub origin: String,

    /// TTL published on the `mtlroot=` TXT hint
    #[serde(default = "default_hint_ttl")]
    pub hint_ttl: u32,

    /// Hash algorithm for trees and signatures
    #[serde(default)]
    pub hash: HashAlgorithm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpochConfig {
    /// sled database directory; in-memory state when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSetConfig {
    /// Type key, matched exactly on lookup
    pub rtype: String,

    /// Records in presentation format, in leaf order
    #[serde(default)]
    pub records: Vec<String>,
}

fn default_hint_ttl() -> u32 {
    3600
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            zone: ZoneConfig {
                origin: "aiori.in.".to_string(),
                hint_ttl: default_hint_ttl(),
                hash: HashAlgorithm::Sha256,
            },
            epoch: EpochConfig {
                path: Some(PathBuf::from(".mtl/epochs")),
            },
            record_sets: vec![
                RecordSetConfig {
                    rtype: "A".to_string(),
                    records: vec![
                        "aiori.in. 3600 IN A 192.0.2.1".to_string(),
                        "aiori.in. 3600 IN A 192.0.2.2".to_string(),
                        "aiori.in. 3600 IN A 192.0.2.3".to_string(),
                        "aiori.in. 3600 IN A 192.0.2.4".to_string(),
                        "aiori.in. 3600 IN A 192.0.2.5".to_string(),
                    ],
                },
                RecordSetConfig {
                    rtype: "AAAA".to_string(),
                    records: vec![
                        "aiori.in. 3600 IN AAAA 2001:db8::1".to_string(),
                        "aiori.in. 3600 IN AAAA 2001:db8::2".to_string(),
                        "aiori.in. 3600 IN AAAA 2001:db8::3".to_string(),
                    ],
                },
                RecordSetConfig {
                    rtype: "TXT".to_string(),
                    records: vec![
                        "aiori.in. 3600 IN TXT \"v=spf1 a mx -all\"".to_string(),
                        "aiori.in. 3600 IN TXT \"description=example site\"".to_string(),
                        "aiori.in 3600 IN TXT \"contact=email@example.com\"".to_string(),
                    ],
                },
            ],
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env_overrides(std::env::var(EPOCH_PATH_ENV).ok());
        Ok(config)
    }

    /// Apply the value of `MTL_EPOCH_PATH`, if it was set
    pub fn apply_env_overrides(&mut self, epoch_path: Option<String>) {
        if let Some(epoch_path) = epoch_path {
            self.epoch.path = Some(PathBuf::from(epoch_path));
        }
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone.origin.trim().is_empty() {
            return Err(ConfigError::Invalid("zone.origin is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for set in &self.record_sets {
            if set.rtype.is_empty() {
                return Err(ConfigError::Invalid("record set with empty rtype".to_string()));
            }
            if !seen.insert(set.rtype.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate record set type {:?}",
                    set.rtype
                )));
            }
        }

        Ok(())
    }

    /// Type keys in configuration order
    pub fn types(&self) -> Vec<&str> {
        self.record_sets.iter().map(|s| s.rtype.as_str()).collect()
    }
}
