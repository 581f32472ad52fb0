//! Primitive value types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte digest (tree node, root or leaf hash)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; 32]);

// Serialize as hex so proofs and reports stay readable as JSON
impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl Digest {
    pub const LEN: usize = 32;

    /// The all-zero digest, used as the prior root of an unseen record set
    pub const ZERO: Digest = Digest([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != Self::LEN {
            return Err(Error::InvalidDigestLength {
                expected: Self::LEN,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Fixed-width lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An MTL signature: the pair hash of the current root and the prior root
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Digest);

impl Signature {
    pub fn new(digest: Digest) -> Self {
        Self(digest)
    }

    pub fn digest(&self) -> &Digest {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Digest::from_hex(s).map(Self)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", hex::encode(&self.0.as_bytes()[..8]))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Stable identity of a record set: owner name plus type key.
///
/// Rendered as `<owner>/<rtype>`, e.g. `aiori.in./AAAA`. The type key may not
/// contain `/`, so the last separator always splits the two halves.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordSetId {
    owner: String,
    rtype: String,
}

impl RecordSetId {
    pub fn new(owner: impl Into<String>, rtype: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let rtype = rtype.into();
        if owner.is_empty() {
            return Err(Error::InvalidRecordSetId("owner name is empty".to_string()));
        }
        if rtype.is_empty() || rtype.contains('/') || rtype.contains(char::is_whitespace) {
            return Err(Error::InvalidRecordSetId(format!(
                "invalid type key {:?}",
                rtype
            )));
        }
        Ok(Self { owner, rtype })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn rtype(&self) -> &str {
        &self.rtype
    }
}

impl fmt::Debug for RecordSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordSetId({}/{})", self.owner, self.rtype)
    }
}

impl fmt::Display for RecordSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.rtype)
    }
}

impl FromStr for RecordSetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, rtype) = s
            .rsplit_once('/')
            .ok_or_else(|| Error::InvalidRecordSetId(format!("missing '/' in {:?}", s)))?;
        Self::new(owner, rtype)
    }
}

impl Serialize for RecordSetId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordSetId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
