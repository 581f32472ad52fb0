//! Record sets

use crate::primitives::RecordSetId;

/// A named, typed collection of records hashed as one unit.
///
/// Record order is significant: it fixes the leaf order of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    id: RecordSetId,
    records: Vec<Vec<u8>>,
}

impl RecordSet {
    pub fn new(id: RecordSetId, records: Vec<Vec<u8>>) -> Self {
        Self { id, records }
    }

    /// Build a record set from presentation-format text records
    pub fn from_text<I, S>(id: RecordSetId, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = records
            .into_iter()
            .map(|r| r.into().into_bytes())
            .collect();
        Self { id, records }
    }

    pub fn id(&self) -> &RecordSetId {
        &self.id
    }

    pub fn records(&self) -> &[Vec<u8>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.records.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_preserves_order_and_bytes() {
        let id = RecordSetId::new("aiori.in.", "A").unwrap();
        let set = RecordSet::from_text(
            id.clone(),
            ["aiori.in. 3600 IN A 192.0.2.1", "aiori.in. 3600 IN A 192.0.2.2"],
        );

        assert_eq!(set.id(), &id);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(&b"aiori.in. 3600 IN A 192.0.2.1"[..]));
        assert_eq!(set.get(1), Some(&b"aiori.in. 3600 IN A 192.0.2.2"[..]));
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn test_empty_record_set() {
        let id = RecordSetId::new("aiori.in.", "MX").unwrap();
        let set = RecordSet::new(id, Vec::new());
        assert!(set.is_empty());
        assert!(set.records().is_empty());
    }
}
