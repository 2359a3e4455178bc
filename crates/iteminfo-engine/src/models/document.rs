use std::collections::BTreeMap;

use super::{ItemId, ItemRecord};

/// Item records keyed by id, iterated in ascending numeric id order.
pub type ItemMap = BTreeMap<ItemId, ItemRecord>;

/// A presentation script split into its verbatim head, its item data and its
/// verbatim tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Everything before the first item header, byte for byte.
    pub preamble: String,
    pub records: ItemMap,
    /// The end-of-data marker line and everything after it, byte for byte.
    pub trailer: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemRecord> {
        self.records.get(id)
    }

    /// Returns the record for `id`, creating an empty one when missing.
    /// Fields already present are left untouched.
    pub fn open_record(&mut self, id: ItemId) -> &mut ItemRecord {
        self.records.entry(id).or_default()
    }
}
