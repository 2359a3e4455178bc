use std::collections::HashSet;

use crate::derive::{DeriveError, DeriveFields};
use crate::models::{Document, FlatTable, ItemId};

/// Outcome of adding flat-table items to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Ids that received a new derived record.
    pub added: Vec<ItemId>,
    /// Ids already described by the document and left untouched.
    pub already_present: usize,
    /// Ids whose record could not be derived.
    pub failed: Vec<(ItemId, DeriveError)>,
}

/// Adds a derived record for every flat item the document does not describe.
///
/// Ids are matched by numeric value, so `0501` in the table and `501` in the
/// script are the same item. Existing records are never modified. A failed
/// derivation is reported and the remaining items are still merged.
pub fn merge_missing<D>(doc: &mut Document, table: &FlatTable, deriver: &D) -> MergeReport
where
    D: DeriveFields + ?Sized,
{
    let mut report = MergeReport::default();
    let mut present: HashSet<u32> = doc.records.keys().map(ItemId::value).collect();

    for (id, item) in table {
        if !present.insert(id.value()) {
            report.already_present += 1;
            continue;
        }
        match deriver.derive(item) {
            Ok(record) => {
                log::debug!("Adding item {id}");
                doc.records.insert(id.clone(), record);
                report.added.push(id.clone());
            }
            Err(err) => {
                log::warn!("Cannot derive item {id}: {err}");
                report.failed.push((id.clone(), err));
            }
        }
    }

    log::info!(
        "Merged item table: {} added, {} already present, {} failed",
        report.added.len(),
        report.already_present,
        report.failed.len()
    );
    report
}
