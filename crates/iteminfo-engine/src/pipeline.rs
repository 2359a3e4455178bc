//! End-to-end reconciliation: read both databases, add missing items, write
//! the updated script and the optional TSV dumps.

use std::path::PathBuf;

use crate::derive::DeriveFields;
use crate::export::write_tsv;
use crate::io::{Codepage, IoError, read_text, write_text};
use crate::item_db::parse_item_db_into;
use crate::merge::{MergeReport, merge_missing};
use crate::models::{FlatTable, ItemMap};
use crate::script::{Diagnostic, parse_script, serialize};

/// Paths and encoding for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileJob {
    /// Flat tables, read in order; later rows override earlier ones.
    pub item_db_paths: Vec<PathBuf>,
    pub script_path: PathBuf,
    pub output_script_path: PathBuf,
    /// TSV dump of the merged script records.
    pub output_tsv_path: Option<PathBuf>,
    /// TSV dump of the flat table.
    pub flat_tsv_path: Option<PathBuf>,
    pub codepage: Codepage,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub items_parsed: usize,
    pub lines_read: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub item_db_items: usize,
    pub item_db_rows_skipped: usize,
    pub merge: MergeReport,
}

impl ReconcileSummary {
    pub fn items_added(&self) -> usize {
        self.merge.added.len()
    }

    pub fn lines_flagged(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Runs the whole reconciliation. Any read or write failure aborts the run;
/// script findings and derivation failures are collected in the summary.
pub fn reconcile<D>(job: &ReconcileJob, deriver: &D) -> Result<ReconcileSummary, IoError>
where
    D: DeriveFields + ?Sized,
{
    let mut table = FlatTable::new();
    let mut item_db_rows_skipped = 0;
    for path in &job.item_db_paths {
        log::info!("Opening: {}", path.display());
        let scan = parse_item_db_into(&read_text(path, job.codepage)?, table);
        item_db_rows_skipped += scan.skipped.len();
        table = scan.items;
    }

    log::info!("Opening: {}", job.script_path.display());
    let parsed = parse_script(&read_text(&job.script_path, job.codepage)?);
    let items_parsed = parsed.document.item_count();
    let mut doc = parsed.document;

    let merge = merge_missing(&mut doc, &table, deriver);

    if let Some(path) = &job.flat_tsv_path {
        let flat: ItemMap = table
            .iter()
            .map(|(id, item)| (id.clone(), item.to_record()))
            .collect();
        write_text(path, &write_tsv(&flat), job.codepage)?;
        log::info!("Wrote {} items to: {}", flat.len(), path.display());
    }

    if let Some(path) = &job.output_tsv_path {
        write_text(path, &write_tsv(&doc.records), job.codepage)?;
        log::info!("Wrote {} items to: {}", doc.item_count(), path.display());
    }

    write_text(&job.output_script_path, &serialize(&doc), job.codepage)?;
    log::info!(
        "Wrote {} items to: {}",
        doc.item_count(),
        job.output_script_path.display()
    );

    Ok(ReconcileSummary {
        items_parsed,
        lines_read: parsed.lines_read,
        diagnostics: parsed.diagnostics,
        item_db_items: table.len(),
        item_db_rows_skipped,
        merge,
    })
}
