pub mod derive;
pub mod export;
pub mod io;
pub mod item_db;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod script;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use derive::{DefaultDeriver, DeriveError, DeriveFields};
pub use export::write_tsv;
pub use io::{Codepage, IoError};
pub use item_db::{ItemDbScan, parse_item_db, parse_item_db_into};
pub use merge::{MergeReport, merge_missing};
pub use models::*;
pub use pipeline::{ReconcileJob, ReconcileSummary, reconcile};
pub use script::{
    Diagnostic, DiagnosticKind, LineKind, ParsedScript, ScriptParser, parse_script,
    parse_script_into, serialize,
};
