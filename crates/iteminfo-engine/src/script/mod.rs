//! # Item-info script handling
//!
//! The presentation script is a table literal of item blocks sandwiched
//! between free-form code. Only the item blocks are interpreted.
//!
//! ## Phases
//!
//! 1. **Line classification** (`classify`): each line is matched against an
//!    ordered set of line shapes and turned into a [`LineKind`].
//! 2. **Scanning** (`scanner`): a [`ScriptParser`] moves through
//!    preamble, body and trailer states and builds a [`Document`].
//! 3. **Serialization** (`serialize`): [`serialize`] writes a document back
//!    with canonical indentation and quoting.
//!
//! ## Key Invariants
//!
//! - Preamble and trailer text is kept byte for byte
//! - Nothing after the end-of-data marker is interpreted
//! - Re-parsing serialized output yields the same records
//!
//! [`Document`]: crate::models::Document

pub mod classify;
pub mod diagnostics;
pub mod scanner;
pub mod serialize;

pub use classify::{LineKind, ScriptLineClassifier};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use scanner::{ParsedScript, ScanState, ScriptParser};
pub use serialize::serialize;

use crate::models::ItemMap;

/// Scans a whole script held in memory.
pub fn parse_script(text: &str) -> ParsedScript {
    parse_script_into(text, ItemMap::new())
}

/// Scans a script on top of records collected from earlier scripts.
pub fn parse_script_into(text: &str, records: ItemMap) -> ParsedScript {
    let mut parser = ScriptParser::with_records(records);
    for line in text.split_inclusive('\n') {
        parser.push(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests;
